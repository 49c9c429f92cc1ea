pub mod catalog;
pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod loader;
pub mod route;
pub mod router;
pub mod ui;
pub mod view;

pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use engine::*;
pub use loader::*;
pub use route::*;
pub use router::*;
pub use ui::*;
pub use view::*;
