use anyhow::Context;
use clap::Parser;
use pano_core::{
    ConfigSource, LoadError, LoadedProduct, MemoryStore, ProductCatalog, ProductConfig, Router,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check panorama product configurations load without fallback")]
struct Args {
    /// Directory holding `<key>.json` product configurations
    #[arg(default_value = "data")]
    dir: PathBuf,

    /// Products to check (default: every product in the catalog)
    keys: Vec<String>,
}

/// Reads `<dir>/<key>.json` from disk.
struct DirSource {
    dir: PathBuf,
}

impl ConfigSource for DirSource {
    async fn fetch(&self, key: &str) -> Result<ProductConfig, LoadError> {
        let path = self.dir.join(format!("{key}.json"));
        let text = std::fs::read_to_string(&path).map_err(|e| LoadError::Fetch {
            key: key.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;
        ProductConfig::from_json(&text).map_err(|e| LoadError::invalid(key, e))
    }
}

fn describe(loaded: &LoadedProduct) {
    let config = &loaded.config;
    println!(
        "{}  {:?}  {} scene(s)  mouse={}",
        loaded.key,
        config.name,
        config.scenes.len(),
        config.settings.mouse_view_mode.as_str()
    );
    for scene in &config.scenes {
        let sizes: Vec<String> = scene.levels.iter().map(|l| l.size.to_string()).collect();
        println!(
            "    {:<24} face={:<5} levels=[{}] links={} infos={}",
            scene.id,
            scene.face_size,
            sizes.join(","),
            scene.link_hotspots.len(),
            scene.info_hotspots.len()
        );
    }
    for (scene, target) in config.dangling_links() {
        println!("    ! {scene} links to missing scene {target}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { dir, keys } = Args::parse();
    std::fs::metadata(&dir).with_context(|| format!("data directory {}", dir.display()))?;
    let catalog = ProductCatalog::builtin();
    let keys: Vec<String> = if keys.is_empty() {
        catalog.keys().map(str::to_string).collect()
    } else {
        keys
    };

    let mut failed = 0usize;
    for key in &keys {
        let router = Router::new(
            catalog.clone(),
            DirSource { dir: dir.clone() },
            MemoryStore::new(),
        );
        match pollster::block_on(router.load(key)) {
            Ok(loaded) if &loaded.key == key => describe(&loaded),
            Ok(loaded) => {
                failed += 1;
                println!("{key}  FAILED, viewer would fall back to {}", loaded.key);
            }
            Err(e) => {
                failed += 1;
                println!("{key}  FAILED: {e}");
            }
        }
    }

    log::info!(
        "[check] {} of {} product(s) load directly from {}",
        keys.len() - failed,
        keys.len(),
        dir.display()
    );
    if failed > 0 {
        anyhow::bail!("{failed} product(s) failed to load");
    }
    Ok(())
}
