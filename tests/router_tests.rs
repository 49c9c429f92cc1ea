// Host-side tests for configuration loading, fallback and notification.

mod common;

use common::*;
use pano_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::task::Poll;

const DEFAULT: &str = "1a5ab6424adfa1e1";

fn router(source: MapSource) -> Router<MapSource, MemoryStore> {
    Router::new(ProductCatalog::builtin(), source, MemoryStore::new())
}

fn record_notifications<S: ConfigSource, K: KeyStore>(router: &Router<S, K>) -> Rc<RefCell<Vec<String>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    router.on_loaded(move |loaded| sink.borrow_mut().push(loaded.key.clone()));
    seen
}

#[test]
fn successful_load_notifies_exactly_once_and_persists() {
    let r = router(MapSource::default().with(SINGLE_SCENE_KEY, Ok(SINGLE_SCENE_JSON)));
    let seen = record_notifications(&r);

    let loaded = pollster::block_on(r.load(SINGLE_SCENE_KEY)).unwrap();
    assert_eq!(loaded.key, SINGLE_SCENE_KEY);
    assert_eq!(loaded.config.scenes[0].face_size, 3072);
    assert_eq!(*seen.borrow(), vec![SINGLE_SCENE_KEY.to_string()]);
    assert_eq!(r.last_loaded().as_deref(), Some(SINGLE_SCENE_KEY));
    assert_eq!(*r.source().calls.borrow(), vec![SINGLE_SCENE_KEY.to_string()]);
}

#[test]
fn failed_key_retries_default_exactly_once() {
    let r = router(
        MapSource::default()
            .with("0020ca9e6b6b5d9d", Err(404))
            .with(DEFAULT, Ok(SINGLE_SCENE_JSON)),
    );
    let seen = record_notifications(&r);

    let loaded = pollster::block_on(r.load("0020ca9e6b6b5d9d")).unwrap();
    assert_eq!(loaded.key, DEFAULT);
    assert_eq!(
        *r.source().calls.borrow(),
        vec!["0020ca9e6b6b5d9d".to_string(), DEFAULT.to_string()]
    );
    // only the successful default load notifies
    assert_eq!(*seen.borrow(), vec![DEFAULT.to_string()]);
    assert_eq!(r.last_loaded().as_deref(), Some(DEFAULT));
}

#[test]
fn failed_default_is_not_retried() {
    let r = router(MapSource::default().with(DEFAULT, Err(500)));
    let seen = record_notifications(&r);

    let err = pollster::block_on(r.load(DEFAULT)).unwrap_err();
    assert!(matches!(err, LoadError::Status { status: 500, .. }));
    assert_eq!(*r.source().calls.borrow(), vec![DEFAULT.to_string()]);
    assert!(seen.borrow().is_empty());
    assert_eq!(r.last_loaded(), None);
}

#[test]
fn failed_key_and_failed_default_stop_after_two_attempts() {
    let r = router(MapSource::default());
    let seen = record_notifications(&r);

    let err = pollster::block_on(r.load(SINGLE_SCENE_KEY)).unwrap_err();
    assert_eq!(err.key(), DEFAULT);
    assert_eq!(r.source().calls.borrow().len(), 2);
    assert!(seen.borrow().is_empty());
}

#[test]
fn invalid_configuration_counts_as_a_failed_load() {
    let r = router(
        MapSource::default()
            .with(SINGLE_SCENE_KEY, Ok(r#"{ "scenes": [] }"#))
            .with(DEFAULT, Ok(OTHER_JSON)),
    );
    let loaded = pollster::block_on(r.load(SINGLE_SCENE_KEY)).unwrap();
    assert_eq!(loaded.key, DEFAULT);
}

#[test]
fn unknown_key_loads_default_without_fetching_it() {
    let r = router(MapSource::default().with(DEFAULT, Ok(SINGLE_SCENE_JSON)));
    let loaded = pollster::block_on(r.load("../../etc/passwd")).unwrap();
    assert_eq!(loaded.key, DEFAULT);
    assert_eq!(*r.source().calls.borrow(), vec![DEFAULT.to_string()]);
}

#[test]
fn newer_load_supersedes_one_in_flight() {
    let r = router(MapSource {
        yielding: true,
        ..MapSource::default()
            .with(SINGLE_SCENE_KEY, Ok(SINGLE_SCENE_JSON))
            .with("0020ca9e6b6b5d9d", Ok(OTHER_JSON))
    });
    let seen = record_notifications(&r);

    let mut first = Box::pin(r.load(SINGLE_SCENE_KEY));
    assert!(poll_once(first.as_mut()).is_pending());

    let second = pollster::block_on(r.load("0020ca9e6b6b5d9d")).unwrap();
    assert_eq!(second.key, "0020ca9e6b6b5d9d");

    match poll_once(first.as_mut()) {
        Poll::Ready(Err(LoadError::Superseded { key })) => assert_eq!(key, SINGLE_SCENE_KEY),
        other => panic!("expected superseded load, got {:?}", other.map(|r| r.map(|l| l.key))),
    }
    assert_eq!(*seen.borrow(), vec!["0020ca9e6b6b5d9d".to_string()]);
    assert_eq!(r.last_loaded().as_deref(), Some("0020ca9e6b6b5d9d"));
}

#[test]
fn listeners_registered_during_notification_are_kept() {
    let r = Rc::new(router(MapSource::default().with(SINGLE_SCENE_KEY, Ok(SINGLE_SCENE_JSON))));
    let late = Rc::new(RefCell::new(0usize));
    {
        let r2 = Rc::downgrade(&r);
        let late = late.clone();
        let mut registered = false;
        r.on_loaded(move |_| {
            if registered {
                return;
            }
            registered = true;
            if let Some(r2) = r2.upgrade() {
                let late = late.clone();
                r2.on_loaded(move |_| *late.borrow_mut() += 1);
            }
        });
    }
    pollster::block_on(r.load(SINGLE_SCENE_KEY)).unwrap();
    assert_eq!(*late.borrow(), 0);
    pollster::block_on(r.load(SINGLE_SCENE_KEY)).unwrap();
    assert_eq!(*late.borrow(), 1);
}

#[test]
fn current_product_follows_query_resolution() {
    let r = router(MapSource::default());
    assert_eq!(r.current_product(Some("0020ca9e6b6b5d9d")), "0020ca9e6b6b5d9d");
    assert_eq!(r.current_product(Some("zzz")), DEFAULT);
    assert_eq!(r.current_product(None), DEFAULT);
}
