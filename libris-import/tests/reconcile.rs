use libris_catalog::types::*;
use libris_db::Gateway;
use libris_import::EntityReconciler;

#[test]
fn resolving_twice_returns_same_author() {
    let gateway = Gateway::open_memory().unwrap();
    let reconciler = EntityReconciler::new(gateway.clone());

    let first = reconciler.resolve_author("AUTOR 1").unwrap();
    let second = reconciler.resolve_author("AUTOR 1").unwrap();

    assert!(first.id.is_some());
    assert_eq!(first, second);
    assert_eq!(gateway.find_all::<Author>().unwrap().len(), 1);
}

#[test]
fn existing_publisher_is_reused() {
    let gateway = Gateway::open_memory().unwrap();
    let existing = gateway.save(&Publisher::named("EDITORA 1")).unwrap();

    let reconciler = EntityReconciler::new(gateway.clone());
    let resolved = reconciler.resolve_publisher("EDITORA 1").unwrap();

    assert_eq!(resolved.id, existing.id);
    assert_eq!(gateway.find_all::<Publisher>().unwrap().len(), 1);
}

#[test]
fn names_match_exactly() {
    let gateway = Gateway::open_memory().unwrap();
    let reconciler = EntityReconciler::new(gateway.clone());

    let upper = reconciler.resolve_author("AUTOR").unwrap();
    let lower = reconciler.resolve_author("autor").unwrap();

    assert_ne!(upper.id, lower.id);
    assert_eq!(gateway.find_all::<Author>().unwrap().len(), 2);
}

#[test]
fn authors_and_publishers_are_separate_namespaces() {
    let gateway = Gateway::open_memory().unwrap();
    let reconciler = EntityReconciler::new(gateway.clone());

    reconciler.resolve_author("SAME NAME").unwrap();
    reconciler.resolve_publisher("SAME NAME").unwrap();

    assert_eq!(gateway.find_all::<Author>().unwrap().len(), 1);
    assert_eq!(gateway.find_all::<Publisher>().unwrap().len(), 1);
}

#[test]
fn concurrent_resolution_creates_one_row() {
    let gateway = Gateway::open_memory().unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let reconciler = EntityReconciler::new(gateway.clone());
            std::thread::spawn(move || reconciler.resolve_author("RACE").unwrap())
        })
        .collect();

    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap().id).collect();
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(gateway.find_all::<Author>().unwrap().len(), 1);
}
