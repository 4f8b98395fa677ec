use std::sync::{Arc, Mutex};

use report_builder::report::{Block, Report};
use report_builder::store::ReportStore;

#[test]
fn test_fresh_store_holds_untitled_empty_report() {
    let store = ReportStore::new();
    let report = store.get();
    assert_eq!(report.title, "Untitled Report");
    assert!(report.blocks.is_empty());
}

#[test]
fn test_subscribe_delivers_current_report_immediately() {
    let store = ReportStore::new();
    let seen: Arc<Mutex<Vec<Report>>> = Arc::new(Mutex::new(Vec::new()));

    let _subscription = store.subscribe({
        let seen = seen.clone();
        move |report| seen.lock().unwrap().push(report.clone())
    });

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "observer must see the report upon subscribing");
    assert_eq!(seen[0], Report::default());
}

#[test]
fn test_set_notifies_all_subscribers_before_returning() {
    let store = ReportStore::new();
    let seen_a: Arc<Mutex<Vec<Report>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_b: Arc<Mutex<Vec<Report>>> = Arc::new(Mutex::new(Vec::new()));

    let _sub_a = store.subscribe({
        let seen = seen_a.clone();
        move |report| seen.lock().unwrap().push(report.clone())
    });
    let _sub_b = store.subscribe({
        let seen = seen_b.clone();
        move |report| seen.lock().unwrap().push(report.clone())
    });

    let three_blocks = Report::default()
        .with_block(Block::markdown("One", "first"))
        .with_block(Block::query("Two", "x == 2"))
        .with_block(Block::markdown("Three", "third"));
    store.set(three_blocks.clone());

    // Mutations are synchronous: by the time set returned, every observer
    // has already seen the whole 3-block document.
    for seen in [&seen_a, &seen_b] {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2, "initial delivery plus one mutation");
        assert_eq!(seen[1], three_blocks);
        assert_eq!(seen[1].blocks.len(), 3);
    }
}

#[test]
fn test_observers_are_notified_in_registration_order() {
    let store = ReportStore::new();
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let _sub_a = store.subscribe({
        let order = order.clone();
        move |_| order.lock().unwrap().push("a")
    });
    let _sub_b = store.subscribe({
        let order = order.clone();
        move |_| order.lock().unwrap().push("b")
    });

    store.set(Report::default().with_title("ordered"));

    let order = order.lock().unwrap();
    assert_eq!(*order, vec!["a", "b", "a", "b"]);
}

#[test]
fn test_sequential_updates_compose_in_append_order() {
    let store = ReportStore::new();

    store.update(|report| report.with_block(Block::markdown("Notes", "some prose")));
    store.update(|report| report.with_block(Block::query("Suspects", "dst.port == 4444")));

    let report = store.get();
    assert_eq!(report.title, "Untitled Report");
    assert_eq!(report.blocks.len(), 2);
    assert!(matches!(report.blocks[0], Block::Markdown(_)));
    assert!(matches!(report.blocks[1], Block::Query(_)));
}

#[test]
fn test_unsubscribed_observer_is_not_notified() {
    let store = ReportStore::new();
    let seen: Arc<Mutex<Vec<Report>>> = Arc::new(Mutex::new(Vec::new()));

    let subscription = store.subscribe({
        let seen = seen.clone();
        move |report| seen.lock().unwrap().push(report.clone())
    });
    subscription.unsubscribe();

    store.set(Report::default().with_title("after unsubscribe"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "only the initial delivery may be seen");
}

#[test]
fn test_multiple_blocks_may_claim_edit_mode() {
    let store = ReportStore::new();
    store.update(|report| {
        let mut report = report
            .with_block(Block::markdown("One", "first"))
            .with_block(Block::markdown("Two", "second"));
        for block in &mut report.blocks {
            block.set_editing(true);
        }
        report
    });

    let report = store.get();
    assert!(report.blocks.iter().all(|b| b.is_editing()));
}
