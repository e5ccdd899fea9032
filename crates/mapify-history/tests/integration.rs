// Integration tests for the snapshot history.
//
// These drive full undo/redo sequences over a compound state the way the
// drawing manager does: clone the live state, mutate, push.

use mapify_history::{HistoryConfig, Snapshots};

type State = Vec<&'static str>;

fn new_history() -> Snapshots<State> {
    Snapshots::new(Vec::new(), &HistoryConfig::default())
}

#[test]
fn test_draw_undo_redo_draw_scenario() {
    let mut history = new_history();
    let mut live: State = Vec::new();

    // Draw a polygon, then a circle
    live.push("polygon");
    history.push(live.clone());
    live.push("circle");
    history.push(live.clone());
    assert_eq!(history.len(), 3);

    // Undo twice: back to one feature, then none
    live = history.undo().unwrap().clone();
    assert_eq!(live, vec!["polygon"]);
    live = history.undo().unwrap().clone();
    assert!(live.is_empty());

    // Redo: polygon is back
    live = history.redo().unwrap().clone();
    assert_eq!(live, vec!["polygon"]);

    // Drawing a rectangle now discards the circle's redo branch
    live.push("rectangle");
    history.push(live.clone());
    assert!(!history.can_redo());
    assert_eq!(history.current(), &vec!["polygon", "rectangle"]);
}

#[test]
fn test_undo_restores_exact_pre_operation_content() {
    let mut history = new_history();
    let mut live: State = Vec::new();

    for name in ["a", "b", "c"] {
        live.push(name);
        history.push(live.clone());
    }

    // Delete "b"
    let before_delete = live.clone();
    live.retain(|n| *n != "b");
    history.push(live.clone());

    assert_eq!(history.undo().unwrap(), &before_delete);
    assert_eq!(history.redo().unwrap(), &vec!["a", "c"]);
}

#[test]
fn test_undo_redo_are_inverses_over_full_run() {
    let mut history = new_history();
    let mut live: State = Vec::new();
    let mut states = vec![live.clone()];

    for name in ["p1", "p2", "p3", "p4"] {
        live.push(name);
        history.push(live.clone());
        states.push(live.clone());
    }

    // Walk all the way back, checking every intermediate state
    for expected in states.iter().rev().skip(1) {
        assert_eq!(history.undo().unwrap(), expected);
    }
    assert!(!history.can_undo());

    // And forward again
    for expected in states.iter().skip(1) {
        assert_eq!(history.redo().unwrap(), expected);
    }
    assert!(!history.can_redo());
}

#[test]
fn test_bounded_depth_long_session() {
    let config = HistoryConfig::with_max_depth(16);
    let mut history = Snapshots::new(0u32, &config);

    for i in 1..=500 {
        history.push(i);
    }
    assert_eq!(history.len(), 16);
    assert_eq!(*history.current(), 500);

    let mut undone = 0;
    while history.undo().is_some() {
        undone += 1;
    }
    assert_eq!(undone, 15);
    assert_eq!(*history.current(), 485);
}
