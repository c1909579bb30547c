use super::*;
use crate::field::FieldKind;

fn schema_with(names: &[&str]) -> FormSchema {
    FormSchema {
        components: names.iter().map(|n| FieldDescriptor::new(FieldKind::Input, "Label", *n)).collect(),
        ..FormSchema::default()
    }
}

#[test]
fn default_has_no_selection() {
    assert!(SelectionTracker::new().selected().is_none());
}

#[test]
fn select_does_not_check_existence() {
    let mut tracker = SelectionTracker::new();
    tracker.select("ghost");
    assert_eq!(tracker.selected(), Some("ghost"));
    assert!(tracker.selected_field(&FormSchema::default()).is_none());
}

#[test]
fn reconcile_keeps_present_selection() {
    let mut tracker = SelectionTracker::new();
    tracker.select("b");
    tracker.reconcile(&schema_with(&["a", "b"]));
    assert_eq!(tracker.selected(), Some("b"));
}

#[test]
fn reconcile_clears_removed_selection() {
    let schema = schema_with(&["a", "b"]);
    let mut tracker = SelectionTracker::new();
    tracker.select("b");
    tracker.reconcile(&schema.remove_by_name("b"));
    assert!(tracker.selected().is_none());
}

#[test]
fn reconcile_after_clear_empties_selection() {
    let schema = schema_with(&["a"]);
    let mut tracker = SelectionTracker::new();
    tracker.select("a");
    tracker.reconcile(&schema.clear());
    assert!(tracker.selected().is_none());
}

#[test]
fn reorder_does_not_invalidate_selection() {
    let schema = schema_with(&["a", "b", "c"]);
    let mut tracker = SelectionTracker::new();
    tracker.select("a");
    let reordered = schema.reorder(0, 2).unwrap();
    tracker.reconcile(&reordered);
    assert_eq!(tracker.selected_field(&reordered).map(|f| f.name.as_str()), Some("a"));
}

#[test]
fn clear_resets_unconditionally() {
    let mut tracker = SelectionTracker::new();
    tracker.select("a");
    tracker.clear();
    assert!(tracker.selected().is_none());
}

#[test]
fn follow_rename_only_moves_matching_selection() {
    let mut tracker = SelectionTracker::new();
    tracker.select("a");
    tracker.follow_rename("b", "c");
    assert_eq!(tracker.selected(), Some("a"));
    tracker.follow_rename("a", "z");
    assert_eq!(tracker.selected(), Some("z"));
}
