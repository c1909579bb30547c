//! End-to-end editing flow through the public API, with logs routed to the
//! test writer so gesture and storage diagnostics show up on failure.

use formdesigner::config::DesignerConfig;
use formdesigner::dragdrop::{CancelReason, DataTransfer, DropOutcome, MemoryTransfer};
use formdesigner::field::{FieldKind, FieldPatch};
use formdesigner::persist::{self, KeyValueStore, MemoryStore};
use formdesigner::schema::{FormSchema, Layout};
use formdesigner::session::{EditorSession, LoadOutcome};
use formdesigner::widget::{WidgetKind, WidgetSpec};

fn init_tracing() {
    // Several tests race to install the subscriber; only the first wins.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn palette_drop(session: &mut EditorSession<MemoryStore>, kind: FieldKind) -> DropOutcome {
    let mut transfer = MemoryTransfer::new();
    session.begin_palette_drag(&kind, &mut transfer);
    session.drop_on_canvas(&mut transfer)
}

#[test]
fn build_edit_save_and_reload_a_form() {
    init_tracing();
    let mut session = EditorSession::new(MemoryStore::new(), DesignerConfig::default());

    for kind in FieldKind::BUILTIN {
        let outcome = palette_drop(&mut session, kind);
        assert!(matches!(outcome, DropOutcome::Inserted { .. }));
    }
    assert_eq!(session.schema().len(), 8);
    assert!(session.schema().duplicate_names().is_empty(), "same-tick inserts must still get unique names");

    let first = session.schema().components[0].name.clone();
    session.select(first);
    session.update_selected(&FieldPatch {
        label: Some("Email".into()),
        required: Some(true),
        ..Default::default()
    });
    session.set_layout(Layout::Vertical);

    let spec = WidgetSpec::for_field(session.selected_field().expect("selection survives edits"));
    assert_eq!(spec.widget, WidgetKind::TextInput);
    assert_eq!(spec.required_message.as_deref(), Some("Please enter Email"));

    assert!(session.save());
    let saved = session.schema().clone();

    let mut reopened = EditorSession::new(session.store().clone(), DesignerConfig::default());
    assert_eq!(reopened.load(), LoadOutcome::Restored);
    assert_eq!(reopened.schema(), &saved);
    assert_eq!(reopened.schema().layout, Layout::Vertical);
}

#[test]
fn corrupt_storage_and_bad_drops_never_break_the_session() {
    init_tracing();
    let mut store = MemoryStore::new();
    store.set("formDesignerSchema", "{\"components\": 12}".into()).expect("memory store accepts writes");
    let mut session = EditorSession::new(store, DesignerConfig::default());
    palette_drop(&mut session, FieldKind::Textarea);

    assert_eq!(session.load(), LoadOutcome::Corrupt);
    assert_eq!(session.schema().len(), 1);

    let mut transfer = MemoryTransfer::new();
    transfer.set_data("reorder", "{\"sourceIndex\":\"first\"}".into());
    assert_eq!(session.drop_on_field(0, &mut transfer), DropOutcome::Cancelled(CancelReason::Undecodable));

    session.begin_field_drag(4, &mut transfer);
    assert_eq!(session.drop_on_field(0, &mut transfer), DropOutcome::Cancelled(CancelReason::Rejected));
    assert_eq!(session.schema().len(), 1);
}

#[test]
fn export_is_stable_and_parses_back() {
    init_tracing();
    let mut session = EditorSession::new(MemoryStore::new(), DesignerConfig::default());
    palette_drop(&mut session, FieldKind::Select);
    palette_drop(&mut session, FieldKind::Checkbox);

    let first = session.export_json();
    assert_eq!(first, session.export_json());
    assert!(first.starts_with("{\n  \"components\": [\n    {\n      \"type\": \"select\""));

    let parsed: FormSchema = persist::import_json(&first).expect("export should parse");
    assert_eq!(&parsed, session.schema());
}
