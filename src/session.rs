//! One designer editing session.
//!
//! DESIGN
//! ======
//! `EditorSession` is the single owner of the live schema. Every mutation
//! derives a new snapshot, swaps it in, and reconciles the selection before
//! returning, so no caller can observe a selection pointing at a removed
//! field. Renderers read `(schema(), selected_name())` after each call.
//!
//! ERROR HANDLING
//! ==============
//! Gesture and storage failures stop here. Bad drops come back as a
//! cancelled `DropOutcome`, failed saves and corrupt loads are logged and
//! reported as plain outcomes, and the current schema is left untouched.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, error, info};

use crate::catalog;
use crate::config::DesignerConfig;
use crate::dragdrop::{DataTransfer, DragCoordinator, DropOutcome, DropResult, GestureState};
use crate::field::{FieldDescriptor, FieldKind, FieldPatch};
use crate::persist::{self, KeyValueStore};
use crate::schema::{FormSchema, Layout, NameMinter};
use crate::selection::SelectionTracker;

/// What `EditorSession::load` found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A saved schema replaced the current one.
    Restored,
    /// Nothing was saved; the current schema is kept.
    NothingSaved,
    /// The saved value could not be decoded; the current schema is kept.
    Corrupt,
}

/// Session-scoped designer state: schema, selection, gesture and storage.
pub struct EditorSession<S: KeyValueStore> {
    schema: FormSchema,
    selection: SelectionTracker,
    drag: DragCoordinator,
    minter: NameMinter,
    store: S,
    config: DesignerConfig,
}

impl<S: KeyValueStore> EditorSession<S> {
    /// Start an empty session named with the system clock.
    #[must_use]
    pub fn new(store: S, config: DesignerConfig) -> Self {
        Self::with_minter(store, config, NameMinter::system())
    }

    /// Start an empty session with a caller-supplied name minter.
    #[must_use]
    pub fn with_minter(store: S, config: DesignerConfig, minter: NameMinter) -> Self {
        Self {
            schema: FormSchema::new(config.default_layout),
            selection: SelectionTracker::new(),
            drag: DragCoordinator::new(),
            minter,
            store,
            config,
        }
    }

    // --- Queries ---

    /// The current schema snapshot.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Name of the selected field, if any.
    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selection.selected()
    }

    /// The selected field as it exists in the current snapshot.
    #[must_use]
    pub fn selected_field(&self) -> Option<&FieldDescriptor> {
        self.selection.selected_field(&self.schema)
    }

    /// The gesture currently in flight.
    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        self.drag.state()
    }

    #[must_use]
    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Selection ---

    pub fn select(&mut self, name: impl Into<String>) {
        self.selection.select(name);
        self.selection.reconcile(&self.schema);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Schema edits ---

    /// Apply a property-panel edit to the selected field. Returns `false`
    /// when nothing is selected.
    pub fn update_selected(&mut self, patch: &FieldPatch) -> bool {
        let Some(name) = self.selection.selected().map(str::to_owned) else {
            return false;
        };
        self.update_field(&name, patch);
        true
    }

    /// Apply `patch` to the field called `name`. The selection follows a rename.
    pub fn update_field(&mut self, name: &str, patch: &FieldPatch) {
        let next = self.schema.update_by_name(name, patch);
        if self.schema.contains(name) {
            if let Some(new_name) = patch.rename_of(name) {
                self.selection.follow_rename(name, new_name);
            }
        }
        self.commit(next);
    }

    /// Remove the field called `name`.
    pub fn delete_field(&mut self, name: &str) {
        let next = self.schema.remove_by_name(name);
        debug!(name, removed = next.len() < self.schema.len(), "delete field");
        self.commit(next);
    }

    /// Remove every field, keeping the layout.
    pub fn clear(&mut self) {
        let next = self.schema.clear();
        self.selection.clear();
        self.commit(next);
    }

    pub fn set_layout(&mut self, layout: Layout) {
        let next = self.schema.set_layout(layout);
        self.commit(next);
    }

    // --- Drag and drop ---

    /// Start dragging the palette card for `kind`. Clears the selection.
    /// Returns `false` when the palette has no such card.
    pub fn begin_palette_drag(&mut self, kind: &FieldKind, transfer: &mut impl DataTransfer) -> bool {
        let Some(template) = catalog::template(kind) else {
            debug!(%kind, "no palette template for kind");
            return false;
        };
        self.begin_template_drag(&template, transfer);
        true
    }

    /// Start dragging an arbitrary template. Clears the selection.
    pub fn begin_template_drag(&mut self, template: &FieldDescriptor, transfer: &mut impl DataTransfer) {
        self.selection.clear();
        self.drag.begin_insert(template, transfer);
    }

    /// Start dragging the placed field at `index`.
    pub fn begin_field_drag(&mut self, index: usize, transfer: &mut impl DataTransfer) {
        self.drag.begin_reorder(index, transfer);
    }

    /// Drop onto empty canvas area.
    pub fn drop_on_canvas(&mut self, transfer: &mut impl DataTransfer) -> DropOutcome {
        let result = self.drag.drop_on_canvas(&self.schema, transfer, &mut self.minter);
        self.apply_drop(result)
    }

    /// Drop onto the placed field at `index`.
    pub fn drop_on_field(&mut self, index: usize, transfer: &mut impl DataTransfer) -> DropOutcome {
        let result = self.drag.drop_on_field(&self.schema, index, transfer, &mut self.minter);
        self.apply_drop(result)
    }

    /// The drag was released without a drop.
    pub fn cancel_drag(&mut self, transfer: &mut impl DataTransfer) -> DropOutcome {
        self.drag.cancel(transfer)
    }

    fn apply_drop(&mut self, result: DropResult) -> DropOutcome {
        if let Some(next) = result.schema {
            self.commit(next);
        }
        result.outcome
    }

    // --- Persistence ---

    /// Save the current schema under the configured key. Returns `false`
    /// (after logging) when the write fails.
    pub fn save(&mut self) -> bool {
        match persist::save(&mut self.store, &self.config.storage_key, &self.schema) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, key = %self.config.storage_key, "failed to save form schema");
                false
            }
        }
    }

    /// Replace the schema with the saved one, if there is a readable one.
    pub fn load(&mut self) -> LoadOutcome {
        match persist::load(&self.store, &self.config.storage_key) {
            Ok(Some(schema)) => {
                self.schema = schema;
                self.selection.clear();
                info!(components = self.schema.len(), "session restored from storage");
                LoadOutcome::Restored
            }
            Ok(None) => LoadOutcome::NothingSaved,
            Err(e) => {
                error!(error = %e, key = %self.config.storage_key, "failed to load form schema");
                LoadOutcome::Corrupt
            }
        }
    }

    /// Pretty JSON of the current schema.
    #[must_use]
    pub fn export_json(&self) -> String {
        persist::export_json(&self.schema)
    }

    fn commit(&mut self, next: FormSchema) {
        self.schema = next;
        self.selection.reconcile(&self.schema);
    }
}
