//! Selected-field pointer.
//!
//! Selection is by field name, not by index, so reordering never disturbs
//! it. Any mutation that can remove fields must be followed by `reconcile`
//! in the same step; `EditorSession` does this for every operation.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::field::FieldDescriptor;
use crate::schema::FormSchema;

/// Holds at most one selected field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: Option<String>,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `name` without checking that it exists.
    pub fn select(&mut self, name: impl Into<String>) {
        self.selected = Some(name.into());
    }

    /// Drop the selection if it names a field no longer in `schema`.
    pub fn reconcile(&mut self, schema: &FormSchema) {
        if self.selected.as_deref().is_some_and(|name| !schema.contains(name)) {
            self.selected = None;
        }
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Keep the selection on a field that was renamed from `old` to `new`.
    pub fn follow_rename(&mut self, old: &str, new: &str) {
        if self.selected.as_deref() == Some(old) {
            self.selected = Some(new.to_owned());
        }
    }

    /// The selected name, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected field as it currently exists in `schema`.
    #[must_use]
    pub fn selected_field<'a>(&self, schema: &'a FormSchema) -> Option<&'a FieldDescriptor> {
        self.selected.as_deref().and_then(|name| schema.get(name))
    }
}
