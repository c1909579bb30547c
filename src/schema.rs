//! Form schema snapshots and the operations that derive new ones.
//!
//! DESIGN
//! ======
//! `FormSchema` is a value. Every mutation takes `&self` and returns a new
//! snapshot, so a renderer holding the previous one never observes a
//! half-applied change. Component order is the form's tab order and is only
//! ever permuted by `reorder`.
//!
//! Field names are minted by `NameMinter` as `<type>_<ms>`. The minter never
//! reuses a timestamp: when the clock has not advanced since the last name,
//! or the candidate already exists, the timestamp is bumped by one.

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

use std::collections::HashSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::field::{FieldDescriptor, FieldKind, FieldPatch};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("component index {index} out of range for {len} components")]
    IndexOutOfRange { index: usize, len: usize },
}

/// How the form arranges labels and widgets. Presentation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Label beside the widget.
    #[default]
    Horizontal,
    /// Label above the widget.
    Vertical,
}

/// The complete, serializable state of a designed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Fields in rendering and tab order.
    pub components: Vec<FieldDescriptor>,
    /// Presentation mode.
    pub layout: Layout,
}

// =============================================================================
// NAME MINTING
// =============================================================================

/// Millisecond time source used for field names.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-clock milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
            return 0;
        };
        i64::try_from(dur.as_millis()).unwrap_or(0)
    }
}

/// Produces `<type>_<timestamp>` names that are unique within a session.
pub struct NameMinter {
    clock: Box<dyn Clock>,
    last_ts: i64,
}

impl NameMinter {
    #[must_use]
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self { clock: Box::new(clock), last_ts: i64::MIN }
    }

    /// Minter backed by the system clock.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SystemClock)
    }

    /// Mint a name for a new field of `kind` that does not collide with any
    /// name already in `schema` or previously issued by this minter.
    pub fn mint(&mut self, kind: &FieldKind, schema: &FormSchema) -> String {
        let mut ts = self.clock.now_ms().max(self.last_ts.saturating_add(1));
        let mut name = format!("{kind}_{ts}");
        while schema.contains(&name) {
            ts = ts.saturating_add(1);
            name = format!("{kind}_{ts}");
        }
        self.last_ts = ts;
        name
    }
}

impl Default for NameMinter {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for NameMinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameMinter").field("last_ts", &self.last_ts).finish_non_exhaustive()
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl FormSchema {
    /// Empty schema with the given layout.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self { components: Vec::new(), layout }
    }

    /// Clone `template` under a freshly minted name and append it.
    #[must_use]
    pub fn insert(&self, template: &FieldDescriptor, minter: &mut NameMinter) -> FormSchema {
        let field = self.materialize(template, minter);
        let mut next = self.clone();
        next.components.push(field);
        next
    }

    /// Clone `template` under a freshly minted name and place it at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::IndexOutOfRange`] if `index` is greater than the
    /// number of components.
    pub fn insert_at(
        &self,
        index: usize,
        template: &FieldDescriptor,
        minter: &mut NameMinter,
    ) -> Result<FormSchema, SchemaError> {
        let len = self.components.len();
        if index > len {
            return Err(SchemaError::IndexOutOfRange { index, len });
        }
        let field = self.materialize(template, minter);
        let mut next = self.clone();
        next.components.insert(index, field);
        Ok(next)
    }

    /// Move the component at `from` so it ends up at `to` in the result.
    ///
    /// Equal indices yield an unchanged snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::IndexOutOfRange`] if either index is not a
    /// valid component position.
    pub fn reorder(&self, from: usize, to: usize) -> Result<FormSchema, SchemaError> {
        let len = self.components.len();
        for index in [from, to] {
            if index >= len {
                return Err(SchemaError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let moved = next.components.remove(from);
        debug!(from, to, name = %moved.name, "component reordered");
        next.components.insert(to, moved);
        Ok(next)
    }

    /// Apply `patch` to the first component called `name`. Unknown names are a no-op.
    #[must_use]
    pub fn update_by_name(&self, name: &str, patch: &FieldPatch) -> FormSchema {
        let mut next = self.clone();
        let Some(index) = self.index_of(name) else {
            return next;
        };
        if let Some(new_name) = patch.rename_of(name) {
            let collides = self
                .components
                .iter()
                .enumerate()
                .any(|(i, c)| i != index && c.name == new_name);
            if collides {
                warn!(from = name, to = new_name, "rename collides with an existing field name");
            }
        }
        if let Some(field) = next.components.get_mut(index) {
            field.apply(patch);
        }
        next
    }

    /// Drop the first component called `name`. Unknown names are a no-op.
    #[must_use]
    pub fn remove_by_name(&self, name: &str) -> FormSchema {
        let mut next = self.clone();
        if let Some(index) = self.index_of(name) {
            next.components.remove(index);
        }
        next
    }

    /// Remove every component, keeping the layout.
    #[must_use]
    pub fn clear(&self) -> FormSchema {
        Self::new(self.layout)
    }

    /// Replace the layout, keeping every component.
    #[must_use]
    pub fn set_layout(&self, layout: Layout) -> FormSchema {
        FormSchema { components: self.components.clone(), layout }
    }

    // --- Queries ---

    /// Look up a component by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Position of the first component called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name == name)
    }

    /// Returns `true` if some component is called `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the schema has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Names held by more than one component, in first-seen order.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dupes = Vec::new();
        for component in &self.components {
            let name = component.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                dupes.push(name);
            }
        }
        dupes
    }

    fn materialize(&self, template: &FieldDescriptor, minter: &mut NameMinter) -> FieldDescriptor {
        let mut field = template.clone();
        field.name = minter.mint(&field.kind, self);
        debug!(kind = %field.kind, name = %field.name, "component inserted");
        field
    }
}
