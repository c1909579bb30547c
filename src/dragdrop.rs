//! Drag payloads, the transport seam, and the gesture state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two gestures share one string-keyed transport: palette cards start an
//! insert gesture carrying a template under `"component"`, and placed fields
//! start a reorder gesture carrying `{"sourceIndex": n}` under `"reorder"`.
//! Nothing touches the schema until the drop; the payload lives only in the
//! transport in between.
//!
//! ERROR HANDLING
//! ==============
//! A drop whose payload is missing or malformed resolves to
//! `DropOutcome::Cancelled`. The decode error is logged and never returned,
//! so a bad drag cannot break the editing session.

#[cfg(test)]
#[path = "dragdrop_test.rs"]
mod dragdrop_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{INSERT_PAYLOAD_KEY, REORDER_PAYLOAD_KEY};
use crate::field::{FieldDescriptor, FieldKind};
use crate::schema::{FormSchema, NameMinter};

// =============================================================================
// TRANSPORT
// =============================================================================

/// Key-tagged string channel that carries a payload from drag start to drop.
pub trait DataTransfer {
    /// Store `value` under `key`, replacing any previous value.
    fn set_data(&mut self, key: &str, value: String);
    /// Read the value under `key`. Empty values count as absent.
    fn get_data(&self, key: &str) -> Option<String>;
    /// Forget every key.
    fn clear_data(&mut self);
}

/// In-memory transport for hosts without a native drag data channel.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransfer {
    entries: HashMap<String, String>,
}

impl MemoryTransfer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataTransfer for MemoryTransfer {
    fn set_data(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn get_data(&self, key: &str) -> Option<String> {
        self.entries.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn clear_data(&mut self) {
        self.entries.clear();
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DragError {
    #[error("no drag payload under a known key")]
    MissingPayload,
    #[error("malformed {key} payload: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode drag payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What a drag gesture carries.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// A palette template to clone into the schema.
    Insert(FieldDescriptor),
    /// A placed field being moved.
    Reorder { source_index: usize },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderWire {
    #[serde(alias = "dragIndex")]
    source_index: usize,
}

impl DragPayload {
    /// Transport key this payload travels under.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Insert(_) => INSERT_PAYLOAD_KEY,
            Self::Reorder { .. } => REORDER_PAYLOAD_KEY,
        }
    }

    /// Serialize into `transfer` under this payload's key.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::Encode`] if the payload cannot be serialized.
    pub fn write_to(&self, transfer: &mut impl DataTransfer) -> Result<(), DragError> {
        let raw = match self {
            Self::Insert(template) => serde_json::to_string(template)?,
            Self::Reorder { source_index } => serde_json::to_string(&ReorderWire { source_index: *source_index })?,
        };
        transfer.set_data(self.key(), raw);
        Ok(())
    }

    /// Decode the payload from `transfer`. A reorder payload wins when both
    /// keys are present.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::MissingPayload`] when neither key is set and
    /// [`DragError::Decode`] when the stored value is malformed.
    pub fn read_from(transfer: &impl DataTransfer) -> Result<Self, DragError> {
        if let Some(raw) = transfer.get_data(REORDER_PAYLOAD_KEY) {
            let wire: ReorderWire = serde_json::from_str(&raw)
                .map_err(|source| DragError::Decode { key: REORDER_PAYLOAD_KEY, source })?;
            return Ok(Self::Reorder { source_index: wire.source_index });
        }
        if let Some(raw) = transfer.get_data(INSERT_PAYLOAD_KEY) {
            let template: FieldDescriptor = serde_json::from_str(&raw)
                .map_err(|source| DragError::Decode { key: INSERT_PAYLOAD_KEY, source })?;
            return Ok(Self::Insert(template));
        }
        Err(DragError::MissingPayload)
    }
}

// =============================================================================
// GESTURE STATE
// =============================================================================

/// Gesture currently being tracked between drag start and drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GestureState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A palette card of `kind` is being dragged.
    Inserting { kind: FieldKind },
    /// The placed field at `source_index` is being dragged.
    Reordering { source_index: usize },
}

/// Why a gesture ended without touching the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Dropped somewhere that does not accept this gesture.
    NoTarget,
    /// The transport held no payload, or one that failed to decode.
    Undecodable,
    /// The schema refused the operation (stale or out-of-range index).
    Rejected,
    /// The drag was released without a drop.
    Aborted,
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A template was inserted as `name` at `index`.
    Inserted { name: String, index: usize },
    /// The field at `from` now sits at `to`.
    Reordered { from: usize, to: usize },
    /// Valid drop that changes nothing (field dropped onto itself).
    Unchanged,
    /// No mutation happened.
    Cancelled(CancelReason),
}

/// Result of a drop: the outcome plus the new snapshot when one was produced.
#[derive(Debug, Clone)]
pub struct DropResult {
    pub outcome: DropOutcome,
    pub schema: Option<FormSchema>,
}

impl DropResult {
    fn cancelled(reason: CancelReason) -> Self {
        Self { outcome: DropOutcome::Cancelled(reason), schema: None }
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Translates drag gestures into schema operations.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: GestureState,
}

impl DragCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Returns `true` while a gesture is between start and drop.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Start dragging a palette template.
    pub fn begin_insert(&mut self, template: &FieldDescriptor, transfer: &mut impl DataTransfer) {
        let kind = template.kind.clone();
        self.begin(DragPayload::Insert(template.clone()), GestureState::Inserting { kind }, transfer);
    }

    /// Start dragging the placed field at `source_index`.
    pub fn begin_reorder(&mut self, source_index: usize, transfer: &mut impl DataTransfer) {
        self.begin(
            DragPayload::Reorder { source_index },
            GestureState::Reordering { source_index },
            transfer,
        );
    }

    fn begin(&mut self, payload: DragPayload, state: GestureState, transfer: &mut impl DataTransfer) {
        transfer.clear_data();
        if let Err(e) = payload.write_to(transfer) {
            warn!(error = %e, key = payload.key(), "drag payload could not be encoded");
            self.state = GestureState::Idle;
            return;
        }
        debug!(?state, "drag started");
        self.state = state;
    }

    /// Drop onto empty canvas area: inserts append, reorders have no target.
    pub fn drop_on_canvas(
        &mut self,
        schema: &FormSchema,
        transfer: &mut impl DataTransfer,
        minter: &mut NameMinter,
    ) -> DropResult {
        let Some(payload) = self.finish(transfer) else {
            return DropResult::cancelled(CancelReason::Undecodable);
        };
        match payload {
            DragPayload::Insert(template) => {
                let next = schema.insert(&template, minter);
                let index = next.len().saturating_sub(1);
                let name = next.components.get(index).map(|c| c.name.clone()).unwrap_or_default();
                DropResult { outcome: DropOutcome::Inserted { name, index }, schema: Some(next) }
            }
            DragPayload::Reorder { source_index } => {
                debug!(source_index, "reorder dropped outside any field");
                DropResult::cancelled(CancelReason::NoTarget)
            }
        }
    }

    /// Drop onto the placed field at `target_index`: reorders move the source
    /// field there, inserts land in front of it.
    pub fn drop_on_field(
        &mut self,
        schema: &FormSchema,
        target_index: usize,
        transfer: &mut impl DataTransfer,
        minter: &mut NameMinter,
    ) -> DropResult {
        let Some(payload) = self.finish(transfer) else {
            return DropResult::cancelled(CancelReason::Undecodable);
        };
        match payload {
            DragPayload::Reorder { source_index } => match schema.reorder(source_index, target_index) {
                Ok(_) if source_index == target_index => DropResult { outcome: DropOutcome::Unchanged, schema: None },
                Ok(next) => DropResult {
                    outcome: DropOutcome::Reordered { from: source_index, to: target_index },
                    schema: Some(next),
                },
                Err(e) => {
                    warn!(error = %e, source_index, target_index, "reorder drop rejected");
                    DropResult::cancelled(CancelReason::Rejected)
                }
            },
            DragPayload::Insert(_) if target_index >= schema.len() => {
                warn!(target_index, len = schema.len(), "insert dropped on a field that does not exist");
                DropResult::cancelled(CancelReason::Rejected)
            }
            DragPayload::Insert(template) => match schema.insert_at(target_index, &template, minter) {
                Ok(next) => {
                    let name = next.components.get(target_index).map(|c| c.name.clone()).unwrap_or_default();
                    DropResult { outcome: DropOutcome::Inserted { name, index: target_index }, schema: Some(next) }
                }
                Err(e) => {
                    warn!(error = %e, target_index, "insert drop rejected");
                    DropResult::cancelled(CancelReason::Rejected)
                }
            },
        }
    }

    /// The drag was released without a drop.
    pub fn cancel(&mut self, transfer: &mut impl DataTransfer) -> DropOutcome {
        if self.is_dragging() {
            debug!(state = ?self.state, "drag cancelled");
        }
        self.state = GestureState::Idle;
        transfer.clear_data();
        DropOutcome::Cancelled(CancelReason::Aborted)
    }

    /// End the gesture and decode its payload. Drops are decoded even while
    /// idle, since drags may start outside this coordinator.
    fn finish(&mut self, transfer: &mut impl DataTransfer) -> Option<DragPayload> {
        if !self.is_dragging() {
            debug!("drop received without a tracked drag start");
        }
        self.state = GestureState::Idle;
        let decoded = DragPayload::read_from(&*transfer);
        transfer.clear_data();
        match decoded {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(error = %e, "drop payload discarded");
                None
            }
        }
    }
}
