//! Schema and drag-drop engine for the visual form designer.
//!
//! This crate owns everything behind the designer surface that has real
//! logic: the ordered list of field descriptors, the single selection pointer,
//! the drag payload protocol between palette, canvas and transport, and the
//! persistence of the resulting schema. The host UI is responsible only for
//! drawing widgets and forwarding pointer/drag events into
//! [`session::EditorSession`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`field`] | Field descriptors, kinds, options, and sparse patches |
//! | [`catalog`] | Built-in palette templates |
//! | [`schema`] | Immutable form schema snapshots and name minting |
//! | [`selection`] | The selected-field pointer |
//! | [`dragdrop`] | Drag payloads, transport seam, and the gesture state machine |
//! | [`persist`] | Key-value persistence and JSON export |
//! | [`widget`] | Field kind to widget dispatch for renderers |
//! | [`session`] | The editing session tying all of the above together |
//! | [`config`] | Environment-driven settings |
//! | [`consts`] | Shared keys and constants |

pub mod catalog;
pub mod config;
pub mod consts;
pub mod dragdrop;
pub mod field;
pub mod persist;
pub mod schema;
pub mod selection;
pub mod session;
pub mod widget;
