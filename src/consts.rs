//! Shared keys and constants for the designer crate.

// ── Transport ───────────────────────────────────────────────────

/// Transport key carrying a palette template during an insert gesture.
pub const INSERT_PAYLOAD_KEY: &str = "component";

/// Transport key carrying the source index during a reorder gesture.
pub const REORDER_PAYLOAD_KEY: &str = "reorder";

// ── Persistence ─────────────────────────────────────────────────

/// Storage key the schema is saved under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "formDesignerSchema";

// ── Widgets ─────────────────────────────────────────────────────

/// Visible rows for multi-line text widgets.
pub const TEXTAREA_ROWS: u8 = 4;
