//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_REVISION_ID: &str = "revision_id";
pub const FIELD_SECTION_KEY: &str = "section_key";
pub const FIELD_SECTION_TYPE: &str = "section_type";

// Collection sizes
pub const FIELD_OLD_SECTIONS: &str = "old_sections";
pub const FIELD_NEW_SECTIONS: &str = "new_sections";
pub const FIELD_ENTRIES: &str = "entries";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_FALLBACK: &str = "fallback";
