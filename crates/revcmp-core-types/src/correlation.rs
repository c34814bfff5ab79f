//! Correlation types for request tracking
//!
//! A comparison request may be tagged with a [`RequestContext`] so that the
//! log events it emits can be tied back to the caller's request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh identifier (UUIDv7, time-ordered)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Get the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Wrap an identifier issued elsewhere
            pub fn from_string(s: String) -> Self {
                Self(s)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Unique identifier for a single comparison request
    RequestId
);

correlation_id!(
    /// Trace identifier propagated from an upstream caller
    TraceId
);

/// Context carried through a comparison for correlation
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with an existing RequestId
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            trace_id: None,
        }
    }

    /// Attach an upstream TraceId
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Trace id as a log-friendly string (empty when absent)
    pub fn trace_str(&self) -> &str {
        self.trace_id.as_ref().map(TraceId::as_str).unwrap_or("")
    }
}
