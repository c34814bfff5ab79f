use revcmp_core_types::RequestId;
use thiserror::Error;

use crate::plugins::PluginError;

/// Result type alias using RevcmpError
pub type Result<T> = std::result::Result<T, RevcmpError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and external API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    DuplicateKey,
    LimitExceeded,
    InvalidConfig,

    // Algorithmic
    /// The classifier walk reached a state no rule covers
    InvariantViolation,

    // Collaborators (always recovered, surfaced for logging only)
    PluginFailure,
    TokenizationFailure,

    // Integration
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::LimitExceeded => "ERR_LIMIT_EXCEEDED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::PluginFailure => "ERR_PLUGIN_FAILURE",
            ExErrorKind::TokenizationFailure => "ERR_TOKENIZATION_FAILURE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus optional
/// revision/section context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    revision_id: Option<String>,
    section_key: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            revision_id: None,
            section_key: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add revision context
    pub fn with_revision_id(mut self, id: impl Into<String>) -> Self {
        self.revision_id = Some(id.into());
        self
    }

    /// Add section key context
    pub fn with_section_key(mut self, key: impl Into<String>) -> Self {
        self.section_key = Some(key.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn revision_id(&self) -> Option<&str> {
        self.revision_id.as_deref()
    }

    pub fn section_key(&self) -> Option<&str> {
        self.section_key.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(revision_id) = &self.revision_id {
            write!(f, " (revision_id: {})", revision_id)?;
        }
        if let Some(section_key) = &self.section_key {
            write!(f, " (section_key: {})", section_key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for revision comparison
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevcmpError {
    // ===== Validation Errors =====
    /// The same section key appears twice within one revision
    #[error("Duplicate section key '{key}' in revision {revision_id}")]
    DuplicateSectionKey { revision_id: String, key: String },

    /// A revision has more sections than the configured limit allows
    #[error("Revision {revision_id} has {count} sections, limit is {limit}")]
    TooManySections {
        revision_id: String,
        count: usize,
        limit: usize,
    },

    /// Comparison options could not be parsed
    #[error("Invalid comparison options: {reason}")]
    InvalidConfig { reason: String },

    // ===== Algorithmic Errors =====
    /// No classification rule matched at the given cursor positions
    #[error(
        "Classifier invariant broken at old[{old_index}]={old_key:?}, new[{new_index}]={new_key:?}"
    )]
    InvariantBroken {
        old_index: usize,
        new_index: usize,
        old_key: Option<String>,
        new_key: Option<String>,
    },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<RevcmpError> for ExError {
    fn from(err: RevcmpError) -> Self {
        let message = err.to_string();
        match err {
            RevcmpError::DuplicateSectionKey { revision_id, key } => {
                ExError::new(ExErrorKind::DuplicateKey)
                    .with_revision_id(revision_id)
                    .with_section_key(key)
                    .with_message(message)
            }

            RevcmpError::TooManySections { revision_id, .. } => {
                ExError::new(ExErrorKind::LimitExceeded)
                    .with_revision_id(revision_id)
                    .with_message(message)
            }

            RevcmpError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            RevcmpError::InvariantBroken {
                old_key, new_key, ..
            } => {
                let ex = ExError::new(ExErrorKind::InvariantViolation)
                    .with_op("classify")
                    .with_message(message);
                match old_key.or(new_key) {
                    Some(key) => ex.with_section_key(key),
                    None => ex,
                }
            }

            RevcmpError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Inline tokenization failure, recovered as `tokens = None`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("Line {line} is {len} bytes long, inline token limit is {limit}")]
    LineTooLong { line: u32, len: usize, limit: usize },
}

impl From<TokenizeError> for ExError {
    fn from(err: TokenizeError) -> Self {
        ExError::new(ExErrorKind::TokenizationFailure)
            .with_op("tokenize_hunks")
            .with_message(err.to_string())
    }
}

impl From<PluginError> for ExError {
    fn from(err: PluginError) -> Self {
        let ex = ExError::new(ExErrorKind::PluginFailure).with_message(err.to_string());
        match err {
            PluginError::Resolve { .. } => ex.with_op("resolve_plugin"),
            PluginError::Representation { .. } => ex.with_op("text_representation"),
        }
    }
}

/// Conversion from serde_json::Error to RevcmpError
impl From<serde_json::Error> for RevcmpError {
    fn from(err: serde_json::Error) -> Self {
        RevcmpError::Serialization {
            message: err.to_string(),
        }
    }
}
