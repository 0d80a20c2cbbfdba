use thiserror::Error;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Audit log bytes are not UTF-8 JSON, the root is not an array, or
    /// the entries do not describe a single DID
    InvalidLog,
    /// A single audit log entry could not be decoded
    InvalidEntry,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidLog => "ERR_INVALID_LOG",
            ExErrorKind::InvalidEntry => "ERR_INVALID_ENTRY",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context (operation, DID, entry position) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    did: Option<String>,
    index: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            did: None,
            index: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add DID context
    pub fn with_did(mut self, did: impl Into<String>) -> Self {
        self.did = Some(did.into());
        self
    }

    /// Add entry position context (index into the delivered log)
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
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

    pub fn did(&self) -> Option<&str> {
        self.did.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(did) = &self.did {
            write!(f, " (did: {})", did)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised while decoding audit logs
///
/// The history builder itself never fails; these cover the layer in front of it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlcDiffError {
    /// The delivered log as a whole is malformed
    #[error("Invalid audit log: {reason}")]
    InvalidLog { reason: String },

    /// One entry of the delivered log lacks its DID, cid or timestamp, or
    /// is not an object
    #[error("Invalid audit log entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Entries of one log refer to different DIDs
    #[error("Audit log entry at index {index} belongs to {found}, expected {expected}")]
    DidMismatch {
        index: usize,
        expected: String,
        found: String,
    },
}

impl From<PlcDiffError> for ExError {
    fn from(err: PlcDiffError) -> Self {
        match err {
            PlcDiffError::InvalidLog { reason } => ExError::new(ExErrorKind::InvalidLog)
                .with_message(format!("Invalid audit log: {}", reason)),

            PlcDiffError::InvalidEntry { index, reason } => {
                ExError::new(ExErrorKind::InvalidEntry)
                    .with_index(index)
                    .with_message(format!("Invalid audit log entry: {}", reason))
            }

            PlcDiffError::DidMismatch {
                index,
                expected,
                found,
            } => ExError::new(ExErrorKind::InvalidLog)
                .with_did(found)
                .with_index(index)
                .with_message(format!("Entry does not belong to {}", expected)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidLog, "ERR_INVALID_LOG"),
            (ExErrorKind::InvalidEntry, "ERR_INVALID_ENTRY"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::InvalidEntry)
            .with_op("parse_audit_log")
            .with_index(3)
            .with_message("missing field `cid`");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_INVALID_ENTRY]"));
        assert!(text.contains("parse_audit_log"));
        assert!(text.contains("(index: 3)"));
    }
}
