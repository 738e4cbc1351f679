use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::path::FieldPath;

/// Which table a duplicated id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    AnimationGroup,
    Feature,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKind::AnimationGroup => f.write_str("animation group"),
            IdKind::Feature => f.write_str("feature"),
        }
    }
}

/// Fieldless discriminant of [`DecodeError`], handy for matching in tests
/// and for hosts that map failures onto their own codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    Syntax,
    SchemaViolation,
    UnknownVariant,
    ArityMismatch,
    CurveCountMismatch,
    DuplicateId,
    DanglingReference,
    CyclicReference,
}

/// First problem found while decoding a document.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeError {
    /// The text handed to `decode_str` / `decode_slice` is not valid JSON.
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// A required field is missing or a value has the wrong shape.
    #[error("{path}: expected {expected}, found {found}")]
    SchemaViolation {
        path: FieldPath,
        expected: String,
        found: String,
    },

    /// A discriminator outside its closed set.
    #[error("{path}: unknown variant `{tag}`, expected one of {}", .expected.join(", "))]
    UnknownVariant {
        path: FieldPath,
        tag: String,
        expected: Vec<String>,
    },

    /// A tagged payload with the wrong element count.
    #[error("{path}: `{tag}` payload takes {expected} numbers, found {found}")]
    ArityMismatch {
        path: FieldPath,
        tag: String,
        expected: String,
        found: usize,
    },

    #[error("{path}: {key_values} key values need {expected} timing curves, found {found}")]
    CurveCountMismatch {
        path: FieldPath,
        key_values: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}: duplicate {entity} id {id}")]
    DuplicateId {
        path: FieldPath,
        entity: IdKind,
        id: i64,
    },

    #[error("{path}: no animation group with id {id}")]
    DanglingReference { path: FieldPath, id: i64 },

    #[error("{path}: parent chain cycles through groups {cycle:?}")]
    CyclicReference { path: FieldPath, cycle: Vec<i64> },
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::Syntax { .. } => DecodeErrorKind::Syntax,
            DecodeError::SchemaViolation { .. } => DecodeErrorKind::SchemaViolation,
            DecodeError::UnknownVariant { .. } => DecodeErrorKind::UnknownVariant,
            DecodeError::ArityMismatch { .. } => DecodeErrorKind::ArityMismatch,
            DecodeError::CurveCountMismatch { .. } => DecodeErrorKind::CurveCountMismatch,
            DecodeError::DuplicateId { .. } => DecodeErrorKind::DuplicateId,
            DecodeError::DanglingReference { .. } => DecodeErrorKind::DanglingReference,
            DecodeError::CyclicReference { .. } => DecodeErrorKind::CyclicReference,
        }
    }

    /// Where the problem is. `None` only for [`DecodeError::Syntax`].
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            DecodeError::Syntax { .. } => None,
            DecodeError::SchemaViolation { path, .. }
            | DecodeError::UnknownVariant { path, .. }
            | DecodeError::ArityMismatch { path, .. }
            | DecodeError::CurveCountMismatch { path, .. }
            | DecodeError::DuplicateId { path, .. }
            | DecodeError::DanglingReference { path, .. }
            | DecodeError::CyclicReference { path, .. } => Some(path),
        }
    }

    pub(crate) fn schema(
        path: FieldPath,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        DecodeError::SchemaViolation {
            path,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn unknown_variant(path: FieldPath, tag: &str, expected: &[&str]) -> Self {
        DecodeError::UnknownVariant {
            path,
            tag: tag.to_string(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Syntax {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
