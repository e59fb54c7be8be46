//! Error types for freeze operations.

use crate::shape::{MemberKind, Rejection};
use thiserror::Error;

/// Result type alias for freeze operations.
pub type FreezeResult<T> = Result<T, FreezeError>;

/// Errors that can occur while compiling clone routines or reading immutables.
#[derive(Debug, Error)]
pub enum FreezeError {
    /// A disallowed shape (interface, list-like or map-like) was found in the type graph.
    #[error("'{type_name}' - {rejection}")]
    ShapeRejected {
        /// The offending type.
        type_name: String,
        /// The rule that rejected it.
        rejection: Rejection,
    },

    /// The type cannot be constructed as an independent instance.
    #[error("'{type_name}' - no usable constructor: borrowed data cannot be rebuilt as an owned copy")]
    ConstructionUnavailable {
        /// The offending type.
        type_name: String,
    },

    /// The type graph nests deeper than the configured maximum.
    #[error(
        "'{type_name}' - maximum object graph depth exceeded (depth {depth}, max {max_depth}). \
         Please flatten your object structure to continue."
    )]
    DepthExceeded {
        /// The type found past the limit.
        type_name: String,
        /// The depth at which it was found.
        depth: usize,
        /// The configured maximum.
        max_depth: usize,
    },

    /// Named member lookup failed.
    #[error("member '{member}' does not exist on '{type_name}'")]
    MemberNotFound {
        /// The type that was searched.
        type_name: String,
        /// The member name requested.
        member: String,
    },

    /// Accessor used against the wrong kind of member.
    #[error("member '{member}' on '{type_name}' is a {found} member, not a {expected} member")]
    MemberKindMismatch {
        /// The type that owns the member.
        type_name: String,
        /// The member name (or `[index]` for the indexer).
        member: String,
        /// The kind the accessor requires.
        expected: MemberKind,
        /// The kind the member actually has.
        found: MemberKind,
    },

    /// Array index is out of bounds.
    #[error("index {index} out of bounds (len: {len}) on '{type_name}'")]
    IndexOutOfBounds {
        /// The array type.
        type_name: String,
        /// The index that was accessed.
        index: usize,
        /// The actual length of the array.
        len: usize,
    },

    /// The requested Rust type differs from the member's declared type.
    #[error("type mismatch at '{member}': expected {expected}, found {found}")]
    TypeMismatch {
        /// The member name.
        member: String,
        /// The requested type.
        expected: String,
        /// The declared type.
        found: String,
    },

    /// An array accessor reached a `None` value.
    #[error("member '{member}' on '{type_name}' is null")]
    NullMember {
        /// The type that owns the member.
        type_name: String,
        /// The member name.
        member: String,
    },

    /// Named member belongs to an enum variant other than the active one.
    #[error("member '{member}' on '{type_name}' belongs to a variant that is not active")]
    InactiveMember {
        /// The enum type.
        type_name: String,
        /// The member name.
        member: String,
    },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl FreezeError {
    /// Create a shape rejected error.
    #[inline]
    pub fn shape_rejected(type_name: impl Into<String>, rejection: Rejection) -> Self {
        FreezeError::ShapeRejected {
            type_name: type_name.into(),
            rejection,
        }
    }

    /// Create a construction unavailable error.
    #[inline]
    pub fn construction_unavailable(type_name: impl Into<String>) -> Self {
        FreezeError::ConstructionUnavailable {
            type_name: type_name.into(),
        }
    }

    /// Create a depth exceeded error.
    #[inline]
    pub fn depth_exceeded(type_name: impl Into<String>, depth: usize, max_depth: usize) -> Self {
        FreezeError::DepthExceeded {
            type_name: type_name.into(),
            depth,
            max_depth,
        }
    }

    /// Create a member not found error.
    #[inline]
    pub fn member_not_found(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        FreezeError::MemberNotFound {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    /// Create a member kind mismatch error.
    #[inline]
    pub fn member_kind_mismatch(
        type_name: impl Into<String>,
        member: impl Into<String>,
        expected: MemberKind,
        found: MemberKind,
    ) -> Self {
        FreezeError::MemberKindMismatch {
            type_name: type_name.into(),
            member: member.into(),
            expected,
            found,
        }
    }

    /// Create an index out of bounds error.
    #[inline]
    pub fn index_out_of_bounds(type_name: impl Into<String>, index: usize, len: usize) -> Self {
        FreezeError::IndexOutOfBounds {
            type_name: type_name.into(),
            index,
            len,
        }
    }

    /// Create a type mismatch error.
    #[inline]
    pub fn type_mismatch(
        member: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        FreezeError::TypeMismatch {
            member: member.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a null member error.
    #[inline]
    pub fn null_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        FreezeError::NullMember {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    /// Create an inactive member error.
    #[inline]
    pub fn inactive_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        FreezeError::InactiveMember {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    /// Whether this error came from routine compilation rather than member access.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            FreezeError::ShapeRejected { .. }
                | FreezeError::ConstructionUnavailable { .. }
                | FreezeError::DepthExceeded { .. }
        )
    }
}
