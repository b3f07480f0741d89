//! Error types for protomix.
//!
//! All errors are strongly typed using thiserror. Definition errors are
//! raised while a protocol is being built and are never deferred.
//! Composition errors are raised before any target mutation, so a caller
//! that catches one still holds an untouched target.

use thiserror::Error;

use crate::key::MemberKey;
use crate::member::Scope;

/// Errors raised by `define` while sealing a protocol.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Duplicate {scope} member '{name}'")]
    DuplicateMember {
        name: String,
        scope: Scope,
    },

    #[error("Member '{name}' is declared both as an instance and as a static member")]
    CrossScopeCollision {
        name: String,
    },

    #[error("Provided {scope} member may not be named '{name}'")]
    ReservedName {
        name: String,
        scope: Scope,
    },

    #[error("Protocol '{protocol}' declares more than {max} members")]
    TooManyMembers {
        protocol: String,
        max: usize,
    },

    #[error("Protocol '{protocol}' extends more than {max} protocols")]
    TooManyParents {
        protocol: String,
        max: usize,
    },

    #[error("Invalid definition config: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Errors raised by `mixin` and `apply_all`.
#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("{} not implemented by {target} (required by {protocol})", join_keys(.keys))]
    UnimplementedMember {
        protocol: String,
        target: String,
        keys: Vec<MemberKey>,
    },

    #[error("{target} cannot be composed: it has no construct capability")]
    InvalidTarget {
        target: String,
    },
}

/// Errors raised while invoking members on the reference object model.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Member not found: {key}")]
    MemberNotFound {
        key: MemberKey,
    },

    #[error("Member {key} is an accessor, not a method")]
    NotCallable {
        key: MemberKey,
    },

    #[error("Member {key} has no getter")]
    NoGetter {
        key: MemberKey,
    },

    #[error("Member {key} has no setter")]
    NoSetter {
        key: MemberKey,
    },

    #[error("Member body failed: {message}")]
    Failed {
        message: String,
    },
}

fn join_keys(keys: &[MemberKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Top-level error type for protomix.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Definition error: {0}")]
    Definition(#[from] DefinitionError),

    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl ProtocolError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a dispatch failure carrying a free-form message.
    ///
    /// Member bodies use this to report their own failures.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Dispatch(DispatchError::Failed {
            message: message.into(),
        })
    }

    /// Returns true if this is a definition error.
    #[must_use]
    pub const fn is_definition(&self) -> bool {
        matches!(self, Self::Definition(_))
    }

    /// Returns true if this is a composition error.
    #[must_use]
    pub const fn is_composition(&self) -> bool {
        matches!(self, Self::Composition(_))
    }

    /// Returns true if this is a dispatch error.
    #[must_use]
    pub const fn is_dispatch(&self) -> bool {
        matches!(self, Self::Dispatch(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns the offending keys of an `UnimplementedMember` error.
    #[must_use]
    pub fn unimplemented_keys(&self) -> Option<&[MemberKey]> {
        match self {
            Self::Composition(CompositionError::UnimplementedMember { keys, .. }) => Some(keys.as_slice()),
            _ => None,
        }
    }

    /// Returns true if the caller can recover and keep using the target.
    ///
    /// Definition errors are fatal to whoever is defining the protocol.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !self.is_definition()
    }
}

/// Result type alias for protomix operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
