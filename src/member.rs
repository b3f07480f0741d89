//! Member declarations and sealed members.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::Descriptor;
use crate::key::{LiteralKey, MemberKey};

/// Which surface of a target a member lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Members reached through instances.
    Instance,
    /// Members on the type itself.
    Static,
}

impl Scope {
    /// Both scopes, instance first.
    pub const ALL: [Scope; 2] = [Scope::Instance, Scope::Static];
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => write!(f, "instance"),
            Self::Static => write!(f, "static"),
        }
    }
}

/// Whether a protocol demands a member or supplies a default for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Required,
    Provided,
}

/// How a declaration names its member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberName {
    /// Plain identifier: a fresh key is minted for it.
    Ident(String),
    /// Literal or computed key, adopted as-is.
    Key(MemberKey),
}

impl MemberName {
    /// The name the protocol's lookup table indexes, if any.
    ///
    /// Identifiers and string literals are indexed; numbers and keys borrowed
    /// from other protocols are not.
    pub(crate) fn lookup_name(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name.as_str()),
            Self::Key(MemberKey::Literal(LiteralKey::String(s))) => Some(s.as_str()),
            Self::Key(_) => None,
        }
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "{name}"),
            Self::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<&str> for MemberName {
    fn from(name: &str) -> Self {
        Self::Ident(name.to_string())
    }
}

impl From<String> for MemberName {
    fn from(name: String) -> Self {
        Self::Ident(name)
    }
}

impl From<MemberKey> for MemberName {
    fn from(key: MemberKey) -> Self {
        Self::Key(key)
    }
}

impl From<&MemberKey> for MemberName {
    fn from(key: &MemberKey) -> Self {
        Self::Key(key.clone())
    }
}

impl From<LiteralKey> for MemberName {
    fn from(lit: LiteralKey) -> Self {
        Self::Key(MemberKey::Literal(lit))
    }
}

/// One member as written in a protocol declaration, before sealing.
///
/// A declaration with a body is Provided; without one it is Required.
#[derive(Debug, Clone)]
pub struct MemberDecl {
    pub name: MemberName,
    pub scope: Scope,
    pub body: Option<Descriptor>,
}

impl MemberDecl {
    /// Declares a required member.
    pub fn required(name: impl Into<MemberName>, scope: Scope) -> Self {
        Self {
            name: name.into(),
            scope,
            body: None,
        }
    }

    /// Declares a provided member with a default body.
    pub fn provided(name: impl Into<MemberName>, scope: Scope, body: Descriptor) -> Self {
        Self {
            name: name.into(),
            scope,
            body: Some(body),
        }
    }

    /// Returns whether this declaration is required or provided.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        if self.body.is_some() {
            MemberKind::Provided
        } else {
            MemberKind::Required
        }
    }
}

/// A sealed member of a protocol.
///
/// Provided members always carry a descriptor; required members never do.
#[derive(Debug, Clone)]
pub struct Member {
    key: MemberKey,
    scope: Scope,
    descriptor: Option<Descriptor>,
}

impl Member {
    pub(crate) fn new(key: MemberKey, scope: Scope, descriptor: Option<Descriptor>) -> Self {
        Self {
            key,
            scope,
            descriptor,
        }
    }

    pub fn key(&self) -> &MemberKey {
        &self.key
    }

    pub const fn scope(&self) -> Scope {
        self.scope
    }

    pub const fn kind(&self) -> MemberKind {
        if self.descriptor.is_some() {
            MemberKind::Provided
        } else {
            MemberKind::Required
        }
    }

    /// Returns the default body of a provided member.
    pub const fn descriptor(&self) -> Option<&Descriptor> {
        self.descriptor.as_ref()
    }

    pub const fn is_required(&self) -> bool {
        self.descriptor.is_none()
    }
}
