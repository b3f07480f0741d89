//! Member identity.
//!
//! Every member slot a protocol declares is addressed by a [`MemberKey`].
//! Keys minted for plain identifier names are unique tokens: two keys
//! minted from the same label are still distinct, so a requirement can only
//! be satisfied by code that obtained the key from the protocol itself.
//! Literal keys are adopted verbatim and compare by value, which lets
//! unrelated protocols deliberately share a slot.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier backing a minted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KeyId(Uuid);

impl KeyId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal key supplied by a declaration and used as-is.
///
/// # Examples
///
/// ```
/// use protomix::{LiteralKey, MemberKey};
///
/// let a = MemberKey::from(LiteralKey::from("string-named property"));
/// let b = MemberKey::from(LiteralKey::from("string-named property"));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralKey {
    String(String),
    Int(i64),
}

impl LiteralKey {
    /// Returns the string form if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Int(_) => None,
        }
    }
}

impl fmt::Display for LiteralKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for LiteralKey {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for LiteralKey {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for LiteralKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// A freshly minted, globally unique key.
///
/// Equality and hashing use only the id; the label is diagnostic.
#[derive(Debug, Clone)]
pub struct MintedKey {
    id: KeyId,
    label: Arc<str>,
}

impl MintedKey {
    /// Returns the unique id of this key.
    #[must_use]
    pub const fn id(&self) -> KeyId {
        self.id
    }

    /// Returns the diagnostic label, e.g. `static Monad.of`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for MintedKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MintedKey {}

impl std::hash::Hash for MintedKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Opaque identity of one member slot.
///
/// Never compared by name: a minted key equals only its own clones.
///
/// # Examples
///
/// ```
/// use protomix::MemberKey;
///
/// let a = MemberKey::mint("I.a");
/// let b = MemberKey::mint("I.a");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// assert_eq!(a.label(), "I.a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
    /// Fresh token minted for an identifier-named member.
    Minted(MintedKey),
    /// Literal string or number adopted from the declaration.
    Literal(LiteralKey),
}

impl MemberKey {
    /// Mints a new unique key with the given diagnostic label.
    #[must_use]
    pub fn mint(label: impl Into<String>) -> Self {
        let label: String = label.into();
        Self::Minted(MintedKey {
            id: KeyId::new(),
            label: Arc::from(label),
        })
    }

    /// Returns true if this key was minted.
    #[must_use]
    pub const fn is_minted(&self) -> bool {
        matches!(self, Self::Minted(_))
    }

    /// Returns the literal value if this key was adopted from a literal.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&LiteralKey> {
        match self {
            Self::Literal(lit) => Some(lit),
            Self::Minted(_) => None,
        }
    }

    /// Returns a human-readable label for diagnostics.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Minted(k) => k.label().to_string(),
            Self::Literal(LiteralKey::String(s)) => s.clone(),
            Self::Literal(LiteralKey::Int(n)) => n.to_string(),
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minted(k) => write!(f, "[{}]", k.label()),
            Self::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl From<LiteralKey> for MemberKey {
    fn from(lit: LiteralKey) -> Self {
        Self::Literal(lit)
    }
}

impl From<&str> for MemberKey {
    fn from(s: &str) -> Self {
        Self::Literal(LiteralKey::from(s))
    }
}

impl From<i64> for MemberKey {
    fn from(n: i64) -> Self {
        Self::Literal(LiteralKey::Int(n))
    }
}
