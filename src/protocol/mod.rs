//! Sealed protocol values.
//!
//! A [`Protocol`] is built exactly once, through [`define`] or a
//! [`ProtocolBuilder`], and is read-only afterwards. Handles are cheap to
//! clone and share one sealed value, so a protocol may be used by any number
//! of compositions on any number of threads.
//!
//! Identity is reference identity: two protocols declared with the same
//! shape are still distinct nodes of the extension graph.

mod define;
mod spec;
mod summary;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compose::collect;
use crate::key::MemberKey;
use crate::member::{Member, MemberKind, Scope};

pub use define::{define, define_with};
pub use spec::{ProtocolBuilder, ProtocolSpec};
pub use summary::{MemberSummary, ProtocolSummary};

/// Unique identifier for a sealed protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolId(Uuid);

impl ProtocolId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct ProtocolInner {
    id: ProtocolId,
    name: String,
    parents: Vec<Protocol>,
    members: Vec<Member>,
    names: HashMap<String, MemberKey>,
}

/// A sealed, named bundle of required and provided members plus an ordered
/// list of parent protocols.
///
/// # Examples
///
/// ```
/// use protomix::{Descriptor, ProtocolBuilder, Value};
///
/// let functor = ProtocolBuilder::new("Functor").require("map").build()?;
/// let monad = ProtocolBuilder::new("Monad")
///     .extends(&functor)
///     .require("bind")
///     .provide("kleisli", Descriptor::method(|_, _| Ok(Value::Null)))
///     .build()?;
///
/// assert!(monad.key("bind").is_some());
/// assert!(monad.key("map").is_none());
/// assert!(monad.extends(&functor));
/// # Ok::<(), protomix::DefinitionError>(())
/// ```
#[derive(Clone)]
pub struct Protocol(Arc<ProtocolInner>);

impl Protocol {
    pub(crate) fn seal(
        name: String,
        parents: Vec<Protocol>,
        members: Vec<Member>,
        names: HashMap<String, MemberKey>,
    ) -> Self {
        Self(Arc::new(ProtocolInner {
            id: ProtocolId::new(),
            name,
            parents,
            members,
            names,
        }))
    }

    #[must_use]
    pub fn id(&self) -> ProtocolId {
        self.0.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Directly extended protocols, in declaration order.
    #[must_use]
    pub fn parents(&self) -> &[Protocol] {
        &self.0.parents
    }

    /// Own members, in declaration order. Members of parents are not included.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.0.members
    }

    /// Looks up the key of a member declared by name on this protocol.
    ///
    /// Identifier names resolve to the key minted for them; string-literal
    /// names resolve to the literal key itself.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&MemberKey> {
        self.0.names.get(name)
    }

    /// Own required members of the given scope.
    pub fn required(&self, scope: Scope) -> impl Iterator<Item = &Member> + '_ {
        self.members_of(scope, MemberKind::Required)
    }

    /// Own provided members of the given scope.
    pub fn provided(&self, scope: Scope) -> impl Iterator<Item = &Member> + '_ {
        self.members_of(scope, MemberKind::Provided)
    }

    fn members_of(&self, scope: Scope, kind: MemberKind) -> impl Iterator<Item = &Member> + '_ {
        self.0
            .members
            .iter()
            .filter(move |m| m.scope() == scope && m.kind() == kind)
    }

    /// Returns true if `other` is reachable from this protocol through
    /// `parents`, or is this protocol.
    #[must_use]
    pub fn extends(&self, other: &Protocol) -> bool {
        collect(self).contains(other)
    }

    /// Returns true if both handles refer to the same sealed protocol.
    #[must_use]
    pub fn ptr_eq(&self, other: &Protocol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Protocol {}

impl std::hash::Hash for Protocol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Protocol")
            .field("name", &self.0.name)
            .field("id", &self.0.id)
            .field(
                "parents",
                &self.0.parents.iter().map(Protocol::name).collect::<Vec<_>>(),
            )
            .field("members", &self.0.members.len())
            .finish()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.name.is_empty() {
            write!(f, "protocol <anonymous>")
        } else {
            write!(f, "protocol {}", self.0.name)
        }
    }
}
