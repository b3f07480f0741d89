//! Declarative protocol specs and the fluent builder that produces them.
//!
//! A spec is the protocol in its building state: it can still be edited and
//! is never observable as a `Protocol`. Builder calls evaluate their
//! arguments once, in call order, so parent expressions and computed keys
//! are evaluated in exactly the order they are written.

use crate::config::DefineConfig;
use crate::descriptor::Descriptor;
use crate::error::DefinitionError;
use crate::member::{MemberDecl, MemberName, Scope};

use super::define::define_with;
use super::Protocol;

/// Everything a front-end hands to [`define`](super::define).
#[derive(Debug, Clone, Default)]
pub struct ProtocolSpec {
    /// Protocol name, used as the prefix of minted key labels. May be empty.
    pub name: String,
    /// Extended protocols, most specific first.
    pub parents: Vec<Protocol>,
    /// Member declarations in source order.
    pub members: Vec<MemberDecl>,
}

impl ProtocolSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Builder for protocols.
///
/// # Example
/// ```rust
/// use protomix::{Descriptor, ProtocolBuilder, Value};
///
/// let functor = ProtocolBuilder::new("Functor").require("map").build()?;
/// let applicative = ProtocolBuilder::new("Applicative")
///     .extends(&functor)
///     .require_static("of")
///     .require("apply")
///     .build()?;
/// # Ok::<(), protomix::DefinitionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProtocolBuilder {
    spec: ProtocolSpec,
}

impl ProtocolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: ProtocolSpec::new(name),
        }
    }

    /// Adds a parent protocol. Parents keep the order they are added in.
    #[must_use]
    pub fn extends(mut self, parent: &Protocol) -> Self {
        self.spec.parents.push(parent.clone());
        self
    }

    /// Declares a required instance member.
    #[must_use]
    pub fn require(self, name: impl Into<MemberName>) -> Self {
        self.member(MemberDecl::required(name, Scope::Instance))
    }

    /// Declares a required static member.
    #[must_use]
    pub fn require_static(self, name: impl Into<MemberName>) -> Self {
        self.member(MemberDecl::required(name, Scope::Static))
    }

    /// Declares a provided instance member.
    ///
    /// Passing another protocol's key supplies a default for that
    /// protocol's requirement.
    #[must_use]
    pub fn provide(self, name: impl Into<MemberName>, body: Descriptor) -> Self {
        self.member(MemberDecl::provided(name, Scope::Instance, body))
    }

    /// Declares a provided static member.
    #[must_use]
    pub fn provide_static(self, name: impl Into<MemberName>, body: Descriptor) -> Self {
        self.member(MemberDecl::provided(name, Scope::Static, body))
    }

    /// Appends an arbitrary member declaration.
    #[must_use]
    pub fn member(mut self, decl: MemberDecl) -> Self {
        self.spec.members.push(decl);
        self
    }

    /// Returns the spec without sealing it.
    #[must_use]
    pub fn into_spec(self) -> ProtocolSpec {
        self.spec
    }

    /// Validates and seals the protocol with the default config.
    pub fn build(self) -> Result<Protocol, DefinitionError> {
        self.build_with(&DefineConfig::default())
    }

    /// Validates and seals the protocol with an explicit config.
    pub fn build_with(self, config: &DefineConfig) -> Result<Protocol, DefinitionError> {
        define_with(self.spec, config)
    }
}
