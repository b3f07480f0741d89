//! # protomix - First-class protocols for Rust
//!
//! protomix lets independently defined capability contracts ("protocols")
//! be declared once and composed onto any constructible type. Composition
//! validates that every requirement is satisfied before anything is
//! installed, handles diamond-shaped extension graphs, and resolves
//! conflicting defaults deterministically: the most specific wins.
//!
//! ## Core Concepts
//!
//! - **Protocol**: A sealed bundle of required and provided members plus
//!   ordered parent protocols
//! - **MemberKey**: The unforgeable identity of one member slot
//! - **Closure**: The deduplicated, ordered flattening of a protocol's parents
//! - **Mixin**: Validating a protocol against a target and installing defaults
//! - **Conformance**: A non-mutating check that a mixin would succeed
//!
//! ## Usage
//!
//! ```rust
//! use protomix::{apply_all, conforms, Class, Descriptor, ProtocolBuilder, Value};
//!
//! let base = ProtocolBuilder::new("I").require("a").build()?;
//! let a = base.key("a").unwrap().clone();
//! let call_a = a.clone();
//! let derived = ProtocolBuilder::new("J")
//!     .extends(&base)
//!     .provide("f", Descriptor::method(move |this, _| this.call(&call_a, &[])))
//!     .build()?;
//! let f = derived.key("f").unwrap().clone();
//!
//! let mut class = Class::new("C");
//! class.define_method(a, Descriptor::method(|_, _| Ok(Value::from("success"))));
//! assert!(conforms(&class, &derived));
//!
//! apply_all(&mut class, &[derived])?;
//!
//! let class = std::sync::Arc::new(class);
//! let obj = protomix::Instance::new(&class);
//! assert_eq!(obj.call(&f, &[])?, Value::from("success"));
//! # Ok::<(), protomix::ProtocolError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod compose;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod key;
pub mod member;
pub mod object;
pub mod protocol;
pub mod target;
pub mod value;

// Re-export primary types at crate root for convenience
pub use compose::{apply_all, collect, conforms, is_implemented_by, mixin, unimplemented, Closure};
pub use config::DefineConfig;
pub use descriptor::{Descriptor, DescriptorKind, Getter, Method, PropertyAttributes, Setter};
pub use error::{
    CompositionError, DefinitionError, DispatchError, ProtocolError, ProtocolResult,
};
pub use key::{KeyId, LiteralKey, MemberKey, MintedKey};
pub use member::{Member, MemberDecl, MemberKind, MemberName, Scope};
pub use object::{Class, Instance, Receiver, Slot, Surface};
pub use protocol::{
    define, define_with, MemberSummary, Protocol, ProtocolBuilder, ProtocolId, ProtocolSpec,
    ProtocolSummary,
};
pub use target::Target;
pub use value::Value;
