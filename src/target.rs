//! The contract a host object model implements to be composed onto.
//!
//! A target has two surfaces, instance and static. The engine only ever asks
//! whether a key is installed *directly* on a surface and installs new keys;
//! it never removes or replaces anything, and never looks at whatever
//! inheritance the host has of its own.

use crate::descriptor::{Descriptor, PropertyAttributes};
use crate::key::MemberKey;
use crate::member::Scope;

/// A mutable type protocols can be composed onto.
///
/// # Safety Considerations
/// - The engine does no locking. Composing onto the same target from several
///   threads at once must be serialized by the caller.
pub trait Target {
    /// Short description used in error messages, e.g. `class Maybe`.
    fn describe(&self) -> String;

    /// Returns true if this target has a construct capability, i.e. really
    /// has an instance and a static surface.
    fn is_constructible(&self) -> bool;

    /// Returns true if `key` is installed directly on the `scope` surface.
    fn has_own(&self, scope: Scope, key: &MemberKey) -> bool;

    /// Installs a member on the `scope` surface.
    ///
    /// Only called for keys where `has_own` returned false.
    fn install(
        &mut self,
        scope: Scope,
        key: MemberKey,
        descriptor: Descriptor,
        attributes: PropertyAttributes,
    );
}
