//! Conformance checking.
//!
//! A required key is satisfied when the target already has it installed
//! directly on the matching surface, or when some protocol in the closure
//! provides a default for it. Nothing here mutates the target.

use crate::key::MemberKey;
use crate::member::Scope;
use crate::protocol::Protocol;
use crate::target::Target;

use super::closure::{collect, Closure};

/// Returns every required key of `closure` the target leaves unsatisfied,
/// in closure order.
pub(crate) fn unsatisfied<T>(target: &T, closure: &Closure) -> Vec<(Scope, MemberKey)>
where
    T: Target + ?Sized,
{
    closure
        .required_keys()
        .into_iter()
        .filter(|(scope, key)| !target.has_own(*scope, key) && !closure.provides(*scope, key))
        .collect()
}

/// Returns the required keys `protocol` would report as unimplemented if
/// composed onto `target` now.
pub fn unimplemented<T>(target: &T, protocol: &Protocol) -> Vec<MemberKey>
where
    T: Target + ?Sized,
{
    unsatisfied(target, &collect(protocol))
        .into_iter()
        .map(|(_, key)| key)
        .collect()
}

/// Returns true if composing `protocol` onto `target` would succeed.
///
/// # Examples
///
/// ```
/// use protomix::{conforms, Class, Descriptor, ProtocolBuilder, Value};
///
/// let functor = ProtocolBuilder::new("Functor").require("map").build()?;
/// let map = functor.key("map").unwrap().clone();
///
/// let mut list = Class::new("List");
/// assert!(!conforms(&list, &functor));
///
/// list.define_method(map, Descriptor::method(|_, _| Ok(Value::Null)));
/// assert!(conforms(&list, &functor));
/// # Ok::<(), protomix::DefinitionError>(())
/// ```
#[must_use]
pub fn conforms<T>(target: &T, protocol: &Protocol) -> bool
where
    T: Target + ?Sized,
{
    unsatisfied(target, &collect(protocol)).is_empty()
}

/// Returns true if every required and provided key of `protocol`'s closure
/// is already installed directly on `target`.
///
/// This holds once the protocol has been composed onto the target, or when
/// the target implements every member by hand. It is stricter than
/// [`conforms`], which also accepts targets whose gaps defaults would fill.
#[must_use]
pub fn is_implemented_by<T>(target: &T, protocol: &Protocol) -> bool
where
    T: Target + ?Sized,
{
    collect(protocol)
        .members()
        .all(|m| target.has_own(m.scope(), m.key()))
}
