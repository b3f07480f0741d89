//! Protocol composition.
//!
//! [`mixin`] validates first and installs second, so a failed composition
//! leaves the target exactly as it was. Installation follows closure order
//! and never overwrites a key the target already defines directly. That one
//! rule makes an explicit implementation beat any default, and makes the
//! first protocol reached in traversal win among conflicting defaults.

use tracing::{debug, trace, warn};

use crate::descriptor::PropertyAttributes;
use crate::error::{CompositionError, ProtocolResult};
use crate::protocol::Protocol;
use crate::target::Target;

use super::closure::collect;
use super::conformance::unsatisfied;

/// Validates `protocol` against `target` and installs its defaults.
///
/// Returns the target so calls can be chained.
///
/// # Errors
/// - `UnimplementedMember`: some required key is neither on the target nor
///   provided anywhere in the closure. Every such key is listed and nothing
///   is installed.
///
/// # Examples
///
/// ```
/// use protomix::{mixin, Class, Descriptor, ProtocolBuilder, Value};
///
/// let i = ProtocolBuilder::new("I")
///     .require("a")
///     .provide("b", Descriptor::method(|_, _| Ok(Value::Int(1))))
///     .build()?;
///
/// let mut class = Class::new("C");
/// class.define_method(i.key("a").unwrap().clone(), Descriptor::method(|_, _| Ok(Value::Null)));
///
/// mixin(&i, &mut class)?;
/// assert!(class.instance().has_own(i.key("b").unwrap()));
/// # Ok::<(), protomix::ProtocolError>(())
/// ```
pub fn mixin<'t, T>(protocol: &Protocol, target: &'t mut T) -> ProtocolResult<&'t mut T>
where
    T: Target + ?Sized,
{
    let closure = collect(protocol);

    let missing = unsatisfied(&*target, &closure);
    if !missing.is_empty() {
        let keys: Vec<_> = missing.into_iter().map(|(_, key)| key).collect();
        debug!(
            protocol = %protocol.name(),
            target = %target.describe(),
            missing = keys.len(),
            "composition rejected"
        );
        return Err(CompositionError::UnimplementedMember {
            protocol: protocol.name().to_string(),
            target: target.describe(),
            keys,
        }
        .into());
    }

    let mut installed = 0usize;
    let mut skipped = 0usize;
    for node in &closure {
        for member in node.members() {
            let Some(descriptor) = member.descriptor() else {
                continue;
            };
            if target.has_own(member.scope(), member.key()) {
                skipped += 1;
                continue;
            }
            trace!(
                protocol = %node.name(),
                scope = %member.scope(),
                key = %member.key(),
                "installing provided member"
            );
            target.install(
                member.scope(),
                member.key().clone(),
                descriptor.clone(),
                PropertyAttributes::provided(descriptor),
            );
            installed += 1;
        }
    }

    debug!(
        protocol = %protocol.name(),
        target = %target.describe(),
        closure = closure.len(),
        installed,
        skipped,
        "protocol composed"
    );
    Ok(target)
}

/// Composes each protocol onto `target`, strictly left to right.
///
/// Each protocol is fully validated and installed before the next one is
/// looked at, so later protocols see what earlier ones installed, and an
/// earlier default is never replaced by a later one.
///
/// # Errors
/// - `InvalidTarget`: the target has no construct capability. Checked
///   before any protocol is composed.
/// - `UnimplementedMember`: the first protocol whose requirements are not
///   met. Protocols before it stay composed.
pub fn apply_all<'t, T>(target: &'t mut T, protocols: &[Protocol]) -> ProtocolResult<&'t mut T>
where
    T: Target + ?Sized,
{
    if !target.is_constructible() {
        let described = target.describe();
        warn!(target = %described, "refusing to compose onto a non-constructible target");
        return Err(CompositionError::InvalidTarget { target: described }.into());
    }

    for protocol in protocols {
        mixin(protocol, &mut *target)?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::error::ProtocolError;
    use crate::member::Scope;
    use crate::object::Class;
    use crate::protocol::ProtocolBuilder;
    use crate::target::Target;
    use crate::value::Value;

    fn returns(n: i64) -> Descriptor {
        Descriptor::method(move |_, _| Ok(Value::Int(n)))
    }

    #[test]
    fn test_failed_mixin_leaves_target_untouched() {
        let i = ProtocolBuilder::new("I")
            .require("a")
            .provide("b", returns(1))
            .provide_static("c", returns(2))
            .build()
            .unwrap();

        let mut class = Class::new("C");
        let err = mixin(&i, &mut class).unwrap_err();
        assert_eq!(err.unimplemented_keys(), Some(&[i.key("a").unwrap().clone()][..]));
        assert!(class.instance().is_empty());
        assert!(class.statics().is_empty());
    }

    #[test]
    fn test_installs_instance_and_static_defaults() {
        let i = ProtocolBuilder::new("I")
            .provide("b", returns(1))
            .provide_static("c", returns(2))
            .build()
            .unwrap();

        let mut class = Class::new("C");
        mixin(&i, &mut class).unwrap();
        assert!(class.instance().has_own(i.key("b").unwrap()));
        assert!(class.statics().has_own(i.key("c").unwrap()));
        assert!(!class.statics().has_own(i.key("b").unwrap()));
    }

    #[test]
    fn test_explicit_implementation_beats_default() {
        let i = ProtocolBuilder::new("I").require("a").build().unwrap();
        let a = i.key("a").unwrap().clone();
        let j = ProtocolBuilder::new("J")
            .extends(&i)
            .require("b")
            .provide(&a, returns(5))
            .build()
            .unwrap();

        let own = returns(0);
        let mut class = Class::new("A");
        class.define_method(j.key("b").unwrap().clone(), returns(9));
        class.define_method(a.clone(), own.clone());

        mixin(&j, &mut class).unwrap();
        let slot = class.instance().slot(&a).unwrap();
        assert!(slot.descriptor.same_body(&own));
    }

    #[test]
    fn test_installed_members_are_not_enumerable() {
        let i = ProtocolBuilder::new("I")
            .require("a")
            .provide("b", returns(1))
            .provide("c", Descriptor::getter(|_| Ok(Value::Null)))
            .build()
            .unwrap();
        let a = i.key("a").unwrap().clone();

        let mut class = Class::new("C");
        class.define_method(a.clone(), returns(0));
        mixin(&i, &mut class).unwrap();

        assert_eq!(class.instance().own_enumerable_keys(), vec![&a]);
        let b = class.instance().slot(i.key("b").unwrap()).unwrap();
        assert_eq!(b.attributes, PropertyAttributes { writable: Some(true), enumerable: false, configurable: true });
        let c = class.instance().slot(i.key("c").unwrap()).unwrap();
        assert_eq!(c.attributes.writable, None);
        assert!(!c.attributes.enumerable);
    }

    #[test]
    fn test_mixin_twice_is_idempotent() {
        let i = ProtocolBuilder::new("I").provide("b", returns(1)).build().unwrap();
        let b = i.key("b").unwrap().clone();

        let mut class = Class::new("C");
        mixin(&i, &mut class).unwrap();
        let first = class.instance().slot(&b).unwrap().descriptor.clone();
        mixin(&i, &mut class).unwrap();
        assert!(class.instance().slot(&b).unwrap().descriptor.same_body(&first));
        assert_eq!(class.instance().len(), 1);
    }

    #[test]
    fn test_apply_all_rejects_non_constructible_target() {
        let i = ProtocolBuilder::new("I").provide("b", returns(1)).build().unwrap();
        let mut object = Class::plain_object();
        let err = apply_all(&mut object, &[i]).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Composition(CompositionError::InvalidTarget { .. })
        ));
        assert!(object.instance().is_empty());
    }

    #[test]
    fn test_apply_all_with_no_protocols_still_checks_target() {
        let mut object = Class::plain_object();
        assert!(apply_all(&mut object, &[]).is_err());
        let mut class = Class::new("C");
        assert!(apply_all(&mut class, &[]).is_ok());
    }

    #[test]
    fn test_apply_all_later_protocol_sees_earlier_installs() {
        let i = ProtocolBuilder::new("I").require("a").build().unwrap();
        let a = i.key("a").unwrap().clone();
        let provider = ProtocolBuilder::new("P").provide(&a, returns(1)).build().unwrap();

        let mut class = Class::new("C");
        apply_all(&mut class, &[provider, i.clone()]).unwrap();
        assert!(class.instance().has_own(&a));

        // The other way round, I is checked first and fails.
        let provider = ProtocolBuilder::new("P").provide(&a, returns(1)).build().unwrap();
        let mut class = Class::new("D");
        assert!(apply_all(&mut class, &[i, provider]).is_err());
    }

    #[test]
    fn test_apply_all_stops_at_first_failure() {
        let ok = ProtocolBuilder::new("Ok").provide("x", returns(1)).build().unwrap();
        let bad = ProtocolBuilder::new("Bad").require("y").build().unwrap();
        let never = ProtocolBuilder::new("Never").provide("z", returns(1)).build().unwrap();

        let mut class = Class::new("C");
        let err = apply_all(&mut class, &[ok.clone(), bad, never.clone()]).unwrap_err();
        assert!(err.unimplemented_keys().is_some());
        assert!(class.instance().has_own(ok.key("x").unwrap()));
        assert!(!class.instance().has_own(never.key("z").unwrap()));
    }

    #[test]
    fn test_static_default_satisfies_only_static_requirement() {
        let i = ProtocolBuilder::new("I").require_static("of").build().unwrap();
        let of = i.key("of").unwrap().clone();
        let j = ProtocolBuilder::new("J")
            .extends(&i)
            .provide_static(&of, returns(42))
            .build()
            .unwrap();

        let mut class = Class::new("Maybe");
        mixin(&j, &mut class).unwrap();
        assert!(class.statics().has_own(&of));
        assert_eq!(class.call_static(&of, &[]).unwrap(), Value::Int(42));
        assert!(!class.has_own(Scope::Instance, &of));
    }
}
