//! Instances of reference-model classes.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ProtocolError, ProtocolResult};
use crate::key::MemberKey;
use crate::value::Value;

use super::class::Class;
use super::{dispatch_call, dispatch_get, dispatch_set, Receiver};

fn lock_err(context: &'static str) -> ProtocolError {
    ProtocolError::internal(format!("poisoned lock: {context}"))
}

/// An object whose behavior comes from its class's instance surface.
///
/// Fields are plain named values private to the instance. Members are looked
/// up on the shared class, which is frozen once the first instance exists:
/// compose protocols onto a `Class` before wrapping it in an `Arc`.
#[derive(Debug)]
pub struct Instance {
    class: Arc<Class>,
    fields: RwLock<HashMap<String, Value>>,
}

impl Instance {
    #[must_use]
    pub fn new(class: &Arc<Class>) -> Self {
        Self {
            class: Arc::clone(class),
            fields: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Calls an instance method with this instance as receiver.
    pub fn call(&self, key: &MemberKey, args: &[Value]) -> ProtocolResult<Value> {
        dispatch_call(self.class.instance(), key, Receiver::Instance(self), args)
    }

    /// Reads an instance accessor.
    pub fn get(&self, key: &MemberKey) -> ProtocolResult<Value> {
        dispatch_get(self.class.instance(), key, Receiver::Instance(self))
    }

    /// Writes an instance accessor.
    pub fn set(&self, key: &MemberKey, value: Value) -> ProtocolResult<()> {
        dispatch_set(self.class.instance(), key, Receiver::Instance(self), value)
    }

    pub fn field(&self, name: &str) -> ProtocolResult<Option<Value>> {
        let fields = self.fields.read().map_err(|_| lock_err("instance fields"))?;
        Ok(fields.get(name).cloned())
    }

    pub fn set_field(&self, name: impl Into<String>, value: Value) -> ProtocolResult<()> {
        let mut fields = self.fields.write().map_err(|_| lock_err("instance fields"))?;
        fields.insert(name.into(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::error::DispatchError;

    #[test]
    fn test_fields() {
        let class = Arc::new(Class::new("Point"));
        let p = Instance::new(&class);
        assert_eq!(p.field("x").unwrap(), None);
        p.set_field("x", Value::Int(3)).unwrap();
        assert_eq!(p.field("x").unwrap(), Some(Value::Int(3)));
        assert_eq!(p.class().name(), "Point");
    }

    #[test]
    fn test_accessor_pair_through_fields() {
        let key = MemberKey::mint("I.e");
        let mut class = Class::new("C");
        class.define_method(
            key.clone(),
            Descriptor::getter(|this| Ok(this.field("e")?.unwrap_or_default()))
                .with_setter(|this, value| this.set_field("e", value)),
        );
        let class = Arc::new(class);

        let obj = Instance::new(&class);
        assert_eq!(obj.get(&key).unwrap(), Value::Null);
        obj.set(&key, Value::from("set")).unwrap();
        assert_eq!(obj.get(&key).unwrap(), Value::from("set"));
    }

    #[test]
    fn test_class_is_frozen_while_instances_exist() {
        let mut class = Arc::new(Class::new("C"));
        let obj = Instance::new(&class);
        assert!(Arc::get_mut(&mut class).is_none());

        drop(obj);
        let class = Arc::get_mut(&mut class).unwrap();
        class.define_method(MemberKey::mint("late"), Descriptor::method(|_, _| Ok(Value::Null)));
        assert_eq!(class.instance().len(), 1);
    }

    #[test]
    fn test_missing_member() {
        let class = Arc::new(Class::new("C"));
        let obj = Instance::new(&class);
        let err = obj.call(&MemberKey::mint("nope"), &[]).unwrap_err();
        assert!(matches!(err, ProtocolError::Dispatch(DispatchError::MemberNotFound { .. })));
    }
}
