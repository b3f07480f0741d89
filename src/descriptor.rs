//! Member bodies and installation attributes.
//!
//! Bodies never capture the object they will run against. Each call receives
//! an explicit [`Receiver`], so one provided default can be installed on any
//! number of targets.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolResult;
use crate::object::Receiver;
use crate::value::Value;

type MethodFn = dyn Fn(Receiver<'_>, &[Value]) -> ProtocolResult<Value> + Send + Sync;
type GetterFn = dyn Fn(Receiver<'_>) -> ProtocolResult<Value> + Send + Sync;
type SetterFn = dyn Fn(Receiver<'_>, Value) -> ProtocolResult<()> + Send + Sync;

/// A callable method body.
#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

impl Method {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Receiver<'_>, &[Value]) -> ProtocolResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, receiver: Receiver<'_>, args: &[Value]) -> ProtocolResult<Value> {
        (self.0)(receiver, args)
    }
}

/// A getter body.
#[derive(Clone)]
pub struct Getter(Arc<GetterFn>);

impl Getter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Receiver<'_>) -> ProtocolResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, receiver: Receiver<'_>) -> ProtocolResult<Value> {
        (self.0)(receiver)
    }
}

/// A setter body.
#[derive(Clone)]
pub struct Setter(Arc<SetterFn>);

impl Setter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Receiver<'_>, Value) -> ProtocolResult<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, receiver: Receiver<'_>, value: Value) -> ProtocolResult<()> {
        (self.0)(receiver, value)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Method(..)")
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Getter(..)")
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Setter(..)")
    }
}

/// Shape of a descriptor, used in summaries and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    Method,
    Getter,
    Setter,
    Accessor,
}

/// The body a member is installed with.
#[derive(Debug, Clone)]
pub enum Descriptor {
    Method(Method),
    Accessor {
        get: Option<Getter>,
        set: Option<Setter>,
    },
}

impl Descriptor {
    /// A method body.
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(Receiver<'_>, &[Value]) -> ProtocolResult<Value> + Send + Sync + 'static,
    {
        Self::Method(Method::new(f))
    }

    /// A getter-only accessor.
    pub fn getter<F>(f: F) -> Self
    where
        F: Fn(Receiver<'_>) -> ProtocolResult<Value> + Send + Sync + 'static,
    {
        Self::Accessor {
            get: Some(Getter::new(f)),
            set: None,
        }
    }

    /// A setter-only accessor.
    pub fn setter<F>(f: F) -> Self
    where
        F: Fn(Receiver<'_>, Value) -> ProtocolResult<()> + Send + Sync + 'static,
    {
        Self::Accessor {
            get: None,
            set: Some(Setter::new(f)),
        }
    }

    /// Adds a setter to an accessor, turning a getter into a get/set pair.
    ///
    /// A method is replaced by a setter-only accessor.
    #[must_use]
    pub fn with_setter<F>(self, f: F) -> Self
    where
        F: Fn(Receiver<'_>, Value) -> ProtocolResult<()> + Send + Sync + 'static,
    {
        let get = match self {
            Self::Accessor { get, .. } => get,
            Self::Method(_) => None,
        };
        Self::Accessor {
            get,
            set: Some(Setter::new(f)),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DescriptorKind {
        match self {
            Self::Method(_) => DescriptorKind::Method,
            Self::Accessor {
                get: Some(_),
                set: None,
            } => DescriptorKind::Getter,
            Self::Accessor {
                get: None,
                set: Some(_),
            } => DescriptorKind::Setter,
            Self::Accessor { .. } => DescriptorKind::Accessor,
        }
    }

    /// Label prefix for keys minted for this body: `get ` or `set ` for
    /// one-sided accessors.
    pub(crate) const fn label_prefix(&self) -> &'static str {
        match self.kind() {
            DescriptorKind::Getter => "get ",
            DescriptorKind::Setter => "set ",
            DescriptorKind::Method | DescriptorKind::Accessor => "",
        }
    }

    /// Returns true if both descriptors share the same body allocations.
    ///
    /// Clones of one descriptor are the same body; two closures with
    /// identical code are not.
    #[must_use]
    pub fn same_body(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Method(a), Self::Method(b)) => Arc::ptr_eq(&a.0, &b.0),
            (Self::Accessor { get: g1, set: s1 }, Self::Accessor { get: g2, set: s2 }) => {
                let gets = match (g1, g2) {
                    (Some(a), Some(b)) => Arc::ptr_eq(&a.0, &b.0),
                    (None, None) => true,
                    _ => false,
                };
                let sets = match (s1, s2) {
                    (Some(a), Some(b)) => Arc::ptr_eq(&a.0, &b.0),
                    (None, None) => true,
                    _ => false,
                };
                gets && sets
            }
            _ => false,
        }
    }
}

/// Attributes a member is installed with.
///
/// `writable` is `None` for accessors, which have no value to overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    pub writable: Option<bool>,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Attributes for a member installed from a protocol default.
    ///
    /// Provided members stay out of own-key enumeration.
    #[must_use]
    pub const fn provided(descriptor: &Descriptor) -> Self {
        Self {
            writable: Self::writable_for(descriptor),
            enumerable: false,
            configurable: true,
        }
    }

    /// Attributes for a member the target defines itself.
    #[must_use]
    pub const fn own(descriptor: &Descriptor) -> Self {
        Self {
            writable: Self::writable_for(descriptor),
            enumerable: true,
            configurable: true,
        }
    }

    const fn writable_for(descriptor: &Descriptor) -> Option<bool> {
        match descriptor {
            Descriptor::Method(_) => Some(true),
            Descriptor::Accessor { .. } => None,
        }
    }
}
