//! Dynamic values flowing through member bodies.
//!
//! Provided methods, getters and setters exchange `Value`s with their
//! callers, and instances of the reference object model store fields as
//! `Value`s.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// A value passed to or returned from a member body.
///
/// # Examples
///
/// ```
/// use protomix::Value;
///
/// let args = [Value::from("x"), Value::Int(2)];
/// assert_eq!(Value::arg(&args, 1), Value::Int(2));
/// assert_eq!(Value::arg(&args, 5), Value::Null);
/// assert_eq!(args[0].expect_str("name")?, "x");
/// # Ok::<(), protomix::ProtocolError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// The absent value; missing arguments and unset fields read as this.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns the argument at `index`, or `Null` when the caller passed
    /// fewer arguments.
    #[must_use]
    pub fn arg(args: &[Value], index: usize) -> Value {
        args.get(index).cloned().unwrap_or_default()
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Reads a number as a float; integers widen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Reads a string or fails the calling body.
    ///
    /// # Errors
    /// A `Dispatch::Failed` error naming `what` and the actual type.
    pub fn expect_str(&self, what: &str) -> ProtocolResult<&str> {
        self.as_str().ok_or_else(|| self.mismatch(what, "string"))
    }

    /// Reads an integer or fails the calling body.
    ///
    /// # Errors
    /// A `Dispatch::Failed` error naming `what` and the actual type.
    pub fn expect_int(&self, what: &str) -> ProtocolResult<i64> {
        self.as_int().ok_or_else(|| self.mismatch(what, "int"))
    }

    fn mismatch(&self, what: &str, expected: &str) -> ProtocolError {
        ProtocolError::failed(format!(
            "expected {expected} for {what}, got {}",
            self.type_name()
        ))
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
