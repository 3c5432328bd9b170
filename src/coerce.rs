//! Typed access to document values.
//!
//! [`FromValue`] is the conversion contract behind [`Value::value`],
//! [`Value::value_at`] and friends:
//!
//! - requesting the stored shape returns it unchanged
//! - a null requested as a container (`Vec<T>`, [`Map`]) yields an empty one
//! - a null requested as `Option<T>` yields `None`
//! - enums declared with [`value_enum!`](crate::value_enum) parse from their
//!   variant name or their discriminant
//! - everything else goes through invariant numeric/string conversion and
//!   fails with [`Error::TypeCoercion`]
//!
//! Objects are addressed by name and arrays by index; using the other kind of
//! key, or any key on a scalar, fails with [`Error::KeyType`].
//!
//! ```rust
//! use tiny_doc::{from_yaml_str, Key};
//!
//! let doc = from_yaml_str("server:\n  port: \"8080\"\n  hosts:\n    - \"a\"\n    - \"b\"\n").unwrap();
//!
//! let port: u16 = doc.value_path(&[Key::from("server"), Key::from("port")]).unwrap();
//! assert_eq!(port, 8080);
//!
//! let hosts: Vec<String> = doc.value_at::<tiny_doc::Value>("server").unwrap().values_at("hosts").unwrap();
//! assert_eq!(hosts, vec!["a", "b"]);
//!
//! let missing: Option<i64> = doc.value_path(&[Key::from("server"), Key::from("timeout")]).unwrap();
//! assert_eq!(missing, None);
//! ```

use crate::{Error, Map, Number, Result, Value};
use std::fmt;

static NULL: Value = Value::Null;

/// Addresses a child of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    /// An object entry
    Name(&'a str),
    /// An array element
    Index(usize),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{:?}", name),
            Key::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Conversion from a document node into a Rust value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

fn describe(value: &Value) -> String {
    if value.is_inline() {
        format!("{} {}", value.kind(), value)
    } else {
        value.kind().to_string()
    }
}

fn mismatch(expected: &str, value: &Value) -> Error {
    Error::type_coercion(expected, &describe(value))
}

impl Value {
    /// Coerces this node to `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tiny_doc::{Map, Value};
    ///
    /// let n: i32 = Value::from("12").value().unwrap();
    /// assert_eq!(n, 12);
    ///
    /// let empty: Vec<Value> = Value::Null.value().unwrap();
    /// assert!(empty.is_empty());
    ///
    /// assert!(Value::from("abc").value::<i64>().is_err());
    /// ```
    pub fn value<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    /// Returns the child addressed by `key`.
    ///
    /// A name missing from an object addresses null; an index past the end of
    /// an array is an error.
    pub fn child<'k>(&self, key: impl Into<Key<'k>>) -> Result<&Value> {
        let key = key.into();
        match (self, key) {
            (Value::Object(obj), Key::Name(name)) => Ok(obj.get(name).unwrap_or(&NULL)),
            (Value::Array(arr), Key::Index(index)) => {
                arr.get(index).ok_or(Error::IndexOutOfBounds {
                    index,
                    len: arr.len(),
                })
            }
            (value, key) => Err(Error::key_type(&key.to_string(), value.kind())),
        }
    }

    /// Coerces the child addressed by `key` to `T`.
    pub fn value_at<'k, T: FromValue>(&self, key: impl Into<Key<'k>>) -> Result<T> {
        self.child(key)?.value()
    }

    /// Walks `keys` from this node and coerces the node reached to `T`.
    ///
    /// An empty path coerces this node itself.
    pub fn value_path<T: FromValue>(&self, keys: &[Key<'_>]) -> Result<T> {
        let mut node = self;
        for key in keys {
            node = node.child(*key)?;
        }
        node.value()
    }

    /// Coerces every element of this array to `T`. Null reads as empty.
    pub fn values<T: FromValue>(&self) -> Result<Vec<T>> {
        self.value()
    }

    /// Coerces every element of the array addressed by `key` to `T`.
    pub fn values_at<'k, T: FromValue>(&self, key: impl Into<Key<'k>>) -> Result<Vec<T>> {
        self.child(key)?.value()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for Map {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(obj) => Ok(obj.clone()),
            Value::Null => Ok(Map::new()),
            other => Err(mismatch("Object", other)),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(arr) => arr.iter().map(T::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(mismatch("Array", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for Number {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(*n),
            other => f64::from_value(other).map(Number::Float),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64() != 0.0),
            Value::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(mismatch("bool", value))
                }
            }
            other => Err(mismatch("bool", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(mismatch("String", other)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse().map_err(|_| mismatch("f64", value)),
            other => Err(mismatch("f64", other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

/// Widest integer conversion; narrower types range-check the result.
fn integer(value: &Value, expected: &str) -> Result<i128> {
    match value {
        Value::Number(Number::Integer(i)) => Ok(i128::from(*i)),
        Value::Number(Number::Float(f)) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1.7e38 {
                Ok(*f as i128)
            } else {
                Err(mismatch(expected, value))
            }
        }
        Value::Bool(b) => Ok(i128::from(*b)),
        Value::String(s) => s.trim().parse().map_err(|_| mismatch(expected, value)),
        other => Err(mismatch(expected, other)),
    }
}

macro_rules! from_value_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    let n = integer(value, stringify!($ty))?;
                    <$ty>::try_from(n).map_err(|_| mismatch(stringify!($ty), value))
                }
            }
        )*
    };
}

from_value_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Resolves an enum variant from a name or a discriminant.
///
/// Returns the position of the matching entry in `variants`. Used by
/// [`value_enum!`](crate::value_enum).
#[doc(hidden)]
pub fn enum_index(value: &Value, type_name: &str, variants: &[(&str, i64)]) -> Result<usize> {
    let by_ordinal = |n: i64| variants.iter().position(|&(_, d)| d == n);
    let found = match value {
        Value::String(s) => variants
            .iter()
            .position(|&(name, _)| name == s)
            .or_else(|| s.trim().parse().ok().and_then(by_ordinal)),
        Value::Number(Number::Integer(n)) => by_ordinal(*n),
        _ => None,
    };
    found.ok_or_else(|| mismatch(type_name, value))
}
