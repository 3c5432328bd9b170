/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// ```rust
/// use tiny_doc::{doc, Value};
///
/// let value = doc!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "manager": null
/// });
/// assert_eq!(value.value_at::<String>("name").unwrap(), "Alice");
/// ```
#[macro_export]
macro_rules! doc {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::doc!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::doc!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression convertible into a value
    ($s:expr) => {
        $crate::Value::from($s)
    };
}

/// Declares a fieldless enum that can be read out of a document.
///
/// The generated [`FromValue`](crate::FromValue) implementation accepts the
/// variant name as a string, or the discriminant as an integer or numeric
/// string.
///
/// ```rust
/// use tiny_doc::{from_yaml_str, value_enum};
///
/// value_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Level {
///         Low,
///         Medium,
///         High = 10,
///     }
/// }
///
/// let doc = from_yaml_str("a: \"Medium\"\nb: 10\n").unwrap();
/// assert_eq!(doc.value_at::<Level>("a").unwrap(), Level::Medium);
/// assert_eq!(doc.value_at::<Level>("b").unwrap(), Level::High);
/// ```
#[macro_export]
macro_rules! value_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident $(= $disc:expr)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$vmeta])* $variant $(= $disc)?),*
        }

        impl $crate::FromValue for $name {
            fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                const VARIANTS: &[(&str, i64)] = &[$((stringify!($variant), $name::$variant as i64)),*];
                let index = $crate::coerce::enum_index(value, stringify!($name), VARIANTS)?;
                [$($name::$variant),*]
                    .into_iter()
                    .nth(index)
                    .ok_or_else(|| $crate::Error::type_coercion(stringify!($name), &value.to_string()))
            }
        }
    };
}
