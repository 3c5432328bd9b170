use crate::{Result, Value};

/// A text format that documents can be read from and written to.
///
/// Implementations are stateless apart from their options, so one instance
/// can serve any number of reads.
///
/// # Examples
///
/// ```rust
/// use tiny_doc::{Format, Json, Yaml};
///
/// let formats: Vec<Box<dyn Format>> = vec![Box::new(Json), Box::new(Yaml::new())];
/// for format in &formats {
///     let value = format.read("[1, 2]").or_else(|_| format.read("- 1\n- 2\n")).unwrap();
///     assert_eq!(value.values::<i32>().unwrap(), vec![1, 2]);
/// }
/// ```
pub trait Format {
    /// Short lowercase name, used in logs.
    fn name(&self) -> &'static str;

    /// Parses `text` into a tree. Empty input reads as [`Value::Null`].
    fn read(&self, text: &str) -> Result<Value>;

    /// Renders `value` as text.
    fn write(&self, value: &Value) -> Result<String>;
}
