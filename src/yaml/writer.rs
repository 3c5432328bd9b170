use crate::options::{KeyQuoting, WriteOptions};
use crate::scalar::write_quoted;
use crate::{Error, Map, Number, Result, Value};

const INDENT: &str = "  ";

pub(super) struct YamlWriter<'o> {
    output: String,
    options: &'o WriteOptions,
}

impl<'o> YamlWriter<'o> {
    pub(super) fn new(options: &'o WriteOptions) -> Self {
        YamlWriter {
            output: String::new(),
            options,
        }
    }

    pub(super) fn into_inner(self) -> String {
        self.output
    }

    /// Writes `value` as a block at `indent`.
    ///
    /// With `parent_is_array` the first line continues the parent's item
    /// marker, so its indentation is already written.
    pub(super) fn write(
        &mut self,
        value: &Value,
        indent: usize,
        parent_is_array: bool,
    ) -> Result<()> {
        match value {
            Value::Object(map) => self.write_object(map, indent, parent_is_array),
            Value::Array(items) => self.write_array(items, indent, parent_is_array),
            scalar => {
                if !parent_is_array {
                    self.write_indent(indent);
                }
                self.write_inline(scalar)?;
                self.newline();
                Ok(())
            }
        }
    }

    fn write_object(&mut self, map: &Map, indent: usize, parent_is_array: bool) -> Result<()> {
        for (i, (key, value)) in map.iter().enumerate() {
            if !(parent_is_array && i == 0) {
                self.write_indent(indent);
            }
            self.write_key(key);
            self.output.push(':');
            if value.is_empty() {
                self.newline();
            } else if value.is_inline() {
                self.output.push(' ');
                self.write_inline(value)?;
                self.newline();
            } else {
                self.newline();
                self.write(value, indent + 1, false)?;
            }
        }
        Ok(())
    }

    fn write_array(&mut self, items: &[Value], indent: usize, parent_is_array: bool) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if !(parent_is_array && i == 0) {
                self.write_indent(indent);
            }
            self.output.push('-');
            if item.is_empty() {
                self.newline();
            } else if item.is_inline() {
                self.output.push(' ');
                self.write_inline(item)?;
                self.newline();
            } else {
                self.output.push(' ');
                self.write(item, indent + 1, true)?;
            }
        }
        Ok(())
    }

    fn write_inline(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => {}
            Value::Bool(b) => self.output.push_str(if *b { "Yes" } else { "No" }),
            Value::Number(Number::Integer(n)) => self.output.push_str(&n.to_string()),
            Value::Number(Number::Float(f)) => self.output.push_str(&format_float(*f)?),
            Value::String(s) => write_quoted(&mut self.output, s),
            Value::Array(_) | Value::Object(_) => {
                unreachable!("containers are written as blocks")
            }
        }
        Ok(())
    }

    fn write_key(&mut self, key: &str) {
        if self.options.key_quoting == KeyQuoting::Always || key_needs_quotes(key) {
            write_quoted(&mut self.output, key);
        } else {
            self.output.push_str(key);
        }
    }

    #[inline]
    fn write_indent(&mut self, indent: usize) {
        for _ in 0..indent {
            self.output.push_str(INDENT);
        }
    }

    #[inline]
    fn newline(&mut self) {
        self.output.push_str(self.options.line_ending.as_str());
    }
}

/// Keys the bare-key token cannot carry.
fn key_needs_quotes(key: &str) -> bool {
    key.is_empty()
        || key.starts_with('-')
        || key
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, ':' | '"' | '\\'))
}

/// Decimal rendering that always reads back as a float.
fn format_float(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(Error::unsupported(&format!(
            "{f} has no YAML representation"
        )));
    }
    let mut s = f.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    Ok(s)
}
