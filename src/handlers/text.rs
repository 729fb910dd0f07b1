//! Text handler producing `key=value` lines

use crate::core::{Attr, Context, FieldValue, Handler, HandlerOptions, LogLevel, Output, Record, Result};

/// Human-readable handler
///
/// Example line:
/// `time=2025-01-08T10:30:45.123Z level=INFO msg="Request processed" status=200`
pub struct TextHandler {
    output: Output,
    options: HandlerOptions,
}

impl TextHandler {
    pub fn new(output: Output, options: HandlerOptions) -> Self {
        Self { output, options }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    fn format_line(&self, ctx: &Context, record: &Record) -> String {
        let mut line = self
            .options
            .resolve_attrs(ctx, record)
            .iter()
            .map(format_attr)
            .collect::<Vec<_>>()
            .join(" ");
        line.push('\n');
        line
    }
}

impl Handler for TextHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.options.threshold()
    }

    fn handle(&self, ctx: &Context, record: &Record) -> Result<()> {
        let line = self.format_line(ctx, record);
        self.output.write_all(line.as_bytes())
    }

    fn name(&self) -> &str {
        "text"
    }
}

fn format_attr(attr: &Attr) -> String {
    let value = match &attr.value {
        FieldValue::String(s) => escape_value(s),
        other => other.to_string(),
    };
    format!("{}={}", escape_value(&attr.key), value)
}

/// Quote when the value would break `key=value` splitting
fn escape_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control());

    if needs_quotes {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
