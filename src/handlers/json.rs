//! JSON handler for structured logging

use crate::core::{Context, Handler, HandlerOptions, LogLevel, Output, Record, Result};

/// Writes each record as a single-line JSON object (JSONL format)
///
/// Compatible with log aggregation tools like ELK, Loki, etc. Keys are
/// unique per record; see [`HandlerOptions`] for which attribute wins.
pub struct JsonHandler {
    output: Output,
    options: HandlerOptions,
}

impl JsonHandler {
    pub fn new(output: Output, options: HandlerOptions) -> Self {
        Self { output, options }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    fn to_json(&self, ctx: &Context, record: &Record) -> Result<String> {
        let mut json_obj = serde_json::Map::new();
        for attr in self.options.resolve_attrs(ctx, record) {
            json_obj.insert(attr.key, attr.value.to_json_value());
        }
        Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.options.threshold()
    }

    fn handle(&self, ctx: &Context, record: &Record) -> Result<()> {
        let mut line = self.to_json(ctx, record)?;
        line.push('\n');
        self.output.write_all(line.as_bytes())
    }

    fn name(&self) -> &str {
        "json"
    }
}
