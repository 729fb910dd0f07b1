//! Handler trait and options shared by the built-in handlers

use super::context::Context;
use super::error::Result;
use super::field::{Attr, FieldValue};
use super::log_level::LogLevel;
use super::record::Record;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

pub const TIME_KEY: &str = "time";
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "msg";

/// Turns records into bytes on some destination
///
/// A logger asks [`Handler::enabled`] before building a record and then
/// calls [`Handler::handle`] once per record. Errors are returned to the
/// logger, which drops them.
pub trait Handler: Send + Sync {
    fn enabled(&self, level: LogLevel) -> bool;
    fn handle(&self, ctx: &Context, record: &Record) -> Result<()>;
    fn name(&self) -> &str;
}

/// Encoding used when a logger builds its own handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerType {
    /// One JSON object per line
    Json,
    /// `key=value` pairs per line
    #[default]
    Text,
}

/// Rewrites one attribute before it is written; an empty key drops it
pub type ReplaceAttrFn = Arc<dyn Fn(Attr) -> Attr + Send + Sync>;

/// Options passed through to the built-in handlers
///
/// Built-in handlers write `time`, `level` and `msg`, then record
/// attributes, then context attributes. Each key is written once and the
/// first attribute carrying it wins.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Threshold override; the logger's level applies when unset
    pub level: Option<LogLevel>,
    pub replace_attr: Option<ReplaceAttrFn>,
    pub timestamp_format: TimestampFormat,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Install an attribute rewrite hook
    ///
    /// # Example
    ///
    /// ```
    /// use slogr::{Attr, HandlerOptions};
    ///
    /// // Drop the timestamp from every record
    /// let options = HandlerOptions::new().with_replace_attr(|attr: Attr| {
    ///     if attr.key == "time" {
    ///         Attr::new("", attr.value)
    ///     } else {
    ///         attr
    ///     }
    /// });
    /// ```
    #[must_use]
    pub fn with_replace_attr<F>(mut self, replace: F) -> Self
    where
        F: Fn(Attr) -> Attr + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(replace));
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Effective threshold
    pub fn threshold(&self) -> LogLevel {
        self.level.unwrap_or_default()
    }

    pub fn replace(&self, attr: Attr) -> Attr {
        match &self.replace_attr {
            Some(replace) => replace(attr),
            None => attr,
        }
    }

    /// Built-in attributes followed by record and context attributes,
    /// rewritten by the hook with empty keys removed
    ///
    /// A key is emitted once: the first attribute carrying it wins, so
    /// `time`, `level` and `msg` cannot be overwritten by user attributes.
    pub(crate) fn resolve_attrs(&self, ctx: &Context, record: &Record) -> Vec<Attr> {
        let builtin = [
            Attr::new(TIME_KEY, self.timestamp_format.to_field_value(&record.time)),
            Attr::new(LEVEL_KEY, record.level.to_str()),
            Attr::new(MESSAGE_KEY, FieldValue::String(record.message.clone())),
        ];

        let mut seen = HashSet::new();
        builtin
            .into_iter()
            .chain(record.attrs.iter().cloned())
            .chain(ctx.attrs())
            .filter(|attr| !attr.is_empty())
            .map(|attr| self.replace(attr))
            .filter(|attr| !attr.is_empty() && seen.insert(attr.key.clone()))
            .collect()
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("replace_attr", &self.replace_attr.is_some())
            .field("timestamp_format", &self.timestamp_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults_to_info() {
        assert_eq!(HandlerOptions::new().threshold(), LogLevel::Info);
        assert_eq!(
            HandlerOptions::new().with_level(LogLevel::Warn).threshold(),
            LogLevel::Warn
        );
    }

    #[test]
    fn test_resolve_attrs_order() {
        let ctx = Context::background().with_attrs([Attr::new("request_id", "r-1")]);
        let record = Record::new(LogLevel::Warn, "disk low").with_attrs([Attr::new("free_mb", 12)]);

        let attrs = HandlerOptions::new().resolve_attrs(&ctx, &record);
        let keys: Vec<&str> = attrs.iter().map(|a| a.key.as_str()).collect();

        assert_eq!(keys, ["time", "level", "msg", "free_mb", "request_id"]);
        assert_eq!(attrs[1].value, FieldValue::from("WARN"));
        assert_eq!(attrs[2].value, FieldValue::from("disk low"));
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let ctx = Context::background().with_attrs([Attr::new("user", "outer")]);
        let record = Record::new(LogLevel::Info, "real")
            .with_attrs([Attr::new("msg", "fake"), Attr::new("user", "inner")]);

        let attrs = HandlerOptions::new().resolve_attrs(&ctx, &record);
        let keys: Vec<&str> = attrs.iter().map(|a| a.key.as_str()).collect();

        assert_eq!(keys, ["time", "level", "msg", "user"]);
        assert_eq!(attrs[2].value, FieldValue::from("real"));
        assert_eq!(attrs[3].value, FieldValue::from("inner"));
    }

    #[test]
    fn test_replace_attr_can_rename_and_drop() {
        let options = HandlerOptions::new().with_replace_attr(|attr: Attr| match attr.key.as_str() {
            "time" => Attr::new("", attr.value),
            "msg" => Attr::new("message", attr.value),
            _ => attr,
        });

        let record = Record::new(LogLevel::Info, "hi");
        let attrs = options.resolve_attrs(&Context::background(), &record);
        let keys: Vec<&str> = attrs.iter().map(|a| a.key.as_str()).collect();

        assert_eq!(keys, ["level", "message"]);
    }

    #[test]
    fn test_handler_type_default_is_text() {
        assert_eq!(HandlerType::default(), HandlerType::Text);
        let parsed: HandlerType = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, HandlerType::Json);
    }
}
