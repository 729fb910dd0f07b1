//! Main logger implementation

use super::{
    context::Context,
    field::Attr,
    handler::{Handler, HandlerOptions, HandlerType},
    log_level::LogLevel,
    output::Output,
    record::Record,
};
use crate::handlers::{JsonHandler, LevelPrefixHandler, TextHandler};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Construction options for [`Logger::new`]
#[derive(Clone)]
pub struct Options {
    /// Threshold for logging
    pub level: LogLevel,

    /// Whether to prefix messages with `- LEVEL - `
    pub add_level_prefix: bool,

    /// Encoding of the handler the logger builds for itself
    pub handler_type: HandlerType,

    /// Used instead of a built-in handler when set
    pub custom_handler: Option<Arc<dyn Handler>>,

    /// Passed through to the built-in handler
    pub handler_options: Option<HandlerOptions>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            add_level_prefix: false,
            handler_type: HandlerType::Text,
            custom_handler: None,
            // No level: the logger's `level` is the threshold unless overridden
            handler_options: Some(HandlerOptions::new().with_replace_attr(|attr: Attr| attr)),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("level", &self.level)
            .field("add_level_prefix", &self.add_level_prefix)
            .field("handler_type", &self.handler_type)
            .field(
                "custom_handler",
                &self.custom_handler.as_ref().map(|h| h.name().to_string()),
            )
            .field("handler_options", &self.handler_options)
            .finish()
    }
}

struct LoggerState {
    level: LogLevel,
    add_level_prefix: bool,
    handler_type: HandlerType,
    output: Output,
    handler_options: HandlerOptions,
    handler: Arc<dyn Handler>,
}

/// A leveled, structured logger
///
/// The logger owns one active handler. `set_output`, `set_level`,
/// `set_handler` and `set_custom_handler` swap that handler under a lock,
/// so reconfiguring while other threads log is safe; a call that already
/// picked up the old handler finishes writing through it.
///
/// Logging never fails from the caller's point of view: handler errors are
/// dropped and counted in [`Logger::dropped_count`].
///
/// # Example
///
/// ```
/// use slogr::{Attr, Context, HandlerType, Logger, MemoryBuffer, Options, Output};
///
/// let buffer = MemoryBuffer::new();
/// let logger = Logger::new(
///     Output::new(buffer.clone()),
///     Some(Options {
///         handler_type: HandlerType::Json,
///         ..Options::default()
///     }),
/// );
///
/// let ctx = Context::background();
/// logger.info(&ctx, "listening", &[Attr::new("port", 8080)]);
/// logger.debug(&ctx, "not written", &[]);
///
/// assert_eq!(buffer.lines().len(), 1);
/// ```
pub struct Logger {
    state: RwLock<LoggerState>,
    dropped: AtomicU64,
}

impl Logger {
    /// Create a logger writing to `output`; `None` selects [`Options::default`]
    pub fn new(output: Output, options: Option<Options>) -> Self {
        let options = options.unwrap_or_default();

        let mut handler_options = options.handler_options.unwrap_or_default();
        if handler_options.level.is_none() {
            handler_options.level = Some(options.level);
        }

        let handler = match options.custom_handler {
            Some(custom) => custom,
            None => build_handler(&output, options.handler_type, &handler_options),
        };

        Self {
            state: RwLock::new(LoggerState {
                level: options.level,
                add_level_prefix: options.add_level_prefix,
                handler_type: options.handler_type,
                output,
                handler_options,
                handler: decorate(handler, options.add_level_prefix),
            }),
            dropped: AtomicU64::new(0),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use slogr::{HandlerType, LogLevel, Logger, MemoryBuffer, Output};
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .handler_type(HandlerType::Json)
    ///     .add_level_prefix(true)
    ///     .output(Output::new(MemoryBuffer::new()))
    ///     .build();
    ///
    /// assert_eq!(logger.get_level(), LogLevel::Debug);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Point the logger at a new destination
    ///
    /// Level, encoding, prefix decoration and the attribute hook carry over.
    /// A custom handler is replaced by a built-in one for the current
    /// encoding.
    pub fn set_output(&self, output: Output) {
        let mut state = self.state.write();
        state.output = output;
        Self::rebuild(&mut state);
    }

    pub fn set_level(&self, level: LogLevel) {
        let mut state = self.state.write();
        state.level = level;
        Self::rebuild(&mut state);
    }

    /// Switch destination and encoding in one step
    ///
    /// `options` replaces the attribute hook and timestamp format when given;
    /// `None` keeps the current ones. The threshold stays the logger's level.
    ///
    /// # Example
    /// ```
    /// use slogr::{Context, HandlerType, Logger, MemoryBuffer, Output};
    ///
    /// let logger = Logger::new(Output::new(MemoryBuffer::new()), None);
    /// let buffer = MemoryBuffer::new();
    /// logger.set_handler(Output::new(buffer.clone()), HandlerType::Json, None);
    ///
    /// logger.info(&Context::background(), "now json", &[]);
    /// assert!(buffer.contents().starts_with('{'));
    /// assert_eq!(logger.get_handler_type(), HandlerType::Json);
    /// ```
    pub fn set_handler(
        &self,
        output: Output,
        handler_type: HandlerType,
        options: Option<HandlerOptions>,
    ) {
        let mut state = self.state.write();
        state.output = output;
        state.handler_type = handler_type;
        if let Some(options) = options {
            state.handler_options = options;
        }
        Self::rebuild(&mut state);
    }

    /// Replace the active handler, keeping prefix decoration if enabled
    pub fn set_custom_handler(&self, handler: Arc<dyn Handler>) {
        let mut state = self.state.write();
        state.handler = decorate(handler, state.add_level_prefix);
    }

    pub fn get_level(&self) -> LogLevel {
        self.state.read().level
    }

    pub fn get_handler_type(&self) -> HandlerType {
        self.state.read().handler_type
    }

    pub fn is_level_prefix_enabled(&self) -> bool {
        self.state.read().add_level_prefix
    }

    pub fn output(&self) -> Output {
        self.state.read().output.clone()
    }

    /// Active handler, including the prefix wrapper when enabled
    pub fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.state.read().handler)
    }

    /// Number of records a handler failed to write
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn rebuild(state: &mut LoggerState) {
        state.handler_options.level = Some(state.level);
        let handler = build_handler(&state.output, state.handler_type, &state.handler_options);
        state.handler = decorate(handler, state.add_level_prefix);
    }

    fn dispatch(&self, handler: &dyn Handler, ctx: &Context, record: &Record) {
        if handler.handle(ctx, record).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Log `message` with structured attributes
    pub fn log(&self, ctx: &Context, level: LogLevel, message: impl Into<String>, attrs: &[Attr]) {
        let handler = self.handler();
        if !handler.enabled(level) {
            return;
        }

        let record = Record::new(level, message).with_attrs(attrs.iter().cloned());
        self.dispatch(handler.as_ref(), ctx, &record);
    }

    /// Log a pre-rendered message without attributes
    ///
    /// Usually reached through [`logf!`](crate::logf) and friends.
    pub fn logf(&self, ctx: &Context, level: LogLevel, args: fmt::Arguments<'_>) {
        let handler = self.handler();
        if !handler.enabled(level) {
            return;
        }

        let record = Record::new(level, fmt::format(args));
        self.dispatch(handler.as_ref(), ctx, &record);
    }

    #[inline]
    pub fn debug(&self, ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
        self.log(ctx, LogLevel::Debug, message, attrs);
    }

    #[inline]
    pub fn debugf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logf(ctx, LogLevel::Debug, args);
    }

    #[inline]
    pub fn info(&self, ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
        self.log(ctx, LogLevel::Info, message, attrs);
    }

    #[inline]
    pub fn infof(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logf(ctx, LogLevel::Info, args);
    }

    #[inline]
    pub fn warn(&self, ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
        self.log(ctx, LogLevel::Warn, message, attrs);
    }

    #[inline]
    pub fn warnf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logf(ctx, LogLevel::Warn, args);
    }

    #[inline]
    pub fn error(&self, ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
        self.log(ctx, LogLevel::Error, message, attrs);
    }

    #[inline]
    pub fn errorf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logf(ctx, LogLevel::Error, args);
    }

    /// Log at `Fatal`; this only labels the record and does not exit
    #[inline]
    pub fn fatal(&self, ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
        self.log(ctx, LogLevel::Fatal, message, attrs);
    }

    #[inline]
    pub fn fatalf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logf(ctx, LogLevel::Fatal, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("level", &state.level)
            .field("add_level_prefix", &state.add_level_prefix)
            .field("handler_type", &state.handler_type)
            .field("handler", &state.handler.name())
            .field("output", &state.output)
            .finish()
    }
}

fn build_handler(
    output: &Output,
    handler_type: HandlerType,
    options: &HandlerOptions,
) -> Arc<dyn Handler> {
    match handler_type {
        HandlerType::Json => Arc::new(JsonHandler::new(output.clone(), options.clone())),
        HandlerType::Text => Arc::new(TextHandler::new(output.clone(), options.clone())),
    }
}

fn decorate(handler: Arc<dyn Handler>, add_level_prefix: bool) -> Arc<dyn Handler> {
    if add_level_prefix {
        Arc::new(LevelPrefixHandler::new(handler))
    } else {
        handler
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use slogr::{LogLevel, Logger, Output};
///
/// let logger = Logger::builder()
///     .level(LogLevel::Warn)
///     .output(Output::stderr())
///     .build();
/// ```
pub struct LoggerBuilder {
    output: Option<Output>,
    options: Options,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            output: None,
            options: Options::default(),
        }
    }

    /// Set the threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.options.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_level_prefix(mut self, enabled: bool) -> Self {
        self.options.add_level_prefix = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler_type(mut self, handler_type: HandlerType) -> Self {
        self.options.handler_type = handler_type;
        self
    }

    /// Use `handler` instead of a built-in one
    #[must_use = "builder methods return a new value"]
    pub fn custom_handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.options.custom_handler = Some(Arc::new(handler));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler_options(mut self, options: HandlerOptions) -> Self {
        self.options.handler_options = Some(options);
        self
    }

    /// Set the destination; stdout when not called
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let output = self.output.unwrap_or_else(Output::stdout);
        Logger::new(output, Some(self.options))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerError, MemoryBuffer, Result};

    struct FailingHandler;

    impl Handler for FailingHandler {
        fn enabled(&self, _level: LogLevel) -> bool {
            true
        }

        fn handle(&self, _ctx: &Context, _record: &Record) -> Result<()> {
            Err(LoggerError::handler("failing", "always fails"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn memory_logger(options: Option<Options>) -> (Logger, MemoryBuffer) {
        let buffer = MemoryBuffer::new();
        (Logger::new(Output::new(buffer.clone()), options), buffer)
    }

    #[test]
    fn test_defaults() {
        let (logger, _) = memory_logger(None);
        assert_eq!(logger.get_level(), LogLevel::Info);
        assert_eq!(logger.get_handler_type(), HandlerType::Text);
        assert!(!logger.is_level_prefix_enabled());
        assert_eq!(logger.handler().name(), "text");
    }

    #[test]
    fn test_missing_handler_options_use_logger_level() {
        let (logger, buffer) = memory_logger(Some(Options {
            level: LogLevel::Debug,
            handler_options: None,
            ..Options::default()
        }));

        logger.debug(&Context::background(), "visible", &[]);
        assert!(buffer.contents().contains("msg=visible"));
    }

    #[test]
    fn test_struct_update_keeps_threshold() {
        let (logger, buffer) = memory_logger(Some(Options {
            level: LogLevel::Error,
            ..Options::default()
        }));
        let ctx = Context::background();

        for _ in 0..5 {
            logger.warn(&ctx, "hidden", &[]);
            logger.info(&ctx, "hidden", &[]);
        }
        logger.error(&ctx, "shown", &[]);

        assert_eq!(logger.get_level(), LogLevel::Error);
        assert_eq!(buffer.lines().len(), 1);

        let (logger, buffer) = memory_logger(Some(Options {
            level: LogLevel::Debug,
            ..Options::default()
        }));
        logger.debug(&ctx, "shown", &[]);
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_set_handler_switches_encoding() {
        let (logger, first) = memory_logger(Some(Options {
            level: LogLevel::Warn,
            add_level_prefix: true,
            ..Options::default()
        }));
        let ctx = Context::background();
        logger.warn(&ctx, "as text", &[]);

        let second = MemoryBuffer::new();
        logger.set_handler(Output::new(second.clone()), HandlerType::Json, None);
        logger.info(&ctx, "filtered", &[]);
        logger.warn(&ctx, "as json", &[]);

        assert_eq!(logger.get_handler_type(), HandlerType::Json);
        assert_eq!(logger.get_level(), LogLevel::Warn);
        assert_eq!(first.lines().len(), 1);
        assert!(first.contents().contains("msg=\"- WARN - as text\""));

        let parsed: serde_json::Value = serde_json::from_str(second.contents().trim_end()).unwrap();
        assert_eq!(parsed["msg"], "- WARN - as json");
        assert_eq!(second.lines().len(), 1);
    }

    #[test]
    fn test_set_handler_replaces_hook() {
        let (logger, _) = memory_logger(None);
        let buffer = MemoryBuffer::new();
        let options = HandlerOptions::new().with_replace_attr(|attr: Attr| {
            if attr.key == "time" {
                Attr::new("", attr.value)
            } else {
                attr
            }
        });

        logger.set_handler(Output::new(buffer.clone()), HandlerType::Text, Some(options));
        logger.info(&Context::background(), "untimed", &[]);

        assert_eq!(buffer.contents(), "level=INFO msg=untimed\n");
        assert_eq!(logger.get_handler_type(), HandlerType::Text);
    }

    #[test]
    fn test_handler_options_level_overrides() {
        let (logger, buffer) = memory_logger(Some(Options {
            level: LogLevel::Debug,
            handler_options: Some(HandlerOptions::new().with_level(LogLevel::Error)),
            ..Options::default()
        }));

        logger.warn(&Context::background(), "hidden", &[]);
        assert!(buffer.is_empty());
        assert_eq!(logger.get_level(), LogLevel::Debug);
    }

    #[test]
    fn test_custom_handler_overrides_handler_type() {
        let (logger, _) = memory_logger(Some(Options {
            handler_type: HandlerType::Json,
            custom_handler: Some(Arc::new(FailingHandler)),
            ..Options::default()
        }));

        assert_eq!(logger.handler().name(), "failing");
        assert_eq!(logger.get_handler_type(), HandlerType::Json);
    }

    #[test]
    fn test_handler_errors_are_counted_not_raised() {
        let (logger, _) = memory_logger(None);
        logger.set_custom_handler(Arc::new(FailingHandler));

        let ctx = Context::background();
        logger.info(&ctx, "first", &[]);
        logger.errorf(&ctx, format_args!("second {}", 2));

        assert_eq!(logger.dropped_count(), 2);
    }

    #[test]
    fn test_set_custom_handler_keeps_prefix() {
        let (logger, _) = memory_logger(Some(Options {
            add_level_prefix: true,
            ..Options::default()
        }));

        logger.set_custom_handler(Arc::new(FailingHandler));
        assert_eq!(logger.handler().name(), "level_prefix");
    }

    #[test]
    fn test_set_level_rebuilds_handler() {
        let (logger, buffer) = memory_logger(None);
        let ctx = Context::background();

        logger.set_level(LogLevel::Error);
        logger.warn(&ctx, "dropped", &[]);
        assert!(buffer.is_empty());

        logger.set_level(LogLevel::Debug);
        logger.debug(&ctx, "kept", &[]);
        assert_eq!(buffer.lines().len(), 1);
        assert_eq!(logger.get_level(), LogLevel::Debug);
    }

    #[test]
    fn test_set_output_keeps_replace_attr() {
        let (logger, _) = memory_logger(Some(Options {
            handler_options: Some(HandlerOptions::new().with_replace_attr(|attr: Attr| {
                if attr.key == "time" {
                    Attr::new("", attr.value)
                } else {
                    attr
                }
            })),
            ..Options::default()
        }));

        let second = MemoryBuffer::new();
        logger.set_output(Output::new(second.clone()));
        logger.info(&Context::background(), "moved", &[]);

        assert_eq!(second.contents(), "level=INFO msg=moved\n");
    }

    #[test]
    fn test_builder_defaults_to_info() {
        let buffer = MemoryBuffer::new();
        let logger = Logger::builder().output(Output::new(buffer.clone())).build();

        let ctx = Context::background();
        logger.debug(&ctx, "hidden", &[]);
        logger.info(&ctx, "shown", &[]);

        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_builder_full_configuration() {
        let buffer = MemoryBuffer::new();
        let logger = Logger::builder()
            .level(LogLevel::Warn)
            .handler_type(HandlerType::Json)
            .add_level_prefix(true)
            .output(Output::new(buffer.clone()))
            .build();

        logger.warn(&Context::background(), "careful", &[]);

        let parsed: serde_json::Value = serde_json::from_str(buffer.contents().trim_end()).unwrap();
        assert_eq!(parsed["msg"], "- WARN - careful");
        assert!(logger.is_level_prefix_enabled());
    }

    #[test]
    fn test_builder_custom_handler() {
        let logger = Logger::builder().custom_handler(FailingHandler).build();
        logger.fatal(&Context::background(), "nowhere", &[]);
        assert_eq!(logger.dropped_count(), 1);
    }
}
