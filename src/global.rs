//! Process-wide default logger
//!
//! The default logger is built on first use with [`Options::default`] and
//! writes to stdout. The free functions here forward to it, so code that
//! has no logger of its own can still write:
//!
//! ```
//! use slogr::{Attr, Context};
//!
//! let ctx = Context::background();
//! slogr::info(&ctx, "service started", &[Attr::new("port", 8080)]);
//! slogr::infof!(slogr::default_logger(), &ctx, "{} workers", 4);
//! ```
//!
//! Reconfiguring it (`set_output`, `set_level`, `set_handler`,
//! `set_custom_handler`) affects every caller in the process.

use crate::core::{
    Attr, Context, Handler, HandlerOptions, HandlerType, LogLevel, Logger, Options, Output,
};
use std::fmt;
use std::sync::{Arc, LazyLock};

static DEFAULT_LOGGER: LazyLock<Logger> =
    LazyLock::new(|| Logger::new(Output::stdout(), Some(Options::default())));

pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

/// Set the output for the default logger
pub fn set_output(output: Output) {
    DEFAULT_LOGGER.set_output(output);
}

/// Set the level for the default logger
pub fn set_level(level: LogLevel) {
    DEFAULT_LOGGER.set_level(level);
}

/// Switch destination and encoding of the default logger
pub fn set_handler(output: Output, handler_type: HandlerType, options: Option<HandlerOptions>) {
    DEFAULT_LOGGER.set_handler(output, handler_type, options);
}

pub fn get_level() -> LogLevel {
    DEFAULT_LOGGER.get_level()
}

pub fn get_handler_type() -> HandlerType {
    DEFAULT_LOGGER.get_handler_type()
}

pub fn set_custom_handler(handler: Arc<dyn Handler>) {
    DEFAULT_LOGGER.set_custom_handler(handler);
}

pub fn log(ctx: &Context, level: LogLevel, message: impl Into<String>, attrs: &[Attr]) {
    DEFAULT_LOGGER.log(ctx, level, message, attrs);
}

pub fn logf(ctx: &Context, level: LogLevel, args: fmt::Arguments<'_>) {
    DEFAULT_LOGGER.logf(ctx, level, args);
}

pub fn debug(ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
    DEFAULT_LOGGER.debug(ctx, message, attrs);
}

pub fn debugf(ctx: &Context, args: fmt::Arguments<'_>) {
    DEFAULT_LOGGER.debugf(ctx, args);
}

pub fn info(ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
    DEFAULT_LOGGER.info(ctx, message, attrs);
}

pub fn infof(ctx: &Context, args: fmt::Arguments<'_>) {
    DEFAULT_LOGGER.infof(ctx, args);
}

pub fn warn(ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
    DEFAULT_LOGGER.warn(ctx, message, attrs);
}

pub fn warnf(ctx: &Context, args: fmt::Arguments<'_>) {
    DEFAULT_LOGGER.warnf(ctx, args);
}

pub fn error(ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
    DEFAULT_LOGGER.error(ctx, message, attrs);
}

pub fn errorf(ctx: &Context, args: fmt::Arguments<'_>) {
    DEFAULT_LOGGER.errorf(ctx, args);
}

pub fn fatal(ctx: &Context, message: impl Into<String>, attrs: &[Attr]) {
    DEFAULT_LOGGER.fatal(ctx, message, attrs);
}

pub fn fatalf(ctx: &Context, args: fmt::Arguments<'_>) {
    DEFAULT_LOGGER.fatalf(ctx, args);
}
