//! # slogr
//!
//! A structured logging facade: leveled records, text or JSON encodings,
//! optional `- LEVEL - ` message prefixes, a process-wide default logger and
//! loggers carried through call chains in a [`Context`].
//!
//! ## Features
//!
//! - **Leveled**: `DEBUG < INFO < WARN < ERROR < FATAL`, filtered per logger
//! - **Structured**: key-value attributes on records and on contexts
//! - **Reconfigurable**: swap output, level or handler at runtime
//! - **Thread Safe**: loggers can be shared and reconfigured across threads
//!
//! ```
//! use slogr::prelude::*;
//!
//! let buffer = MemoryBuffer::new();
//! let logger = Arc::new(Logger::new(Output::new(buffer.clone()), None));
//!
//! let ctx = with_logger(&Context::background(), Arc::clone(&logger));
//! if let Some(logger) = from_context(&ctx) {
//!     logger.warn(&ctx, "cache miss", &[Attr::new("key", "user:7")]);
//! }
//!
//! assert!(buffer.contents().contains("level=WARN msg=\"cache miss\" key=user:7"));
//! ```

pub mod core;
pub mod global;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        from_context, parse_level, with_logger, Attr, Context, FieldValue, Handler,
        HandlerOptions, HandlerType, LogLevel, Logger, LoggerBuilder, LoggerError, MemoryBuffer,
        Options, Output, Record, Result, TimestampFormat,
    };
    pub use std::sync::Arc;
}

pub use crate::core::{
    from_context, parse_level, with_logger, Attr, Context, FieldValue, Handler, HandlerOptions,
    HandlerType, LogLevel, Logger, LoggerBuilder, LoggerError, MemoryBuffer, Options, Output,
    Record, ReplaceAttrFn, Result, TimestampFormat, FATAL_OFFSET,
};
pub use global::{
    debug, debugf, default_logger, error, errorf, fatal, fatalf, get_handler_type, get_level,
    info, infof, log, logf, set_custom_handler, set_handler, set_level, set_output, warn, warnf,
};
pub use handlers::{JsonHandler, LevelPrefixHandler, TextHandler};
