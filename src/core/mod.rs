//! Core logger types and traits

pub mod context;
pub mod error;
pub mod field;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod output;
pub mod record;
pub mod timestamp;

pub use context::{from_context, with_logger, Context};
pub use error::{LoggerError, Result};
pub use field::{Attr, FieldValue};
pub use handler::{
    Handler, HandlerOptions, HandlerType, ReplaceAttrFn, LEVEL_KEY, MESSAGE_KEY, TIME_KEY,
};
pub use log_level::{parse_level, LogLevel, FATAL_OFFSET};
pub use logger::{Logger, LoggerBuilder, Options};
pub use output::{MemoryBuffer, Output};
pub use record::Record;
pub use timestamp::TimestampFormat;
