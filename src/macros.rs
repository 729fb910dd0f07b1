//! Formatting macros for the `*f` logging methods.
//!
//! Each macro renders its arguments with `format_args!` and hands the result
//! to the matching `Logger` method, so the message arrives pre-rendered and
//! carries no extra attributes.
//!
//! # Examples
//!
//! ```
//! use slogr::prelude::*;
//! use slogr::infof;
//!
//! let logger = Logger::new(Output::new(MemoryBuffer::new()), None);
//! let ctx = Context::background();
//!
//! infof!(logger, &ctx, "Server listening on port {}", 8080);
//!
//! let user_id = 42;
//! let action = "login";
//! infof!(logger, &ctx, "User {} performed action: {}", user_id, action);
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use slogr::prelude::*;
/// # let logger = Logger::new(Output::new(MemoryBuffer::new()), None);
/// # let ctx = Context::background();
/// use slogr::logf;
/// logf!(logger, &ctx, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $ctx:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($ctx, $level, format_args!($($arg)+))
    };
}

/// Log a formatted debug-level message.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $ctx, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a formatted info-level message.
///
/// # Examples
///
/// ```
/// # use slogr::prelude::*;
/// # let logger = Logger::new(Output::new(MemoryBuffer::new()), None);
/// # let ctx = Context::background();
/// use slogr::infof;
/// infof!(logger, &ctx, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $ctx, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a formatted warning-level message.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $ctx, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log a formatted error-level message.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $ctx, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a formatted fatal-level message. The process keeps running.
///
/// # Examples
///
/// ```
/// # use slogr::prelude::*;
/// # let logger = Logger::new(Output::new(MemoryBuffer::new()), None);
/// # let ctx = Context::background();
/// use slogr::fatalf;
/// fatalf!(logger, &ctx, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $ctx, $crate::LogLevel::Fatal, $($arg)+)
    };
}
