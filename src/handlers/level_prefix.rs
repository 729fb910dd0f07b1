//! Message decoration with the record's level name

use crate::core::{Context, Handler, LogLevel, Record, Result};
use std::sync::Arc;

/// Rewrites each message to `- LEVEL - message` before forwarding it
///
/// Only the message changes; attributes pass through untouched.
pub struct LevelPrefixHandler {
    inner: Arc<dyn Handler>,
}

impl LevelPrefixHandler {
    pub fn new(inner: Arc<dyn Handler>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Arc<dyn Handler> {
        &self.inner
    }
}

pub(crate) fn prefixed_message(level: LogLevel, message: &str) -> String {
    format!("- {} - {}", level.to_str(), message)
}

impl Handler for LevelPrefixHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        self.inner.enabled(level)
    }

    fn handle(&self, ctx: &Context, record: &Record) -> Result<()> {
        let mut decorated = record.clone();
        decorated.message = prefixed_message(record.level, &record.message);
        self.inner.handle(ctx, &decorated)
    }

    fn name(&self) -> &str {
        "level_prefix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Attr;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Capture {
        records: Mutex<Vec<Record>>,
    }

    impl Handler for Capture {
        fn enabled(&self, level: LogLevel) -> bool {
            level >= LogLevel::Warn
        }

        fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    #[test]
    fn test_prefix_every_level() {
        let capture = Arc::new(Capture::default());
        let handler = LevelPrefixHandler::new(capture.clone());

        for level in LogLevel::ALL {
            handler
                .handle(&Context::background(), &Record::new(level, "msg"))
                .unwrap();
        }

        let messages: Vec<String> = capture.records.lock().iter().map(|r| r.message.clone()).collect();
        assert_eq!(
            messages,
            [
                "- DEBUG - msg",
                "- INFO - msg",
                "- WARN - msg",
                "- ERROR - msg",
                "- FATAL - msg",
            ]
        );
    }

    #[test]
    fn test_attrs_untouched() {
        let capture = Arc::new(Capture::default());
        let handler = LevelPrefixHandler::new(capture.clone());
        let record = Record::new(LogLevel::Error, "failed").with_attrs([Attr::new("code", 500)]);

        handler.handle(&Context::background(), &record).unwrap();

        let records = capture.records.lock();
        assert_eq!(records[0].attrs, record.attrs);
        assert_eq!(record.message, "failed");
    }

    #[test]
    fn test_enabled_delegates() {
        let handler = LevelPrefixHandler::new(Arc::new(Capture::default()));
        assert!(!handler.enabled(LogLevel::Info));
        assert!(handler.enabled(LogLevel::Error));
    }
}
