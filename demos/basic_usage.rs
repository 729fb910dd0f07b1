//! Basic logger usage example
//!
//! Demonstrates the default logger, a logger carried in a context, and
//! switching to JSON output.
//!
//! Run with: cargo run --example basic_usage

use slogr::prelude::*;
use slogr::{infof, warnf};

fn handle_request(ctx: &Context, path: &str) {
    match from_context(ctx) {
        Some(logger) => logger.info(ctx, "handled", &[Attr::new("path", path)]),
        None => slogr::warn(ctx, "no logger in context", &[]),
    }
}

fn main() -> Result<()> {
    println!("=== slogr - Basic Usage Example ===\n");

    let ctx = Context::background();

    // Package-level functions forward to the default logger
    println!("1. Default logger (text, INFO threshold):");
    slogr::debug(&ctx, "Debug message (hidden)", &[]);
    slogr::info(&ctx, "Service started", &[Attr::new("port", 8080)]);
    slogr::warnf(&ctx, format_args!("{} retries left", 2));

    println!("\n2. Lowering the threshold:");
    slogr::set_level(LogLevel::Debug);
    slogr::debug(&ctx, "Debug message (visible)", &[]);
    slogr::set_level(LogLevel::Info);

    // A logger of our own travels in the context
    println!("\n3. Logger carried in a context:");
    let logger = Arc::new(
        Logger::builder()
            .level(LogLevel::Debug)
            .add_level_prefix(true)
            .output(Output::stdout())
            .build(),
    );
    let request_ctx = with_logger(&ctx, Arc::clone(&logger))
        .with_attrs([Attr::new("request_id", "req-42")]);
    handle_request(&request_ctx, "/health");
    handle_request(&ctx, "/missing-logger");

    // Same logger, now writing JSON lines
    println!("\n4. Switching to JSON:");
    logger.set_handler(Output::stdout(), HandlerType::Json, None);
    infof!(logger, &request_ctx, "cache warmed in {}ms", 12);
    warnf!(logger, &request_ctx, "disk at {}%", 91);
    logger.error(
        &request_ctx,
        "upstream failed",
        &[Attr::new("status", 502), Attr::new("retry", true)],
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
