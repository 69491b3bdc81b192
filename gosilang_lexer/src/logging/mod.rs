//! Global logging module for the Gosilang lexer
//!
//! Thread-safe global logging with a per-thread "current file" context,
//! per-file event collection for cargo-style summaries, and a macro interface.
//! All console output from here goes to stderr; stdout belongs to the pipeline.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::runtime::LoggingPreferences;
use crate::utils::Span;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{DiagnosticTotals, ErrorCollector, FileContext};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = RefCell::new(None);
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install preferences, then the global logger and collector built from them.
/// Fails if logging was already initialized.
pub fn init_global_logging_with_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    config::init_runtime_preferences(preferences);
    config::validate_config().map_err(|e| format!("Invalid logging limits: {}", e))?;

    install_global_service(Arc::new(LoggingService::from_preferences()))?;

    crate::log_success!(codes::success::SYSTEM_INITIALIZATION_COMPLETED, "Logging initialized",
        "min_level" => config::get_min_log_level().as_str(),
        "structured" => config::use_structured_logging());

    Ok(())
}

/// Install a specific service, e.g. one backed by a [`MemoryLogger`]
pub fn install_global_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())?;
    GLOBAL_ERROR_COLLECTOR
        .set(Arc::new(ErrorCollector::new()))
        .map_err(|_| "Global error collector already initialized".to_string())
}

fn global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(Arc::as_ref)
}

fn global_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR.get().map(Arc::as_ref)
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

/// Set file context for current thread
pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    let context = FileContext::new(file_path, file_id);

    if let Some(collector) = global_collector() {
        collector.register_file(&context);
    }

    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with `file_path` as the current file for every event it logs
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path, file_id);
    let result = f();
    clear_file_context();
    result
}

pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn attach_file_context(mut event: LogEvent) -> LogEvent {
    if !config::include_file_context() {
        return event;
    }
    if let Some(file_ctx) = get_current_file_context() {
        event = event.with_context("file", &file_ctx.file_path.display().to_string());
        event = event.with_context("file_id", &file_ctx.file_id.to_string());
    }
    event
}

/// Send to the global logger and record against the current file
fn dispatch_collected(event: LogEvent) {
    if let Some(logger) = global_logger() {
        logger.log_event(event.clone());
    }

    if let Some(file_ctx) = get_current_file_context() {
        if let Some(collector) = global_collector() {
            collector.record_event(&file_ctx.file_path, event);
        }
    }
}

/// Context entries as produced by the logging macros
pub type Context<'a> = [(&'a str, String)];

fn build_event(mut event: LogEvent, span: Option<Span>, context: &Context<'_>) -> LogEvent {
    if let Some(span) = span {
        event = event.with_span(span);
    }
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    attach_file_context(event)
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<Span>,
    context: &Context<'_>,
) {
    dispatch_collected(build_event(LogEvent::error(code, message), span, context));
}

/// Used by the coded forms of `log_warning!`
pub fn log_warning_with_context(
    code: Code,
    message: &str,
    span: Option<Span>,
    context: &Context<'_>,
) {
    let event = LogEvent::warning_with_code(code, message);
    dispatch_collected(build_event(event, span, context));
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: &Context<'_>) {
    log_plain_event(LogEvent::success(code, message), context);
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: &Context<'_>) {
    log_plain_event(LogEvent::info(message), context);
}

/// Log without recording against the current file
pub fn log_plain_event(event: LogEvent, context: &Context<'_>) {
    if let Some(logger) = global_logger() {
        logger.log_event(build_event(event, None, context));
    }
}

/// Print the cargo-style diagnostic summary to stderr, if anything was collected
pub fn print_cargo_style_summary() {
    if !config::use_cargo_style_output() {
        return;
    }

    if let Some(collector) = global_collector() {
        if collector.total_event_count() > 0 {
            eprintln!("{}", collector::format_cargo_style_errors(collector));
        }
    }
}

/// Error logging that still reaches stderr before initialization
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
