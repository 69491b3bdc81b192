//! Per-file diagnostic collection with cargo-style reporting
//!
//! Errors and warnings logged while a file context is active are kept in the
//! order they were raised, so the run can end with a summary such as
//! `warning[W020]: Unrecognized character '@' --> demo.gs:1:3`.

use super::config::get_max_log_events_per_file;
use super::events::LogEvent;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The file the current thread is working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

impl FileContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self { file_path, file_id }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticTotals {
    pub errors: usize,
    pub warnings: usize,
    /// Diagnostics dropped once a file hit its event limit
    pub suppressed: usize,
}

impl DiagnosticTotals {
    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.warnings == 0
    }
}

#[derive(Debug, Default)]
struct FileDiagnostics {
    events: Vec<LogEvent>,
    suppressed: usize,
}

/// Thread-safe store of diagnostics keyed by source file
#[derive(Default)]
pub struct ErrorCollector {
    files: Mutex<BTreeMap<PathBuf, FileDiagnostics>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `context` show up in the report even if it never logs anything
    pub fn register_file(&self, context: &FileContext) {
        lock(&self.files)
            .entry(context.file_path.clone())
            .or_default();
    }

    /// Keep errors and warnings for `file_path`; anything past
    /// the per-file event limit is only counted.
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        if !(event.is_error() || event.is_warning()) {
            return;
        }

        let mut files = lock(&self.files);
        let diagnostics = files.entry(file_path.to_path_buf()).or_default();

        if diagnostics.events.len() < get_max_log_events_per_file() {
            diagnostics.events.push(event);
        } else {
            diagnostics.suppressed += 1;
        }
    }

    pub fn events_for(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.files)
            .get(file_path)
            .map(|diagnostics| diagnostics.events.clone())
            .unwrap_or_default()
    }

    pub fn file_has_errors(&self, file_path: &Path) -> bool {
        lock(&self.files)
            .get(file_path)
            .is_some_and(|diagnostics| diagnostics.events.iter().any(LogEvent::is_error))
    }

    pub fn totals(&self) -> DiagnosticTotals {
        lock(&self.files)
            .values()
            .fold(DiagnosticTotals::default(), |mut totals, diagnostics| {
                totals.add(diagnostics);
                totals
            })
    }

    pub fn total_event_count(&self) -> usize {
        lock(&self.files)
            .values()
            .map(|diagnostics| diagnostics.events.len())
            .sum()
    }

    pub fn clear(&self) {
        lock(&self.files).clear();
    }
}

impl DiagnosticTotals {
    fn add(&mut self, diagnostics: &FileDiagnostics) {
        for event in &diagnostics.events {
            if event.is_error() {
                self.errors += 1;
            } else {
                self.warnings += 1;
            }
        }
        self.suppressed += diagnostics.suppressed;
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn render_event(output: &mut String, file_path: &Path, event: &LogEvent) {
    let label = if event.is_error() { "error" } else { "warning" };
    output.push_str(&format!("{}[{}]: {}", label, event.code, event.message));

    match event.span {
        Some(span) => output.push_str(&format!(
            " --> {}:{}",
            file_path.display(),
            span.start()
        )),
        None => output.push_str(&format!(" --> {}", file_path.display())),
    }
    output.push('\n');

    for (key, value) in &event.context {
        if key != "file" && key != "file_id" {
            output.push_str(&format!("  = {}: {}\n", key, value));
        }
    }

    if event.is_error() {
        output.push_str(&format!(
            "  = severity: {}, category: {}\n",
            event.severity(),
            event.category()
        ));
        let action = event.recommended_action();
        if action != "No specific action available" {
            output.push_str(&format!("  = help: {}\n", action));
        }
    }
}

/// Render every collected diagnostic followed by a one-line verdict per file
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();
    let files = lock(&collector.files);

    for (file_path, diagnostics) in files.iter() {
        for event in &diagnostics.events {
            render_event(&mut output, file_path, event);
        }

        let mut totals = DiagnosticTotals::default();
        totals.add(diagnostics);

        if totals.suppressed > 0 {
            output.push_str(&format!(
                "note: {} not shown (limit {} per file)\n",
                plural(totals.suppressed, "further diagnostic"),
                get_max_log_events_per_file()
            ));
        }

        if totals.errors > 0 {
            let mut verdict = format!(
                "error: could not lex `{}` due to {}",
                file_path.display(),
                plural(totals.errors, "previous error")
            );
            if totals.warnings > 0 {
                verdict.push_str(&format!("; {} emitted", plural(totals.warnings, "warning")));
            }
            output.push_str(&verdict);
            output.push('\n');
        } else if totals.warnings > 0 {
            output.push_str(&format!(
                "warning: `{}` generated {}\n",
                file_path.display(),
                plural(totals.warnings, "warning")
            ));
        }
    }

    output
}
