//! Logging macros.
//!
//! Every macro takes a message plus optional `"key" => value` pairs; values
//! only need `Display`. Forms that carry a [`Code`](crate::logging::Code)
//! are collected per file for the cargo-style summary.

/// Turn `"key" => value` pairs into owned context entries
#[doc(hidden)]
#[macro_export]
macro_rules! __log_context {
    ($($key:expr => $value:expr),*) => {
        [$(($key, ::std::format!("{}", $value))),*]
    };
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            Some($span),
            &$crate::__log_context!($($key => $value),*),
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            None,
            &$crate::__log_context!($($key => $value),*),
        )
    };
}

/// Coded warnings (`code = ...`) are collected per file; plain ones are only logged
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_warning_with_context(
            $code,
            $message,
            Some($span),
            &$crate::__log_context!($($key => $value),*),
        )
    };

    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_warning_with_context(
            $code,
            $message,
            None,
            &$crate::__log_context!($($key => $value),*),
        )
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_plain_event(
            $crate::logging::LogEvent::warning($message),
            &$crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_success_with_context(
            $code,
            $message,
            &$crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_info_with_context(
            $message,
            &$crate::__log_context!($($key => $value),*),
        )
    };
}

/// Context values are only formatted when debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_plain_event(
                $crate::logging::LogEvent::debug($message),
                &$crate::__log_context!($($key => $value),*),
            );
        }
    };
}

/// Success event with the elapsed time as `duration_ms`
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_success!($code, $message,
            "duration_ms" => ::std::format!("{:.3}", $duration.as_secs_f64() * 1000.0)
            $(, $key => $value)*
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_macro_forms_expand() {
        let size: u64 = 1024;
        let duration = std::time::Duration::from_millis(3);
        let span = Span::single(Position::start(), '@');

        log_error!(codes::system::INITIALIZATION_FAILURE, "plain error");
        log_error!(codes::system::INITIALIZATION_FAILURE, "with span", span = span);
        log_error!(codes::file_processing::IO_ERROR, "with context", "size" => size);
        log_error!(codes::file_processing::IO_ERROR, "both", span = span, "char" => '@');

        log_warning!(code = codes::lexical::UNKNOWN_CHARACTER, "coded");
        log_warning!(code = codes::lexical::UNKNOWN_CHARACTER, "coded span", span = span);
        log_warning!(code = codes::lexical::UNKNOWN_CHARACTER, "coded ctx", "line" => 1);
        log_warning!(code = codes::lexical::UNKNOWN_CHARACTER, "all", span = span, "line" => 1);
        log_warning!("plain warning");
        log_warning!("plain warning", "path" => std::path::Path::new("a.gs").display());

        log_success!(codes::success::TOKENIZATION_COMPLETE, "done");
        log_success!(codes::success::TOKENIZATION_COMPLETE, "done", "tokens" => 3,);
        log_info!("info");
        log_info!("info", "large" => size > 10);
        log_debug!("debug");
        log_debug!("debug", "value" => 1.5);

        log_performance!(codes::success::FILE_PROCESSING_SUCCESS, "timed", duration = duration);
        log_performance!(codes::success::FILE_PROCESSING_SUCCESS, "timed",
            duration = duration,
            "size" => size
        );
    }
}
