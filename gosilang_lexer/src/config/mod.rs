//! Configuration module for the Gosilang lexer
//! Compile-time limits are generated from TOML by build.rs

// Generated from config/<profile>.toml at build time
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("GOSI_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("GOSI_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::{file_processing, lexical, logging};
    use super::*;

    #[test]
    fn test_generated_limits_are_consistent() {
        assert!(lexical::INITIAL_BUFFER_CAPACITY > 0);
        assert!(lexical::MAX_TOKEN_COUNT >= lexical::INITIAL_BUFFER_CAPACITY);
        assert!(file_processing::LARGE_FILE_THRESHOLD <= file_processing::MAX_FILE_SIZE);
        assert!(logging::LOG_BUFFER_SIZE > 0);
        assert!(logging::MAX_LOG_EVENTS_PER_FILE > 0);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = build_info::source_info();
        assert!(info.ends_with(&format!("{}.toml", build_info::profile())));
    }
}
