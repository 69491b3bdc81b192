/// Check that every subsystem the pipeline depends on is configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;

    for code in [
        crate::logging::codes::pipeline::STAGE_SKIPPED,
        crate::logging::codes::pipeline::INVALID_MODE,
        crate::logging::codes::pipeline::OUTPUT_FAILURE,
    ] {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Pipeline code {} not found in metadata registry", code));
        }
    }

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "file_processing" => true,
        "lexical_analysis" => true
    );

    Ok(())
}
