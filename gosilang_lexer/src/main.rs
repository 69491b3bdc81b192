use gosilang_lexer::config::runtime::RuntimeConfig;
use gosilang_lexer::{logging, pipeline};
use std::env;
use std::io::{self, Write};
use std::process;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Run {
        file: String,
        mode: pipeline::PipelineMode,
    },
}

#[derive(Debug)]
enum UsageError {
    MissingFile,
    InvalidMode(pipeline::PipelineError),
}

fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let Some(first) = args.first() else {
        return Err(UsageError::MissingFile);
    };

    if first == "--help" || first == "-h" {
        return Ok(Command::Help);
    }

    let mode = match args.get(1) {
        Some(arg) => pipeline::PipelineMode::from_arg(arg).map_err(UsageError::InvalidMode)?,
        None => pipeline::PipelineMode::default(),
    };

    Ok(Command::Run {
        file: first.clone(),
        mode,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .map(String::as_str)
        .unwrap_or("gosilang_lexer");

    let (file, mode) = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Help) => {
            print_help(program);
            return Ok(());
        }
        Ok(Command::Run { file, mode }) => (file, mode),
        Err(UsageError::MissingFile) => {
            print_usage(program);
            process::exit(1);
        }
        Err(UsageError::InvalidMode(error)) => {
            eprintln!("Error: {}", error);
            print_usage(program);
            process::exit(1);
        }
    };

    let config = RuntimeConfig::from_environment().map_err(startup_failure)?;

    logging::init_global_logging_with_preferences(config.logging.clone())
        .map_err(startup_failure)?;
    pipeline::validate_pipeline().map_err(startup_failure)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = pipeline::run_pipeline(&file, mode, &config, &mut out);
    out.flush()?;

    logging::print_cargo_style_summary();

    match result {
        Ok(report) => {
            if !report.is_complete() {
                process::exit(report.exit_code());
            }
            Ok(())
        }
        Err(error) => {
            logging::safe_log_error(error.error_code(), &error.to_string());
            eprintln!("\nFAILED: {}", error);
            process::exit(1);
        }
    }
}

/// Report a configuration or self-check failure before any stage runs
fn startup_failure<E: std::fmt::Display>(error: E) -> Box<dyn std::error::Error> {
    let message = format!("Startup failed: {}", error);
    logging::safe_log_error(logging::codes::system::INITIALIZATION_FAILURE, &message);
    message.into()
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file.gs> [--tokens|--raw|--all]", program_name);
    eprintln!("       {} --help", program_name);
}

fn print_help(program_name: &str) {
    println!("Gosilang Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes a Gosilang source file and previews the later compiler stages");
    println!();
    println!("USAGE:");
    println!("    {} <file.gs> [MODE]", program_name);
    println!();
    println!("MODES:");
    println!("    --all       Raw content, token stream, AST preview, codegen preview (default)");
    println!("    --tokens    Token table and JSON view only");
    println!("    --raw       Raw file content only");
    println!();
    println!("ENVIRONMENT:");
    println!("    GOSI_RUNTIME_CONFIG         TOML file with runtime preferences");
    println!("    GOSI_LOG_LEVEL              error | warning | info | debug");
    println!("    GOSI_STRUCTURED_LOGGING     Emit log events as JSON lines");
    println!("    GOSI_SHOW_VALUE_TYPE        Show the Value Type column");
    println!("    GOSI_SHOW_STRUCTURED_VIEW   Show the JSON token view");
    println!("    GOSI_SHOW_TOKEN_SUMMARY     Show per-class token counts");
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
}
