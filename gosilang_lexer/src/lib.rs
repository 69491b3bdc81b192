// Internal modules
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize_source, LexerError, LexicalAnalyzer};
pub use pipeline::{run_pipeline, PipelineError, PipelineMode, PipelineReport};
pub use tokens::{Token, TokenKind, TokenStream};
