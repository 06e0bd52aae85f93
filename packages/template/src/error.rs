//! Template errors
//!
//! Rendering itself never fails: bad expressions hide content and malformed
//! directives are skipped. These errors surface from the expression parser
//! (where the renderer logs and swallows them) and from entry points that
//! accept JSON text.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TemplateError>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Lexer Error: {message} at column {index} in expression [{input}]")]
    Lexer {
        message: String,
        index: usize,
        input: String,
    },

    #[error("Parser Error: {message} at column {index} in [{input}]")]
    Parser {
        message: String,
        index: usize,
        input: String,
    },

    #[error("Evaluation Error: {message} in [{input}]")]
    Evaluation { message: String, input: String },

    #[error("invalid template data: {0}")]
    InvalidData(#[from] serde_json::Error),
}
