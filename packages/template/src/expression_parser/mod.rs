/**
 * Condition Expression Parser Module
 *
 * Lexer, parser and evaluator for `if` / `if-not` expressions
 */
pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use evaluator::{evaluate_condition, evaluate_expression, Evaluator, Operand};
pub use lexer::Lexer;
pub use parser::Parser;
