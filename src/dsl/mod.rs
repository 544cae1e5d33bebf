//! DSL (Domain Specific Language) parser for model descriptions.
//!
//! A line-oriented text format for calibrating the IS-LM model, setting an
//! initial policy shock, declaring slider bounds and adding custom scenarios.
//!
//! # Grammar Overview
//!
//! ```text
//! model       = { line }
//! line        = comment | directive | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = param | shock | bounds | scenario
//! param       = ".param" identifier ['='] number
//! shock       = ".shock" instrument ['='] number
//! bounds      = ".bounds" number number number
//! scenario    = ".scenario" identifier '(' override { override } ')'
//! override    = identifier '=' number
//!
//! instrument  = "dG" | "dM" | "fiscal" | "monetary"
//! number      = ['-' | '+'] (digit+ ['.' digit*] | '.' digit+) [('e'|'E') ['-'|'+'] digit+]
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! # Parameters
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | a  | Autonomous consumption |
//! | c  | Marginal propensity to consume |
//! | T  | Taxes |
//! | I0 | Autonomous investment |
//! | b  | Investment sensitivity to r |
//! | G0 | Baseline government spending |
//! | k  | Money-demand income sensitivity |
//! | h  | Money-demand interest sensitivity |
//! | M0 | Baseline real money supply |
//!
//! Parameters not set take their reference values. Declaring any `.scenario`
//! replaces the four standard structural variants.
//!
//! # Example
//!
//! ```text
//! # Liquidity trap study
//! .param h 1.2
//! .shock dM 2.5
//! .bounds -9 9 0.25
//! .scenario trap (h=50)
//! .scenario inelastic (b=0.05 h=0.05)
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a model description string into an AST.
pub fn parse(input: &str) -> Result<ModelAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a model description file.
pub fn parse_file(path: &std::path::Path) -> Result<ModelAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::IslmError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
