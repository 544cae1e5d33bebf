//! Error types for the IS-LM solver.
//!
//! This module provides a unified error type [`IslmError`] that covers
//! all error conditions that can occur during model parsing, equilibrium
//! solving, curve sampling and report output.

use thiserror::Error;

/// Result type alias using [`IslmError`].
pub type Result<T> = std::result::Result<T, IslmError>;

/// Unified error type for all IS-LM operations.
#[derive(Error, Debug)]
pub enum IslmError {
    // ============ Model Description Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Parameter name not part of the model
    #[error("Unknown parameter '{name}' at line {line}")]
    UnknownParameter { name: String, line: usize },

    /// Duplicate scenario name
    #[error("Duplicate scenario name '{name}'")]
    DuplicateScenario { name: String },

    // ============ Model Errors ============
    /// Parameter value that cannot take part in an evaluation
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// A divisor of the closed-form solution is zero
    #[error("Degenerate model: {quantity} = {value} makes the system singular")]
    DegenerateModel { quantity: &'static str, value: f64 },

    /// Sampling request that cannot produce a curve
    #[error("Invalid sample range: {message}")]
    InvalidSampleRange { message: String },

    /// Policy shock outside the declared slider bounds
    #[error("Shock {instrument} = {value} is outside [{min}, {max}]")]
    ShockOutOfBounds {
        instrument: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Computed equilibrium overflowed
    #[error("Non-finite result for {quantity}")]
    NonFiniteResult { quantity: &'static str },

    // ============ I/O Errors ============
    /// Error reading a model description file
    #[error("Failed to read model file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the report
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl IslmError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a degenerate model error
    pub fn degenerate(quantity: &'static str, value: f64) -> Self {
        Self::DegenerateModel { quantity, value }
    }

    /// Create an invalid sample range error
    pub fn sample_range(message: impl Into<String>) -> Self {
        Self::InvalidSampleRange {
            message: message.into(),
        }
    }

    /// Whether this error reports a singular model.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateModel { .. })
    }
}
