//! Abstract Syntax Tree types for the model description language.

/// Complete AST representation of a parsed model description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelAst {
    /// `.param` assignments in source order
    pub params: Vec<Assignment>,
    /// `.shock` assignments in source order
    pub shocks: Vec<Assignment>,
    /// Slider bounds, if declared
    pub bounds: Option<BoundsDef>,
    /// Custom scenarios
    pub scenarios: Vec<ScenarioDef>,
}

impl ModelAst {
    /// Create a new empty model AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// `name = value`, as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// `.bounds <min> <max> <step>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsDef {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub line: usize,
}

/// `.scenario <name> (p=v ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDef {
    pub name: String,
    pub overrides: Vec<Assignment>,
    pub line: usize,
}
