//! Error types and diagnostics
//!
//! This module provides error handling and diagnostic reporting
//! for the API box renderer. Errors are per-symbol: the renderer turns
//! each one into a diagnostic and the overall documentation build goes on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for apibox operations
pub type ApiBoxResult<T> = Result<T, ApiBoxError>;

/// Stable diagnostic codes
pub mod codes {
    /// Requested symbol is not in the index
    pub const SYMBOL_NOT_FOUND: &str = "symbol-not-found";
    /// A type descriptor could not be named
    pub const UNRESOLVED_TYPE: &str = "unresolved-type";
    /// A node is missing a field the renderer expected
    pub const MALFORMED_INPUT: &str = "malformed-input";
    /// A type alias chain revisits itself
    pub const REFERENCE_CYCLE: &str = "reference-cycle";
    /// Type derivation nested deeper than the configured limit
    pub const DEPTH_EXCEEDED: &str = "depth-exceeded";
    /// More than one parameter resolved to the options name
    pub const AMBIGUOUS_OPTIONS: &str = "ambiguous-options";
    /// Anything else
    pub const INTERNAL: &str = "internal";
}

/// Main error type for apibox
#[derive(Debug, Error)]
pub enum ApiBoxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Symbol not found
    #[error("Couldn't find '{0}' in data")]
    SymbolNotFound(String),

    /// A type alias refers back to itself through `chain`
    #[error("Reference cycle while rendering '{symbol}': {}", chain.join(" -> "))]
    ReferenceCycle { symbol: String, chain: Vec<String> },

    /// Type derivation nested past the depth limit
    #[error("Type resolution for '{symbol}' exceeded depth limit of {limit}")]
    DepthExceeded { symbol: String, limit: usize },
}

impl ApiBoxError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        ApiBoxError::Config(message.into())
    }

    /// Diagnostic code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ApiBoxError::SymbolNotFound(_) => codes::SYMBOL_NOT_FOUND,
            ApiBoxError::ReferenceCycle { .. } => codes::REFERENCE_CYCLE,
            ApiBoxError::DepthExceeded { .. } => codes::DEPTH_EXCEEDED,
            _ => codes::INTERNAL,
        }
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error - the symbol could not be rendered
    Error,
    /// Warning - rendering continues with a placeholder
    Warning,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }

    /// Get ANSI color code
    pub fn color(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "\x1b[31m",   // Red
            DiagnosticSeverity::Warning => "\x1b[33m", // Yellow
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Symbol being rendered when this was raised
    pub symbol: Option<String>,
    /// Source file of the symbol
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Diagnostic code (see [`codes`])
    pub code: Option<&'static str>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            symbol: None,
            file: None,
            line: None,
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Build an error diagnostic from a per-symbol failure
    pub fn from_error(err: &ApiBoxError) -> Self {
        Self::error(err.to_string()).with_code(err.code())
    }

    /// Set the symbol
    pub fn for_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the source location
    pub fn at(mut self, file: impl Into<String>, line: usize) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    fn location(&self) -> Option<String> {
        let file = self.file.as_ref()?;
        Some(match self.line {
            Some(line) => format!("{}:{}", file, line),
            None => file.clone(),
        })
    }

    fn tail(&self) -> String {
        let mut result = String::new();
        if let Some(code) = self.code {
            result.push('[');
            result.push_str(code);
            result.push(']');
        }
        result.push_str(": ");
        if let Some(ref symbol) = self.symbol {
            result.push_str(symbol);
            result.push_str(": ");
        }
        result.push_str(&self.message);
        result
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = String::new();
        if let Some(location) = self.location() {
            result.push_str(&location);
            result.push_str(": ");
        }
        result.push_str(self.severity.display());
        result.push_str(&self.tail());
        result
    }

    /// Format with ANSI colors
    pub fn format_colored(&self) -> String {
        let mut result = String::new();
        let reset = "\x1b[0m";

        if let Some(location) = self.location() {
            result.push_str("\x1b[2m");
            result.push_str(&location);
            result.push_str(reset);
            result.push_str(": ");
        }

        result.push_str(self.severity.color());
        result.push_str(self.severity.display());
        result.push_str(reset);
        result.push_str(&self.tail());
        result
    }

    /// Emit this diagnostic as a tracing event
    fn trace(&self) {
        let code = self.code.unwrap_or("");
        let symbol = self.symbol.as_deref().unwrap_or("");
        match self.severity {
            DiagnosticSeverity::Error => {
                tracing::error!(code, symbol, "{}", self.message)
            }
            DiagnosticSeverity::Warning => {
                tracing::warn!(code, symbol, "{}", self.message)
            }
        }
    }
}

/// Collector for diagnostics raised while rendering
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        diagnostic.trace();
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics carrying the given code
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.code == Some(code))
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Formatted diagnostics, one per line
    pub fn lines(&self, use_color: bool) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|d| if use_color { d.format_colored() } else { d.format() })
            .collect()
    }

    /// Print all diagnostics to stderr
    pub fn print(&self, use_color: bool) {
        for line in self.lines(use_color) {
            eprintln!("{}", line);
        }
    }

    /// Print summary
    pub fn print_summary(&self) {
        let errors = self.error_count();
        let warnings = self.warning_count();

        if errors > 0 || warnings > 0 {
            eprintln!("\n{} error(s), {} warning(s)", errors, warnings);
        }
    }
}
