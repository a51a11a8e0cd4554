use std::path::PathBuf;
use thiserror::Error;

/// Location information for pipeline diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Registry file the diagnostic refers to.
    pub file: String,
    /// Component name, once the record has been parsed.
    pub component: Option<String>,
}

impl SourceLocation {
    /// Create a location for a file whose record has not been read yet
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            component: None,
        }
    }

    /// Create a location with the component name attached
    pub fn with_component(file: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            component: Some(component.into()),
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(component) = &self.component {
            write!(f, "{} ({})", self.file, component)
        } else {
            write!(f, "{}", self.file)
        }
    }
}

/// Fatal errors: the caller cannot meaningfully continue.
#[derive(Debug, Error)]
pub enum ElementsError {
    /// Filesystem error with the path that caused it.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// JSON document could not be decoded.
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl ElementsError {
    /// Wrap an IO error with its path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error with its path
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The file was skipped
    Failure,
    /// The file was processed, but the output may be incomplete
    Warning,
}

/// What went wrong with a single registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The file could not be read.
    ReadFailed {
        /// Underlying error message
        message: String,
    },
    /// The file is not a valid registry record.
    InvalidJson {
        /// Parser error message
        message: String,
    },
    /// The record has no `files[0].content`.
    MissingContent,
    /// No `return ( ... )` containing `<svg` was found.
    NoSvgReturn,
    /// An earlier file in the batch already produced this SVG file.
    DuplicateOutput {
        /// Output file name
        output: String,
        /// Input file that produced it first
        first: String,
    },
    /// The rendered SVG still contains `{expression}` placeholders.
    UnresolvedExpressions {
        /// The placeholders, in order of appearance
        expressions: Vec<String>,
    },
    /// Color attributes that could not be resolved and were set to `currentColor`.
    ColorFallback {
        /// The original attribute expressions
        expressions: Vec<String>,
    },
}

impl DiagnosticKind {
    /// Severity implied by the kind
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::ReadFailed { .. }
            | DiagnosticKind::InvalidJson { .. }
            | DiagnosticKind::MissingContent
            | DiagnosticKind::NoSvgReturn
            | DiagnosticKind::DuplicateOutput { .. } => Severity::Failure,
            DiagnosticKind::UnresolvedExpressions { .. } | DiagnosticKind::ColorFallback { .. } => {
                Severity::Warning
            }
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::ReadFailed { message } => write!(f, "could not read file: {}", message),
            DiagnosticKind::InvalidJson { message } => write!(f, "invalid JSON: {}", message),
            DiagnosticKind::MissingContent => write!(f, "no file content"),
            DiagnosticKind::NoSvgReturn => write!(f, "could not extract SVG"),
            DiagnosticKind::DuplicateOutput { output, first } => {
                write!(f, "{} was already generated from {}", output, first)
            }
            DiagnosticKind::UnresolvedExpressions { expressions } => {
                write!(f, "unresolved expressions: {}", expressions.join(", "))
            }
            DiagnosticKind::ColorFallback { expressions } => {
                write!(f, "fell back to currentColor for: {}", expressions.join(", "))
            }
        }
    }
}

/// A single diagnostic attached to a registry file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where it happened
    pub location: SourceLocation,
    /// What happened
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(location: SourceLocation, kind: DiagnosticKind) -> Self {
        Self { location, kind }
    }

    /// Severity of this diagnostic
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity() {
            Severity::Failure => "skipped",
            Severity::Warning => "warning",
        };
        write!(f, "{} {}: {}", severity, self.location, self.kind)
    }
}

/// Collection of diagnostics produced by a batch run
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// All diagnostics in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics that caused a file to be skipped
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity() == Severity::Failure)
    }

    /// Diagnostics attached to files that were still written
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Check if there are any diagnostics
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
