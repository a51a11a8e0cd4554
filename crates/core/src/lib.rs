#![deny(missing_docs)]
//! Elements core: registry records, balanced scanning, and diagnostics.

/// Identifier case conversion helpers.
pub mod case;
/// Core error and diagnostic types.
pub mod error;
/// Registry record and registry root types.
pub mod record;
/// Balanced delimiter scanning over raw source text.
pub mod scan;

pub use error::{Diagnostic, DiagnosticKind, Diagnostics, ElementsError, Severity, SourceLocation};
pub use record::{BUNDLE_ITEM_TYPE, Registry, RegistryFile, RegistryRecord};
