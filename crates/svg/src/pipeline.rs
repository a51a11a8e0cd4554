//! Batch conversion of `*-logo.json` registry records into SVG files.
//!
//! Per-file work is pure and runs in parallel; SVG files and the index are
//! written afterwards, in input order, so a run never leaves a partially
//! written index behind.

use crate::colors::resolve_colors;
use crate::jsx::find_last_svg_return;
use crate::props::{Selection, extract_prop_defaults};
use crate::serialize::{RenderContext, SvgRender, render_svg};
use crate::variables::resolve_local_variables;
use elements_core::{Diagnostic, DiagnosticKind, Diagnostics, ElementsError, RegistryRecord, SourceLocation};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Options for a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineOptions {
    /// Directory holding the registry record files.
    pub input_dir: PathBuf,
    /// Directory the SVG files and index are written to. Created if missing.
    pub output_dir: PathBuf,
    /// Only input files whose name ends with this suffix are processed.
    pub suffix: String,
    /// File name of the index manifest inside `output_dir`.
    pub index_file: String,
    /// Maximum number of worker threads. Defaults to number of CPU cores.
    pub max_threads: Option<usize>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("public/r"),
            output_dir: PathBuf::from("public/r/svg"),
            suffix: "-logo.json".to_string(),
            index_file: "index.json".to_string(),
            max_threads: None,
        }
    }
}

/// One manifest entry per generated SVG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgIndexEntry {
    /// Component name.
    pub name: String,
    /// SVG file name, relative to the output directory.
    pub file: String,
}

/// Fatal batch errors; per-file problems are reported as diagnostics.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Directory listing, SVG write or index write failed.
    #[error(transparent)]
    Elements(#[from] ElementsError),
    /// The index manifest could not be encoded.
    #[error("failed to encode SVG index: {0}")]
    Index(#[from] serde_json::Error),
}

/// A converted record, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Index entry for the SVG.
    pub entry: SvgIndexEntry,
    /// SVG document text.
    pub svg: String,
}

/// Outcome of processing a single registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Present when an SVG was produced.
    pub converted: Option<ConvertedFile>,
    /// Failures and warnings for this file.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileOutcome {
    fn failed(location: SourceLocation, kind: DiagnosticKind) -> Self {
        Self {
            converted: None,
            diagnostics: vec![Diagnostic::new(location, kind)],
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Number of SVG files written.
    pub generated: usize,
    /// Number of input files skipped, including files whose SVG name was
    /// already taken by an earlier file.
    pub failed: usize,
    /// Manifest entries, in processing order.
    pub index: Vec<SvgIndexEntry>,
    /// Where the manifest was written.
    pub index_path: PathBuf,
    /// All diagnostics, in input order.
    pub diagnostics: Diagnostics,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

impl PipelineReport {
    /// Number of input files considered.
    pub fn total(&self) -> usize {
        self.generated + self.failed
    }
}

/// Runs prop-default, color and variable resolution, then serializes the
/// last `<svg>`-bearing return of `source`.
///
/// Returns `None` when the source has no such return.
pub fn convert_source(source: &str) -> Option<SvgRender> {
    let defaults = extract_prop_defaults(source);
    let selection = Selection::from_defaults(&defaults);
    let colors = resolve_colors(source, &selection);
    let locals = resolve_local_variables(source, &defaults, &colors);
    let jsx = find_last_svg_return(source)?;
    let ctx = RenderContext {
        source,
        colors: &colors,
        locals: &locals,
    };
    Some(render_svg(jsx, &ctx))
}

/// Name used for the SVG file: the record name, or the input file name
/// without `suffix` when the record name is unusable as a file name.
fn output_name(record: &RegistryRecord, file_name: &str, suffix: &str) -> String {
    let name = record.name.trim();
    if !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".." {
        return name.to_string();
    }
    file_name
        .strip_suffix(suffix)
        .or_else(|| file_name.strip_suffix(".json"))
        .unwrap_or(file_name)
        .to_string()
}

/// Converts the JSON text of one registry file. Performs no I/O.
pub fn process_record(file_name: &str, json: &str, suffix: &str) -> FileOutcome {
    let record = match RegistryRecord::from_json_str(json) {
        Ok(record) => record,
        Err(e) => {
            return FileOutcome::failed(
                SourceLocation::new(file_name),
                DiagnosticKind::InvalidJson {
                    message: e.to_string(),
                },
            );
        }
    };
    let name = output_name(&record, file_name, suffix);
    let location = SourceLocation::with_component(file_name, name.as_str());

    let Some(source) = record.source() else {
        return FileOutcome::failed(location, DiagnosticKind::MissingContent);
    };
    let Some(render) = convert_source(source) else {
        return FileOutcome::failed(location, DiagnosticKind::NoSvgReturn);
    };

    let mut diagnostics = Vec::new();
    if !render.fallbacks.is_empty() {
        diagnostics.push(Diagnostic::new(
            location.clone(),
            DiagnosticKind::ColorFallback {
                expressions: render.fallbacks.clone(),
            },
        ));
    }
    let unresolved = render.unresolved_expressions();
    if !unresolved.is_empty() {
        diagnostics.push(Diagnostic::new(
            location,
            DiagnosticKind::UnresolvedExpressions {
                expressions: unresolved,
            },
        ));
    }

    FileOutcome {
        converted: Some(ConvertedFile {
            entry: SvgIndexEntry {
                file: format!("{name}.svg"),
                name,
            },
            svg: render.svg,
        }),
        diagnostics,
    }
}

fn input_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads and converts one registry file.
pub fn process_file(path: &Path, suffix: &str) -> FileOutcome {
    let file_name = input_file_name(path);
    match fs::read_to_string(path) {
        Ok(json) => process_record(&file_name, &json, suffix),
        Err(e) => FileOutcome::failed(
            SourceLocation::new(file_name),
            DiagnosticKind::ReadFailed {
                message: e.to_string(),
            },
        ),
    }
}

/// Input files matching `options.suffix`, sorted by file name.
pub fn list_inputs(options: &PipelineOptions) -> Result<Vec<PathBuf>, ElementsError> {
    let dir = &options.input_dir;
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ElementsError::io(dir, e))? {
        let entry = entry.map_err(|e| ElementsError::io(dir, e))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(&options.suffix));
        if matches && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Converts every matching registry file and writes the SVGs and index.
///
/// Per-file problems never abort the batch; they are logged, counted and
/// returned in the report. Only filesystem failures on the input or output
/// directory are fatal.
pub fn run(options: &PipelineOptions) -> Result<PipelineReport, PipelineError> {
    let start = Instant::now();
    let output_dir = &options.output_dir;
    fs::create_dir_all(output_dir).map_err(|e| ElementsError::io(output_dir, e))?;

    let inputs = list_inputs(options)?;
    log::debug!(
        "found {} input files in {}",
        inputs.len(),
        options.input_dir.display()
    );

    let pool = options.max_threads.and_then(|n| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .ok()
    });
    let process_input = |path: &PathBuf| process_file(path, &options.suffix);
    let outcomes: Vec<FileOutcome> = if let Some(pool) = pool {
        pool.install(|| inputs.par_iter().map(process_input).collect())
    } else {
        inputs.par_iter().map(process_input).collect()
    };

    let mut diagnostics = Diagnostics::new();
    let mut index = Vec::new();
    let mut written: BTreeMap<String, String> = BTreeMap::new();
    let mut failed = 0;
    for (path, mut outcome) in inputs.iter().zip(outcomes) {
        // The first file to claim an output name keeps it.
        let duplicate = outcome.converted.as_ref().and_then(|converted| {
            let first = written.get(&converted.entry.file)?;
            Some(Diagnostic::new(
                SourceLocation::with_component(input_file_name(path), converted.entry.name.as_str()),
                DiagnosticKind::DuplicateOutput {
                    output: converted.entry.file.clone(),
                    first: first.clone(),
                },
            ))
        });
        if let Some(diagnostic) = duplicate {
            outcome.converted = None;
            outcome.diagnostics.push(diagnostic);
        }
        for diagnostic in outcome.diagnostics {
            log::warn!("{diagnostic}");
            diagnostics.push(diagnostic);
        }
        let Some(converted) = outcome.converted else {
            failed += 1;
            continue;
        };
        written.insert(converted.entry.file.clone(), input_file_name(path));
        let path = output_dir.join(&converted.entry.file);
        fs::write(&path, &converted.svg).map_err(|e| ElementsError::io(&path, e))?;
        log::debug!("wrote {}", path.display());
        index.push(converted.entry);
    }

    let index_path = output_dir.join(&options.index_file);
    let mut manifest = serde_json::to_string_pretty(&index)?;
    manifest.push('\n');
    fs::write(&index_path, manifest).map_err(|e| ElementsError::io(&index_path, e))?;

    let generated = index.len();
    log::info!("generated {generated} SVG files, {failed} failed");
    log::info!("wrote index to {}", index_path.display());

    Ok(PipelineReport {
        generated,
        failed,
        index,
        index_path,
        diagnostics,
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SUFFIX: &str = "-logo.json";

    fn record_json(name: &str, content: &str) -> String {
        json!({
            "name": name,
            "type": "registry:component",
            "files": [{ "path": "logo.tsx", "content": content }],
        })
        .to_string()
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert_eq!(options.input_dir, PathBuf::from("public/r"));
        assert_eq!(options.output_dir, PathBuf::from("public/r/svg"));
        assert_eq!(options.suffix, "-logo.json");
        assert_eq!(options.index_file, "index.json");
    }

    #[test]
    fn test_options_from_camel_case_json() {
        let options: PipelineOptions =
            serde_json::from_str(r#"{"inputDir": "in", "maxThreads": 2}"#).unwrap();
        assert_eq!(options.input_dir, PathBuf::from("in"));
        assert_eq!(options.output_dir, PathBuf::from("public/r/svg"));
        assert_eq!(options.max_threads, Some(2));
    }

    #[test]
    fn test_output_name_falls_back_to_file_name() {
        let mut record = RegistryRecord {
            name: "stripe-logo".into(),
            ..Default::default()
        };
        assert_eq!(output_name(&record, "x-logo.json", SUFFIX), "stripe-logo");
        record.name = "../evil".into();
        assert_eq!(output_name(&record, "stripe-logo.json", SUFFIX), "stripe");
        record.name = String::new();
        assert_eq!(output_name(&record, "other.json", SUFFIX), "other");
    }

    #[test]
    fn test_process_record_failures() {
        let invalid = process_record("a-logo.json", "{ not json", SUFFIX);
        assert!(invalid.converted.is_none());
        assert!(matches!(
            invalid.diagnostics[0].kind,
            DiagnosticKind::InvalidJson { .. }
        ));

        let empty = process_record("b-logo.json", r#"{"name": "b-logo", "files": []}"#, SUFFIX);
        assert_eq!(empty.diagnostics[0].kind, DiagnosticKind::MissingContent);

        let no_svg = process_record(
            "c-logo.json",
            &record_json("c-logo", "export function C() { return (<div />); }"),
            SUFFIX,
        );
        assert_eq!(no_svg.diagnostics[0].kind, DiagnosticKind::NoSvgReturn);
        assert_eq!(
            no_svg.diagnostics[0].location,
            SourceLocation::with_component("c-logo.json", "c-logo")
        );
    }

    #[test]
    fn test_process_record_success() {
        let source = r#"export function D() { return (<svg viewBox="0 0 1 1"><path d="M0 0" /></svg>); }"#;
        let outcome = process_record("d-logo.json", &record_json("d-logo", source), SUFFIX);
        assert!(outcome.diagnostics.is_empty());
        let converted = outcome.converted.unwrap();
        assert_eq!(converted.entry.name, "d-logo");
        assert_eq!(converted.entry.file, "d-logo.svg");
        assert_eq!(
            converted.svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"><path d="M0 0" /></svg>"#
        );
    }

    #[test]
    fn test_convert_source_with_commented_colors() {
        let source = r##"function Logo({ mode = "dark", colorScheme = "brand" }) {
  const COLORS = {
    grayscale: { dark: "#222", light: "#ddd" }, // Acme's mono
    // Primary palette
    brand: { dark: "#111", light: "#eee" },
  } as const;
  const color = COLORS[colorScheme][mode];
  return (<svg><path fill={color} /></svg>);
}"##;
        let render = convert_source(source).unwrap();
        assert_eq!(
            render.svg,
            r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#111" /></svg>"##
        );
        assert!(render.fallbacks.is_empty());
    }

    #[test]
    fn test_index_entry_json_shape() {
        let entry = SvgIndexEntry {
            name: "a".into(),
            file: "a.svg".into(),
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"name":"a","file":"a.svg"}"#
        );
    }
}
