use elements_core::{DiagnosticKind, Severity};
use elements_svg::pipeline::{PipelineOptions, SvgIndexEntry, run};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const P7_SOURCE: &str = r##"function Logo({ mode = "dark", colorScheme = "brand" }) {
  const COLORS = { brand: { dark: "#111", light: "#eee" } } as const;
  const color = COLORS[colorScheme][mode];
  return (<svg><path fill={color} /></svg>);
}"##;

fn write_record(dir: &Path, file: &str, name: &str, content: &str) {
    let record = json!({
        "name": name,
        "type": "registry:component",
        "title": name,
        "files": [{ "path": format!("components/logos/{name}.tsx"), "content": content }],
    });
    fs::write(dir.join(file), record.to_string()).unwrap();
}

fn options(input: &TempDir, output: &Path) -> PipelineOptions {
    PipelineOptions {
        input_dir: input.path().to_path_buf(),
        output_dir: output.to_path_buf(),
        max_threads: Some(2),
        ..Default::default()
    }
}

fn read_index(path: &Path) -> Vec<SvgIndexEntry> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_end_to_end_single_logo() {
    let input = TempDir::new().unwrap();
    let output = input.path().join("svg");
    write_record(input.path(), "acme-logo.json", "acme-logo", P7_SOURCE);

    let report = run(&options(&input, &output)).unwrap();

    assert_eq!(report.generated, 1);
    assert_eq!(report.failed, 0);
    assert!(report.diagnostics.is_empty());
    assert_eq!(
        fs::read_to_string(output.join("acme-logo.svg")).unwrap(),
        r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#111" /></svg>"##
    );
    assert_eq!(
        read_index(&output.join("index.json")),
        vec![SvgIndexEntry {
            name: "acme-logo".into(),
            file: "acme-logo.svg".into(),
        }]
    );
    assert_eq!(report.index_path, output.join("index.json"));
}

#[test]
fn test_invalid_file_does_not_abort_batch() {
    let input = TempDir::new().unwrap();
    let output = input.path().join("out").join("svg");
    for (i, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        let file = format!("{name}-logo.json");
        if i == 2 {
            fs::write(input.path().join(&file), "{ \"name\": \"c-logo\", ").unwrap();
        } else {
            write_record(input.path(), &file, &format!("{name}-logo"), P7_SOURCE);
        }
    }

    let report = run(&options(&input, &output)).unwrap();

    assert_eq!(report.generated, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total(), 5);
    let index = read_index(&report.index_path);
    let names: Vec<_> = index.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a-logo", "b-logo", "d-logo", "e-logo"]);
    assert!(!output.join("c-logo.svg").exists());

    let failures: Vec<_> = report.diagnostics.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].location.file, "c-logo.json");
    assert!(matches!(failures[0].kind, DiagnosticKind::InvalidJson { .. }));
}

#[test]
fn test_rerun_is_byte_identical() {
    let input = TempDir::new().unwrap();
    let output = input.path().join("svg");
    write_record(input.path(), "zeta-logo.json", "zeta-logo", P7_SOURCE);
    write_record(
        input.path(),
        "alpha-logo.json",
        "alpha-logo",
        &P7_SOURCE.replace("mode = \"dark\"", "mode = \"light\""),
    );

    let snapshot = |dir: &Path| {
        let mut files: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| {
                let path = e.unwrap().path();
                (path.clone(), fs::read(path).unwrap())
            })
            .collect();
        files.sort();
        files
    };

    run(&options(&input, &output)).unwrap();
    let first = snapshot(&output);
    run(&options(&input, &output)).unwrap();
    let second = snapshot(&output);

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    let index = read_index(&output.join("index.json"));
    assert_eq!(index[0].name, "alpha-logo");
    assert_eq!(
        fs::read_to_string(output.join("alpha-logo.svg")).unwrap(),
        r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#eee" /></svg>"##
    );
}

#[test]
fn test_unresolvable_colors_warn_but_emit_svg() {
    let input = TempDir::new().unwrap();
    let output = input.path().join("svg");
    let source = r#"
import { useBrandColor } from "@/hooks/use-brand-color";

export function HookLogo({ mode = "dark", className, ...props }: LogoProps) {
  const color = useBrandColor(mode);
  return (
    <svg viewBox="0 0 24 24" className={className} {...props}>
      <path d="M0 0h24v24H0z" fill={color} />
      {Badge}
    </svg>
  );
}
"#;
    write_record(input.path(), "hook-logo.json", "hook-logo", source);

    let report = run(&options(&input, &output)).unwrap();

    assert_eq!(report.generated, 1);
    let svg = fs::read_to_string(output.join("hook-logo.svg")).unwrap();
    assert_eq!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\">\n<path d=\"M0 0h24v24H0z\" fill=\"currentColor\" />\n{Badge}\n</svg>"
    );

    let warnings: Vec<_> = report.diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|d| d.severity() == Severity::Warning));
    assert_eq!(
        warnings[0].kind,
        DiagnosticKind::ColorFallback {
            expressions: vec!["color".into()],
        }
    );
    assert_eq!(
        warnings[1].kind,
        DiagnosticKind::UnresolvedExpressions {
            expressions: vec!["{Badge}".into()],
        }
    );
}

#[test]
fn test_duplicate_record_name_keeps_first_file() {
    let input = TempDir::new().unwrap();
    let output = input.path().join("svg");
    write_record(input.path(), "acme-logo.json", "acme-logo", P7_SOURCE);
    write_record(
        input.path(),
        "acme-old-logo.json",
        "acme-logo",
        &P7_SOURCE.replace("mode = \"dark\"", "mode = \"light\""),
    );

    let report = run(&options(&input, &output)).unwrap();

    assert_eq!(report.generated, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(read_index(&report.index_path).len(), 1);
    // "acme-logo.json" sorts first and keeps the dark variant.
    assert_eq!(
        fs::read_to_string(output.join("acme-logo.svg")).unwrap(),
        r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#111" /></svg>"##
    );
    let failures: Vec<_> = report.diagnostics.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].location.file, "acme-old-logo.json");
    assert_eq!(
        failures[0].kind,
        DiagnosticKind::DuplicateOutput {
            output: "acme-logo.svg".into(),
            first: "acme-logo.json".into(),
        }
    );
}

#[test]
fn test_only_suffixed_files_are_processed() {
    let input = TempDir::new().unwrap();
    let output = input.path().join("svg");
    write_record(input.path(), "acme-logo.json", "acme-logo", P7_SOURCE);
    write_record(input.path(), "button.json", "button", P7_SOURCE);
    write_record(input.path(), "empty-logo.json", "empty-logo", "   ");

    let report = run(&options(&input, &output)).unwrap();

    assert_eq!(report.generated, 1);
    assert_eq!(report.failed, 1);
    assert!(!output.join("button.svg").exists());
    let failures: Vec<_> = report.diagnostics.failures().collect();
    assert_eq!(failures[0].kind, DiagnosticKind::MissingContent);
}

#[test]
fn test_missing_input_dir_is_fatal() {
    let root = TempDir::new().unwrap();
    let options = PipelineOptions {
        input_dir: root.path().join("missing"),
        output_dir: root.path().join("svg"),
        ..Default::default()
    };
    assert!(run(&options).is_err());
}
