//! Report rendering and the end-to-end file driver.

use std::fs;
use std::path::{Path, PathBuf};

use flowlint::analyzer::{AnalysisResult, Analyzer};
use flowlint::cancel::CancelToken;
use flowlint::config::Config;
use flowlint::lints::{unreachable, TreeOracle};
use flowlint::output::{print_json, print_report};
use flowlint::tree::Module;

const DEMO: &str = r#"{"functions":[{"name":"demo","body":{"kind":"block","stmts":[
    {"kind":"expr_stmt","line":2,"col":4,"expr":{"kind":"return","line":2}},
    {"kind":"expr_stmt","line":3,"col":4,"expr":{"kind":"value","line":3}}
]}}]}"#;

fn demo_result() -> AnalysisResult {
    let module = Module::from_json(DEMO).expect("fixture should parse");
    let findings = unreachable::check_module(
        &module,
        Path::new("fixtures/demo.json"),
        &TreeOracle,
        &CancelToken::new(),
    )
    .expect("analysis should not be cancelled");
    AnalysisResult {
        findings,
        parse_errors: Vec::new(),
        files: 1,
        functions: 1,
    }
}

#[test]
fn json_report_shape() {
    let result = demo_result();
    let mut out = Vec::new();
    print_json(&mut out, &result).expect("json rendering should succeed");
    let rendered = String::from_utf8(out).expect("output should be utf-8");
    insta::assert_snapshot!(rendered, @r#"
    {
      "findings": [
        {
          "lint": "unreachable-code",
          "severity": "warning",
          "message": "Unreachable statement",
          "function": "demo",
          "file": "fixtures/demo.json",
          "line": 3,
          "col": 4
        }
      ],
      "parse_errors": [],
      "files": 1,
      "functions": 1
    }
    "#);
}

#[test]
fn text_report_lists_findings_by_file() {
    colored::control::set_override(false);
    let result = demo_result();
    let mut out = Vec::new();
    print_report(&mut out, &result).expect("report rendering should succeed");
    let rendered = String::from_utf8(out).expect("output should be utf-8");
    assert!(rendered.contains("fixtures/demo.json"));
    assert!(rendered.contains("3:4 warning: Unreachable statement (in `demo`)"));
    assert!(rendered.contains("1 finding(s), 1 file(s), 1 function(s)."));
}

#[test]
fn text_report_all_clear() {
    colored::control::set_override(false);
    let result = AnalysisResult {
        files: 3,
        functions: 7,
        ..AnalysisResult::default()
    };
    let mut out = Vec::new();
    print_report(&mut out, &result).expect("report rendering should succeed");
    let rendered = String::from_utf8(out).expect("output should be utf-8");
    assert!(rendered.contains("No unreachable code in 7 function(s) across 3 file(s)."));
}

#[test]
fn analyzer_walks_a_directory() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    fs::write(dir.path().join("demo.json"), DEMO).expect("fixture write");
    fs::write(dir.path().join("broken.json"), "{ not json").expect("fixture write");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("fixture write");

    let analyzer = Analyzer::new(Config::default(), CancelToken::new());
    let result = analyzer
        .analyze_paths(&[dir.path().to_path_buf()])
        .expect("run should not be cancelled");

    assert_eq!(result.files, 2);
    assert_eq!(result.functions, 1);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].line, 3);
    assert_eq!(result.parse_errors.len(), 1);
    assert!(result.parse_errors[0]
        .file
        .to_string_lossy()
        .ends_with("broken.json"));
}

#[test]
fn analyzer_honors_folder_exclusions() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let skipped = dir.path().join("generated");
    fs::create_dir(&skipped).expect("dir create");
    fs::write(skipped.join("demo.json"), DEMO).expect("fixture write");
    fs::write(dir.path().join("demo.json"), DEMO).expect("fixture write");

    let config = Config {
        exclude_folders: vec!["generated".to_owned()],
        ..Config::default()
    };
    let analyzer = Analyzer::new(config, CancelToken::new());
    let files = analyzer.collect_files(&[dir.path().to_path_buf()]);
    assert_eq!(files.len(), 1);
    assert!(!files[0].components().any(|c| c.as_os_str() == "generated"));
}

#[test]
fn disabled_lint_yields_no_findings() {
    let config = Config {
        unreachable_code: false,
        ..Config::default()
    };
    let analyzer = Analyzer::new(config, CancelToken::new());
    let module = Module::from_json(DEMO).expect("fixture should parse");
    let findings = analyzer
        .analyze_module(&module, &PathBuf::from("demo.json"))
        .expect("run should not be cancelled");
    assert!(findings.is_empty());
}

#[test]
fn cancelled_run_returns_nothing() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    fs::write(dir.path().join("demo.json"), DEMO).expect("fixture write");

    let cancel = CancelToken::new();
    cancel.cancel();
    let analyzer = Analyzer::new(Config::default(), cancel);
    assert!(analyzer.analyze_paths(&[dir.path().to_path_buf()]).is_none());
}
