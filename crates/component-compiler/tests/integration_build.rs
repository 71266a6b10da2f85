//! End-to-end tests of the component-compiler binary.

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const MAIN: &str = "<head>\n  <title>App</title>\n</head>\n<body>\n  <div id=\"app\"></div>\n</body>\n";

const CARD: &str = r#"<script>
  let title = props.title;
</script>

<div class="card">{title}</div>
"#;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, contents) in files {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

fn run(workspace: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_component-compiler"))
        .arg("--workspace")
        .arg(workspace)
        .args(extra)
        .output()
        .expect("failed to run component-compiler")
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

#[test]
fn test_builds_components_and_document() {
    let dir = project(&[
        ("client/main.html", MAIN),
        ("client/ui/Card.html", CARD),
        ("node_modules/pkg/Ignored.html", "<p>x</p>"),
    ]);

    let output = run(dir.path(), &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let build = dir.path().join("build");
    let code = read(build.join("client/ui/Card.html.js"));
    assert!(code.starts_with("\"use strict\";\nexport default function Card(target, props) {"));
    assert!(code.ends_with("//# sourceMappingURL=Card.html.js.map\n"));

    let map: Value = serde_json::from_str(&read(build.join("client/ui/Card.html.js.map"))).unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "Card.html.js");
    assert_eq!(map["sources"], serde_json::json!(["client/ui/Card.html"]));
    assert_eq!(map["sourcesContent"][0], CARD);
    assert!(!map["mappings"].as_str().unwrap().is_empty());

    let document = read(build.join("index.html"));
    assert_eq!(
        document,
        "<!DOCTYPE html>\n<html>\n<head>\n<title>App</title>\n</head>\n<body>\n<div id=\"app\"></div>\n</body>\n</html>\n"
    );

    assert!(!build.join("client/main.html.js").exists());
    assert!(!build.join("node_modules").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("found 0 errors in 2 files"), "stdout: {stdout}");
}

#[test]
fn test_reports_diagnostics_as_json() {
    let dir = project(&[("Broken.html", "<p>{ }</p>\n"), ("Ok.html", "<p>ok</p>\n")]);

    let output = run(dir.path(), &["--output", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let diagnostics: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        diagnostics,
        serde_json::json!([{
            "type": "Error",
            "filename": "Broken.html",
            "start": { "line": 1, "column": 5 },
            "message": "expected an expression",
            "source": "component",
        }])
    );

    // Files without errors are still written.
    assert!(dir.path().join("build/Ok.html.js").exists());
    assert!(!dir.path().join("build/Broken.html.js").exists());
}

#[test]
fn test_machine_output() {
    let dir = project(&[("ui/Broken.html", "<div>\n  <p>{}</p>\n</div>\n")]);

    let output = run(dir.path(), &["--output", "machine"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ERROR ui/Broken.html:2:7 expected an expression\n"
    );
}

#[test]
fn test_no_maps_and_out_dir() {
    let dir = project(&[("Card.html", CARD)]);

    let output = run(dir.path(), &["--no-maps", "--out-dir", "dist"]);
    assert!(output.status.success());

    let code = read(dir.path().join("dist/Card.html.js"));
    assert!(!code.contains("sourceMappingURL"));
    assert!(!dir.path().join("dist/Card.html.js.map").exists());
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_config_file() {
    let dir = project(&[
        (
            "component-compiler.json",
            r#"{ "outDir": "public", "banner": "", "extensions": [".component"], "ignore": ["drafts/**"] }"#,
        ),
        ("nav-bar.component", "<nav></nav>"),
        ("drafts/Old.component", "<p></p>"),
        ("page.html", "<p>not compiled</p>"),
    ]);

    let output = run(dir.path(), &[]);
    assert!(output.status.success());

    let code = read(dir.path().join("public/nav-bar.component.js"));
    assert!(code.starts_with("export default function nav_bar(target, props) {"));
    assert!(!dir.path().join("public/drafts").exists());
    assert!(!dir.path().join("public/page.html.js").exists());
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = project(&[
        ("component-compiler.json", "{ oops"),
        ("Card.html", CARD),
    ]);

    let output = run(dir.path(), &[]);
    assert!(output.status.success());
    assert!(dir.path().join("build/Card.html.js").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to parse"));
}

#[test]
fn test_invalid_ignore_glob_fails() {
    let dir = project(&[("Card.html", CARD)]);

    let output = run(dir.path(), &["--ignore", "a/["]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid glob pattern"));
}
