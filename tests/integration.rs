use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn statikum_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("statikum");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(
        data_dir.join("documents.json"),
        r#"[
  {"id": "doc-zaverka-2023", "name": "Účetní závěrka 2023", "doc_type": "ucetni_zaverka",
   "client": "Klient X", "year": 2023, "short_description": "Závěrka za rok 2023",
   "link": "/docs/zaverka-2023.pdf"}
]"#,
    )
    .unwrap();

    fs::write(
        data_dir.join("metrics.json"),
        r#"[
  {"id": "m-trzby-2022", "client": "Klient X", "year": 2022,
   "metric_name": "trzby", "metric_value": 13600000, "currency": "CZK"},
  {"id": "m-trzby-2023", "client": "Klient X", "year": 2023,
   "metric_name": "trzby", "metric_value": 15200000, "currency": "CZK"},
  {"id": "m-ebitda-2023", "client": "Klient X", "year": 2023,
   "metric_name": "ebitda", "metric_value": 3100000, "currency": "CZK"}
]"#,
    )
    .unwrap();

    fs::write(
        data_dir.join("answers.json"),
        r#"[
  {"id": "ans-vysledky", "match": "finanční výsledky", "title": "Finanční výsledky Klienta X",
   "answer_text": "Tržby Klienta X rostly.", "related_client": "Klient X",
   "related_docs": ["doc-zaverka-2023", "doc-chybejici"],
   "related_metrics": ["m-trzby-2022", "m-trzby-2023", "m-ebitda-2023"]}
]"#,
    )
    .unwrap();

    fs::write(
        data_dir.join("external_sources.json"),
        r#"[
  {"id": "src-justice", "source_type": "justice", "name": "Obchodní rejstřík",
   "url": "https://or.justice.cz", "description": "Veřejný rejstřík firem",
   "tags": ["rejstřík"]},
  {"id": "src-local", "source_type": "client_document", "name": "Závěrka 2023",
   "description": "Dodaný dokument", "tags": [], "local_path": "docs/zaverka.pdf"}
]"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[catalog]
dir = "{}/data"

[server]
bind = "127.0.0.1:7878"
"#,
        root.display()
    );

    let config_path = config_dir.join("statikum.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_statikum(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = statikum_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run statikum binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_catalog_counts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_statikum(&config_path, &["catalog"]);
    assert!(success, "catalog failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("documents:        1"));
    assert!(stdout.contains("metrics:          3"));
    assert!(stdout.contains("answers:          1"));
    assert!(stdout.contains("external sources: 2"));
}

#[test]
fn test_sources_listing() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_statikum(&config_path, &["sources"]);
    assert!(success);
    assert!(stdout.contains("src-justice"));
    assert!(stdout.contains("https://or.justice.cz"));
    assert!(stdout.contains("docs/zaverka.pdf"));
    assert!(stdout.contains("2 external sources"));
}

#[test]
fn test_ask_local_matches_prepared_answer() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_statikum(
        &config_path,
        &["ask", "--local", "Jaké byly finanční výsledky Klienta X?"],
    );
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Finanční výsledky Klienta X"));
    assert!(stdout.contains("Tržby Klienta X rostly."));
    // Dangling document id must be dropped, the real one listed.
    assert!(stdout.contains("Účetní závěrka 2023"));
    assert!(!stdout.contains("doc-chybejici"));
    // Metrics aggregated per year, rendered in millions.
    assert!(stdout.contains("2022"));
    assert!(stdout.contains("13.6 mil. Kč"));
    assert!(stdout.contains("15.2 mil. Kč"));
    assert!(stdout.contains("3.1 mil. Kč"));
}

#[test]
fn test_ask_local_no_scenario() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_statikum(&config_path, &["ask", "--local", "random unrelated text"]);
    assert!(success);
    assert!(stdout.contains("nemáme připravený scénář"));
}

#[test]
fn test_ask_without_provider_is_configuration_error() {
    let (_tmp, config_path) = setup_test_env();

    // llm section omitted in config → provider defaults to "disabled".
    let (stdout, stderr, success) = run_statikum(&config_path, &["ask", "Jaké byly tržby?"]);
    assert!(!success, "expected failure: stdout={}", stdout);
    assert!(stderr.contains("disabled"), "stderr={}", stderr);
}

#[test]
fn test_missing_catalog_dir_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("statikum.toml");
    fs::write(
        &config_path,
        r#"[catalog]
dir = "/nonexistent/statikum-data"

[server]
bind = "127.0.0.1:7878"
"#,
    )
    .unwrap();

    let (_, stderr, success) = run_statikum(&config_path, &["catalog"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read catalog file"));
}
