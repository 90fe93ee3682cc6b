use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

#[allow(deprecated)]
fn lens(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("context-lens").expect("binary");
    cmd.current_dir(workdir)
        .env_remove("CONTEXT_LENS_CONFIG")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(workdir: &Path, args: &[&str]) -> Value {
    let output = lens(workdir)
        .arg("--json")
        .args(args)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

/// `<tmp>/repos/shop` with a small Python web app.
fn setup_repo() -> TempDir {
    let temp = tempdir().unwrap();
    let repo = temp.path().join("repos/shop");
    fs::create_dir_all(repo.join("auth")).unwrap();
    fs::create_dir_all(repo.join("utils")).unwrap();
    fs::create_dir_all(repo.join("core")).unwrap();
    fs::write(repo.join("auth/login.py"), "").unwrap();
    fs::write(
        repo.join("auth/signup.py"),
        "import hashlib\n\nclass SignupForm:\n    pass\n\ndef register(user):\n    return user\n",
    )
    .unwrap();
    fs::write(repo.join("utils/math.py"), "def add(a, b):\n    return a + b\n").unwrap();
    fs::write(repo.join("core/db.py"), "def login(): pass\n").unwrap();
    fs::write(
        repo.join("app.py"),
        "from fastapi import FastAPI\napp = FastAPI()\n\n@app.get(\"/health\")\ndef health():\n    return {}\n",
    )
    .unwrap();
    temp
}

#[test]
fn search_lists_matching_paths() {
    let temp = setup_repo();
    lens(temp.path())
        .args(["--repo", "shop", "search", "auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fuzzy search results for 'auth' (2 matches)"))
        .stdout(predicate::str::contains("[auth]/login.py"))
        .stdout(predicate::str::contains("utils/math.py").not());
}

#[test]
fn search_without_matches_is_not_an_error() {
    let temp = setup_repo();
    lens(temp.path())
        .args(["--repo", "shop", "search", "qqqq"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found matching 'qqqq'."));
}

#[test]
fn missing_repo_fails() {
    let temp = setup_repo();
    lens(temp.path())
        .args(["--repo", "ghost", "files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn recommend_prefers_path_matches() {
    let temp = setup_repo();
    let body = run_json(temp.path(), &["--repo", "shop", "recommend", "user", "login"]);
    let ranked = body.as_array().unwrap();

    assert_eq!(ranked[0]["path"], "auth/login.py");
    let paths: Vec<&str> = ranked.iter().map(|r| r["path"].as_str().unwrap()).collect();
    assert!(paths.contains(&"core/db.py"));
}

#[test]
fn explain_outlines_a_file() {
    let temp = setup_repo();
    lens(temp.path())
        .args(["--repo", "shop", "explain", "auth/signup.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imports:\n  - import hashlib"))
        .stdout(predicate::str::contains("  - SignupForm (line 3)"))
        .stdout(predicate::str::contains("  - register() (line 6)"));
}

#[test]
fn explain_missing_file_fails() {
    let temp = setup_repo();
    lens(temp.path())
        .args(["--repo", "shop", "explain", "nope.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn show_returns_a_window() {
    let temp = setup_repo();
    let body = run_json(
        temp.path(),
        &["--repo", "shop", "show", "app.py", "--start", "4", "--lines", "2"],
    );
    assert_eq!(body["start_line"], 4);
    assert_eq!(body["total_lines"], 6);
    assert_eq!(body["lines"][0], "@app.get(\"/health\")");
    assert_eq!(body["lines"][1], "def health():");
}

#[test]
fn find_function_and_class() {
    let temp = setup_repo();
    let functions = run_json(temp.path(), &["--repo", "shop", "find-function", "register"]);
    assert_eq!(functions[0]["file"], "auth/signup.py");
    assert_eq!(functions[0]["line"], 6);

    lens(temp.path())
        .args(["--repo", "shop", "find-class", "signupform"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auth/signup.py:3"));
}

#[test]
fn routes_write_api_docs() {
    let temp = setup_repo();
    lens(temp.path())
        .args(["--repo", "shop", "routes", "--write-docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# API Documentation for shop"))
        .stdout(predicate::str::contains("| GET | /health | app.py:4 |"));

    let doc = fs::read_to_string(temp.path().join("docs/shop_api.md")).unwrap();
    assert!(doc.contains("## Endpoints"));
    assert!(doc.contains("/health"));
}

#[test]
fn repos_honours_config_file() {
    let temp = setup_repo();
    fs::create_dir_all(temp.path().join("repos/another")).unwrap();
    fs::write(temp.path().join("context-lens.toml"), "clone_root = \"repos\"\n").unwrap();

    let repos = run_json(temp.path(), &["repos"]);
    assert_eq!(repos, serde_json::json!(["another", "shop"]));
}

#[test]
fn invalid_config_is_a_startup_error() {
    let temp = setup_repo();
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[ranking]\nrecommend_limit = 0\n").unwrap();

    lens(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("repos")
        .assert()
        .failure()
        .stderr(predicate::str::contains("recommend_limit"));
}

#[test]
fn folder_flag_targets_any_directory() {
    let temp = setup_repo();
    let folder = temp.path().join("repos/shop/auth");
    let files = run_json(temp.path(), &["--folder", folder.to_str().unwrap(), "files"]);
    assert_eq!(files, serde_json::json!(["login.py", "signup.py"]));
}
