//! End-to-end tests for the `confgen` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's config and environment.
fn confgen(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("confgen");
    cmd.env("XDG_CONFIG_HOME", home.join("xdg"))
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("CONFGEN__GENERATION__BASE_PACKAGE")
        .env_remove("CONFGEN__GENERATION__RESOURCE_ROOTS")
        .current_dir(home);
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project with one global and one class file under src/main/resources.
fn widget_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/main/resources/config/global/app.properties",
        "timeout=30\n",
    );
    write(
        temp.path(),
        "src/main/resources/config/global/class/Widget.properties",
        "timeout=5\ncolor=red\n",
    );
    temp
}

const G_JAVA: &str = "target/generated-sources/config/gen/config/G.java";
const C_JAVA: &str = "target/generated-sources/config/gen/config/C.java";

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_writes_both_classes() {
    let temp = widget_project();

    confgen(temp.path())
        .args(["generate", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("G.java"))
        .stdout(predicate::str::contains("C.java"));

    let g = fs::read_to_string(temp.path().join(G_JAVA)).unwrap();
    let c = fs::read_to_string(temp.path().join(C_JAVA)).unwrap();
    assert!(g.contains("package gen.config;"));
    assert!(g.contains(r#"public static final String timeout = "30";"#));
    assert!(c.contains("public static final class Widget {"));
    assert!(c.contains(r#"public static final String color = "red";"#));
    // Overridden by the global layer.
    assert!(!c.contains("timeout"));
}

#[test]
fn generate_with_project_dir_and_package() {
    let temp = widget_project();
    let cwd = TempDir::new().unwrap();

    confgen(cwd.path())
        .arg("generate")
        .arg("-C")
        .arg(temp.path())
        .args(["--package", "com.acme.cfg", "--output", "out"])
        .assert()
        .success();

    assert!(temp.path().join("out/com/acme/cfg/G.java").is_file());
    assert!(temp.path().join("out/com/acme/cfg/C.java").is_file());
}

#[test]
fn generate_json_report() {
    let temp = widget_project();

    let output = confgen(temp.path())
        .args(["generate", "--test-source-only", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["source_set"], "test");
    assert_eq!(report["generated"].as_array().unwrap().len(), 2);
    assert_eq!(report["class_groups"][0], "Widget");
}

#[test]
fn dry_run_writes_nothing() {
    let temp = widget_project();

    confgen(temp.path())
        .args(["generate", "--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would write"));

    assert!(!temp.path().join("target").exists());
}

#[test]
fn dry_run_rejects_identifier_clash() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/main/resources/config/global/app.properties",
        "a.b=1\na-b=2\n",
    );

    confgen(temp.path())
        .args(["generate", "--dry-run"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("a_b"));

    assert!(!temp.path().join("target").exists());
}

#[test]
fn duplicate_global_key_fails_without_output() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/main/resources/config/global/a.properties",
        "port=1\n",
    );
    write(
        temp.path(),
        "src/main/resources/config/global/b.properties",
        "port=2\n",
    );

    confgen(temp.path())
        .arg("generate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("duplicate"))
        .stderr(predicate::str::contains("[port]"));

    assert!(!temp.path().join("target").exists());
}

#[test]
fn class_collision_is_only_a_warning() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/main/resources/config/global/class/A.properties",
        "shared=1\n",
    );
    write(
        temp.path(),
        "src/main/resources/config/global/class/B.properties",
        "shared=2\n",
    );

    confgen(temp.path())
        .args(["generate", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Key 'shared'"));

    let c = fs::read_to_string(temp.path().join(C_JAVA)).unwrap();
    assert!(c.contains("public static final class A {"));
    assert!(c.contains("public static final class B {"));
}

#[test]
fn invalid_package_is_a_user_error() {
    let temp = widget_project();
    confgen(temp.path())
        .args(["generate", "--package", "com..acme"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid base package"));
}

#[test]
fn missing_template_exits_not_found() {
    let temp = widget_project();
    confgen(temp.path())
        .args(["generate", "--template", "nope.hbs"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Template not found"));
}

#[test]
fn scan_json_lists_files() {
    let temp = widget_project();

    let output = confgen(temp.path())
        .args(["scan", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["global"].as_array().unwrap().len(), 1);
    assert_eq!(report["class"][0]["base_name"], "Widget");
    assert_eq!(report["diagnostics"]["overrides"][0]["key"], "timeout");
}

#[test]
fn scan_with_keys() {
    let temp = widget_project();
    confgen(temp.path())
        .args(["scan", "--keys", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Global layer: 1 file(s), 1 key(s)"))
        .stdout(predicate::str::contains("color"));
}

#[test]
fn local_config_file_is_honoured() {
    let temp = widget_project();
    write(
        temp.path(),
        "confgen.toml",
        "[generation]\nbase_package = \"org.local\"\n",
    );

    confgen(temp.path())
        .args(["config", "get", "generation.base_package"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.local"));

    confgen(temp.path()).arg("generate").assert().success();
    assert!(
        temp.path()
            .join("target/generated-sources/config/org/local/G.java")
            .is_file()
    );
}

#[test]
fn environment_overrides_config() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .env("CONFGEN__GENERATION__BASE_PACKAGE", "from.env")
        .args(["config", "get", "generation.base_package"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from.env"));
}

#[test]
fn unknown_config_key_fails() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .args(["config", "get", "no.such.key"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn init_creates_local_config_once() {
    let temp = TempDir::new().unwrap();

    confgen(temp.path()).arg("init").assert().success();
    let written = fs::read_to_string(temp.path().join("confgen.toml")).unwrap();
    assert!(written.contains("base_package"));

    fs::write(temp.path().join("confgen.toml"), "# mine\n").unwrap();
    confgen(temp.path())
        .args(["init", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(temp.path().join("confgen.toml")).unwrap(),
        "# mine\n"
    );
}

#[test]
fn missing_explicit_config_exits_configuration() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .args(["--config", "absent.toml", "scan"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn unknown_subcommand_exits_two() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path()).arg("frobnicate").assert().failure().code(2);
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confgen"));
}
