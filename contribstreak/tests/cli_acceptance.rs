use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn write_config(&self, contents: &str) {
        let path = self.xdg_config.join("contribstreak/config.toml");
        fs::create_dir_all(path.parent().expect("missing config parent"))
            .expect("failed to create config dir");
        fs::write(path, contents).expect("failed to write config");
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../contribstreak-core/tests/fixtures")
        .join(name)
}

fn fixture_args(extra: &[&str]) -> Vec<String> {
    let mut args = vec![
        "--input".to_string(),
        fixture("alice.json").display().to_string(),
        "--input".to_string(),
        fixture("alice-work.json").display().to_string(),
        "--today".to_string(),
        "2024-03-10".to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    args
}

/// A local port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);
    port
}

fn run_bin<S: AsRef<std::ffi::OsStr>>(env: &CliTestEnv, args: &[S]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("contribstreak"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute contribstreak: {e}"))
}

fn assert_success<S: AsRef<std::ffi::OsStr>>(args: &[S], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| arg.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "contribstreak {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn log_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).count())
        .unwrap_or(0)
}

#[test]
fn json_export_merges_input_files() {
    let env = CliTestEnv::new();
    let args = fixture_args(&["--export", "json"]);

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    assert_eq!(report["year"], 2024);
    assert_eq!(report["today"], "2024-03-10");
    assert_eq!(report["streaks"]["current_streak"], 1);
    assert_eq!(report["streaks"]["longest_streak"], 7);
    assert_eq!(report["streaks"]["longest_streak_start"], "2024-03-01");
    assert_eq!(report["streaks"]["longest_streak_end"], "2024-03-07");
    assert_eq!(report["streaks"]["total_contributions"], 20);
    assert_eq!(report["year_total"], 15);
    assert_eq!(report["heatmap"]["max_count"], 4);

    let accounts = report["accounts"].as_array().expect("accounts array");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0]["account"], "alice");
    assert_eq!(accounts[1]["account"], "alice-work");
}

#[test]
fn json_export_for_previous_year() {
    let env = CliTestEnv::new();
    let args = fixture_args(&["--export", "json", "--year", "2023"]);

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["year"], 2023);
    assert_eq!(report["year_total"], 5);
    assert_eq!(report["heatmap"]["weeks"].as_array().map(Vec::len), Some(53));
    assert_eq!(report["streaks"]["longest_streak"], 7);
}

#[test]
fn terminal_output_shows_streaks_and_heatmap() {
    let env = CliTestEnv::new();
    let args = fixture_args(&[]);

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("alice + alice-work"), "got:\n{stdout}");
    assert!(stdout.contains("Current:  1 day ✨ (sparked)"), "got:\n{stdout}");
    assert!(
        stdout.contains("Longest:  7 days (Mar 01 - Mar 07)"),
        "got:\n{stdout}"
    );
    assert!(stdout.contains("HEATMAP"));
    assert!(stdout.contains("Mar"));
    assert!(stdout.contains("Less"));

    assert!(
        log_files(&env.xdg_state.join("contribstreak")) > 0,
        "expected a log file under XDG_STATE_HOME"
    );
}

#[test]
fn markdown_export_has_sections() {
    let env = CliTestEnv::new();
    let args = fixture_args(&["--export", "md"]);

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Contributions 2024"));
    assert!(stdout.contains("## Streaks"));
    assert!(stdout.contains("- **Current streak:** 1 day ✨ (sparked)"));
    assert!(stdout.contains("- **Longest streak:** 7 days"));
    assert!(stdout.contains("```text"));
    assert!(stdout.contains("| alice-work | 13 | ok |"));
}

#[test]
fn unknown_export_format_fails() {
    let env = CliTestEnv::new();
    let args = fixture_args(&["--export", "csv"]);

    let output = run_bin(&env, &args);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown export format"), "got:\n{stderr}");
}

#[test]
fn invalid_today_is_rejected() {
    let env = CliTestEnv::new();
    let args = ["--today", "2024-02-30", "--account", "alice"];

    let output = run_bin(&env, &args);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid date"), "got:\n{stderr}");
}

#[test]
fn missing_accounts_fails_with_hint() {
    let env = CliTestEnv::new();
    let args: [&str; 0] = [];

    let output = run_bin(&env, &args);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No accounts given"), "got:\n{stderr}");
}

#[test]
fn unreachable_source_degrades_to_empty_report() {
    let env = CliTestEnv::new();
    env.write_config(&format!(
        r#"accounts = ["ghost"]

[source]
base_url = "http://127.0.0.1:{}"
timeout_secs = 2
"#,
        closed_port()
    ));
    let args = ["--today", "2024-03-10", "--export", "json"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["accounts"][0]["account"], "ghost");
    assert_eq!(report["accounts"][0]["degraded"], true);
    assert_eq!(report["streaks"]["current_streak"], 0);
    assert_eq!(report["year_total"], 0);
}

#[test]
fn invalid_config_fails() {
    let env = CliTestEnv::new();
    env.write_config("[source]\ntimeout_secs = 0\n");
    let args = ["--account", "alice"];

    let output = run_bin(&env, &args);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timeout_secs"), "got:\n{stderr}");
}
