mod common;

use common::*;

#[test]
fn test_site_add_writes_fragment_and_document_root() {
    let env = TestEnv::new();

    let result = env.run(&["site", "add", "example.com"]);

    assert!(result.success, "{}", result.combined_output());
    let fragment = env.read(&env.fragment("example.com.conf"));
    assert!(fragment.starts_with("example.com {\n\troot * "));
    assert!(fragment.contains("\tfile_server\n"));
    assert!(env.sites_root().join("example.com").is_dir());
    assert!(result.stdout.contains("site example.com added"));
}

#[test]
fn test_site_add_twice_is_input_error() {
    let env = TestEnv::new();
    assert!(env.run(&["site", "add", "example.com"]).success);

    let result = env.run(&["site", "add", "example.com"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("already exists"));
}

#[test]
fn test_site_add_rejects_invalid_domain_without_writing() {
    let env = TestEnv::new();

    let result = env.run(&["site", "add", "../etc"]);

    assert_eq!(result.exit_code, 2);
    assert!(!env.sites_config_dir().exists() || std::fs::read_dir(env.sites_config_dir()).unwrap().next().is_none());
}

#[test]
fn test_site_add_rolled_back_when_validator_rejects() {
    let env = TestEnv::builder()
        .validate(&["sh", "-c", "echo 'Error: unrecognized directive' >&2; exit 1"])
        .build();

    let result = env.run(&["site", "add", "example.com"]);

    assert_eq!(result.exit_code, 5, "{}", result.combined_output());
    assert!(result.stderr.contains("unrecognized directive"));
    assert!(!env.fragment("example.com.conf").exists());
}

#[test]
fn test_site_add_with_failing_reload_is_degraded_and_kept() {
    let env = TestEnv::builder().reload(&["false"]).build();

    let result = env.run(&["site", "add", "example.com"]);

    assert_eq!(result.exit_code, 6, "{}", result.combined_output());
    assert!(env.fragment("example.com.conf").exists());
    assert!(result.combined_output().contains("webpanel service reload"));
}

#[test]
fn test_site_remove_without_terminal_requires_yes() {
    let env = TestEnv::new();
    assert!(env.run(&["site", "add", "example.com"]).success);

    let result = env.run(&["site", "remove", "example.com"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("--yes"));
    assert!(env.fragment("example.com.conf").exists());
}

#[test]
fn test_site_remove_with_yes_keeps_site_files() {
    let env = TestEnv::new();
    assert!(env.run(&["site", "add", "example.com"]).success);
    env.write(&env.sites_root().join("example.com/index.html"), "<h1>hi</h1>");

    let result = env.run(&["site", "remove", "example.com", "--yes"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(!env.fragment("example.com.conf").exists());
    assert!(env.sites_root().join("example.com/index.html").exists());
}

#[test]
fn test_site_remove_missing_is_not_found() {
    let env = TestEnv::new();

    let result = env.run(&["site", "remove", "nowhere.example", "--yes"]);

    assert_eq!(result.exit_code, 3);
}

#[test]
fn test_site_list_ignores_proxies() {
    let env = TestEnv::new();
    assert!(env.run(&["site", "add", "b.example.com"]).success);
    assert!(env.run(&["site", "add", "a.example.com"]).success);
    assert!(env
        .run(&["proxy", "add", "api.example.com", "localhost:3000"])
        .success);

    let result = env.run(&["site", "list", "--json"]);

    assert!(result.success);
    let json = result.json();
    assert_eq!(
        json["items"],
        serde_json::json!(["a.example.com", "b.example.com"])
    );
}

#[test]
fn test_site_add_dry_run_prints_diff_and_writes_nothing() {
    let env = TestEnv::new();

    let result = env.run(&["site", "add", "example.com", "--dry-run"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("--- /dev/null"));
    assert!(result.stdout.contains("+example.com {"));
    assert!(!env.fragment("example.com.conf").exists());
    assert!(!env.sites_root().join("example.com").exists());
}
