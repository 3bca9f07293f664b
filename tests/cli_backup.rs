mod common;

use common::*;

#[test]
fn test_backup_enable_disable_round_trip() {
    let env = TestEnv::new();
    assert!(env.run(&["site", "add", "example.com"]).success);

    let enabled = env.run(&["backup", "enable", "daily", "example.com"]);
    assert!(enabled.success, "{}", enabled.combined_output());
    let table = env.read(&env.cron_file());
    assert_eq!(table.lines().count(), 1);
    assert!(table.contains("rsync -a --delete"));
    assert!(env.path("backup/daily/example.com").is_dir());

    let again = env.run(&["backup", "enable", "daily", "example.com"]);
    assert!(again.success);
    assert_eq!(env.read(&env.cron_file()).lines().count(), 1);

    let disabled = env.run(&["backup", "disable", "daily", "example.com"]);
    assert!(disabled.success, "{}", disabled.combined_output());
    assert_eq!(env.read(&env.cron_file()), "");
}

#[test]
fn test_backup_enable_requires_site_directory() {
    let env = TestEnv::new();

    let result = env.run(&["backup", "enable", "weekly", "example.com"]);

    assert_eq!(result.exit_code, 3);
    assert!(!env.cron_file().exists());
}

#[test]
fn test_backup_unknown_kind_is_input_error() {
    let env = TestEnv::new();

    let result = env.run(&["backup", "enable", "hourly", "example.com"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("daily or weekly"));
}

#[test]
fn test_backup_db_add_and_list() {
    let env = TestEnv::new();

    let added = env.run(&["backup", "db", "add", "shop"]);
    assert!(added.success, "{}", added.combined_output());
    assert!(env.path("backup/daily/databases").is_dir());

    let listed = env.run(&["backup", "list", "--json"]).json();
    let items = listed["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].as_str().unwrap().contains("shop.sql"));
}

#[test]
fn test_backup_db_remove_cleans_duplicates() {
    let env = TestEnv::new();
    assert!(env.run(&["backup", "db", "add", "shop"]).success);
    let line = env.read(&env.cron_file());
    env.write(&env.cron_file(), &format!("{line}{line}"));

    let result = env.run(&["backup", "db", "remove", "shop"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read(&env.cron_file()), "");
    assert!(result.stdout.contains("duplicate"));
}
