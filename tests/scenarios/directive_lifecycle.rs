//! A daily backup directive added to and removed from an empty registry.

use std::path::PathBuf;

use tempfile::tempdir;

use webpanel::domain::entities::{BackupLayout, Directive, DirectiveKind};
use webpanel::domain::value_objects::DomainName;
use webpanel::infrastructure::DirectiveRegistry;

#[test]
fn scenario_daily_backup_add_then_remove() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("webpanel-backup");
    std::fs::write(&path, "").unwrap();
    let layout = BackupLayout {
        sites_root: PathBuf::from("/apps/sites"),
        daily_dir: PathBuf::from("/backup/daily"),
        weekly_dir: PathBuf::from("/backup/weekly"),
        dump_command: "mysqldump -u root".to_string(),
    };
    let registry = DirectiveRegistry::new(&path, layout, dir.path().join("lock"));
    let daily = Directive::site_backup(
        DirectiveKind::DailyBackup,
        &DomainName::new("example.com").unwrap(),
    )
    .unwrap();

    assert!(registry.add(&daily).unwrap());
    assert!(!registry.add(&daily).unwrap());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "0 2 * * * root rsync -a --delete /apps/sites/example.com/ /backup/daily/example.com/\n"
    );

    assert_eq!(registry.remove(&daily).unwrap(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}
