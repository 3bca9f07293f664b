//! Property tests for the shared schedule file.

use std::path::PathBuf;

use proptest::prelude::*;

use webpanel::domain::entities::{BackupLayout, Directive, DirectiveKind};
use webpanel::domain::services::{append_directive, scheduled_lines, strip_directive};
use webpanel::domain::value_objects::{DbIdentifier, DomainName};

fn layout() -> BackupLayout {
    BackupLayout {
        sites_root: PathBuf::from("/apps/sites"),
        daily_dir: PathBuf::from("/backup/daily"),
        weekly_dir: PathBuf::from("/backup/weekly"),
        dump_command: "mysqldump -u root".to_string(),
    }
}

fn directive() -> impl Strategy<Value = Directive> {
    let site = (
        prop_oneof![Just(DirectiveKind::DailyBackup), Just(DirectiveKind::WeeklyBackup)],
        "[a-z][a-z0-9-]{0,10}\\.(com|net)",
    )
        .prop_map(|(kind, domain)| {
            Directive::site_backup(kind, &DomainName::new(domain).unwrap()).unwrap()
        });
    let database = "[a-z_][a-z0-9_]{0,12}"
        .prop_map(|name| Directive::database_backup(&DbIdentifier::new(name).unwrap()));
    prop_oneof![site, database]
}

fn matching(content: &str, layout: &BackupLayout, directive: &Directive) -> usize {
    let pattern = layout.pattern(directive);
    scheduled_lines(content)
        .into_iter()
        .filter(|line| pattern.matches(line))
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Adding a directive twice leaves exactly one matching line.
    #[test]
    fn property_add_is_idempotent(directive in directive()) {
        let layout = layout();
        let line = layout.render(&directive);

        let once = append_directive("", &line);
        let twice = append_directive(&once.text, &line);

        prop_assert!(!twice.changed);
        prop_assert_eq!(matching(&twice.text, &layout, &directive), 1);
    }

    /// PROPERTY: Removal strips every duplicate of the directive and nothing else.
    #[test]
    fn property_remove_strips_all_duplicates(
        directive in directive(),
        other in directive(),
        copies in 1usize..4,
    ) {
        let layout = layout();
        prop_assume!(layout.render(&directive) != layout.render(&other));
        let mut content = format!("{}\n", layout.render(&other));
        for _ in 0..copies {
            content.push_str(&layout.render(&directive));
            content.push('\n');
        }

        let (edit, removed) = strip_directive(&content, &layout.pattern(&directive));

        prop_assert_eq!(removed, copies);
        prop_assert_eq!(matching(&edit.text, &layout, &directive), 0);
        prop_assert_eq!(matching(&edit.text, &layout, &other), 1);
    }
}
