//! An unbalanced fragment is rolled back and never reloaded.

use std::time::Duration;

use tempfile::tempdir;

use webpanel::application::{Coordinator, Mutation};
use webpanel::domain::entities::FragmentKey;
use webpanel::domain::value_objects::DomainName;
use webpanel::error::ResultKind;
use webpanel::infrastructure::{CommandSpec, FragmentStore, WebServer};

use crate::common::EXAMPLE_SITE;

fn sh(script: String) -> CommandSpec {
    CommandSpec::new(
        vec!["sh".to_string(), "-c".to_string(), script],
        Duration::from_secs(5),
    )
}

#[test]
fn scenario_unbalanced_fragment_is_restored() {
    let dir = tempdir().unwrap();
    let sites = dir.path().join("sites.d");
    let marker = dir.path().join("reloaded");
    let store = FragmentStore::new(&sites);
    let key = FragmentKey::site(DomainName::new("example.com").unwrap()).unwrap();
    store.write(&key, EXAMPLE_SITE).unwrap();

    let balanced = format!(
        "open=$(cat {d}/*.conf | tr -cd '{{' | wc -c); close=$(cat {d}/*.conf | tr -cd '}}' | wc -c); \
         [ \"$open\" -eq \"$close\" ] || {{ echo 'unbalanced braces' >&2; exit 1; }}",
        d = sites.display()
    );
    let server = WebServer::new(
        "caddy",
        sh(balanced),
        sh(format!("touch {}", marker.display())),
        sh("true".to_string()),
    );
    let locks = dir.path().join("lock");
    let coordinator = Coordinator::new(&server, &locks);

    let err = coordinator
        .run(&store.document(&key), |current| {
            let text = current.unwrap_or_default().replace("\n}\n", "\n");
            Ok(Mutation::Write(text))
        })
        .unwrap_err();

    assert_eq!(err.kind(), ResultKind::ValidationError);
    assert!(err.to_string().contains("unbalanced braces"));
    assert_eq!(store.read(&key).unwrap(), EXAMPLE_SITE);
    assert!(!marker.exists(), "reload must not run after a rejected change");
}
