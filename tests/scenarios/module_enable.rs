//! Enabling a module on a freshly added site.

use std::time::Duration;

use tempfile::tempdir;

use webpanel::application::{Coordinator, ModuleManager};
use webpanel::domain::entities::FragmentKey;
use webpanel::domain::value_objects::DomainName;
use webpanel::infrastructure::{CommandSpec, FragmentStore, ModuleLibrary, WebServer};

use crate::common::{EXAMPLE_SITE, SECURITY_SNIPPET};

fn accepting_server() -> WebServer {
    let ok = || CommandSpec::new(vec!["true".to_string()], Duration::from_secs(5));
    WebServer::new("caddy", ok(), ok(), ok())
}

#[test]
fn scenario_enable_security_module_twice() {
    let dir = tempdir().unwrap();
    let store = FragmentStore::new(dir.path().join("sites.d"));
    let library = ModuleLibrary::new(dir.path().join("module.d"));
    let locks = dir.path().join("lock");
    std::fs::create_dir_all(library.dir()).unwrap();
    std::fs::write(library.dir().join("security"), SECURITY_SNIPPET).unwrap();

    let key = FragmentKey::site(DomainName::new("example.com").unwrap()).unwrap();
    store.write(&key, EXAMPLE_SITE).unwrap();

    let server = accepting_server();
    let modules = ModuleManager::new(&store, &library, Coordinator::new(&server, &locks));

    modules.enable("security", "example.com").unwrap();
    let first = store.read(&key).unwrap();
    modules.enable("security", "example.com").unwrap();
    let second = store.read(&key).unwrap();

    assert_eq!(
        first,
        "example.com {\n\timport security\n\troot * /apps/sites/example.com\n\tfile_server\n}\n"
    );
    assert_eq!(first, second);
}
