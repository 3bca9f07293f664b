//! Module manager: bind snippets into a site's block with `import` lines

use crate::domain::entities::FragmentKey;
use crate::domain::services::{directive_arguments, insert_line, remove_line, templates, BlockError};
use crate::domain::value_objects::{DomainName, ModuleName};
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::{FragmentStore, ModuleLibrary};

use super::coordinator::{Coordinator, Mutation};
use super::outcome::Outcome;

pub struct ModuleManager<'a> {
    fragments: &'a FragmentStore,
    library: &'a ModuleLibrary,
    coordinator: Coordinator<'a>,
}

impl<'a> ModuleManager<'a> {
    pub fn new(
        fragments: &'a FragmentStore,
        library: &'a ModuleLibrary,
        coordinator: Coordinator<'a>,
    ) -> Self {
        Self {
            fragments,
            library,
            coordinator,
        }
    }

    /// Insert `import <module>` as the first line of the site's block
    pub fn enable(&self, module: &str, domain: &str) -> PanelResult<Outcome> {
        let module = ModuleName::new(module)?;
        let key = FragmentKey::site(DomainName::new(domain)?)?;
        if !self.library.exists(&module) {
            return Err(PanelError::NotFound {
                entity: "module",
                name: module.to_string(),
            });
        }

        let line = templates::import_line(module.as_str());
        let document = self.fragments.document(&key);
        let applied = self.coordinator.run(&document, |current| {
            let text = current.ok_or_else(|| site_not_found(&key))?;
            let edit = insert_line(text, key.anchor(), &line).map_err(|e| match e {
                BlockError::AnchorNotFound => PanelError::AnchorNotFound {
                    anchor: key.anchor().to_string(),
                    path: self.fragments.path_for(&key),
                },
                BlockError::Malformed(reason) => PanelError::MalformedBlock {
                    anchor: key.anchor().to_string(),
                    reason,
                },
            })?;
            Ok(if edit.changed {
                Mutation::Write(edit.text)
            } else {
                Mutation::Unchanged
            })
        })?;

        Ok(applied.into_outcome(
            format!("module {} enabled for {}", module, key.domain()),
            format!("module {} already enabled for {}", module, key.domain()),
        ))
    }

    /// Drop every `import <module>` line from the site's fragment
    pub fn disable(&self, module: &str, domain: &str) -> PanelResult<Outcome> {
        let module = ModuleName::new(module)?;
        let key = FragmentKey::site(DomainName::new(domain)?)?;

        let line = templates::import_line(module.as_str());
        let applied = self.coordinator.run(&self.fragments.document(&key), |current| {
            let text = current.ok_or_else(|| site_not_found(&key))?;
            let edit = remove_line(text, &line);
            Ok(if edit.changed {
                Mutation::Write(edit.text)
            } else {
                Mutation::Unchanged
            })
        })?;

        Ok(applied.into_outcome(
            format!("module {} disabled for {}", module, key.domain()),
            format!("module {} was not enabled for {}", module, key.domain()),
        ))
    }

    /// Modules imported by a site, in file order
    pub fn list(&self, domain: &str) -> PanelResult<Vec<String>> {
        let key = FragmentKey::site(DomainName::new(domain)?)?;
        let text = self.fragments.read(&key)?;
        Ok(directive_arguments(&text, "import"))
    }

    /// Snippets present in the module directory
    pub fn available(&self) -> PanelResult<Vec<String>> {
        self.library.list()
    }
}

fn site_not_found(key: &FragmentKey) -> PanelError {
    PanelError::NotFound {
        entity: "site",
        name: key.domain().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeService;
    use crate::error::ResultKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    const SITE: &str = "example.com {\n\troot * /apps/sites/example.com\n\tfile_server\n}\n";

    struct Env {
        dir: TempDir,
        store: FragmentStore,
        library: ModuleLibrary,
    }

    fn env() -> Env {
        let dir = tempdir().unwrap();
        let store = FragmentStore::new(dir.path().join("sites.d"));
        let library = ModuleLibrary::new(dir.path().join("module.d"));
        fs::create_dir_all(store.dir()).unwrap();
        fs::create_dir_all(library.dir()).unwrap();
        fs::write(store.dir().join("example.com.conf"), SITE).unwrap();
        for name in ["security", "spa"] {
            fs::write(library.dir().join(name), format!("({}) {{\n}}\n", name)).unwrap();
        }
        Env {
            dir,
            store,
            library,
        }
    }

    impl Env {
        fn locks(&self) -> PathBuf {
            self.dir.path().join("locks")
        }
        fn site(&self) -> String {
            fs::read_to_string(self.store.dir().join("example.com.conf")).unwrap()
        }
    }

    #[test]
    fn enable_inserts_first_body_line_once() {
        let env = env();
        let service = FakeService::accepting();
        let locks = env.locks();
        let modules = ModuleManager::new(&env.store, &env.library, Coordinator::new(&service, &locks));

        modules.enable("security", "example.com").unwrap();
        let once = env.site();
        assert_eq!(
            once,
            "example.com {\n\timport security\n\troot * /apps/sites/example.com\n\tfile_server\n}\n"
        );

        let outcome = modules.enable("security", "example.com").unwrap();
        assert!(outcome.message.contains("already enabled"));
        assert_eq!(env.site(), once);
        assert_eq!(service.reloads.get(), 1);
    }

    #[test]
    fn disable_restores_original() {
        let env = env();
        let service = FakeService::accepting();
        let locks = env.locks();
        let modules = ModuleManager::new(&env.store, &env.library, Coordinator::new(&service, &locks));

        modules.enable("spa", "example.com").unwrap();
        modules.disable("spa", "example.com").unwrap();
        assert_eq!(env.site(), SITE);

        let outcome = modules.disable("spa", "example.com").unwrap();
        assert!(outcome.message.contains("was not enabled"));
    }

    #[test]
    fn unknown_module_is_not_found() {
        let env = env();
        let service = FakeService::accepting();
        let locks = env.locks();
        let modules = ModuleManager::new(&env.store, &env.library, Coordinator::new(&service, &locks));

        let err = modules.enable("cors", "example.com").unwrap_err();
        assert!(matches!(err, PanelError::NotFound { entity: "module", .. }));
    }

    #[test]
    fn missing_site_is_not_found() {
        let env = env();
        let service = FakeService::accepting();
        let locks = env.locks();
        let modules = ModuleManager::new(&env.store, &env.library, Coordinator::new(&service, &locks));

        let err = modules.enable("spa", "other.com").unwrap_err();
        assert!(matches!(err, PanelError::NotFound { entity: "site", .. }));
        assert!(!env.store.dir().join("other.com.conf").exists());
    }

    #[test]
    fn fragment_without_anchor_block_is_reported() {
        let env = env();
        fs::write(env.store.dir().join("example.com.conf"), "www.example.com {\n}\n").unwrap();
        let service = FakeService::accepting();
        let locks = env.locks();
        let modules = ModuleManager::new(&env.store, &env.library, Coordinator::new(&service, &locks));

        let err = modules.enable("spa", "example.com").unwrap_err();
        assert!(matches!(err, PanelError::AnchorNotFound { .. }));
        assert_eq!(env.site(), "www.example.com {\n}\n");
    }

    #[test]
    fn list_reports_imports() {
        let env = env();
        let service = FakeService::accepting();
        let locks = env.locks();
        let modules = ModuleManager::new(&env.store, &env.library, Coordinator::new(&service, &locks));

        modules.enable("spa", "example.com").unwrap();
        modules.enable("security", "example.com").unwrap();
        assert_eq!(modules.list("example.com").unwrap(), vec!["security", "spa"]);
        assert_eq!(modules.available().unwrap(), vec!["security", "spa"]);
        assert_eq!(
            modules.list("missing.com").unwrap_err().kind(),
            ResultKind::NotFound
        );
    }
}
