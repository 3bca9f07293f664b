//! Text templates for generated configuration

use std::path::Path;

use crate::domain::value_objects::{DomainName, ProxyTarget, VersionTag};

/// Fragment serving static files for a site
pub fn site_fragment(domain: &DomainName, root: &Path) -> String {
    format!("{} {{\n\troot * {}\n\tfile_server\n}}\n", domain, root.display())
}

/// Fragment forwarding a domain to an upstream
pub fn proxy_fragment(domain: &DomainName, target: &ProxyTarget) -> String {
    format!("{} {{\n\treverse_proxy {}\n}}\n", domain, target)
}

/// Upstream of a proxy fragment, if it has a `reverse_proxy` line
pub fn proxy_upstream(fragment: &str) -> Option<String> {
    super::block_mutator::directive_arguments(fragment, "reverse_proxy")
        .into_iter()
        .next()
}

/// Module line that binds a snippet into a site block
pub fn import_line(module: &str) -> String {
    format!("import {}", module)
}

/// Module name of the snippet for a PHP-FPM version
pub fn php_module_name(version: &VersionTag) -> String {
    format!("php{}", version)
}

/// Snippet routing PHP requests to the version's FPM socket
pub fn php_module(version: &VersionTag) -> String {
    format!(
        "(php{v}) {{\n\tphp_fastcgi unix//run/php/php{v}-fpm.sock\n}}\n",
        v = version
    )
}

/// Top-level Caddyfile pulling in every snippet, then every site fragment
///
/// Snippets must be defined before a site block imports them.
pub fn main_caddyfile(admin_email: &str, modules_glob: &str, sites_glob: &str) -> String {
    format!(
        "{{\n\t# global options\n\tadmin off\n\temail {}\n}}\n\n# module snippets\nimport {}\n\n# site fragments\nimport {}\n",
        admin_email, modules_glob, sites_glob
    )
}

/// Snippets installed by `setup`, as `(name, content)`
pub fn default_modules() -> Vec<(&'static str, &'static str)> {
    vec![
        ("spa", SPA),
        ("security", SECURITY),
        ("ratelimit", RATELIMIT),
        ("compression", COMPRESSION),
        ("cache-headers", CACHE_HEADERS),
        ("local-access", LOCAL_ACCESS),
    ]
}

const SPA: &str = r#"(spa) {
	@spa {
		not path *.php
		not path /api/*
		not path *.js
		not path *.css
		not path *.png
		not path *.jpg
		not path *.jpeg
		not path *.svg
		not path *.gif
		not path *.ico
		not path *.woff
		not path *.woff2
		not path *.ttf
		not path *.eot
		file {
			try_files {path} /index.html
		}
	}
	rewrite @spa /index.html
}
"#;

const SECURITY: &str = r#"(security) {
	header {
		X-XSS-Protection "1; mode=block"
		X-Content-Type-Options "nosniff"
		X-Frame-Options "SAMEORIGIN"
		Referrer-Policy "strict-origin-when-cross-origin"
		-Server
		-X-Powered-By
	}
}
"#;

const RATELIMIT: &str = r#"(ratelimit) {
	rate_limit {
		zone dynamic {
			key {remote_host}
			events 100
			window 10s
		}
	}
}
"#;

const COMPRESSION: &str = r#"(compression) {
	encode gzip zstd
}
"#;

const CACHE_HEADERS: &str = r#"(cache-headers) {
	@static {
		path *.css *.js *.png *.jpg *.jpeg *.gif *.ico *.svg *.woff *.woff2 *.ttf *.eot
	}
	header @static Cache-Control "public, max-age=31536000"
}
"#;

const LOCAL_ACCESS: &str = r#"(local-access) {
	@notLocal {
		not remote_ip 127.0.0.1 192.168.0.0/16 10.0.0.0/8 172.16.0.0/12
	}
	handle @notLocal {
		respond "Access denied" 403
	}
}
"#;
