//! Reusable fragment and registry content

/// Site fragment as `site add` writes it for `example.com` under `/apps/sites`
pub const EXAMPLE_SITE: &str = "example.com {\n\troot * /apps/sites/example.com\n\tfile_server\n}\n";

/// Snippet with a balanced block
pub const SECURITY_SNIPPET: &str = "(security) {\n\theader X-Frame-Options DENY\n}\n";
