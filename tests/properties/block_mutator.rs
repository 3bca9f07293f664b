//! Property tests for block edits on site fragments.

use proptest::prelude::*;

use webpanel::domain::services::{contains_line, find_block, insert_line, remove_line};

fn domain() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,12}\\.(com|org|example)"
}

fn module() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}"
}

fn body_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("file_server".to_string()),
        Just("encode gzip".to_string()),
        "[a-z_]{1,10} [a-z0-9/*.]{1,12}",
    ]
}

fn site(domain: &str, body: &[String]) -> String {
    let mut text = format!("{} {{\n", domain);
    for line in body {
        text.push('\t');
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("}\n");
    text
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Inserting an import line twice yields the text of inserting it once.
    #[test]
    fn property_insert_is_idempotent(
        domain in domain(),
        module in module(),
        body in proptest::collection::vec(body_line(), 0..6),
    ) {
        let text = site(&domain, &body);
        let line = format!("import {}", module);

        let once = insert_line(&text, &domain, &line).unwrap();
        let twice = insert_line(&once.text, &domain, &line).unwrap();

        prop_assert!(!twice.changed);
        prop_assert_eq!(&once.text, &twice.text);
        prop_assert!(contains_line(&once.text, &line));
    }

    /// PROPERTY: Removing an inserted line restores the original fragment.
    #[test]
    fn property_remove_undoes_insert(
        domain in domain(),
        module in module(),
        body in proptest::collection::vec(body_line(), 0..6),
    ) {
        let text = site(&domain, &body);
        let line = format!("import {}", module);
        prop_assume!(!contains_line(&text, &line));

        let inserted = insert_line(&text, &domain, &line).unwrap();
        let removed = remove_line(&inserted.text, &line);

        prop_assert_eq!(removed.text, text);
    }

    /// PROPERTY: Block lookup never panics on arbitrary input.
    #[test]
    fn property_find_block_never_panics(
        text in "(?s).{0,256}",
        anchor in "(?s).{0,32}",
    ) {
        let lines: Vec<&str> = text.lines().collect();
        let _ = find_block(&lines, &anchor);
        let _ = insert_line(&text, &anchor, "import x");
    }
}
