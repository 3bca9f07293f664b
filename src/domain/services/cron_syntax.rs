//! Offline check of a `cron.d` table
//!
//! Cron has no validator of its own, so the schedule file is checked here
//! before it is left in place.

/// Check every line of a system cron table; returns one message per bad line
pub fn check_cron_table(content: &str) -> Result<(), Vec<String>> {
    let problems: Vec<String> = content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| check_line(line).err().map(|e| format!("line {}: {}", i + 1, e)))
        .collect();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

fn check_line(line: &str) -> Result<(), String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || is_env_assignment(trimmed) {
        return Ok(());
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if let Some(first) = fields.first().filter(|f| f.starts_with('@')) {
        if !MACROS.contains(first) {
            return Err(format!("unknown schedule macro '{}'", first));
        }
        if fields.len() < 3 {
            return Err("expected '@macro user command'".to_string());
        }
        return Ok(());
    }

    if fields.len() < 7 {
        return Err(format!(
            "expected 5 time fields, a user and a command, found {} fields",
            fields.len()
        ));
    }
    for (field, name) in fields.iter().zip(FIELD_NAMES) {
        if !is_time_field(field) {
            return Err(format!("invalid {} field '{}'", name, field));
        }
    }
    Ok(())
}

const MACROS: &[&str] = &[
    "@reboot", "@yearly", "@annually", "@monthly", "@weekly", "@daily", "@midnight", "@hourly",
];

const FIELD_NAMES: [&str; 5] = ["minute", "hour", "day-of-month", "month", "day-of-week"];

fn is_env_assignment(line: &str) -> bool {
    match line.split_once('=') {
        Some((name, _)) => {
            let name = name.trim();
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Digits, `*`, ranges, steps, lists and three-letter names
fn is_time_field(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '/' | ',' | '-'))
}
