//! Output Rendering
//!
//! Every command ends in a [`Report`]: an operation [`Outcome`] or a listing.
//! Renderers write it as text (stdout for success, stderr for failure) or as
//! a single JSON document on stdout.

use std::io::{self, Write};

use serde::Serialize;

use crate::application::Outcome;
use crate::error::ResultKind;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// A named list of items, with a text line per item and the items as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub items: serde_json::Value,
}

impl Listing {
    pub fn of<T: Serialize>(title: &'static str, items: &[T], line: impl Fn(&T) -> String) -> Self {
        Self {
            title,
            lines: items.iter().map(line).collect(),
            items: serde_json::to_value(items).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Listing of plain strings
    pub fn strings(title: &'static str, items: Vec<String>) -> Self {
        let json = serde_json::Value::from(items.clone());
        Self {
            title,
            lines: items,
            items: json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Outcome(Outcome),
    Listing(Listing),
}

impl Report {
    pub fn exit_code(&self) -> i32 {
        match self {
            Report::Outcome(outcome) => outcome.exit_code(),
            Report::Listing(_) => 0,
        }
    }
}

impl From<Outcome> for Report {
    fn from(outcome: Outcome) -> Self {
        Report::Outcome(outcome)
    }
}

impl From<Listing> for Report {
    fn from(listing: Listing) -> Self {
        Report::Listing(listing)
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    warn: &'static str,
    bullet: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            warn: "!",
            bullet: "•",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warn: "[!]",
            bullet: "-",
        }
    }
}

/// Trait for rendering command reports
pub trait ReportRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<()>;
}

/// Text renderer for reports
pub struct TextRenderer {
    pub unicode: bool,
}

impl TextRenderer {
    fn render_outcome(
        &self,
        outcome: &Outcome,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        let icons = if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        };
        let failed = !outcome.is_success();
        let icon = match outcome.kind {
            ResultKind::Success => icons.check,
            ResultKind::Cancelled
            | ResultKind::DegradedReload
            | ResultKind::PartialSuccess => icons.warn,
            _ => icons.cross,
        };
        let sink: &mut dyn Write = if failed { err } else { out };

        writeln!(sink, "{} {}", icon, outcome.message)?;
        for detail in &outcome.details {
            for line in detail.lines() {
                writeln!(sink, "  {}", line)?;
            }
        }
        if let Some(diff) = &outcome.diff {
            writeln!(sink)?;
            write!(sink, "{}", diff)?;
        }
        Ok(())
    }

    fn render_listing(&self, listing: &Listing, out: &mut dyn Write) -> io::Result<()> {
        let bullet = if self.unicode {
            Icons::unicode().bullet
        } else {
            Icons::ascii().bullet
        };
        if listing.lines.is_empty() {
            return writeln!(out, "no {}", listing.title);
        }
        writeln!(out, "{} ({}):", listing.title, listing.lines.len())?;
        for line in &listing.lines {
            writeln!(out, "  {} {}", bullet, line)?;
        }
        Ok(())
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<()> {
        match report {
            Report::Outcome(outcome) => self.render_outcome(outcome, out, err),
            Report::Listing(listing) => self.render_listing(listing, out),
        }
    }
}

/// JSON renderer for reports
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write, _err: &mut dyn Write) -> io::Result<()> {
        let json = match report {
            Report::Outcome(outcome) => serde_json::to_value(outcome)?,
            Report::Listing(listing) => serde_json::json!({
                "kind": "success",
                "title": listing.title,
                "items": listing.items,
            }),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&json)?)
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
