//! Rendering of run results.
//!
//! | Mode | Result |
//! |------|--------|
//! | `auto` | styled when the terminal supports it |
//! | `term` | always styled |
//! | `text` | never styled |
//! | `json` | the full result as pretty JSON |

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use console::Style;
use serde_json::json;
use tokensync::{AliasError, ResolvedValue, SyncOutcome, ThemeStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Auto,
    Term,
    Text,
    Json,
}

/// Styles for the text modes.
struct Palette {
    ok: Style,
    warn: Style,
    error: Style,
    dim: Style,
    name: Style,
}

impl Palette {
    fn for_mode(mode: OutputMode) -> Self {
        let styled = |style: Style| match mode {
            OutputMode::Term => style.force_styling(true),
            OutputMode::Text | OutputMode::Json => style.force_styling(false),
            OutputMode::Auto => style,
        };
        Self {
            ok: styled(Style::new().green()),
            warn: styled(Style::new().yellow()),
            error: styled(Style::new().red().bold()),
            dim: styled(Style::new().dim()),
            name: styled(Style::new().bold()),
        }
    }
}

/// Renders the outcome of a sync run.
pub fn render_sync(outcome: &SyncOutcome, mode: OutputMode) -> Result<String> {
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string_pretty(outcome)? + "\n");
    }

    let p = Palette::for_mode(mode);
    let mut out = String::new();

    for theme in &outcome.report.themes {
        let variables = outcome
            .variables
            .get(&theme.theme_id)
            .map_or(0, |info| info.variable_ids.len());
        let status = match &theme.status {
            ThemeStatus::Synced => p.ok.apply_to("synced".to_string()),
            ThemeStatus::Partial => p.warn.apply_to("partial".to_string()),
            ThemeStatus::Skipped { reason } => p.dim.apply_to(format!("skipped: {}", reason)),
            ThemeStatus::Failed { error } => p.error.apply_to(format!("failed: {}", error)),
        };
        writeln!(
            out,
            "{} {} {} {}",
            p.name.apply_to(&theme.theme_name),
            p.dim.apply_to(format!("({})", theme.theme_id)),
            status,
            p.dim.apply_to(format!("{} variables", variables)),
        )?;

        for broken in &theme.broken {
            writeln!(
                out,
                "  {} {} {}",
                p.error.apply_to(&broken.name),
                p.dim.apply_to(&broken.raw),
                broken.reason
            )?;
        }
        for malformed in &theme.malformed {
            writeln!(
                out,
                "  {} {} {}",
                p.warn.apply_to(&malformed.name),
                p.dim.apply_to(&malformed.raw),
                malformed.reason
            )?;
        }
        if !theme.unsupported.is_empty() {
            writeln!(
                out,
                "  {} {}",
                p.dim.apply_to("not materialized:"),
                theme.unsupported.join(", ")
            )?;
        }
        if !theme.not_created.is_empty() {
            writeln!(
                out,
                "  {} {}",
                p.warn.apply_to("missing variables:"),
                theme.not_created.join(", ")
            )?;
        }
    }

    let links = &outcome.report.links;
    writeln!(
        out,
        "links: {} linked, {} left literal",
        links.linked,
        links.left_literal.len()
    )?;
    for error in &links.errors {
        writeln!(out, "  {}", p.error.apply_to(error))?;
    }

    Ok(out)
}

/// One token of a `resolve` run.
pub struct ResolvedLine {
    pub name: String,
    pub outcome: Result<ResolvedValue, AliasError>,
}

/// Renders resolved tokens, one per line.
pub fn render_resolved(lines: &[ResolvedLine], mode: OutputMode) -> Result<String> {
    if mode == OutputMode::Json {
        let entries: Vec<_> = lines
            .iter()
            .map(|line| match &line.outcome {
                Ok(value) => json!({ "name": line.name, "value": value }),
                Err(err) => json!({ "name": line.name, "error": err }),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&entries)? + "\n");
    }

    let p = Palette::for_mode(mode);
    let mut out = String::new();
    for line in lines {
        match &line.outcome {
            Ok(value) => writeln!(out, "{} = {}", p.name.apply_to(&line.name), value)?,
            Err(err) => writeln!(
                out,
                "{} {}",
                p.name.apply_to(&line.name),
                p.error.apply_to(err)
            )?,
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokensync::store::MemoryStore;
    use tokensync::{synchronize, SyncSettings, ThemeDescriptor, Token, TokenSet, TokenSets};

    fn outcome() -> SyncOutcome {
        let sets = TokenSets::new().with(
            TokenSet::new("core")
                .add(Token::new("color.bg", "#ffffff"))
                .add(Token::new("color.fg", "{color.none}")),
        );
        let themes = [ThemeDescriptor::new("t1", "light").enable("core")];
        synchronize(&mut MemoryStore::new(), &themes, &sets, SyncSettings::default())
    }

    #[test]
    fn test_text_summary() {
        let text = render_sync(&outcome(), OutputMode::Text).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "light (t1) partial 1 variables");
        assert!(lines[1].starts_with("  color.fg {color.none} "));
        assert_eq!(lines[2], "links: 0 linked, 0 left literal");
    }

    #[test]
    fn test_text_summary_lists_malformed_tokens() {
        let sets = TokenSets::new().with(TokenSet::new("core").add(Token::from_json(
            "fontFamilies.body",
            &serde_json::json!(["Inter"]),
        )));
        let themes = [ThemeDescriptor::new("t1", "light").enable("core")];
        let outcome = synchronize(&mut MemoryStore::new(), &themes, &sets, SyncSettings::default());

        let text = render_sync(&outcome, OutputMode::Text).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "light (t1) partial 1 variables");
        assert!(lines[1].starts_with(r#"  fontFamilies.body ["Inter"] "#));
    }

    #[test]
    fn test_term_mode_is_styled() {
        let text = render_sync(&outcome(), OutputMode::Term).unwrap();
        assert!(text.contains("\x1b["));
    }

    #[test]
    fn test_json_summary() {
        let text = render_sync(&outcome(), OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["report"]["themes"][0]["status"]["state"], "partial");
        assert_eq!(value["report"]["themes"][0]["broken"][0]["name"], "color.fg");
    }

    #[test]
    fn test_resolved_lines() {
        let lines = [
            ResolvedLine {
                name: "spacing.sm".into(),
                outcome: Ok(ResolvedValue::Number(4.0)),
            },
            ResolvedLine {
                name: "spacing.md".into(),
                outcome: Err(AliasError::UnresolvedReference {
                    path: "spacing.x".into(),
                }),
            },
        ];

        let text = render_resolved(&lines, OutputMode::Text).unwrap();
        assert_eq!(
            text,
            "spacing.sm = 4\nspacing.md reference 'spacing.x' does not match any token\n"
        );

        let json: serde_json::Value =
            serde_json::from_str(&render_resolved(&lines, OutputMode::Json).unwrap()).unwrap();
        assert_eq!(json[0]["value"], 4.0);
        assert_eq!(json[1]["error"]["kind"], "unresolvedReference");
    }
}
