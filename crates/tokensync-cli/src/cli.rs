//! Command-line surface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokensync::host::{self, HostRequest, HostResponse};
use tokensync::store::MemoryStore;
use tokensync::{
    create_local_variables, project, AliasResolver, SyncSettings, ThemeDescriptor, TokenGraph,
    TokenSets,
};
use tracing::{debug, info};

use crate::load::{read_document, read_store, write_store};
use crate::output::{render_resolved, render_sync, OutputMode, ResolvedLine};

/// Resolve design tokens and sync them into themed variables.
#[derive(Parser, Debug)]
#[command(name = "tokensync", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output mode: auto, term, text, or json.
    #[arg(long, value_enum, default_value_t = OutputMode::Auto, global = true)]
    output: OutputMode,

    /// Log more (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Materialize themes as variables in a store snapshot.
    Sync(SyncArgs),
    /// Print the resolved value of every token.
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
struct SyncArgs {
    /// Token sets: a map of set name to token list (JSON or YAML).
    #[arg(long)]
    tokens: PathBuf,

    /// Theme descriptors: a list of themes (JSON or YAML).
    #[arg(long)]
    themes: PathBuf,

    /// Sync settings (JSON or YAML). Flags below override it.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Store snapshot to update. Created if missing.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Only update what exists and do not write the store back.
    #[arg(long)]
    dry_run: bool,

    /// Keep aliased values as literals.
    #[arg(long)]
    no_link: bool,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Token sets: a map of set name to token list (JSON or YAML).
    #[arg(long)]
    tokens: PathBuf,

    /// Theme descriptors, used with `--theme`.
    #[arg(long, requires = "theme")]
    themes: Option<PathBuf>,

    /// Resolve the view of this theme (by id or name) instead of all sets.
    #[arg(long, requires = "themes")]
    theme: Option<String>,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let rendered = match self.command {
            Command::Sync(args) => sync(args, self.output).await?,
            Command::Resolve(args) => resolve(args, self.output)?,
        };
        print!("{}", rendered);
        Ok(())
    }
}

async fn sync(args: SyncArgs, mode: OutputMode) -> Result<String> {
    let sets: TokenSets = read_document(&args.tokens)?;
    let themes: Vec<ThemeDescriptor> = read_document(&args.themes)?;
    let mut settings = match &args.settings {
        Some(path) => read_document(path)?,
        None => SyncSettings::default(),
    };
    if args.dry_run {
        settings.should_create = false;
    }
    if args.no_link {
        settings.link_references = false;
    }
    let mut store = match &args.store {
        Some(path) => read_store(path)?,
        None => MemoryStore::new(),
    };
    debug!(?settings, sets = sets.len(), themes = themes.len(), "inputs loaded");

    // This process plays the host: it owns the theme definitions.
    let (channel, endpoint) = host::channel(1);
    let host = tokio::spawn(endpoint.serve(move |request| match request {
        HostRequest::GetThemeInfo => Ok(HostResponse::ThemeInfo {
            themes: themes.clone(),
        }),
    }));

    let outcome = create_local_variables(&channel, &mut store, &sets, settings)
        .await
        .context("synchronization aborted")?;
    drop(channel);
    host.await.context("host task failed")?;

    match &args.store {
        Some(path) if !args.dry_run => {
            write_store(path, &store)?;
            info!(path = %path.display(), "store written");
        }
        _ => {}
    }

    render_sync(&outcome, mode)
}

fn resolve(args: ResolveArgs, mode: OutputMode) -> Result<String> {
    let sets: TokenSets = read_document(&args.tokens)?;

    let (effective, graph) = match (&args.themes, &args.theme) {
        (Some(path), Some(wanted)) => {
            let themes: Vec<ThemeDescriptor> = read_document(path)?;
            let theme = themes
                .iter()
                .find(|t| t.id == *wanted || t.name == *wanted)
                .with_context(|| format!("no theme '{}' in {}", wanted, path.display()))?;
            let projected = project(theme, &sets);
            (projected.effective, projected.graph)
        }
        _ => {
            let graph = TokenGraph::from_sets(sets.iter());
            (graph.clone(), graph)
        }
    };

    let resolver = AliasResolver::new(&graph);
    let lines: Vec<ResolvedLine> = effective
        .iter()
        .map(|token| ResolvedLine {
            name: token.name.clone(),
            outcome: resolver.resolve_token(token).map(|r| r.value),
        })
        .collect();

    render_resolved(&lines, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync_flags() {
        let cli = Cli::try_parse_from([
            "tokensync",
            "sync",
            "--tokens",
            "tokens.json",
            "--themes",
            "themes.yaml",
            "--dry-run",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Sync(args) => {
                assert!(args.dry_run);
                assert!(!args.no_link);
                assert_eq!(args.themes, PathBuf::from("themes.yaml"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_resolve_theme_needs_themes_file() {
        let result = Cli::try_parse_from([
            "tokensync",
            "resolve",
            "--tokens",
            "tokens.json",
            "--theme",
            "dark",
        ]);
        assert!(result.is_err());
    }
}
