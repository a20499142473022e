use std::{fs::File, path::PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn, Level};

mod index;
mod render;
mod search;
mod shell;
mod sources;

use index::{normalize, normalize_word, PrefixIndex};
use render::{Renderer, Statistics};
use search::{execute_search, SearchArgs};
use shell::{execute_shell, ShellArgs};
use sources::{load_index, FileWords, SeedWords, TextWords, WordSource};

/// Prefix search over an in-memory dictionary.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Look up words by prefix in an in-memory trie dictionary."
)]
struct Cli {
    #[command(flatten)]
    options: Options,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (the default)
    Shell(ShellArgs),
    /// Run a single prefix query and print the matches
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct Options {
    /// Additional file of whitespace separated words to index. May be repeated.
    #[arg(short, long = "words-file", global = true)]
    words_files: Vec<PathBuf>,
    /// Don't load the built-in seed dictionary.
    #[arg(long, global = true)]
    no_seed: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Where log output is written.
    #[arg(long, global = true, default_value = "trie-suggest.log")]
    log_file: PathBuf,
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Options {
    /// The word sources to build the index from, in load order.
    pub fn sources(&self) -> Vec<Box<dyn WordSource>> {
        let mut sources: Vec<Box<dyn WordSource>> = Vec::new();
        if !self.no_seed {
            sources.push(Box::new(SeedWords));
        }
        for path in &self.words_files {
            sources.push(Box::new(FileWords { path: path.clone() }));
        }
        sources
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file = File::create(&cli.options.log_file).with_context(|| {
        format!(
            "failed to create log file {}",
            cli.options.log_file.display()
        )
    })?;
    let level = if cli.options.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_max_level(level)
        .init();

    debug!("Parsed arguments: {:?}", cli);

    match cli.command {
        Some(Command::Search(args)) => execute_search(args, &cli.options).await,
        Some(Command::Shell(args)) => execute_shell(args, &cli.options).await,
        None => execute_shell(ShellArgs::default(), &cli.options).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_sources() {
        let cli = Cli::parse_from(["trie-suggest"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.options.sources().len(), 1);
    }

    #[test]
    fn test_search_with_global_options() {
        let cli = Cli::parse_from([
            "trie-suggest",
            "search",
            "ap",
            "--json",
            "--no-seed",
            "-w",
            "a.txt",
            "--words-file",
            "b.txt",
        ]);
        assert!(matches!(cli.command, Some(Command::Search(_))));
        assert!(cli.options.no_seed);

        let names: Vec<String> = cli.options.sources().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["word file a.txt", "word file b.txt"]);
    }
}
