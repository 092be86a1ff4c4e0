use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::Input;

use textseek::{ConsoleReporter, ScanError};

const BANNER: &str = r"
  __            __                   __
 / /____  _  __/ /_________  ___  / /__
/ __/ _ \| |/_/ __/ ___/ _ \/ _ \/ //_/
/ /_/  __/>  </ /_(__  )  __/  __/ ,<
\__/\___/_/|_|\__/____/\___/\___/_/|_|
";

#[derive(Parser)]
#[command(name = "textseek")]
#[command(author, version, about = "Search text files and PDFs under a directory for a word or phrase", long_about = None)]
struct Cli {
    /// Word or sentence to look for (prompted for if omitted)
    term: Option<String>,

    /// Directory to search (prompted for if omitted)
    path: Option<PathBuf>,

    /// Match case exactly
    #[arg(short, long)]
    case_sensitive: bool,

    /// Only match whole words
    #[arg(short, long)]
    whole_word: bool,

    /// Print each matching file once instead of every matching line
    #[arg(short = 'l', long)]
    files_with_matches: bool,

    /// File extension to search (can be specified multiple times, replaces the defaults)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Maximum directory depth to descend into
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<usize>,

    /// Disable colors and hyperlinks
    #[arg(long)]
    no_color: bool,

    /// Don't print the startup banner
    #[arg(long)]
    no_banner: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    if !use_color {
        colored::control::set_override(false);
    }

    if !cli.no_banner {
        println!("{}", BANNER.red().bold());
    }

    let term = match cli.term {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("Write the word/sentence you want to look for")
            .interact_text()
            .context("Failed to read search term")?,
    };

    let path = match cli.path {
        Some(p) => p,
        None => Input::<String>::new()
            .with_prompt("Enter the path to the directory where the files are located")
            .interact_text()
            .context("Failed to read directory path")?
            .trim()
            .into(),
    };

    log::debug!("term: {term:?}, root: {path:?}");

    let mut search = textseek::search()
        .root(&path)
        .term(term)
        .case_sensitive(cli.case_sensitive)
        .whole_word(cli.whole_word)
        .per_file(cli.files_with_matches)
        .reporter(ConsoleReporter::stdout(use_color));

    if !cli.extensions.is_empty() {
        search = search.extensions(&cli.extensions);
    }
    if let Some(depth) = cli.max_depth {
        search = search.max_depth(depth);
    }

    match search.run() {
        Ok(_) => Ok(()),
        Err(e @ ScanError::InvalidRoot(_)) => {
            Err(e).with_context(|| format!("Cannot search '{}'", path.display()))
        }
        Err(e) => Err(e).context("Invalid search"),
    }
}
