//! quarry CLI - run a CSS selector against a JSON document tree
//!
//! Usage:
//!   quarry 'div > p' page.json        Print every match
//!   quarry 'div > p' < page.json      Read the tree from stdin
//!   quarry --count '.item' page.json  Print only the number of matches

mod output;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use quarry_dom::DomTree;
use quarry_select::Selector;

use output::Printer;

/// quarry - CSS selector queries over JSON document trees
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"TREE FORMAT:
    A node is {"tag": "div", "attrs": {"id": "main"}, "children": [...]},
    {"text": "..."} or {"comment": "..."}. The top level is a node or an
    array of nodes.

EXAMPLES:
    # Paragraphs directly inside a div
    quarry 'div > p' page.json

    # Inline tree
    quarry --json '[{"tag": "ul", "children": [{"tag": "li"}]}]' 'ul li'

    # Show which selector steps narrowed the result
    RUST_LOG=quarry=trace quarry 'nav a.current' page.json
"#)]
struct Cli {
    /// CSS selector to evaluate
    selector: String,

    /// JSON tree to query; read from stdin when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read the tree from this JSON string instead of a file
    #[arg(long, value_name = "JSON", conflicts_with = "file")]
    json: Option<String>,

    /// Print only the number of matches
    #[arg(short, long)]
    count: bool,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Log more (-v warnings and info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Parse first so a bad selector fails before any I/O
    let selector = Selector::parse(&cli.selector)?;
    let tree = load_tree(&cli)?;
    log::debug!("loaded {} nodes, evaluating `{selector}`", tree.len());

    let matches = selector.select(&tree, tree.root());

    if cli.count {
        println!("{}", matches.len());
        return Ok(());
    }

    let color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    };
    let printer = Printer::new(&tree, color);
    for node in matches {
        println!("{}", printer.describe(node));
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` raises the default from `error`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Load the tree from `--json`, the file argument, or stdin.
fn load_tree(cli: &Cli) -> Result<DomTree> {
    let source = if let Some(ref json) = cli.json {
        json.clone()
    } else if let Some(ref path) = cli.file {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        let mut buffer = String::new();
        let _ = io::stdin()
            .read_to_string(&mut buffer)
            .context("reading tree from stdin")?;
        buffer
    };

    DomTree::from_json_str(&source).context("loading document tree")
}
