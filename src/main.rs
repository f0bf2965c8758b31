use anyhow::{Context, Result, bail};
use clap::Parser;
use phyloview::layout::{LayoutKind, LinkMode};
use phyloview::newick::NewickParser;
use phyloview::view::{Command, TreeView, ViewConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Lays out a Newick tree and prints the render model as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a file holding one Newick tree
    tree: PathBuf,

    /// radial, rectangular or unrooted
    #[arg(default_value = "radial")]
    layout: LayoutKind,

    /// variable (branch lengths) or constant (one unit per generation)
    #[arg(default_value = "variable")]
    links: LinkMode,

    /// JSON file with view settings; command line options take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reject ambiguous labels and invalid branch lengths
    #[arg(long)]
    strict: bool,

    /// Reroot at the node with this name before layout
    #[arg(long)]
    reroot: Option<String>,

    /// Highlight the clade of the node with this name
    #[arg(long)]
    highlight: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<ViewConfig>(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ViewConfig::default(),
    };
    let mut config = config.with_layout_kind(args.layout);
    config.layout.link_mode = args.links;

    let mut parser = NewickParser::new();
    if args.strict {
        parser = parser.with_strict_labels();
    }
    let newick = std::fs::read_to_string(&args.tree)
        .with_context(|| format!("reading tree {}", args.tree.display()))?;
    let tree = parser.parse_str(&newick)?;
    info!(
        nodes = tree.num_nodes(),
        leaves = tree.num_leaves(),
        "tree parsed"
    );

    let mut view = TreeView::new(tree, config);
    if let Some(name) = args.reroot {
        view.enqueue(Command::Reroot { name });
    }
    view.layout();
    for outcome in view.flush() {
        outcome?;
    }

    if let Some(name) = args.highlight {
        let Some(node) = view.tree().find_by_name(&name) else {
            bail!("no node named '{name}' to highlight");
        };
        view.set_highlight(node, true)?;
    }

    let model = view.render_model()?;
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
