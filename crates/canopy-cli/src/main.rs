//! Canopy CLI - render treemaps to SVG.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::unwrap_used,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

use canopy::{
    definition, Container, Event, LayoutTree, Point, QueryResponse, Row, TreemapChart, VisConfig,
};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "canopy")]
#[command(about = "Hierarchical treemap chart CLI")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render rows to an SVG document
    Render {
        /// JSON array of rows
        #[arg(long)]
        rows: PathBuf,

        /// JSON query descriptor
        #[arg(long)]
        query: PathBuf,

        /// Chart settings (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Container width in pixels
        #[arg(long, default_value = "800")]
        width: f64,

        /// Container height in pixels
        #[arg(long, default_value = "600")]
        height: f64,

        /// Hover the node under this container point, as `x,y`
        #[arg(long, value_parser = parse_point)]
        hover: Option<Point>,

        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the option schema as JSON
    Options,

    /// Print the laid-out tree
    Tree {
        /// JSON array of rows
        #[arg(long)]
        rows: PathBuf,

        /// JSON query descriptor
        #[arg(long)]
        query: PathBuf,

        /// Container width in pixels
        #[arg(long, default_value = "800")]
        width: f64,

        /// Container height in pixels
        #[arg(long, default_value = "600")]
        height: f64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            rows,
            query,
            config,
            width,
            height,
            hover,
            output,
        } => render(
            &rows,
            &query,
            config.as_deref(),
            Container::new(width, height),
            hover,
            output.as_deref(),
        ),
        Commands::Options => print_options(),
        Commands::Tree {
            rows,
            query,
            width,
            height,
        } => print_tree(&rows, &query, Container::new(width, height)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: tracing subscriber already installed");
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok(Point::new(x, y))
}

fn load_rows(path: &Path) -> CliResult<Vec<Row>> {
    let text = read(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn load_query(path: &Path) -> CliResult<QueryResponse> {
    let text = read(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn load_config(path: Option<&Path>) -> CliResult<VisConfig> {
    let Some(path) = path else {
        return Ok(VisConfig::default());
    };
    let text = read(path)?;
    parse_config(&text, path)
}

fn parse_config(text: &str, path: &Path) -> CliResult<VisConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => Ok(serde_yaml_ng::from_str(text)?),
        _ => Ok(serde_json::from_str(text)?),
    }
}

fn read(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path.display(), e).into())
}

fn render(
    rows: &Path,
    query: &Path,
    config: Option<&Path>,
    container: Container,
    hover: Option<Point>,
    output: Option<&Path>,
) -> CliResult<()> {
    let rows = load_rows(rows)?;
    let query = load_query(query)?;
    let config = load_config(config)?;

    let mut chart = TreemapChart::create(container, config.clone());
    chart.update(&rows, container, &config, &query)?;
    if let Some(position) = hover {
        chart.handle_event(&Event::PointerMove { position });
        if chart.hover().is_idle() {
            tracing::warn!(x = position.x, y = position.y, "no node under hover point");
        }
    }

    let svg = chart
        .scene()
        .map(canopy::Scene::to_svg)
        .ok_or("nothing rendered")?;
    match output {
        Some(path) => {
            fs::write(path, svg)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
    Ok(())
}

fn print_options() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&definition())?);
    Ok(())
}

fn print_tree(rows: &Path, query: &Path, container: Container) -> CliResult<()> {
    let rows = load_rows(rows)?;
    let query = load_query(query)?;
    let rendered = canopy::render(&rows, container, &VisConfig::default(), &query)?;
    print!("{}", describe_tree(&rendered.layout, &rendered.formatter));
    Ok(())
}

fn describe_tree(tree: &LayoutTree, formatter: &canopy::ValueFormatter) -> String {
    let mut out = String::new();
    let mut stack = vec![LayoutTree::ROOT];
    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        let r = node.rect;
        let _ = writeln!(
            out,
            "{:indent$}{} = {} [{}, {}, {}, {}]",
            "",
            node.name,
            formatter.format(node.value),
            r.x0,
            r.y0,
            r.x1,
            r.y1,
            indent = node.depth * 2
        );
        stack.extend(node.children.iter().rev());
    }
    out
}
