use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use env_logger::Env;
use log::info;

use keyscad::connect::ConnectorKind;
use keyscad::layout::{Board, BoardLayout, close_key_pairs};

/// Generates an OpenSCAD keyboard case from a TOML board layout
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board layout (`.toml`)
    layout: PathBuf,

    /// Name of a `.scad` file to write; defaults to the layout name
    #[clap(short, long)]
    out: Option<PathBuf>,

    /// Show keycaps on every switch
    #[clap(long)]
    caps: bool,

    /// Leave out webbing between keys
    #[clap(long)]
    no_connectors: bool,

    /// Connector solid; overrides the layout's choice
    #[clap(
        long,
        value_parser = PossibleValuesParser::new(ConnectorKind::ALL.map(ConnectorKind::name))
            .try_map(|s| s.parse::<ConnectorKind>())
    )]
    connector: Option<ConnectorKind>,

    /// Leave out the enclosure wall
    #[clap(long)]
    no_walls: bool,

    /// Add ground posts and a raft under the keys
    #[clap(long)]
    supports: bool,

    /// Show the layout's reference model
    #[clap(long)]
    reference: bool,

    /// Log every pair of keys closer than this many mm
    #[clap(long, value_name = "MM", num_args = 0..=1, default_missing_value = "20")]
    report: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.layout)
        .with_context(|| format!("failed to read {}", args.layout.display()))?;
    let layout = BoardLayout::from_toml_str(&text)
        .with_context(|| format!("failed to parse {}", args.layout.display()))?;

    let mut options = layout.options;
    options.show_caps |= args.caps;
    options.include_connectors &= !args.no_connectors;
    options.include_walls &= !args.no_walls;
    options.ground_supports |= args.supports;
    options.show_reference |= args.reference;
    if let Some(connector) = args.connector {
        options.connector = connector;
    }

    let start = Instant::now();
    let board = Board::resolve(&layout)?;
    if let Some(limit) = args.report {
        for pair in close_key_pairs(&board, limit) {
            info!("{} -> {}: {:.1} mm", pair.first, pair.second, pair.distance);
        }
    }
    let scene = board.assemble(&layout, &options)?;
    info!("built scene in {:?}", start.elapsed());

    let out = args.out.unwrap_or_else(|| args.layout.with_extension("scad"));
    scene.write_to_file(&out)?;
    Ok(())
}
