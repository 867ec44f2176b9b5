use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use family_layout::{BoxMetrics, FamilyTreeLayout, LayoutEngine, TreeLayout};
use kinship::{resolve, FamilyDocument, FamilyGraph, PersonId, RenderNode};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Desktop,
    Mobile,
}

impl Preset {
    fn engine(self) -> (FamilyTreeLayout, BoxMetrics) {
        match self {
            Preset::Desktop => (FamilyTreeLayout::desktop(), BoxMetrics::desktop()),
            Preset::Mobile => (FamilyTreeLayout::mobile(), BoxMetrics::mobile()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Label a family around one person and lay it out as a tree
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Family document in JSON
    input: PathBuf,

    /// Person to center the tree on, defaults to the document focus
    #[arg(short, long)]
    focus: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Preset::Desktop)]
    preset: Preset,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Serialize)]
struct Output<'a> {
    focus: &'a PersonId,
    nodes: &'a [RenderNode],
    layout: &'a TreeLayout,
}

fn print_text(nodes: &[RenderNode], layout: &TreeLayout) {
    let mut generation = None;
    for node in nodes {
        if generation != Some(node.generation) {
            generation = Some(node.generation);
            println!("Generation {:+}", node.generation);
        }
        println!("  {:<32} {}", node.person.full_name(), node.label());
    }

    println!();
    for b in &layout.boxes {
        println!(
            "{:<24} x={:>9.1} y={:>9.1} w={:>6.1}",
            b.key, b.position.x, b.position.y, b.size.x
        );
    }
    for edge in &layout.edges {
        println!("{} -> {} ({:?})", edge.from, edge.to, edge.anchor);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let document = FamilyDocument::load(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let Some(focus) = args
        .focus
        .map(PersonId::from)
        .or_else(|| document.focus_id.clone())
    else {
        bail!("No focus given and the document does not define one");
    };

    let graph = FamilyGraph::new(document.people());
    debug!("Loaded {} people", graph.len());

    let nodes = resolve(&graph, &focus);
    if nodes.is_empty() {
        bail!("Cannot find person {focus}");
    }

    let (engine, metrics) = args.preset.engine();
    let layout = engine.layout(&nodes, &graph, &metrics);
    info!(
        "Laid out {} people in {} boxes around {focus}",
        nodes.len(),
        layout.boxes.len()
    );

    match args.format {
        Format::Json => {
            let output = Output {
                focus: &focus,
                nodes: &nodes,
                layout: &layout,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => print_text(&nodes, &layout),
    }

    Ok(())
}
