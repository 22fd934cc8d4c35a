use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use firstlink_analysis::{Scene, SeedStyle, visualize};
use firstlink_core::config::FirstLinkConfig;
use firstlink_core::load::load_seeds;

use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `firstlink layout`.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Network file (delimited text with a header row).
    #[arg(value_name = "NETWORK")]
    pub network: PathBuf,

    /// File listing seed nodes to highlight.
    #[arg(long, value_name = "PATH")]
    pub seeds: Option<PathBuf>,

    /// Override the orbit RNG seed from config.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

/// Execute `firstlink layout`.
pub fn run_layout(args: &LayoutArgs, output: OutputMode, config: &FirstLinkConfig) -> Result<()> {
    let scene = build_scene(args, config)?;
    render_mode(output, &scene, render_text, render_pretty)
}

fn build_scene(args: &LayoutArgs, config: &FirstLinkConfig) -> Result<Scene> {
    let network = super::load_checked(&args.network, &config.input)?;

    let seeds = match &args.seeds {
        Some(path) => load_seeds(path, &config.input.seed_column)
            .with_context(|| format!("Failed to load seeds from {}", path.display()))?,
        None => HashSet::new(),
    };
    let seed_count = seeds.len();
    let style = SeedStyle::new(seeds, config.style.clone()).with_links(network.links);

    let rng_seed = args.seed.unwrap_or(config.layout.rng_seed);
    let mut rng = StdRng::seed_from_u64(rng_seed);

    let scene = visualize(network.graph, &style, &config.layout, &mut rng)?;
    info!(
        components = scene.components.len(),
        nodes = scene.node_count(),
        seeds = seed_count,
        rng_seed,
        "scene built"
    );
    Ok(scene)
}

fn render_text(scene: &Scene, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "component\tlabel\tx\ty\tsize\tshape\tcolor")?;
    for (i, component) in scene.components.iter().enumerate() {
        for node in &component.nodes {
            writeln!(
                w,
                "{}\t{}\t{:.4}\t{:.4}\t{}\t{}\t{}",
                i,
                node.label,
                node.position.x,
                node.position.y,
                node.hints.size,
                node.hints.shape.as_str(),
                node.hints.color
            )?;
        }
    }
    Ok(())
}

fn render_pretty(scene: &Scene, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Scene")?;
    pretty_kv(w, "Components", scene.components.len().to_string())?;
    pretty_kv(w, "Nodes", scene.node_count().to_string())?;
    pretty_kv(w, "Edges", scene.edge_count().to_string())?;

    for (i, component) in scene.components.iter().enumerate() {
        writeln!(w)?;
        pretty_section(
            w,
            &format!(
                "Component {} ({})",
                i + 1,
                component.dominant.as_deref().unwrap_or("?")
            ),
        )?;
        pretty_kv(
            w,
            "Center",
            format!("({:.3}, {:.3})", component.center.x, component.center.y),
        )?;
        pretty_kv(w, "Radius", format!("{:.3}", component.radius))?;
        writeln!(
            w,
            "{:<32} {:>9} {:>9} {:>6}  {}",
            "NODE", "X", "Y", "SIZE", "MARKER"
        )?;
        for node in &component.nodes {
            writeln!(
                w,
                "{:<32} {:>9.3} {:>9.3} {:>6}  {} {}",
                node.label,
                node.position.x,
                node.position.y,
                node.hints.size,
                node.hints.shape.as_str(),
                node.hints.color
            )?;
        }
    }
    pretty_rule(w)
}
