use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv::Writer;
use ordered_float::OrderedFloat;

mod dijkstra;
mod geo;
mod graph;
mod loader;

use graph::Graph;

#[derive(Parser, Debug)]
#[command(name = "waypath")]
#[command(about = "Load a waypoint map and find the minimum-cost route between two named locations.", long_about = None)]
struct Cli {
    /// Path to the map file (one `name,lat lon` record per line)
    #[arg(short, long)]
    map: PathBuf,

    /// Starting location name. Prompted for when omitted.
    #[arg(short, long)]
    from: Option<String>,

    /// Destination location name. Prompted for when omitted.
    #[arg(short, long)]
    to: Option<String>,

    /// Output CSV (name, distance) of every location's distance from the start,
    /// nearest first. If omitted, only the route is printed.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("reading location name from stdin")?;
    Ok(line.trim().to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let waypoints = loader::read_waypoints(&cli.map)?;
    let graph = Graph::build(waypoints)?;
    println!(
        "Loaded {} waypoints, {} directed edges",
        graph.len(),
        graph.edge_count()
    );

    let from = match cli.from {
        Some(name) => name,
        None => prompt("Enter starting location")?,
    };
    let to = match cli.to {
        Some(name) => name,
        None => prompt("Enter ending location")?,
    };

    let route = graph.shortest_path(&from, &to)?;
    println!("Shortest path: {}", route.names(&graph).join(" "));
    println!("Minimum cost: {:.6}", route.cost);

    if let Some(out_path) = cli.out {
        let dist = graph.distances_from(&from)?;
        let mut wtr = Writer::from_path(&out_path)
            .with_context(|| format!("creating CSV {}", out_path.display()))?;
        wtr.write_record(["name", "distance"])?;
        let mut by_distance: Vec<(usize, f64)> = dist.into_iter().enumerate().collect();
        by_distance.sort_by_key(|&(_, d)| OrderedFloat(d));
        for &(idx, d) in &by_distance {
            wtr.write_record(&[graph.waypoint(idx).name().to_string(), format!("{d:.6}")])?;
        }
        wtr.flush()?;
        println!(
            "Wrote distances for {} waypoints to {}",
            by_distance.len(),
            out_path.display()
        );
    }

    Ok(())
}
