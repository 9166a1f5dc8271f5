use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;

use crate::graph::Waypoint;

/// Reads a waypoint map file: one record per line, the location name, a
/// comma, then latitude and longitude separated by whitespace.
///
/// ```text
/// Library,33.351 -117.195
/// ```
///
/// Blank lines are skipped. Malformed records are reported with their line
/// number; the graph layer assumes it only ever sees well-formed waypoints.
pub fn read_waypoints(path: &Path) -> Result<Vec<Waypoint>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_waypoints(file)
}

fn parse_waypoints(input: impl Read) -> Result<Vec<Waypoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false) // every line is data
        .flexible(true)
        .from_reader(input);

    let mut waypoints = Vec::new();
    for result in rdr.records() {
        let record = result.context("reading map record")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != 2 {
            bail!(
                "line {}: expected `name,lat lon`, got {} comma-separated fields",
                line,
                record.len()
            );
        }

        let name = &record[0];
        if name.is_empty() {
            bail!("line {}: empty location name", line);
        }

        let mut coords = record[1].split_whitespace();
        let (lat_s, lon_s) = match (coords.next(), coords.next(), coords.next()) {
            (Some(lat_s), Some(lon_s), None) => (lat_s, lon_s),
            _ => bail!(
                "line {}: expected two whitespace-separated coordinates, got {:?}",
                line,
                &record[1]
            ),
        };
        let lat: f64 = lat_s
            .parse()
            .with_context(|| format!("line {}: bad latitude {:?}", line, lat_s))?;
        let lon: f64 = lon_s
            .parse()
            .with_context(|| format!("line {}: bad longitude {:?}", line, lon_s))?;

        waypoints.push(Waypoint::new(name, lat, lon));
    }

    Ok(waypoints)
}
