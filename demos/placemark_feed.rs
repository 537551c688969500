//! Placemark Feed Example
//!
//! Parses a placemark document, bins the spots into a rotated grid and
//! prints per-cell occupancy.

use parkgrid::{Direction, GridConfig, ParkingSpot, Placemarks, SphericalPoint};
use std::error::Error;

const FEED: &str = r#"{
    "placemarks": [
        {"coordinates": [40.7580, -73.9855], "name": "Times Square"},
        {"coordinates": [40.7527, -73.9772], "name": "Grand Central"},
        {"coordinates": [40.7484, -73.9857], "name": "Empire State"},
        {"coordinates": [40.7614, -73.9776], "name": "MoMA"},
        {"coordinates": [40.7505, -73.9934], "name": "Penn Station"},
        {"address": "Somewhere in Midtown"}
    ]
}"#;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== parkgrid - Placemark Feed ===\n");

    let feed = Placemarks::from_json(FEED)?;
    println!("✓ Parsed {} placemarks", feed.len());

    // Manhattan's street grid runs about 29° clockwise from true north.
    let config = GridConfig::new(2, 2).with_rotation_offset_degrees(29.0);
    let mut grid = feed.into_grid(config)?;
    println!(
        "✓ Binned {} of {} spots into a {}x{} lattice\n",
        grid.bound_count(),
        grid.len(),
        grid.dimensions().0,
        grid.dimensions().1
    );

    if let Some((along_columns, along_rows)) = grid.spacing_meters() {
        println!("   Cell spacing: {:.0} m x {:.0} m", along_columns, along_rows);
    }

    for (index, cell) in grid.occupied_cells() {
        let names: Vec<&str> = grid
            .cell_items(index)
            .filter_map(|spot| spot.name())
            .collect();
        println!(
            "   ({}, {}) at ({:.5}, {:.5}): {}",
            index.column,
            index.row,
            cell.center().lat_degrees(),
            cell.center().lng_degrees(),
            names.join(", ")
        );
    }

    let center = grid.center_index();
    if let Some(right) = grid.neighbor(center, Direction::Right) {
        println!("\n   Right of center: ({}, {})", right.column, right.row);
    }

    let query = SphericalPoint::from_degrees(40.7549, -73.9840);
    if let Some(located) = grid.locate(&query) {
        println!(
            "   Bryant Park is nearest to cell ({}, {}) after {} hops",
            located.cell.column, located.cell.row, located.hops
        );
    }

    let extra = ParkingSpot::new(40.7580, -73.9800).with_property("name", "Late addition");
    if let Some(cell) = grid.bind(extra)? {
        println!("   Late addition bound to ({}, {})", cell.column, cell.row);
    }

    println!("\n{}", serde_json::to_string_pretty(&grid.summaries())?);
    Ok(())
}
