//! Snapshots of a built grid for display and hand-off.

use crate::grid::SpatialGrid;
use serde::{Deserialize, Serialize};

/// A cell's position and occupancy, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    pub column: usize,
    pub row: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
}

impl<T> SpatialGrid<T> {
    /// One summary per cell, column by column. Empty before the first build.
    pub fn summaries(&self) -> Vec<CellSummary> {
        self.cells()
            .map(|(index, cell)| CellSummary {
                column: index.column,
                row: index.row,
                latitude: cell.center().lat_degrees(),
                longitude: cell.center().lng_degrees(),
                count: cell.len(),
            })
            .collect()
    }

    /// Cell centers as GeoJSON points with `column`, `row` and `count`
    /// properties.
    #[cfg(feature = "geojson")]
    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        use geojson::{Feature, FeatureCollection, Geometry, Value};
        use serde_json::{Map, Value as JsonValue};

        let features = self
            .summaries()
            .into_iter()
            .map(|summary| {
                let mut properties = Map::new();
                properties.insert("column".to_string(), JsonValue::from(summary.column));
                properties.insert("row".to_string(), JsonValue::from(summary.row));
                properties.insert("count".to_string(), JsonValue::from(summary.count));

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![
                        summary.longitude,
                        summary.latitude,
                    ]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
