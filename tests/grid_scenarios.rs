use parkgrid::{
    CellIndex, Direction, GridBuilder, GridConfig, GridError, Location, Placemarks, SpatialGrid,
    SphericalPoint,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_tight_cluster_binds_into_center() {
    init_logging();

    let spots = vec![
        SphericalPoint::from_degrees(40.0, -73.0),
        SphericalPoint::from_degrees(40.0001, -73.0),
        SphericalPoint::from_degrees(40.0, -73.0001),
        SphericalPoint::from_degrees(39.9999, -73.0),
        SphericalPoint::from_degrees(40.0, -72.9999),
    ];
    let grid = SpatialGrid::new(1, 1, spots, 0.0).unwrap();

    let center = grid.center_index();
    assert_eq!(center, CellIndex::new(1, 1));
    assert_eq!(grid.center_cell().unwrap().len(), 5);
    for id in 0..5 {
        assert_eq!(grid.cell_of(id), Some(center));
    }
    assert_eq!(grid.occupied_cells().count(), 1);
}

#[test]
fn test_equator_pair_lands_in_outer_columns() {
    init_logging();

    let grid = SpatialGrid::new(
        2,
        0,
        vec![
            SphericalPoint::from_degrees(0.0, 0.0),
            SphericalPoint::from_degrees(0.0, 10.0),
        ],
        0.0,
    )
    .unwrap();

    assert_eq!(grid.dimensions(), (5, 1));
    assert_eq!(grid.cell_of(0), Some(CellIndex::new(0, 0)));
    assert_eq!(grid.cell_of(1), Some(CellIndex::new(4, 0)));

    let spacing = grid.spacing().unwrap();
    let expected = 5.0_f64.to_radians().sin() / 2.0;
    assert!((spacing.dy - expected).abs() < 1e-12, "{spacing:?}");
    assert_eq!(spacing.dz, 0.0);

    let centroid = grid.centroid().unwrap();
    assert!((centroid.point.lng_degrees() - 5.0).abs() < 1e-9);
    assert!(centroid.point.lat_degrees().abs() < 1e-9);
}

#[test]
fn test_empty_input_is_rejected() {
    let err = SpatialGrid::new(1, 1, Vec::<SphericalPoint>::new(), 0.0).unwrap_err();
    assert_eq!(err, GridError::EmptyInput);

    let unlocated = vec![Location::from_address("Pier 40"), Location::new()];
    let err = SpatialGrid::new(1, 1, unlocated, 0.0).unwrap_err();
    assert_eq!(err, GridError::EmptyInput);
}

#[test]
fn test_single_point_is_degenerate() {
    let err = SpatialGrid::new(1, 1, vec![SphericalPoint::from_degrees(12.0, 34.0)], 0.0)
        .unwrap_err();
    assert_eq!(err, GridError::DegenerateExtent);
}

#[test]
fn test_quarter_turn_points_right_neighbor_south() {
    init_logging();

    let spots = vec![
        SphericalPoint::from_degrees(0.5, 0.0),
        SphericalPoint::from_degrees(-0.5, 0.0),
        SphericalPoint::from_degrees(0.0, 0.5),
        SphericalPoint::from_degrees(0.0, -0.5),
    ];
    let grid = SpatialGrid::new(1, 1, spots, 90.0).unwrap();

    let center = grid.center_cell().unwrap();
    let right = grid
        .cell(center.neighbor(Direction::Right).unwrap())
        .unwrap();
    assert!(right.lat() < center.lat());
    assert!((right.lng() - center.lng()).abs() < 1e-9);

    let up = grid.cell(center.neighbor(Direction::Up).unwrap()).unwrap();
    assert!(up.lng() > center.lng());
}

#[test]
fn test_bind_then_rebin_grows_spacing() {
    init_logging();

    let ring: Vec<SphericalPoint> = (0..8)
        .map(|i| {
            let theta = i as f64 * std::f64::consts::TAU / 8.0;
            SphericalPoint::from_degrees(0.1 * theta.sin(), 0.1 * theta.cos())
        })
        .collect();
    let mut grid = SpatialGrid::new(2, 2, ring, 0.0).unwrap();
    let before = grid.spacing().unwrap();

    let far = grid.bind(SphericalPoint::from_degrees(0.0, 1.0)).unwrap();
    assert_eq!(far, Some(CellIndex::new(4, 2)));
    assert_eq!(grid.spacing().unwrap(), before);

    grid.rebin_all().unwrap();
    let after = grid.spacing().unwrap();
    assert!(after.dy > before.dy * 4.0, "{before:?} -> {after:?}");
    assert_eq!(grid.bound_count(), 9);
    assert_eq!(grid.cell_of(8), Some(CellIndex::new(4, 2)));
}

#[test]
fn test_locate_matches_bind() {
    let grid = GridBuilder::new()
        .columns(3)
        .rows(2)
        .rotation_offset_degrees(20.0)
        .build(vec![
            SphericalPoint::from_degrees(48.80, 2.25),
            SphericalPoint::from_degrees(48.90, 2.45),
            SphericalPoint::from_degrees(48.85, 2.30),
        ])
        .unwrap();

    for (id, item) in grid.items().iter().enumerate() {
        let located = grid.locate(item).unwrap();
        assert_eq!(grid.cell_of(id), Some(located.cell));
    }
}

#[test]
fn test_spacing_meters_reports_ground_distance() {
    let grid = SpatialGrid::new(
        2,
        0,
        vec![
            SphericalPoint::from_degrees(0.0, 0.0),
            SphericalPoint::from_degrees(0.0, 10.0),
        ],
        0.0,
    )
    .unwrap();

    let (along_columns, along_rows) = grid.spacing_meters().unwrap();
    // 10° of equator spread over four column steps.
    assert!((along_columns - 278_000.0).abs() < 2_000.0, "{along_columns}");
    assert_eq!(along_rows, 0.0);
}

#[test]
fn test_placemark_feed_end_to_end() {
    init_logging();

    let json = r#"{
        "placemarks": [
            {"coordinates": [52.5200, 13.4050], "name": "Mitte"},
            {"coordinates": [52.5163, 13.3777, 34.0], "name": "Brandenburger Tor"},
            {"coordinates": [52.5250, 13.3690], "name": "Hauptbahnhof"},
            {"address": "Alexanderplatz"}
        ]
    }"#;

    let grid = Placemarks::from_json(json)
        .unwrap()
        .into_grid(GridConfig::new(2, 2))
        .unwrap();

    assert_eq!(grid.len(), 4);
    assert_eq!(grid.bound_count(), 3);
    assert_eq!(grid.cell_of(3), None);

    let names: Vec<&str> = grid
        .occupied_cells()
        .flat_map(|(index, _)| grid.cell_items(index))
        .filter_map(|spot| spot.name())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"Hauptbahnhof"));
}

#[test]
fn test_placemark_feed_with_bad_record_still_builds() {
    let json = r#"{
        "placemarks": [
            {"coordinates": [52.5200, 13.4050], "name": "Mitte"},
            {"coordinates": [52.5250, 13.3690], "name": "Hauptbahnhof"},
            {"coordinates": [91.0, 13.40], "name": "Typo"}
        ]
    }"#;

    let grid = Placemarks::from_json(json)
        .unwrap()
        .into_grid(GridConfig::new(1, 1))
        .unwrap();

    assert_eq!(grid.len(), 3);
    assert_eq!(grid.bound_count(), 2);
    assert_eq!(grid.cell_of(2), None);
    assert_eq!(grid.item(2).and_then(|spot| spot.name()), Some("Typo"));
}

#[test]
fn test_config_from_json_drives_grid() {
    let config = GridConfig::from_json(r#"{"columns": 0, "rows": 3, "min_spacing_meters": 0}"#)
        .unwrap();
    let grid = SpatialGrid::with_config(
        config,
        vec![
            SphericalPoint::from_degrees(-1.0, 0.0),
            SphericalPoint::from_degrees(1.0, 0.0),
        ],
    )
    .unwrap();

    assert_eq!(grid.dimensions(), (1, 7));
    assert_eq!(grid.cell_of(0), Some(CellIndex::new(0, 0)));
    assert_eq!(grid.cell_of(1), Some(CellIndex::new(0, 6)));
}

#[cfg(feature = "geojson")]
#[test]
fn test_geojson_export() {
    let grid = SpatialGrid::new(
        1,
        1,
        vec![
            SphericalPoint::from_degrees(10.0, 10.0),
            SphericalPoint::from_degrees(10.2, 10.2),
        ],
        0.0,
    )
    .unwrap();

    let collection = grid.to_geojson();
    assert_eq!(collection.features.len(), 9);

    let total: u64 = collection
        .features
        .iter()
        .filter_map(|f| f.properties.as_ref()?.get("count")?.as_u64())
        .sum();
    assert_eq!(total, 2);

    let text = serde_json::to_string(&collection).unwrap();
    assert!(text.contains("FeatureCollection"));
}
