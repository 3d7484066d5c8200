use colorfinder::{Color, Metric, Palette, DEFAULT_LIMIT};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_builtin_palette_search() {
    let palette = Palette::builtin().unwrap();

    let matches = palette.search(&Color::parse("#800000").unwrap(), DEFAULT_LIMIT);
    assert_eq!(matches.len(), DEFAULT_LIMIT);
    assert_eq!(matches[0].name, "maroon");
    assert_eq!(matches[0].distance, 0.0);

    // Verify results are sorted by distance ascending
    for w in matches.windows(2) {
        assert!(w[0].distance <= w[1].distance, "Results not sorted by distance");
    }
}

#[test]
fn test_builtin_palette_exact_hits() {
    let palette = Palette::builtin().unwrap();

    for candidate in palette.candidates() {
        let color = candidate.color().unwrap();
        let best = &palette.search(&color, 1)[0];
        assert_eq!(best.distance, 0.0, "no exact hit for {}", color);
    }
}

#[test]
fn test_json_dataset_then_snapshot() {
    let mut json = NamedTempFile::new().unwrap();
    write!(
        json,
        r#"[
            {{"id": "c1", "color": "red", "colorvect_l2": [255, 0, 0]}},
            {{"id": "c2", "color": "maroon", "colorvect_l2": [128, 0, 0]}},
            {{"id": "c3", "color": "broken", "colorvect_l2": [999, 0, 0]}},
            {{"id": "c4", "color": "blue", "colorvect_l2": [0, 0, 255]}}
        ]"#
    )
    .unwrap();

    let palette = Palette::load_json(json.path()).unwrap().with_metric(Metric::Euclidean);
    assert_eq!(palette.count(), 4);

    let snapshot = NamedTempFile::new().unwrap();
    palette.save(snapshot.path()).unwrap();
    drop(palette);

    let loaded = Palette::load(snapshot.path()).unwrap();
    let matches = loaded.search(&Color::new(255, 0, 0), 10);

    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c4"]);
    assert!((matches[1].distance - 127.0).abs() < 1e-9);
}
