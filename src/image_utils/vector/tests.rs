use ndarray::{array, Array2};

use crate::image_utils::common::error::ProcessingError;
use crate::image_utils::vector::{
    geojson_to_tiff, labels_to_features, Affine, Classification, Connectivity, Feature,
    FeatureCollection, FeatureOptions, Geometry, Position,
};

fn polygon_rings(feature: &Feature) -> &Vec<Vec<Position>> {
    match &feature.geometry {
        Geometry::Polygon(rings) => rings,
        other => panic!("expected Polygon, got {}", other.kind()),
    }
}

#[test]
fn test_square_round_trip() {
    let square = Geometry::Polygon(vec![vec![[2.0, 2.0], [6.0, 2.0], [6.0, 6.0], [2.0, 6.0], [2.0, 2.0]]]);
    let raster: Array2<u16> = geojson_to_tiff(&[square], (10, 10)).unwrap();

    let options = FeatureOptions::builder().include_labels(true).build();
    let features = labels_to_features(raster.view(), &options).unwrap();

    assert_eq!(features.len(), 1);
    assert_eq!(features[0].properties.label(), Some(1.0));

    let rings = polygon_rings(&features[0]);
    assert_eq!(rings.len(), 1);
    let traced = &rings[0];
    assert_eq!(traced.first(), traced.last());

    let original = [[2.0, 2.0], [6.0, 2.0], [6.0, 6.0], [2.0, 6.0]];
    assert_eq!(traced.len(), 5);
    for (t, o) in traced.iter().zip(original.iter()) {
        assert!((t[0] - o[0]).abs() <= 1.0 && (t[1] - o[1]).abs() <= 1.0, "{t:?} vs {o:?}");
    }
}

#[test]
fn test_one_feature_per_label() {
    let lab = array![[1u8, 1, 2, 2], [1, 1, 2, 2], [0, 0, 0, 3]];
    let options = FeatureOptions::builder().include_labels(true).build();
    let features = labels_to_features(lab.view(), &options).unwrap();

    let labels: Vec<f64> = features.iter().filter_map(|f| f.properties.label()).collect();
    assert_eq!(labels, vec![1.0, 2.0, 3.0]);
    assert_eq!(polygon_rings(&features[1])[0], vec![[2.0, 0.0], [4.0, 0.0], [4.0, 2.0], [2.0, 2.0], [2.0, 0.0]]);
}

#[test]
fn test_labels_omitted_by_default() {
    let lab = array![[0i32, 5], [0, 5]];
    let features = labels_to_features(lab.view(), &FeatureOptions::default()).unwrap();

    assert_eq!(features.len(), 1);
    assert!(features[0].properties.measurements.is_none());
    assert!(features[0].properties.classification.is_none());
    assert_eq!(features[0].properties.object_type, "annotation");
}

#[test]
fn test_negative_labels_are_background() {
    let lab = array![[-1i16, -1], [0, 4]];
    let features = labels_to_features(lab.view(), &FeatureOptions::default()).unwrap();
    assert_eq!(features.len(), 1);
}

#[test]
fn test_boolean_image_is_own_mask() {
    let lab = array![[true, false], [true, true]];
    let options = FeatureOptions::builder().include_labels(true).build();
    let features = labels_to_features(lab.view(), &options).unwrap();

    assert_eq!(features.len(), 1);
    assert_eq!(features[0].properties.label(), Some(1.0));
}

#[test]
fn test_connectivity_changes_grouping() {
    let lab = array![[1u8, 0], [0, 1]];

    let four = FeatureOptions::builder().connectivity(Connectivity::Four).build();
    assert_eq!(labels_to_features(lab.view(), &four).unwrap().len(), 2);

    let eight = FeatureOptions::builder().connectivity(Connectivity::Eight).build();
    assert_eq!(labels_to_features(lab.view(), &eight).unwrap().len(), 1);
}

#[test]
fn test_region_with_hole() {
    let lab = Array2::from_shape_fn((5, 5), |(r, c)| u8::from(!(r == 2 && c == 2)));
    let features = labels_to_features(lab.view(), &FeatureOptions::default()).unwrap();

    assert_eq!(features.len(), 1);
    let rings = polygon_rings(&features[0]);
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0], vec![[0.0, 0.0], [5.0, 0.0], [5.0, 5.0], [0.0, 5.0], [0.0, 0.0]]);
    assert_eq!(rings[1].len(), 5);
    assert!(rings[1].iter().all(|p| (2.0..=3.0).contains(&p[0]) && (2.0..=3.0).contains(&p[1])));
}

#[test]
fn test_downsample_scales_coordinates() {
    let lab = array![[7u32]];
    let options = FeatureOptions::builder().downsample(4.0).build();
    let features = labels_to_features(lab.view(), &options).unwrap();

    assert_eq!(polygon_rings(&features[0])[0], vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]);
}

#[test]
fn test_explicit_transform_overrides_downsample() {
    let lab = array![[1u8]];
    let options = FeatureOptions::builder()
        .downsample(4.0)
        .transform(Affine::new(1.0, 0.0, 100.0, 0.0, 1.0, 50.0))
        .build();
    let features = labels_to_features(lab.view(), &options).unwrap();

    assert_eq!(polygon_rings(&features[0])[0][0], [100.0, 50.0]);
    assert_eq!(polygon_rings(&features[0])[0][2], [101.0, 51.0]);
}

#[test]
fn test_mask_restricts_regions() {
    let lab = array![[1u8, 1, 1], [1, 1, 1]];
    let mask = array![[true, false, true], [true, false, true]];
    let options = FeatureOptions::builder().mask(mask).build();

    assert_eq!(labels_to_features(lab.view(), &options).unwrap().len(), 2);
}

#[test]
fn test_mask_shape_mismatch() {
    let lab = array![[1u8, 1]];
    let options = FeatureOptions::builder().mask(Array2::from_elem((2, 2), true)).build();

    assert!(matches!(
        labels_to_features(lab.view(), &options),
        Err(ProcessingError::ShapeMismatch { expected: (1, 2), actual: (2, 2) })
    ));
}

#[test]
fn test_geojson_output_layout() {
    let lab = array![[3u8]];
    let options = FeatureOptions::builder()
        .object_type("detection")
        .include_labels(true)
        .classification(Classification::new("Tumor"))
        .build();
    let collection = FeatureCollection::new(labels_to_features(lab.view(), &options).unwrap());

    let text = collection.to_geojson_string().unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["type"], "FeatureCollection");
    let feature = &json["features"][0];
    assert_eq!(feature["type"], "Feature");
    assert_eq!(feature["geometry"]["type"], "Polygon");
    assert_eq!(feature["geometry"]["coordinates"][0][1][0], 1.0);
    assert_eq!(feature["properties"]["objectType"], "detection");
    assert_eq!(feature["properties"]["measurements"][0]["name"], "Label");
    assert_eq!(feature["properties"]["measurements"][0]["value"], 3.0);
    assert_eq!(feature["properties"]["classification"]["name"], "Tumor");

    assert_eq!(FeatureCollection::from_geojson_str(&text).unwrap(), collection);
}

#[test]
fn test_parsed_geojson_rasterizes() {
    let text = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]]},
                "properties": {"objectType": "annotation"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [1, 1]},
                "properties": {}
            }
        ]
    }"#;
    let collection = FeatureCollection::from_geojson_str(text).unwrap();
    assert_eq!(collection.features[1].properties.object_type, "annotation");

    let geometries = collection.geometries();
    assert!(matches!(
        geojson_to_tiff::<u8>(&geometries, (4, 4)),
        Err(ProcessingError::NonPolygonGeometry { index: 1, kind: "Point" })
    ));

    let raster: Array2<u8> = geojson_to_tiff(&geometries[..1], (4, 4)).unwrap();
    assert_eq!(raster.iter().filter(|&&v| v == 1).count(), 9);
}
