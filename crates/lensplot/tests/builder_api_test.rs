//! Integration tests for the DiagramBuilder API
//!
//! These tests run counts through parsing, reconciliation, layout and
//! rendering the way callers do.

use std::f64::consts::PI;

use float_cmp::assert_approx_eq;

use lensplot::{
    DiagramBuilder, LayoutEngine,
    config::AppConfig,
    emphasis::{Emphasis, EmphasisLevel, Focus},
    geometry::Point,
    model::Members,
};

fn cross(o: Point, a: Point, p: Point) -> f64 {
    (a.x() - o.x()) * (p.y() - o.y()) - (a.y() - o.y()) * (p.x() - o.x())
}

fn build(source: &str) -> (lensplot::Reconciled, lensplot::diagram::Diagram) {
    let builder = DiagramBuilder::default();
    let input = builder.parse(source).expect("valid JSON");
    let reconciled = builder.reconcile(&input);
    let diagram = builder.layout(&reconciled);
    (reconciled, diagram)
}

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_two_events_lens_matches_intersection() {
    let (_, diagram) = build(r#"{"Event_1": 1200, "Event_2": 900, "Event_1_AND_Event_2": 700}"#);

    let a = diagram.circle("Event_1").expect("circle");
    let b = diagram.circle("Event_2").expect("circle");
    let scale = diagram.scale();
    let lens = a.circle().overlap_with(&b.circle());

    assert_approx_eq!(f64, lens / (PI * scale * scale), 700.0, epsilon = 7.0);
    for circle in [a, b] {
        assert!(circle.radius() / scale >= 700.0_f64.sqrt());
    }

    let region = &diagram.pairwise_regions()[0];
    assert_eq!(region.approximate_size(), 700.0);
    assert_approx_eq!(f64, region.rendered_size(), 700.0, epsilon = 7.0);
}

#[test]
fn test_containment_is_inferred() {
    let (reconciled, diagram) = build(
        r#"{
            "counts": {"Event_1": 1200, "Event_2": 900},
            "hints": {"Event_2": {"role": "inner"}, "Event_1": {"role": "outer"}}
        }"#,
    );

    let intersection = reconciled
        .intersection(&Members::new(["Event_1", "Event_2"]))
        .expect("inferred");
    assert_eq!(intersection.size(), 900.0);

    let outer = diagram.circle("Event_1").expect("circle");
    let inner = diagram.circle("Event_2").expect("circle");
    assert!(outer.center().distance(inner.center()) + inner.radius() <= outer.radius() + 1e-9);
}

#[test]
fn test_oversized_intersection_is_clamped() {
    let (reconciled, diagram) = build(r#"{"A": 100, "B": 50, "A_AND_B": 9999}"#);

    let intersection = reconciled
        .intersection(&Members::new(["A", "B"]))
        .expect("kept");
    assert_eq!(intersection.size(), 50.0);
    assert!(!reconciled.diagnostics().is_empty());
    assert_eq!(diagram.circles().len(), 2);
}

#[test]
fn test_empty_input_gives_empty_diagram() {
    let (reconciled, diagram) = build("{}");

    assert!(reconciled.is_empty());
    assert!(diagram.circles().is_empty());
    assert!(diagram.pairwise_regions().is_empty());
    assert!(diagram.triple_regions().is_empty());
}

#[test]
fn test_triple_region_sits_inside_the_hull() {
    let (_, diagram) = build(
        r#"{"A": 1200, "B": 900, "C": 700,
            "A_AND_B": 600, "A_AND_C": 500, "B_AND_C": 400,
            "A_AND_B_AND_C": 300}"#,
    );

    let centers: Vec<_> = ["A", "B", "C"]
        .iter()
        .map(|name| diagram.circle(name).expect("circle").center())
        .collect();
    let anchor = diagram.triple_regions()[0].anchor();

    let centroid_x = centers.iter().map(|p| p.x()).sum::<f64>() / 3.0;
    let centroid_y = centers.iter().map(|p| p.y()).sum::<f64>() / 3.0;
    assert_approx_eq!(f64, anchor.x(), centroid_x, epsilon = 1e-9);
    assert_approx_eq!(f64, anchor.y(), centroid_y, epsilon = 1e-9);

    // Same side of every edge as the opposite vertex.
    for i in 0..3 {
        let (o, a, opposite) = (centers[i], centers[(i + 1) % 3], centers[(i + 2) % 3]);
        assert!(cross(o, a, anchor) * cross(o, a, opposite) > 0.0);
    }
}

#[test]
fn test_refined_engine_through_config() {
    let mut config = AppConfig::default();
    config.layout_mut().set_engine(LayoutEngine::Refined);
    let builder = DiagramBuilder::new(config);

    let input = builder
        .parse(r#"{"A": 1000, "B": 800, "C": 600, "D": 400, "A_AND_B": 300, "C_AND_D": 100}"#)
        .expect("valid JSON");
    let diagram = builder.layout(&builder.reconcile(&input));

    assert_eq!(diagram.circles().len(), 4);
}

#[test]
fn test_render_svg_with_selection() {
    let builder = DiagramBuilder::default();
    let input = builder
        .parse(
            r#"{"counts": {"A": 1200, "B": 900, "A_AND_B": 700},
                "hints": {"A": {"relatedTo": ["B"]}}}"#,
        )
        .expect("valid JSON");
    let reconciled = builder.reconcile(&input);
    let diagram = builder.layout(&reconciled);

    let emphasis = builder.emphasize(&reconciled, Some(Focus::Selected("A".to_string())));
    assert_eq!(emphasis.level("B"), EmphasisLevel::Intersecting);

    let svg = builder
        .render_svg(&diagram, &reconciled, &emphasis)
        .expect("renders");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("A ∩ B: 700 users"));

    let plain = builder
        .render_svg(&diagram, &reconciled, &Emphasis::none())
        .expect("renders");
    assert!(!plain.contains("stroke-dasharray"));
}

#[test]
fn test_render_json() {
    let (_, diagram) = build(r#"{"A": 10, "B": 5, "A_AND_B": 2}"#);

    let json = DiagramBuilder::default()
        .render_json(&diagram)
        .expect("serializable");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

    assert_eq!(value["circles"].as_array().expect("array").len(), 2);
    assert_eq!(value["pairwiseRegions"][0]["members"][0], "A");
}

#[test]
fn test_invalid_json_is_an_input_error() {
    let err = DiagramBuilder::default()
        .parse(r#"{"A": "many"}"#)
        .unwrap_err();

    assert!(matches!(err, lensplot::LensplotError::Input { .. }));
}
