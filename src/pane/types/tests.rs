//! Tests for PaneBounds and PaneNode helpers.

use super::bounds::PaneBounds;
use super::common::{NodeId, SpatialDirection, SplitOrientation};
use super::pane_node::{MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, PaneNode, clamp_ratio};
use crate::surface::testing::test_handle;

#[test]
fn test_pane_bounds_split_horizontal() {
    let bounds = PaneBounds::new(0.0, 0.0, 800.0, 600.0);
    let (left, right) = bounds.split(SplitOrientation::Horizontal, 0.25);
    assert_eq!(left, PaneBounds::new(0.0, 0.0, 200.0, 600.0));
    assert_eq!(right, PaneBounds::new(200.0, 0.0, 600.0, 600.0));
}

#[test]
fn test_pane_bounds_split_vertical() {
    let bounds = PaneBounds::new(0.0, 100.0, 800.0, 600.0);
    let (top, bottom) = bounds.split(SplitOrientation::Vertical, 0.5);
    assert_eq!(top, PaneBounds::new(0.0, 100.0, 800.0, 300.0));
    assert_eq!(bottom, PaneBounds::new(0.0, 400.0, 800.0, 300.0));
}

#[test]
fn test_direction_orientation() {
    assert_eq!(
        SpatialDirection::Left.orientation(),
        SplitOrientation::Horizontal
    );
    assert_eq!(
        SpatialDirection::Down.orientation(),
        SplitOrientation::Vertical
    );
    assert!(SpatialDirection::Up.towards_first());
    assert!(!SpatialDirection::Right.towards_first());
}

#[test]
fn test_clamp_ratio() {
    assert_eq!(clamp_ratio(0.0), MIN_SPLIT_RATIO);
    assert_eq!(clamp_ratio(1.0), MAX_SPLIT_RATIO);
    assert_eq!(clamp_ratio(0.3), 0.3);
    assert_eq!(clamp_ratio(f32::NAN), 0.5);
}

#[test]
fn test_split_constructor_clamps_ratio() {
    let node = PaneNode::split(
        SplitOrientation::Vertical,
        2.0,
        PaneNode::leaf(test_handle()),
        PaneNode::leaf(test_handle()),
    );
    match node {
        PaneNode::Split { ratio, .. } => assert_eq!(ratio, MAX_SPLIT_RATIO),
        PaneNode::Leaf(_) => panic!("expected split"),
    }
}

#[test]
fn test_nearest_enclosing_split_prefers_deepest_match() {
    // [a | [b | c]]: resizing c horizontally targets the inner split
    let a = test_handle();
    let b = test_handle();
    let c = test_handle();
    let inner = PaneNode::split(
        SplitOrientation::Horizontal,
        0.5,
        PaneNode::leaf(b),
        PaneNode::leaf(c.clone()),
    );
    let inner_id = inner.id();
    let root = PaneNode::split(SplitOrientation::Horizontal, 0.5, PaneNode::leaf(a), inner);

    let (split, ratio, bounds) = root
        .nearest_enclosing_split(
            NodeId::from(c.id()),
            SplitOrientation::Horizontal,
            PaneBounds::new(0.0, 0.0, 100.0, 10.0),
        )
        .unwrap();
    assert_eq!(NodeId::from(split), inner_id);
    assert_eq!(ratio, 0.5);
    assert_eq!(bounds, PaneBounds::new(50.0, 0.0, 50.0, 10.0));

    assert!(
        root.nearest_enclosing_split(
            NodeId::from(c.id()),
            SplitOrientation::Vertical,
            PaneBounds::unit()
        )
        .is_none()
    );
}
