//! Conversion between gravity-anchored offsets and absolute coordinates.
//!
//! A layer's `x`/`y` offset is measured from one of nine anchors. North and
//! west anchors measure from the top/left edge, south and east from the
//! bottom/right edge, and centered anchors from the container midline.

use creative_core::{Gravity, HorizontalAnchor, Size, VerticalAnchor};

use crate::tree::Bounds;

/// Default half-width of the band around the container midline in which a
/// box is considered centered when inferring its gravity.
pub const DEFAULT_CENTER_TOLERANCE: f64 = 20.0;

/// Absolute top-left corner of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

/// Gravity and offsets reconstructed from an absolute box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityOffset {
    pub gravity: Gravity,
    pub x: f64,
    pub y: f64,
}

/// Resolve a gravity-anchored offset into absolute coordinates.
///
/// Both coordinates are rounded to the nearest integer.
pub fn absolute_position(
    offset_x: f64,
    offset_y: f64,
    gravity: Gravity,
    width: f64,
    height: f64,
    container: Size,
) -> Placement {
    let top = match gravity.vertical() {
        VerticalAnchor::South => container.height - offset_y - height,
        VerticalAnchor::Center => container.height / 2.0 - height / 2.0 + offset_y,
        VerticalAnchor::North => offset_y,
    };
    let left = match gravity.horizontal() {
        HorizontalAnchor::East => container.width - offset_x - width,
        HorizontalAnchor::Center => container.width / 2.0 - width / 2.0 + offset_x,
        HorizontalAnchor::West => offset_x,
    };

    Placement {
        left: left.round(),
        top: top.round(),
    }
}

/// Infer the gravity and offsets that would place `bounds` in `container`.
///
/// Each axis anchors to its nearer edge, unless the box center lies within
/// `tolerance` of the container midline, in which case it is centered. The
/// inference is lossy: a box placed inside the tolerance band with an edge
/// gravity comes back as centered. Edge offsets are rounded to integers;
/// centered offsets are kept exact, so they may carry a half pixel.
pub fn infer_gravity(bounds: &Bounds, container: Size, tolerance: f64) -> GravityOffset {
    let (vertical, y) = infer_axis(bounds.y, bounds.height, bounds.center_y(), container.height, tolerance);
    let (horizontal, x) = infer_axis(bounds.x, bounds.width, bounds.center_x(), container.width, tolerance);

    let vertical = match vertical {
        Edge::Start => VerticalAnchor::North,
        Edge::Middle => VerticalAnchor::Center,
        Edge::End => VerticalAnchor::South,
    };
    let horizontal = match horizontal {
        Edge::Start => HorizontalAnchor::West,
        Edge::Middle => HorizontalAnchor::Center,
        Edge::End => HorizontalAnchor::East,
    };

    GravityOffset {
        gravity: Gravity::from_anchors(vertical, horizontal),
        x,
        y,
    }
}

enum Edge {
    Start,
    Middle,
    End,
}

fn infer_axis(start: f64, extent: f64, center: f64, container: f64, tolerance: f64) -> (Edge, f64) {
    let midline = container / 2.0;
    if (center - midline).abs() <= tolerance {
        // Unrounded, so `absolute_position` lands back on `start`
        return (Edge::Middle, start - (midline - extent / 2.0));
    }

    let to_start = start;
    let to_end = container - (start + extent);
    if to_start <= to_end {
        (Edge::Start, to_start.round())
    } else {
        (Edge::End, to_end.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_north_west_is_identity() {
        let p = absolute_position(20.0, 20.0, Gravity::NorthWest, 80.0, 40.0, Size::new(500.0, 900.0));
        assert_eq!(p, Placement { left: 20.0, top: 20.0 });
    }

    #[test]
    fn test_south_east_measures_from_far_edges() {
        let p = absolute_position(10.0, 10.0, Gravity::SouthEast, 101.0, 30.0, Size::new(300.0, 500.0));
        assert_eq!(p, Placement { left: 189.0, top: 460.0 });
    }

    #[test]
    fn test_center_offsets_from_midline() {
        let p = absolute_position(5.0, -10.0, Gravity::Center, 100.0, 50.0, Size::new(300.0, 250.0));
        assert_eq!(p.left, 105.0);
        assert_eq!(p.top, 90.0);
    }

    #[test]
    fn test_edge_midpoints_center_the_other_axis() {
        let container = Size::new(400.0, 200.0);
        let west = absolute_position(0.0, 0.0, Gravity::West, 40.0, 20.0, container);
        assert_eq!(west, Placement { left: 0.0, top: 90.0 });
        let south = absolute_position(0.0, 0.0, Gravity::South, 40.0, 20.0, container);
        assert_eq!(south, Placement { left: 180.0, top: 180.0 });
    }

    #[test]
    fn test_positions_round_half_away() {
        let p = absolute_position(0.0, 0.0, Gravity::Center, 5.0, 5.0, Size::new(10.0, 10.0));
        assert_eq!(p, Placement { left: 3.0, top: 3.0 });
    }

    #[test]
    fn test_infer_corner() {
        let inferred = infer_gravity(
            &Bounds::new(189.0, 460.0, 101.0, 30.0),
            Size::new(300.0, 500.0),
            DEFAULT_CENTER_TOLERANCE,
        );
        assert_eq!(inferred.gravity, Gravity::SouthEast);
        assert_eq!((inferred.x, inferred.y), (10.0, 10.0));
    }

    #[test]
    fn test_infer_single_edge_names() {
        let container = Size::new(400.0, 400.0);
        let top_middle = infer_gravity(&Bounds::new(180.0, 10.0, 40.0, 20.0), container, 20.0);
        assert_eq!(top_middle.gravity, Gravity::North);
        let left_middle = infer_gravity(&Bounds::new(10.0, 190.0, 40.0, 20.0), container, 20.0);
        assert_eq!(left_middle.gravity, Gravity::West);
        let centered = infer_gravity(&Bounds::new(185.0, 195.0, 40.0, 20.0), container, 20.0);
        assert_eq!(centered.gravity, Gravity::Center);
        assert_eq!((centered.x, centered.y), (5.0, 5.0));
    }

    #[test]
    fn test_centered_odd_extent_maps_back_exactly() {
        let container = Size::new(300.0, 250.0);
        let placed = absolute_position(0.0, 0.0, Gravity::Center, 50.0, 51.0, container);
        assert_eq!(placed, Placement { left: 125.0, top: 100.0 });

        let inferred = infer_gravity(&Bounds::new(placed.left, placed.top, 50.0, 51.0), container, 20.0);
        assert_eq!(inferred.gravity, Gravity::Center);
        assert_eq!((inferred.x, inferred.y), (0.0, 0.5));
        let again = absolute_position(inferred.x, inferred.y, inferred.gravity, 50.0, 51.0, container);
        assert_eq!(again, placed);
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let container = Size::new(400.0, 400.0);
        let bounds = Bounds::new(10.0, 160.0, 40.0, 20.0);
        assert_eq!(infer_gravity(&bounds, container, 20.0).gravity, Gravity::NorthWest);
        assert_eq!(infer_gravity(&bounds, container, 40.0).gravity, Gravity::West);
    }

    fn edge_offset() -> impl Strategy<Value = f64> {
        (0i32..=100).prop_map(f64::from)
    }

    fn centered_offset() -> impl Strategy<Value = f64> {
        (-15i32..=15).prop_map(f64::from)
    }

    proptest! {
        #[test]
        fn inverse_recovers_gravity_outside_tie_band(
            index in 0usize..9,
            edge_x in edge_offset(),
            edge_y in edge_offset(),
            mid_x in centered_offset(),
            mid_y in centered_offset(),
            width in 1i32..=200,
            height in 1i32..=200,
            container_w in 600i32..=1200,
            container_h in 600i32..=1200,
        ) {
            let gravity = Gravity::ALL[index];
            let x = if gravity.horizontal() == HorizontalAnchor::Center { mid_x } else { edge_x };
            let y = if gravity.vertical() == VerticalAnchor::Center { mid_y } else { edge_y };
            let (width, height) = (f64::from(width), f64::from(height));
            let container = Size::new(f64::from(container_w), f64::from(container_h));

            let placed = absolute_position(x, y, gravity, width, height, container);
            let bounds = Bounds::new(placed.left, placed.top, width, height);
            let inferred = infer_gravity(&bounds, container, DEFAULT_CENTER_TOLERANCE);

            prop_assert_eq!(inferred.gravity, gravity);
            prop_assert!((inferred.x - x).abs() <= 1.0);
            prop_assert!((inferred.y - y).abs() <= 1.0);

            let again = absolute_position(inferred.x, inferred.y, inferred.gravity, width, height, container);
            prop_assert_eq!(again, placed);
        }
    }
}
