//! Row-wrapping flow layout with weighted grow and shrink.
//!
//! Items are placed left to right and wrap onto a new row when the remaining
//! width cannot fit the next item. Within each row the surplus or deficit
//! against the available width is distributed over the members in
//! proportion to their grow/shrink weights, clamped to each item's min/max
//! box. Rows stack from the top; both axes are start-aligned.

use std::ops::Range;

use smallvec::SmallVec;
use thiserror::Error;

use crate::tree::Bounds;

const EPSILON: f64 = 1e-6;

/// Size constraints and weights of one flow item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowItem {
    /// Preferred width before distribution
    pub width: f64,
    /// Preferred height
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
    /// Share of a row surplus this item absorbs (0 = don't grow)
    pub grow: f64,
    /// Share of a row deficit this item absorbs (0 = don't shrink)
    pub shrink: f64,
    /// Margin on all four sides
    pub margin: f64,
    /// Locked width / height ratio
    pub aspect_ratio: Option<f64>,
    /// When min and max conflict, keep the minimum instead of the maximum
    pub min_wins: bool,
}

impl FlowItem {
    /// An unconstrained item with the given preferred size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            min_width: 0.0,
            min_height: 0.0,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
            grow: 0.0,
            shrink: 1.0,
            margin: 0.0,
            aspect_ratio: None,
            min_wins: false,
        }
    }

    pub fn with_min(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn with_max(mut self, width: f64, height: f64) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    pub fn with_weights(mut self, grow: f64, shrink: f64) -> Self {
        self.grow = grow;
        self.shrink = shrink;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    pub fn with_min_wins(mut self, min_wins: bool) -> Self {
        self.min_wins = min_wins;
        self
    }

    fn clamp_width(&self, width: f64) -> f64 {
        clamp_extent(width, self.min_width, self.max_width, self.min_wins)
    }

    fn clamp_height(&self, height: f64) -> f64 {
        clamp_extent(height, self.min_height, self.max_height, self.min_wins)
    }

    fn validate(&self, index: usize) -> Result<(), FlowError> {
        let finite_non_negative = [
            ("width", self.width),
            ("height", self.height),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("grow", self.grow),
            ("shrink", self.shrink),
            ("margin", self.margin),
        ];
        for (field, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FlowError::InvalidItem { index, field });
            }
        }
        for (field, value) in [("max_width", self.max_width), ("max_height", self.max_height)] {
            if value.is_nan() || value < 0.0 {
                return Err(FlowError::InvalidItem { index, field });
            }
        }
        if let Some(ratio) = self.aspect_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(FlowError::InvalidItem {
                    index,
                    field: "aspect_ratio",
                });
            }
        }
        Ok(())
    }
}

fn clamp_extent(value: f64, min: f64, max: f64, min_wins: bool) -> f64 {
    if min > max {
        return if min_wins { min } else { max };
    }
    value.max(min).min(max)
}

/// Errors from a flow computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("available width must be finite and positive, got {0}")]
    InvalidAvailableWidth(f64),

    #[error("flow item {index} has an invalid {field}")]
    InvalidItem { index: usize, field: &'static str },

    #[error("flow item {index} resolved to a non-finite box")]
    NonFinite { index: usize },
}

/// Result of a flow computation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutcome {
    /// Border boxes (excluding margins), in item order
    pub bounds: Vec<Bounds>,
    /// Number of rows the items wrapped into
    pub rows: usize,
    /// Total height of all rows including margins
    pub content_height: f64,
}

/// Row-wrapping flow configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    /// Width rows must fit into
    pub available_width: f64,
}

impl FlowLayout {
    pub fn new(available_width: f64) -> Self {
        Self { available_width }
    }

    /// Compute boxes for `items`.
    pub fn layout(&self, items: &[FlowItem]) -> Result<FlowOutcome, FlowError> {
        if !self.available_width.is_finite() || self.available_width <= 0.0 {
            return Err(FlowError::InvalidAvailableWidth(self.available_width));
        }
        for (index, item) in items.iter().enumerate() {
            item.validate(index)?;
        }

        let mut ctx = FlowContext::new(items.len());
        ctx.break_rows(items, self.available_width);

        let mut bounds = vec![Bounds::default(); items.len()];
        let mut y = 0.0_f64;

        for row in ctx.rows.clone() {
            ctx.resolve_row_widths(items, row.clone(), self.available_width);

            let mut x = 0.0_f64;
            let mut row_height = 0.0_f64;
            for i in row {
                let item = &items[i];
                let width = ctx.widths[i];
                let height = match item.aspect_ratio {
                    Some(ratio) => item.clamp_height(width / ratio),
                    None => item.clamp_height(item.height),
                };

                bounds[i] = Bounds::new(x + item.margin, y + item.margin, width, height);
                x += width + 2.0 * item.margin;
                row_height = row_height.max(height + 2.0 * item.margin);
            }

            y += row_height;
        }

        if let Some(index) = bounds.iter().position(|b| !b.is_finite()) {
            return Err(FlowError::NonFinite { index });
        }

        Ok(FlowOutcome {
            bounds,
            rows: ctx.rows.len(),
            content_height: y,
        })
    }
}

/// Scratch space for a single flow computation, dropped when it returns.
struct FlowContext {
    rows: SmallVec<[Range<usize>; 8]>,
    widths: Vec<f64>,
    frozen: Vec<bool>,
}

impl FlowContext {
    fn new(len: usize) -> Self {
        Self {
            rows: SmallVec::new(),
            widths: vec![0.0; len],
            frozen: vec![false; len],
        }
    }

    /// Split items into rows. A row always holds at least one item, so an
    /// item wider than the available width gets a row of its own.
    fn break_rows(&mut self, items: &[FlowItem], available_width: f64) {
        let mut start = 0;
        let mut x = 0.0_f64;

        for (i, item) in items.iter().enumerate() {
            let outer = item.clamp_width(item.width) + 2.0 * item.margin;
            if i > start && x + outer > available_width + EPSILON {
                self.rows.push(start..i);
                start = i;
                x = 0.0;
            }
            x += outer;
        }

        if start < items.len() {
            self.rows.push(start..items.len());
        }
    }

    /// Distribute a row's free space by weight until no member hits a bound.
    fn resolve_row_widths(&mut self, items: &[FlowItem], row: Range<usize>, available_width: f64) {
        let margins: f64 = items[row.clone()].iter().map(|item| 2.0 * item.margin).sum();
        for i in row.clone() {
            self.widths[i] = items[i].clamp_width(items[i].width);
            self.frozen[i] = false;
        }

        for _ in 0..=row.len() {
            let used: f64 = self.widths[row.clone()].iter().sum();
            let free = available_width - margins - used;
            if free.abs() < EPSILON {
                break;
            }

            let growing = free > 0.0;
            let weight = |item: &FlowItem| if growing { item.grow } else { item.shrink };
            let total_weight: f64 = row
                .clone()
                .filter(|&i| !self.frozen[i])
                .map(|i| weight(&items[i]))
                .sum();
            if total_weight <= 0.0 {
                break;
            }

            let mut clamped = false;
            for i in row.clone() {
                if self.frozen[i] {
                    continue;
                }
                let share = weight(&items[i]);
                if share <= 0.0 {
                    self.frozen[i] = true;
                    continue;
                }
                let target = self.widths[i] + free * share / total_weight;
                let resolved = items[i].clamp_width(target);
                if (resolved - target).abs() > EPSILON {
                    self.frozen[i] = true;
                    clamped = true;
                }
                self.widths[i] = resolved;
            }

            if !clamped {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(width: f64, height: f64) -> FlowItem {
        FlowItem::new(width, height).with_weights(0.0, 0.0)
    }

    #[test]
    fn test_items_share_a_row_when_they_fit() {
        let outcome = FlowLayout::new(120.0)
            .layout(&[fixed(50.0, 30.0), fixed(50.0, 20.0)])
            .unwrap();

        assert_eq!(outcome.rows, 1);
        assert!((outcome.bounds[0].x - 0.0).abs() < 0.001);
        assert!((outcome.bounds[1].x - 50.0).abs() < 0.001);
        assert!((outcome.content_height - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_wrap_to_next_row() {
        let items = [
            fixed(50.0, 30.0).with_margin(5.0),
            fixed(50.0, 30.0).with_margin(5.0),
            fixed(50.0, 30.0).with_margin(5.0),
        ];
        let outcome = FlowLayout::new(120.0).layout(&items).unwrap();

        assert_eq!(outcome.rows, 2);
        // First row: items 0 and 1 (60 + 60 = 120)
        assert!((outcome.bounds[0].x - 5.0).abs() < 0.001);
        assert!((outcome.bounds[1].x - 65.0).abs() < 0.001);
        assert!((outcome.bounds[1].y - 5.0).abs() < 0.001);
        // Second row: item 2
        assert!((outcome.bounds[2].x - 5.0).abs() < 0.001);
        assert!((outcome.bounds[2].y - 45.0).abs() < 0.001); // 40 row + 5 margin
    }

    #[test]
    fn test_grow_by_weight() {
        let items = [
            FlowItem::new(50.0, 10.0).with_weights(1.0, 0.0),
            FlowItem::new(50.0, 10.0).with_weights(3.0, 0.0),
        ];
        let outcome = FlowLayout::new(180.0).layout(&items).unwrap();

        // 80 surplus split 1:3
        assert!((outcome.bounds[0].width - 70.0).abs() < 0.001);
        assert!((outcome.bounds[1].width - 110.0).abs() < 0.001);
    }

    #[test]
    fn test_grow_respects_max_and_redistributes() {
        let items = [
            FlowItem::new(50.0, 10.0).with_weights(1.0, 0.0).with_max(60.0, 100.0),
            FlowItem::new(50.0, 10.0).with_weights(1.0, 0.0),
        ];
        let outcome = FlowLayout::new(200.0).layout(&items).unwrap();

        // 100 surplus wants 50 each; the first item stops at 60 and the
        // second takes the remainder
        assert!((outcome.bounds[0].width - 60.0).abs() < 0.001);
        assert!((outcome.bounds[1].width - 140.0).abs() < 0.001);
    }

    #[test]
    fn test_rows_break_on_preferred_width() {
        let items = [
            FlowItem::new(100.0, 10.0).with_min(10.0, 0.0),
            FlowItem::new(100.0, 10.0).with_min(10.0, 0.0),
        ];
        let outcome = FlowLayout::new(150.0).layout(&items).unwrap();

        // Shrinking could fit both on one row, but wrapping is decided first
        assert_eq!(outcome.rows, 2);
        assert!((outcome.bounds[0].width - 100.0).abs() < 0.001);
        assert!((outcome.bounds[1].y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_oversized_item_shrinks_alone() {
        let items = [FlowItem::new(300.0, 10.0).with_weights(0.0, 1.0).with_min(50.0, 0.0)];
        let outcome = FlowLayout::new(100.0).layout(&items).unwrap();
        assert!((outcome.bounds[0].width - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_shrink_overflows() {
        let items = [fixed(300.0, 10.0)];
        let outcome = FlowLayout::new(100.0).layout(&items).unwrap();
        assert!((outcome.bounds[0].width - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_aspect_ratio_locks_height() {
        let items = [FlowItem::new(200.0, 100.0)
            .with_weights(0.0, 1.0)
            .with_aspect_ratio(2.0)];
        let outcome = FlowLayout::new(100.0).layout(&items).unwrap();
        assert!((outcome.bounds[0].width - 100.0).abs() < 0.001);
        assert!((outcome.bounds[0].height - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_min_max_conflict() {
        let soft = fixed(40.0, 40.0).with_min(60.0, 60.0).with_max(30.0, 30.0);
        let hard = soft.with_min_wins(true);
        let outcome = FlowLayout::new(500.0).layout(&[soft, hard]).unwrap();
        assert!((outcome.bounds[0].width - 30.0).abs() < 0.001);
        assert!((outcome.bounds[1].width - 60.0).abs() < 0.001);
        assert!((outcome.bounds[1].height - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_shorter_items_stay_at_row_top() {
        let items = [fixed(50.0, 40.0).with_margin(2.0), fixed(50.0, 20.0).with_margin(2.0)];
        let outcome = FlowLayout::new(200.0).layout(&items).unwrap();
        assert!((outcome.bounds[1].y - 2.0).abs() < 0.001);
        assert!((outcome.bounds[1].height - 20.0).abs() < 0.001);
        assert!((outcome.content_height - 44.0).abs() < 0.001);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            FlowLayout::new(0.0).layout(&[]),
            Err(FlowError::InvalidAvailableWidth(0.0))
        );
        let bad = FlowItem::new(f64::NAN, 10.0);
        assert_eq!(
            FlowLayout::new(100.0).layout(&[bad]),
            Err(FlowError::InvalidItem { index: 0, field: "width" })
        );
        let bad_ratio = FlowItem::new(10.0, 10.0).with_aspect_ratio(0.0);
        assert!(FlowLayout::new(100.0).layout(&[bad_ratio]).is_err());
    }

    #[test]
    fn test_empty() {
        let outcome = FlowLayout::new(100.0).layout(&[]).unwrap();
        assert!(outcome.bounds.is_empty());
        assert_eq!(outcome.rows, 0);
    }
}
