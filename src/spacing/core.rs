use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{ArrangeError, Result};
use crate::geometry::{Axis, Shape, ShapeSequence};

use super::policy::{SpacingMode, SpacingRequest};

/// What the engine does when the requested gap leaves no room for the shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Apply the arithmetic as-is, producing zero or negative extents.
    #[default]
    Permit,
    /// Refuse with [`ArrangeError::DegenerateSpan`] and leave shapes untouched.
    Reject,
}

/// Stateless even-spacing / proportional-resize engine.
///
/// Shapes are sorted along the request axis, the span from the leading edge of
/// the first shape to the trailing edge of the last is measured, and the space
/// inside that span is redistributed so adjacent shapes sit exactly `gap`
/// apart. The orthogonal axis is never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacingEngine {
    degenerate: DegeneratePolicy,
}

impl SpacingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate
    }

    /// Space an owned sequence, returning it sorted along the request axis.
    pub fn apply(&self, mut shapes: ShapeSequence, request: &SpacingRequest) -> Result<ShapeSequence> {
        self.apply_in_place(&mut shapes, request)?;
        Ok(shapes)
    }

    /// Space `shapes` in place. On return the slice is sorted along the request axis.
    pub fn apply_in_place(&self, shapes: &mut [Shape], request: &SpacingRequest) -> Result<()> {
        if shapes.len() < 2 {
            return Err(ArrangeError::InsufficientShapes {
                required: 2,
                found: shapes.len(),
            });
        }
        if !request.gap.is_finite() {
            return Err(ArrangeError::InvalidGap(request.gap.to_string()));
        }

        let axis = request.axis;
        sort_along(shapes, axis);
        let span = span_of(shapes, axis);

        match request.mode {
            SpacingMode::Even => self.space_even(shapes, axis, span, request.gap),
            SpacingMode::PreserveFirst => self.space_preserve_first(shapes, axis, span, request.gap),
            SpacingMode::PreserveLast => self.space_preserve_last(shapes, axis, span, request.gap),
        }
    }

    fn space_even(&self, shapes: &mut [Shape], axis: Axis, span: f64, gap: f64) -> Result<()> {
        let count = shapes.len() as f64;
        let size = (span - (count - 1.0) * gap) / count;
        self.check_extent(axis, size)?;

        let origin = shapes[0].rect.position(axis);
        shapes[0].rect.set_extent(axis, size);
        for (idx, shape) in shapes.iter_mut().enumerate().skip(1) {
            shape.rect.set_extent(axis, size);
            shape.rect.set_position(axis, origin + (size + gap) * idx as f64);
        }
        Ok(())
    }

    fn space_preserve_first(
        &self,
        shapes: &mut [Shape],
        axis: Axis,
        span: f64,
        gap: f64,
    ) -> Result<()> {
        let count = shapes.len();
        let anchor = shapes[0].rect.extent(axis);
        let others: f64 = shapes[1..].iter().map(|s| s.rect.extent(axis)).sum();
        let increment = slack(span, count, gap, anchor, others);
        self.check_growth(&shapes[1..], axis, increment)?;

        for idx in 1..count {
            let prev = shapes[idx - 1].rect;
            let rect = &mut shapes[idx].rect;
            rect.set_extent(axis, rect.extent(axis) + increment);
            rect.set_position(axis, prev.trailing(axis) + gap);
        }
        Ok(())
    }

    fn space_preserve_last(
        &self,
        shapes: &mut [Shape],
        axis: Axis,
        span: f64,
        gap: f64,
    ) -> Result<()> {
        let count = shapes.len();
        let last = count - 1;
        let anchor = shapes[last].rect.extent(axis);
        let others: f64 = shapes[..last].iter().map(|s| s.rect.extent(axis)).sum();
        let increment = slack(span, count, gap, anchor, others);
        self.check_growth(&shapes[..last], axis, increment)?;

        let first = &mut shapes[0].rect;
        first.set_extent(axis, first.extent(axis) + increment);
        // The trailing anchor keeps the position it had after sorting.
        for idx in 1..last {
            let prev = shapes[idx - 1].rect;
            let rect = &mut shapes[idx].rect;
            rect.set_extent(axis, rect.extent(axis) + increment);
            rect.set_position(axis, prev.trailing(axis) + gap);
        }
        Ok(())
    }

    fn check_extent(&self, axis: Axis, value: f64) -> Result<()> {
        if self.degenerate == DegeneratePolicy::Reject && value <= 0.0 {
            return Err(ArrangeError::DegenerateSpan { axis, value });
        }
        Ok(())
    }

    fn check_growth(&self, resized: &[Shape], axis: Axis, increment: f64) -> Result<()> {
        if self.degenerate == DegeneratePolicy::Permit {
            return Ok(());
        }
        resized
            .iter()
            .map(|shape| shape.rect.extent(axis) + increment)
            .try_for_each(|value| self.check_extent(axis, value))
    }
}

/// Stable sort by leading coordinate along `axis`. Equal coordinates,
/// `-0.0` and `0.0` included, keep selection order.
pub fn sort_along(shapes: &mut [Shape], axis: Axis) {
    shapes.sort_by(|a, b| {
        a.rect
            .position(axis)
            .partial_cmp(&b.rect.position(axis))
            .unwrap_or(Ordering::Equal)
    });
}

/// Distance from the leading edge of the first shape to the trailing edge of
/// the last. Callers sort first.
pub fn span_of(shapes: &[Shape], axis: Axis) -> f64 {
    match (shapes.first(), shapes.last()) {
        (Some(first), Some(last)) => last.rect.trailing(axis) - first.rect.position(axis),
        _ => 0.0,
    }
}

/// Per-shape growth shared by the n-1 resized shapes of a preserve policy.
fn slack(span: f64, count: usize, gap: f64, anchor: f64, others: f64) -> f64 {
    let gaps = (count - 1) as f64 * gap;
    ((span - gaps) - anchor - others) / (count - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::spacing::SpacingPolicy;

    fn row(lefts: &[f64], widths: &[f64]) -> ShapeSequence {
        lefts
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (left, width))| {
                Shape::new(format!("s{idx}").as_str(), Rect::new(*left, 7.0, *width, 11.0))
            })
            .collect()
    }

    fn request(policy: SpacingPolicy, gap: f64) -> SpacingRequest {
        SpacingRequest::new(policy, gap).unwrap()
    }

    #[test]
    fn even_two_shapes() {
        let shapes = row(&[0.0, 100.0], &[50.0, 50.0]);
        let out = SpacingEngine::new()
            .apply(shapes, &request(SpacingPolicy::EvenHorizontal, 30.0))
            .unwrap();

        assert_eq!(out[0].rect, Rect::new(0.0, 7.0, 60.0, 11.0));
        assert_eq!(out[1].rect, Rect::new(90.0, 7.0, 60.0, 11.0));
    }

    #[test]
    fn preserve_first_keeps_anchor_width() {
        let shapes = row(&[0.0, 80.0, 150.0], &[40.0, 30.0, 30.0]);
        let out = SpacingEngine::new()
            .apply(
                shapes,
                &request(SpacingPolicy::EvenHorizontalPreserveFirst, 10.0),
            )
            .unwrap();

        assert_eq!(out[0].rect.left, 0.0);
        assert_eq!(out[0].rect.width, 40.0);
        assert_eq!(out[1].rect.left, 50.0);
        assert_eq!(out[1].rect.width, 60.0);
        assert_eq!(out[2].rect.left, 120.0);
        assert_eq!(out[2].rect.width, 60.0);
    }

    #[test]
    fn preserve_last_leaves_last_shape_in_place() {
        let shapes = row(&[0.0, 80.0, 150.0], &[40.0, 30.0, 30.0]);
        let out = SpacingEngine::new()
            .apply(
                shapes,
                &request(SpacingPolicy::EvenHorizontalPreserveLast, 10.0),
            )
            .unwrap();

        // span 180, increment ((180 - 20) - 30 - 70) / 2 = 30
        assert_eq!(out[0].rect.width, 70.0);
        assert_eq!(out[1].rect.left, 80.0);
        assert_eq!(out[1].rect.width, 60.0);
        assert_eq!(out[2].rect.left, 150.0);
        assert_eq!(out[2].rect.width, 30.0);
    }

    #[test]
    fn shapes_are_sorted_before_spacing() {
        let mut shapes = row(&[100.0, 0.0], &[50.0, 50.0]);
        shapes[0].id = "right".into();
        shapes[1].id = "left".into();
        let out = SpacingEngine::new()
            .apply(shapes, &request(SpacingPolicy::EvenHorizontal, 30.0))
            .unwrap();

        assert_eq!(out[0].id.as_str(), "left");
        assert_eq!(out[0].rect.left, 0.0);
        assert_eq!(out[1].id.as_str(), "right");
        assert_eq!(out[1].rect.left, 90.0);
    }

    #[test]
    fn tied_positions_keep_selection_order() {
        let shapes = vec![
            Shape::new("a", Rect::new(0.0, 0.0, 20.0, 10.0)),
            Shape::new("b", Rect::new(-0.0, 0.0, 20.0, 10.0)),
            Shape::new("c", Rect::new(100.0, 0.0, 20.0, 10.0)),
        ];
        let out = SpacingEngine::new()
            .apply(shapes, &request(SpacingPolicy::EvenHorizontal, 5.0))
            .unwrap();

        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(out[0].rect.left, 0.0);
        assert!(out[0].rect.left.is_sign_positive());
    }

    #[test]
    fn equal_positions_sort_stably_on_both_axes() {
        let mut shapes = vec![
            Shape::new("late", Rect::new(50.0, 30.0, 1.0, 1.0)),
            Shape::new("first", Rect::new(10.0, 30.0, 1.0, 1.0)),
            Shape::new("second", Rect::new(10.0, 30.0, 1.0, 1.0)),
        ];
        sort_along(&mut shapes, Axis::Horizontal);
        let ids: Vec<&str> = shapes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "late"]);

        sort_along(&mut shapes, Axis::Vertical);
        let ids: Vec<&str> = shapes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "late"]);
    }

    #[test]
    fn vertical_spacing_leaves_horizontal_fields_alone() {
        let shapes = vec![
            Shape::new("a", Rect::new(3.0, 0.0, 9.0, 20.0)),
            Shape::new("b", Rect::new(17.0, 50.0, 4.0, 20.0)),
        ];
        let out = SpacingEngine::new()
            .apply(shapes, &request(SpacingPolicy::EvenVertical, 10.0))
            .unwrap();

        assert_eq!(out[0].rect, Rect::new(3.0, 0.0, 9.0, 30.0));
        assert_eq!(out[1].rect, Rect::new(17.0, 40.0, 4.0, 30.0));
    }

    #[test]
    fn fewer_than_two_shapes_is_rejected() {
        let err = SpacingEngine::new()
            .apply(
                row(&[0.0], &[10.0]),
                &request(SpacingPolicy::EvenHorizontal, 5.0),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ArrangeError::InsufficientShapes {
                required: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn oversized_gap_is_permitted_by_default() {
        let out = SpacingEngine::new()
            .apply(
                row(&[0.0, 50.0], &[10.0, 10.0]),
                &request(SpacingPolicy::EvenHorizontal, 100.0),
            )
            .unwrap();
        // span 60, size (60 - 100) / 2 = -20
        assert_eq!(out[0].rect.width, -20.0);
        assert_eq!(out[1].rect.left, 80.0);
    }

    #[test]
    fn oversized_gap_is_rejected_when_configured() {
        let engine = SpacingEngine::new().with_degenerate_policy(DegeneratePolicy::Reject);
        let mut shapes = row(&[0.0, 50.0, 70.0], &[10.0, 10.0, 10.0]);
        let before = shapes.clone();
        let err = engine
            .apply_in_place(
                &mut shapes,
                &request(SpacingPolicy::EvenHorizontalPreserveFirst, 60.0),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ArrangeError::DegenerateSpan {
                axis: Axis::Horizontal,
                ..
            }
        ));
        assert_eq!(shapes, before);
    }

    #[test]
    fn negative_gap_overlaps_shapes() {
        let out = SpacingEngine::new()
            .apply(
                row(&[0.0, 100.0], &[50.0, 50.0]),
                &request(SpacingPolicy::EvenHorizontal, -10.0),
            )
            .unwrap();
        assert_eq!(out[0].rect.width, 80.0);
        assert_eq!(out[1].rect.left, 70.0);
    }
}
