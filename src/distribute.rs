use crate::error::{ArrangeError, Result};
use crate::geometry::{Axis, Shape, Size};
use crate::spacing::{sort_along, span_of};

/// Spread shapes so neighbouring gaps along `axis` are equal.
///
/// With three or more shapes the first and last by leading coordinate stay
/// where they are and the inner ones move; sizes never change. The free space
/// is measured up to the trailing edge of the last shape, not the bounding
/// box, so inner shapes wider than that space get a negative gap and may move
/// before the first shape. A single shape is centered on the slide instead.
/// Two shapes have nothing to distribute.
pub fn distribute(shapes: &mut [Shape], axis: Axis, slide: Size) -> Result<()> {
    match shapes.len() {
        1 => {
            let rect = &mut shapes[0].rect;
            let centered = (slide.extent(axis) - rect.extent(axis)) / 2.0;
            rect.set_position(axis, centered);
            Ok(())
        }
        found if found < 3 => Err(ArrangeError::InsufficientShapes {
            required: 3,
            found,
        }),
        count => {
            sort_along(shapes, axis);
            let occupied: f64 = shapes.iter().map(|s| s.rect.extent(axis)).sum();
            let gap = (span_of(shapes, axis) - occupied) / (count - 1) as f64;
            for idx in 1..count - 1 {
                let prev = shapes[idx - 1].rect;
                shapes[idx].rect.set_position(axis, prev.trailing(axis) + gap);
            }
            Ok(())
        }
    }
}
