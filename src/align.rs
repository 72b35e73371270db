//! Edge and center alignment, size matching, and position swapping.
//!
//! Two families of alignment exist. [`align`] mirrors the host's own align
//! command: several shapes line up against the edge of their common bounding
//! box, a lone shape lines up against the slide. [`primary_align`] lines every
//! shape up against the first one the operator selected, so selection order
//! matters and no sorting happens.

use std::fmt;

use crate::error::{ArrangeError, Result};
use crate::geometry::{Axis, Rect, Shape, Size};

/// Edge or center line used as an alignment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 6] = [
        Edge::Left,
        Edge::Center,
        Edge::Right,
        Edge::Top,
        Edge::Middle,
        Edge::Bottom,
    ];

    pub fn axis(&self) -> Axis {
        match self {
            Edge::Left | Edge::Center | Edge::Right => Axis::Horizontal,
            Edge::Top | Edge::Middle | Edge::Bottom => Axis::Vertical,
        }
    }

    /// Coordinate of this edge on `rect`.
    pub fn reference(&self, rect: &Rect) -> f64 {
        let axis = self.axis();
        match self {
            Edge::Left | Edge::Top => rect.position(axis),
            Edge::Center | Edge::Middle => rect.center(axis),
            Edge::Right | Edge::Bottom => rect.trailing(axis),
        }
    }

    /// Coordinate of this edge on a slide whose origin is `(0, 0)`.
    pub fn slide_reference(&self, slide: Size) -> f64 {
        let extent = slide.extent(self.axis());
        match self {
            Edge::Left | Edge::Top => 0.0,
            Edge::Center | Edge::Middle => extent / 2.0,
            Edge::Right | Edge::Bottom => extent,
        }
    }

    /// Move `rect` along this edge's axis so its matching edge sits on `target`.
    pub fn place(&self, rect: &mut Rect, target: f64) {
        let axis = self.axis();
        let extent = rect.extent(axis);
        let position = match self {
            Edge::Left | Edge::Top => target,
            Edge::Center | Edge::Middle => target - extent / 2.0,
            Edge::Right | Edge::Bottom => target - extent,
        };
        rect.set_position(axis, position);
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Center => "center",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Middle => "middle",
            Edge::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which size a [`match_size`] call copies from the first shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub fn axis(&self) -> Axis {
        match self {
            Dimension::Width => Axis::Horizontal,
            Dimension::Height => Axis::Vertical,
        }
    }
}

/// Align shapes against their shared bounding box, or a single shape against the slide.
pub fn align(shapes: &mut [Shape], edge: Edge, slide: Size) -> Result<()> {
    let target = match shapes.len() {
        0 => {
            return Err(ArrangeError::InsufficientShapes {
                required: 1,
                found: 0,
            });
        }
        1 => edge.slide_reference(slide),
        _ => {
            let bounds = Rect::bounding(shapes.iter().map(|s| &s.rect)).ok_or(
                ArrangeError::InsufficientShapes {
                    required: 1,
                    found: 0,
                },
            )?;
            edge.reference(&bounds)
        }
    };

    for shape in shapes.iter_mut() {
        edge.place(&mut shape.rect, target);
    }
    Ok(())
}

/// Align every shape against the anchor, the first shape in selection order.
pub fn primary_align(shapes: &mut [Shape], edge: Edge) -> Result<()> {
    let (anchor, rest) = split_anchor(shapes)?;
    let target = edge.reference(&anchor.rect);
    for shape in rest {
        edge.place(&mut shape.rect, target);
    }
    Ok(())
}

/// Give every shape the anchor's width or height; positions stay put.
pub fn match_size(shapes: &mut [Shape], dimension: Dimension) -> Result<()> {
    let (anchor, rest) = split_anchor(shapes)?;
    let axis = dimension.axis();
    let extent = anchor.rect.extent(axis);
    for shape in rest {
        shape.rect.set_extent(axis, extent);
    }
    Ok(())
}

/// Exchange the top-left corners of exactly two shapes.
pub fn swap_positions(shapes: &mut [Shape]) -> Result<()> {
    match shapes {
        [a, b] => {
            let (left, top) = (a.rect.left, a.rect.top);
            a.rect.left = b.rect.left;
            a.rect.top = b.rect.top;
            b.rect.left = left;
            b.rect.top = top;
            Ok(())
        }
        _ => Err(ArrangeError::InsufficientShapes {
            required: 2,
            found: shapes.len(),
        }),
    }
}

fn split_anchor(shapes: &mut [Shape]) -> Result<(&Shape, &mut [Shape])> {
    let found = shapes.len();
    match shapes.split_first_mut() {
        Some((anchor, rest)) if !rest.is_empty() => Ok((&*anchor, rest)),
        _ => Err(ArrangeError::InsufficientShapes { required: 2, found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> Vec<Shape> {
        vec![
            Shape::new("anchor", Rect::new(100.0, 50.0, 40.0, 20.0)),
            Shape::new("wide", Rect::new(10.0, 200.0, 80.0, 10.0)),
            Shape::new("small", Rect::new(300.0, 5.0, 10.0, 30.0)),
        ]
    }

    const SLIDE: Size = Size::new(960.0, 540.0);

    #[test]
    fn align_left_uses_bounding_box() {
        let mut shapes = shapes();
        align(&mut shapes, Edge::Left, SLIDE).unwrap();
        assert!(shapes.iter().all(|s| s.rect.left == 10.0));
        assert_eq!(shapes[1].rect.top, 200.0);
    }

    #[test]
    fn align_bottom_uses_bounding_box() {
        let mut shapes = shapes();
        align(&mut shapes, Edge::Bottom, SLIDE).unwrap();
        assert!(shapes.iter().all(|s| s.rect.bottom() == 210.0));
    }

    #[test]
    fn align_single_shape_against_slide() {
        let mut single = vec![Shape::new("solo", Rect::new(5.0, 5.0, 60.0, 40.0))];
        align(&mut single, Edge::Center, SLIDE).unwrap();
        assert_eq!(single[0].rect.left, 450.0);

        align(&mut single, Edge::Bottom, SLIDE).unwrap();
        assert_eq!(single[0].rect.top, 500.0);
    }

    #[test]
    fn align_empty_selection_is_rejected() {
        let err = align(&mut [], Edge::Left, SLIDE).unwrap_err();
        assert!(matches!(
            err,
            ArrangeError::InsufficientShapes { found: 0, .. }
        ));
    }

    #[test]
    fn primary_align_center_uses_first_selected() {
        let mut shapes = shapes();
        primary_align(&mut shapes, Edge::Center).unwrap();
        assert_eq!(shapes[0].rect.left, 100.0);
        assert_eq!(shapes[1].rect.left, 80.0);
        assert_eq!(shapes[2].rect.left, 115.0);
    }

    #[test]
    fn primary_align_right_and_bottom() {
        let mut shapes = shapes();
        primary_align(&mut shapes, Edge::Right).unwrap();
        assert!(shapes.iter().all(|s| s.rect.right() == 140.0));

        primary_align(&mut shapes, Edge::Bottom).unwrap();
        assert!(shapes.iter().all(|s| s.rect.bottom() == 70.0));
        assert_eq!(shapes[2].rect.top, 40.0);
    }

    #[test]
    fn primary_align_needs_two_shapes() {
        let mut single = vec![Shape::new("solo", Rect::new(0.0, 0.0, 1.0, 1.0))];
        assert!(primary_align(&mut single, Edge::Top).is_err());
    }

    #[test]
    fn match_width_copies_anchor_extent() {
        let mut shapes = shapes();
        match_size(&mut shapes, Dimension::Width).unwrap();
        assert!(shapes.iter().all(|s| s.rect.width == 40.0));
        assert_eq!(shapes[1].rect.left, 10.0);
        assert_eq!(shapes[1].rect.height, 10.0);
    }

    #[test]
    fn swap_exchanges_corners_only() {
        let mut pair = vec![
            Shape::new("a", Rect::new(10.0, 20.0, 5.0, 6.0)),
            Shape::new("b", Rect::new(200.0, 5.0, 7.0, 8.0)),
        ];
        swap_positions(&mut pair).unwrap();
        assert_eq!(pair[0].rect, Rect::new(200.0, 5.0, 5.0, 6.0));
        assert_eq!(pair[1].rect, Rect::new(10.0, 20.0, 7.0, 8.0));
    }

    #[test]
    fn swap_requires_exactly_two() {
        let mut three = shapes();
        let before = three.clone();
        let err = swap_positions(&mut three).unwrap_err();
        assert!(matches!(
            err,
            ArrangeError::InsufficientShapes {
                required: 2,
                found: 3
            }
        ));
        assert_eq!(three, before);
    }
}
