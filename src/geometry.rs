use std::fmt;

/// Slide (or stage) dimensions measured in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Axis-aligned shape bounds in points, anchored at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Leading coordinate along `axis` (left or top).
    pub fn position(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Size along `axis` (width or height).
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Trailing coordinate along `axis` (right or bottom).
    pub fn trailing(&self, axis: Axis) -> f64 {
        self.position(axis) + self.extent(axis)
    }

    pub fn center(&self, axis: Axis) -> f64 {
        self.position(axis) + self.extent(axis) / 2.0
    }

    pub fn set_position(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.left = value,
            Axis::Vertical => self.top = value,
        }
    }

    pub fn set_extent(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Smallest rectangle covering every rect in `rects`, or `None` when empty.
    pub fn bounding<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let mut iter = rects.into_iter();
        let first = *iter.next()?;
        let (mut left, mut top, mut right, mut bottom) =
            (first.left, first.top, first.right(), first.bottom());
        for rect in iter {
            left = left.min(rect.left);
            top = top.min(rect.top);
            right = right.max(rect.right());
            bottom = bottom.max(rect.bottom());
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Dimension along which a spacing or alignment operation acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-assigned identifier for a shape, stable for the duration of one command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A selected shape: its identity plus current bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub rect: Rect,
}

impl Shape {
    pub fn new(id: impl Into<ShapeId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Shapes in host selection order.
pub type ShapeSequence = Vec<Shape>;
