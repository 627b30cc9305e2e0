use egui::{Color32, Pos2, pos2};

/// One step of a stroke's outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Starting point of the stroke
    MoveTo(Pos2),
    /// Quadratic curve from the current point through `ctrl` to `end`
    QuadTo { ctrl: Pos2, end: Pos2 },
    /// Straight segment closing the stroke
    LineTo(Pos2),
}

/// A single pointer-down to pointer-up drawing action
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    color: Color32,
    width: u32,
    path: Vec<PathSegment>,
}

impl Stroke {
    /// Start a stroke at `start`
    pub fn new(start: Pos2, color: Color32, width: u32) -> Self {
        Self {
            color,
            width,
            path: vec![PathSegment::MoveTo(start)],
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Whether the closing segment has been appended
    pub fn is_closed(&self) -> bool {
        matches!(self.path.last(), Some(PathSegment::LineTo(_)))
    }

    /// Number of smoothed curve segments
    pub fn curve_count(&self) -> usize {
        self.path
            .iter()
            .filter(|segment| matches!(segment, PathSegment::QuadTo { .. }))
            .count()
    }

    /// Smooth towards `point`, using `last` as control point and the midpoint as anchor
    pub(crate) fn quad_towards(&mut self, last: Pos2, point: Pos2) {
        debug_assert!(!self.is_closed());
        self.path.push(PathSegment::QuadTo {
            ctrl: last,
            end: pos2((last.x + point.x) / 2.0, (last.y + point.y) / 2.0),
        });
    }

    pub(crate) fn close_at(&mut self, last: Pos2) {
        if !self.is_closed() {
            self.path.push(PathSegment::LineTo(last));
        }
    }
}

/// Transient position of the stroke being drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeCursor {
    last: Pos2,
}

impl StrokeCursor {
    pub fn new(start: Pos2) -> Self {
        Self { last: start }
    }

    /// Last recorded point
    pub fn last(&self) -> Pos2 {
        self.last
    }

    /// Whether `point` moved far enough on either axis to be recorded
    pub fn accepts(&self, point: Pos2, tolerance: f32) -> bool {
        let dx = (point.x - self.last.x).abs();
        let dy = (point.y - self.last.y).abs();
        dx >= tolerance || dy >= tolerance
    }

    pub fn advance(&mut self, point: Pos2) {
        self.last = point;
    }
}
