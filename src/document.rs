use crate::stroke::Stroke;

/// Ordered list of strokes; later strokes are drawn on top.
///
/// Strokes are only ever appended or popped from the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    strokes: Vec<Stroke>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub(crate) fn last_stroke_mut(&mut self) -> Option<&mut Stroke> {
        self.strokes.last_mut()
    }

    pub fn remove_last_stroke(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }
}
