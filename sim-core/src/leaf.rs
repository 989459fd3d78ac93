use crate::{
    surface::{Color, Surface},
    types::{Vector, heading_offset},
};

/// A single decorative stroke. Drawn once, never simulated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leaf {
    pub position: Vector,
    pub heading: f32,
    pub size: f32,
}

impl Leaf {
    pub fn new(position: Vector, heading: f32, size: f32) -> Self {
        Self {
            position,
            heading,
            size,
        }
    }

    /// Strokes the leaf `size` units along `heading` from `position`.
    pub fn render(&self, surface: &mut dyn Surface) {
        let tip = self.position + heading_offset(self.heading, self.size);
        surface.line(self.position, tip, 1.0, Color::FOLIAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Recorder;

    #[test]
    fn render_draws_one_thin_foliage_stroke() {
        let leaf = Leaf::new(Vector::new(10.0, 20.0), 0.0, 9.0);
        let mut rec = Recorder::new();

        leaf.render(&mut rec);

        assert_eq!(rec.segments.len(), 1);
        let s = rec.segments[0];
        assert_eq!(s.from, Vector::new(10.0, 20.0));
        assert_eq!(s.to, Vector::new(19.0, 20.0));
        assert_eq!(s.width, 1.0);
        assert_eq!(s.color, Color::FOLIAGE);
    }
}
