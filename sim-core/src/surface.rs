//! Drawing surface contract and a recording implementation.

use crate::types::Vector;

/// Opaque RGB stroke colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Branch stroke colour (`#621`).
    pub const WOOD: Color = Color::rgb(0x66, 0x22, 0x11);
    /// Leaf stroke colour (`#040`).
    pub const FOLIAGE: Color = Color::rgb(0x00, 0x44, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A raster target the simulation draws onto.
///
/// Coordinates are canvas pixels with y pointing down, one-to-one with
/// walker positions. Drawing never fails.
pub trait Surface {
    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Strokes a straight segment from `from` to `to`.
    fn line(&mut self, from: Vector, to: Vector, width: f32, color: Color);
}

/// One recorded stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vector,
    pub to: Vector,
    pub width: f32,
    pub color: Color,
}

/// Surface that keeps every stroke in memory instead of rasterizing it.
///
/// Useful for headless runs and for asserting on what was drawn.
#[derive(Debug, Default)]
pub struct Recorder {
    pub segments: Vec<Segment>,
    pub clears: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments drawn with `color`, in drawing order.
    pub fn strokes_of(&self, color: Color) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.color == color)
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.segments.clear();
        self.clears += 1;
    }

    fn line(&mut self, from: Vector, to: Vector, width: f32, color: Color) {
        self.segments.push(Segment {
            from,
            to,
            width,
            color,
        });
    }
}
