//! Raster canvas the tree is painted onto.
//!
//! The simulation draws incrementally and never repaints old strokes,
//! so the viewer keeps the pixels in an [`RgbaImage`] and only uploads
//! them to the GPU when something changed.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_antialiased_line_segment_mut, draw_filled_circle_mut},
    pixelops::interpolate,
};
use sim_core::surface::{Color, Surface};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub struct Canvas {
    image: RgbaImage,
    dirty: bool,
}

impl Canvas {
    /// Creates a blank canvas of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BACKGROUND),
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Returns whether anything was drawn since the last call, and resets
    /// the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Copies the pixels into an egui image for texture upload.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.image.width() as usize, self.image.height() as usize],
            self.image.as_raw(),
        )
    }
}

fn to_pixel(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

fn to_point(p: Vec2) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

impl Surface for Canvas {
    fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = BACKGROUND;
        }
        self.dirty = true;
    }

    /// Hairlines are anti-aliased; wider strokes are stamped as discs
    /// every pixel along the segment, which gives round caps.
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let pixel = to_pixel(color);

        if width <= 1.0 {
            draw_antialiased_line_segment_mut(
                &mut self.image,
                to_point(from),
                to_point(to),
                pixel,
                interpolate,
            );
        } else {
            let radius = (width * 0.5).round().max(1.0) as i32;
            let stamps = (to - from).length().ceil().max(1.0) as usize;
            for i in 0..=stamps {
                let p = from.lerp(to, i as f32 / stamps as f32);
                draw_filled_circle_mut(&mut self.image, to_point(p), radius, pixel);
            }
        }
        self.dirty = true;
    }
}
