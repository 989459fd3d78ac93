use glam::Vec2;

/// Position or offset in canvas space.
///
/// `Vec2` is `Copy`, so every binding is an independent clone and
/// `+=` / `+` give in-place and chained addition.
pub type Vector = Vec2;

/// Identifier for a walker in a [`crate::population::Population`].
///
/// Ids are handed out in spawn order and are only meaningful within
/// one run; [`crate::simulation::Simulation::reset`] starts over at 0.
pub type WalkerId = u64;

/// Offset of `length` units along `heading` (radians, y pointing down).
pub fn heading_offset(heading: f32, length: f32) -> Vector {
    Vec2::new(heading.cos() * length, heading.sin() * length)
}
