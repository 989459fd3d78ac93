use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;

use crate::error::ConfigError;

/// How far above 1, in decay steps, a size still counts as spent.
/// Covers the drift of subtracting an inexact `decay` hundreds of times.
const SPENT_SLACK: f32 = 0.01;

/// Tuning constants for the growth rules.
///
/// [`GrowthConfig::default`] reproduces the classic look: a size-10
/// trunk three quarters down the canvas that fans out into thinning
/// branches covered in short leaf strokes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthConfig {
    /// Distance a walker travels per frame.
    pub step_len: f32,
    /// Size lost per frame.
    pub decay: f32,
    /// Per-frame probability of emitting a leaf.
    pub leaf_chance: f32,
    /// Per-frame probability of emitting a child branch.
    pub branch_chance: f32,
    /// Leaf length before the parent's size is added.
    pub leaf_base_size: f32,
    /// Largest leaf deviation from the parent heading (radians).
    pub leaf_spread: f32,
    /// Child size as a fraction of the parent size.
    pub child_scale: f32,
    /// Largest deviation of a non-root child from its parent (radians).
    pub branch_spread: f32,
    /// Largest deviation of a root child from straight down (radians).
    pub root_fan: f32,
    pub root_size: f32,
    /// Root position as fractions of the canvas width and height.
    pub root_anchor: Vec2,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            step_len: 1.2,
            decay: 0.025,
            leaf_chance: 0.8,
            branch_chance: 0.2,
            leaf_base_size: 8.0,
            leaf_spread: FRAC_PI_4,
            child_scale: 0.6,
            branch_spread: FRAC_PI_4,
            root_fan: FRAC_PI_2,
            root_size: 10.0,
            root_anchor: Vec2::new(0.5, 0.75),
        }
    }
}

impl GrowthConfig {
    /// Checks that every walker is guaranteed to die and every draw is a
    /// real probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_len.is_finite() && self.step_len > 0.0) {
            return Err(ConfigError::StepLength(self.step_len));
        }
        if !(self.decay.is_finite() && self.decay > 0.0) {
            return Err(ConfigError::Decay(self.decay));
        }
        check_chance("leaf chance", self.leaf_chance)?;
        check_chance("branch chance", self.branch_chance)?;
        if !(self.child_scale > 0.0 && self.child_scale < 1.0) {
            return Err(ConfigError::ChildScale(self.child_scale));
        }
        if !(self.root_size.is_finite() && self.root_size > 1.0) {
            return Err(ConfigError::RootSize(self.root_size));
        }
        // A decay below the root's float resolution never shrinks it.
        if self.root_size - self.decay >= self.root_size {
            return Err(ConfigError::Decay(self.decay));
        }
        let a = self.root_anchor;
        if !((0.0..=1.0).contains(&a.x) && (0.0..=1.0).contains(&a.y)) {
            return Err(ConfigError::RootAnchor(a.x, a.y));
        }
        check_finite("leaf base size", self.leaf_base_size)?;
        check_finite("leaf spread", self.leaf_spread)?;
        check_finite("branch spread", self.branch_spread)?;
        check_finite("root fan", self.root_fan)?;
        Ok(())
    }

    /// Whether a walker of `size` has reached the end of its life.
    ///
    /// The threshold is 1, widened by a hundredth of a decay step so that
    /// a size which should land exactly on 1 still does.
    pub fn is_spent(&self, size: f32) -> bool {
        size <= 1.0 + self.decay * SPENT_SLACK
    }

    /// Number of growth frames a walker of `size` gets before it dies:
    /// `ceil((size - 1) / decay)`.
    pub fn lifetime(&self, size: f32) -> u32 {
        if self.is_spent(size) {
            0
        } else {
            ((size - 1.0) / self.decay - SPENT_SLACK).ceil() as u32
        }
    }
}

fn check_chance(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Chance { name, value })
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GrowthConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_configs_that_never_terminate() {
        let mut cfg = GrowthConfig::default();
        cfg.decay = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::Decay(0.0)));

        let mut cfg = GrowthConfig::default();
        cfg.child_scale = 1.0;
        assert_eq!(cfg.validate(), Err(ConfigError::ChildScale(1.0)));
    }

    #[test]
    fn rejects_out_of_range_chances_and_anchor() {
        let mut cfg = GrowthConfig::default();
        cfg.branch_chance = 1.5;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Chance {
                name: "branch chance",
                value: 1.5
            })
        );

        let mut cfg = GrowthConfig::default();
        cfg.root_anchor = Vec2::new(0.5, -0.1);
        assert!(matches!(cfg.validate(), Err(ConfigError::RootAnchor(..))));

        let mut cfg = GrowthConfig::default();
        cfg.leaf_spread = f32::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::NotFinite { .. })));
    }

    #[test]
    fn lifetime_counts_growth_frames() {
        let cfg = GrowthConfig {
            decay: 0.25,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.lifetime(3.0), 8);
        assert_eq!(cfg.lifetime(3.1), 9);
        assert_eq!(cfg.lifetime(1.0), 0);
    }

    #[test]
    fn default_decay_lifetimes_are_whole_steps() {
        let cfg = GrowthConfig::default();
        assert_eq!(cfg.lifetime(10.0), 360);
        assert_eq!(cfg.lifetime(6.0), 200);
        assert_eq!(cfg.lifetime(1.0 + 0.025 * 0.001), 0);
        assert!(cfg.is_spent(1.0000086));
        assert!(!cfg.is_spent(1.01));
    }

    #[test]
    fn rejects_decay_too_small_to_shrink_the_root() {
        let mut cfg = GrowthConfig::default();
        cfg.decay = 1e-9;
        assert_eq!(cfg.validate(), Err(ConfigError::Decay(1e-9)));
    }
}
