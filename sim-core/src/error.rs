use thiserror::Error;

/// Reasons a [`crate::config::GrowthConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("step length must be finite and positive, got {0}")]
    StepLength(f32),

    #[error("decay must be finite and positive or walkers never die, got {0}")]
    Decay(f32),

    #[error("{name} must be a probability in [0, 1], got {value}")]
    Chance { name: &'static str, value: f32 },

    #[error("child scale must lie in (0, 1) or growth never ends, got {0}")]
    ChildScale(f32),

    #[error("root size must be finite and greater than 1, got {0}")]
    RootSize(f32),

    #[error("root anchor must be a canvas fraction in [0, 1], got ({0}, {1})")]
    RootAnchor(f32, f32),

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("canvas size must be non-zero, got {0}x{1}")]
    CanvasSize(u32, u32),
}
