use std::{env, str::FromStr};

// Runtime settings for the viewer (not growth tuning).

pub const DEFAULT_CANVAS_WIDTH: u32 = 960;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 720;

/// Width reserved next to the canvas for the side panel.
pub const SIDE_PANEL_WIDTH: f32 = 240.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Fixed seed; a fresh one is drawn per launch when absent.
    pub seed: Option<u64>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl Settings {
    /// Reads `TREE_SEED`, `TREE_CANVAS_WIDTH` and `TREE_CANVAS_HEIGHT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup. Missing or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: parse(&lookup, "TREE_SEED"),
            canvas_width: parse(&lookup, "TREE_CANVAS_WIDTH")
                .filter(|&w| w > 0)
                .unwrap_or(defaults.canvas_width),
            canvas_height: parse(&lookup, "TREE_CANVAS_HEIGHT")
                .filter(|&h| h > 0)
                .unwrap_or(defaults.canvas_height),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
