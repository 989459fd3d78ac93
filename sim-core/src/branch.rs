//! The walker: a branch tip that crawls, thins out and spawns.

use rand::Rng;

use crate::{
    events::{Frame, GrowthListener},
    surface::Color,
    types::{Vector, WalkerId, heading_offset},
};

/// Lifecycle of a [`Branch`]. `Dead` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkerState {
    Alive,
    Dead,
}

/// A growing branch tip.
///
/// Each call to [`Branch::render`] is one frame of growth: draw a short
/// stroke, shrink, maybe ask for a leaf or a child, then step forward.
/// The walker is alive until its size is spent (see
/// [`GrowthConfig::is_spent`](crate::config::GrowthConfig::is_spent)).
#[derive(Clone, Debug)]
pub struct Branch {
    id: WalkerId,
    depth: u32,
    state: WalkerState,
    pub position: Vector,
    /// Direction of travel in radians.
    pub heading: f32,
    pub size: f32,
}

impl Branch {
    pub fn new(id: WalkerId, position: Vector, heading: f32, size: f32, depth: u32) -> Self {
        Self {
            id,
            depth,
            state: WalkerState::Alive,
            position,
            heading,
            size,
        }
    }

    pub fn id(&self) -> WalkerId {
        self.id
    }

    /// Generation count from the root (depth 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// `true` until the walker has emitted its `die` event.
    pub fn is_alive(&self) -> bool {
        self.state == WalkerState::Alive
    }

    /// Advances the walker by one frame and reports events to `listener`.
    ///
    /// 1. A walker whose size is already spent dies without drawing.
    /// 2. Otherwise it strokes `step_len` along its heading with a width
    ///    equal to its size, then loses `decay` size.
    /// 3. It rolls for a leaf, then independently for a child branch.
    ///    Listeners see the position from before the step.
    /// 4. It moves to the end of the stroke.
    /// 5. If that frame spent its size, it dies right away.
    ///
    /// Rendering a dead walker does nothing.
    ///
    /// ### Returns
    /// The state after the frame.
    pub fn render(
        &mut self,
        frame: &mut Frame<'_>,
        listener: &mut dyn GrowthListener,
    ) -> WalkerState {
        if self.state == WalkerState::Dead {
            return self.state;
        }
        let cfg = frame.config;
        if cfg.is_spent(self.size) {
            self.die(frame, listener);
            return self.state;
        }

        let next = self.position + heading_offset(self.heading, cfg.step_len);
        frame.surface.line(self.position, next, self.size, Color::WOOD);

        self.size -= cfg.decay;

        if frame.rng.random::<f32>() < cfg.leaf_chance {
            listener.on_spawn_leaf(self, frame);
        }
        if frame.rng.random::<f32>() < cfg.branch_chance {
            listener.on_spawn_branch(self, frame);
        }

        self.position = next;

        if cfg.is_spent(self.size) {
            self.die(frame, listener);
        }
        self.state
    }

    fn die(&mut self, frame: &mut Frame<'_>, listener: &mut dyn GrowthListener) {
        self.state = WalkerState::Dead;
        listener.on_die(self, frame);
    }
}
