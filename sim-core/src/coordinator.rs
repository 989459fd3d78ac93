//! Growth rules applied in response to walker events.
//!
//! The coordinator owns every generative decision: leaf and child
//! headings, child sizes, ids, and which walkers leave the population.
//! It never touches the population while a frame is running; new
//! walkers and deaths are buffered and handed back through
//! [`Coordinator::finish`] so the driver can apply them once every
//! walker has rendered.
//!
//! A child whose size is already spent at birth is stillborn. It never
//! joins the population and never draws. The driver renders it once at
//! the end of the frame, through the same listeners as every other
//! walker, and that render is its `die` event.

use std::f32::consts::FRAC_PI_2;

use rand::{Rng, rngs::StdRng};
use tracing::trace;

use crate::{
    branch::Branch,
    config::GrowthConfig,
    events::{Frame, GrowthListener},
    leaf::Leaf,
    stats::GrowthStats,
    types::WalkerId,
};

/// Population changes produced during one frame.
#[derive(Debug, Default)]
pub struct Settlement {
    /// Alive children, in spawn order.
    pub spawned: Vec<Branch>,
    /// Ids of walkers that emitted `die`.
    pub dead: Vec<WalkerId>,
}

pub struct Coordinator<'s> {
    next_id: &'s mut WalkerId,
    /// Ids from here on were handed out this frame.
    first_new_id: WalkerId,
    stats: &'s mut GrowthStats,
    settlement: Settlement,
    stillborn: Vec<Branch>,
}

impl<'s> Coordinator<'s> {
    pub fn new(next_id: &'s mut WalkerId, stats: &'s mut GrowthStats) -> Self {
        Self {
            first_new_id: *next_id,
            next_id,
            stats,
            settlement: Settlement::default(),
            stillborn: Vec::new(),
        }
    }

    /// Hands over the children born spent since the last call. Each must
    /// be rendered once so its death reaches every listener.
    pub fn take_stillborn(&mut self) -> Vec<Branch> {
        std::mem::take(&mut self.stillborn)
    }

    /// Ends the frame and returns the buffered population changes.
    pub fn finish(self) -> Settlement {
        self.settlement
    }

    fn allocate_id(&mut self) -> WalkerId {
        let id = *self.next_id;
        *self.next_id += 1;
        id
    }
}

impl GrowthListener for Coordinator<'_> {
    /// Draws a leaf at the parent's position and forgets it.
    fn on_spawn_leaf(&mut self, parent: &Branch, frame: &mut Frame<'_>) {
        let cfg = frame.config;
        let heading = leaf_heading(parent, cfg, frame.rng);
        let leaf = Leaf::new(parent.position, heading, cfg.leaf_base_size + parent.size);
        leaf.render(frame.surface);
        self.stats.leaves += 1;
    }

    /// Creates a child one generation deeper and `child_scale` times the
    /// parent's size.
    ///
    /// A child born spent is set aside for [`Coordinator::take_stillborn`]
    /// and never joins the population.
    fn on_spawn_branch(&mut self, parent: &Branch, frame: &mut Frame<'_>) {
        let cfg = frame.config;
        let heading = child_heading(parent, cfg, frame.rng);
        let id = self.allocate_id();
        let child = Branch::new(
            id,
            parent.position,
            heading,
            parent.size * cfg.child_scale,
            parent.depth() + 1,
        );

        if cfg.is_spent(child.size) {
            trace!(parent = parent.id(), child = id, size = child.size, "stillborn");
            self.stats.stillborn += 1;
            self.stillborn.push(child);
            return;
        }

        trace!(
            parent = parent.id(),
            child = id,
            depth = child.depth(),
            size = child.size,
            "branch spawned"
        );
        self.stats.branches += 1;
        self.stats.max_depth = self.stats.max_depth.max(child.depth());
        self.settlement.spawned.push(child);
    }

    /// Schedules `walker` for removal at the end of the frame.
    ///
    /// Walkers created during this frame never joined the population and
    /// are only counted.
    fn on_die(&mut self, walker: &Branch, _frame: &mut Frame<'_>) {
        trace!(walker = walker.id(), depth = walker.depth(), "walker died");
        self.stats.deaths += 1;
        if walker.id() < self.first_new_id {
            self.settlement.dead.push(walker.id());
        }
    }
}

/// Uniform draw in `[-1, 1)`.
fn birand(rng: &mut StdRng) -> f32 {
    rng.random_range(-1.0..1.0)
}

/// Parent heading plus up to `leaf_spread` either way.
pub fn leaf_heading(parent: &Branch, cfg: &GrowthConfig, rng: &mut StdRng) -> f32 {
    parent.heading + birand(rng) * cfg.leaf_spread
}

/// Heading for a new child of `parent`.
///
/// Children of the root fan out from straight down (`π/2`) by up to
/// `root_fan` to either side; the square root pushes most of them
/// toward the outer edge of the fan. Deeper children wander up to
/// `branch_spread` away from their parent's heading.
pub fn child_heading(parent: &Branch, cfg: &GrowthConfig, rng: &mut StdRng) -> f32 {
    if parent.depth() == 0 {
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let variation = rng.random::<f32>().sqrt() * direction * cfg.root_fan;
        FRAC_PI_2 + variation
    } else {
        parent.heading + birand(rng) * cfg.branch_spread
    }
}
