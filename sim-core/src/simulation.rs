//! The simulation driver: owns the population and runs frames.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    branch::Branch,
    config::GrowthConfig,
    coordinator::Coordinator,
    error::ConfigError,
    events::{EventEmitter, Frame, GrowthListener},
    population::Population,
    stats::GrowthStats,
    surface::Surface,
    types::{Vector, WalkerId},
};

/// A single growing tree on a fixed-size canvas.
///
/// The host calls [`Simulation::tick`] once per displayed frame and
/// [`Simulation::reset`] to start over. Walkers spawned during a frame
/// render from the next frame on; walkers that die during a frame are
/// gone before the next one starts.
pub struct Simulation {
    config: GrowthConfig,
    canvas: Vec2,
    seed: u64,
    rng: StdRng,
    population: Population,
    next_id: WalkerId,
    stats: GrowthStats,
}

impl Simulation {
    /// Creates a simulation with an empty population.
    ///
    /// Call [`Simulation::reset`] to plant the root.
    ///
    /// ### Parameters
    /// - `config` - Growth rules; rejected when [`GrowthConfig::validate`] fails.
    /// - `width`, `height` - Canvas size in pixels, fixed for the whole run.
    /// - `seed` - Seed for every random draw of the run.
    pub fn new(
        config: GrowthConfig,
        width: u32,
        height: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if width == 0 || height == 0 {
            return Err(ConfigError::CanvasSize(width, height));
        }

        Ok(Self {
            config,
            canvas: Vec2::new(width as f32, height as f32),
            seed,
            rng: StdRng::seed_from_u64(seed),
            population: Population::new(),
            next_id: 0,
            stats: GrowthStats::default(),
        })
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Replaces the growth rules. Walkers already alive keep their size
    /// and heading but follow the new rules from the next frame.
    pub fn set_config(&mut self, config: GrowthConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reseeds the generator; takes effect immediately.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn stats(&self) -> &GrowthStats {
        &self.stats
    }

    /// `true` once every walker has died.
    pub fn is_finished(&self) -> bool {
        self.population.is_empty()
    }

    /// Where the root is planted on this canvas.
    pub fn root_position(&self) -> Vector {
        self.canvas * self.config.root_anchor
    }

    /// Discards the tree and plants a fresh root.
    ///
    /// Clears `surface` and the population, then adds one walker of
    /// depth 0 and `root_size` at the root anchor, heading straight up.
    /// Walker ids and statistics start over.
    pub fn reset(&mut self, surface: &mut dyn Surface) {
        self.population.clear();
        surface.clear();
        self.next_id = 0;
        self.stats = GrowthStats::default();

        let root = Branch::new(
            self.allocate_id(),
            self.root_position(),
            -FRAC_PI_2,
            self.config.root_size,
            0,
        );
        debug!(
            seed = self.seed,
            x = root.position.x,
            y = root.position.y,
            size = root.size,
            "planted root"
        );
        self.population.insert(root);
        self.stats.peak_population = 1;
    }

    /// Runs one frame with no extra observer.
    ///
    /// ### Returns
    /// The number of walkers alive after the frame.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> usize {
        self.tick_observed(surface, &mut ())
    }

    /// Runs one frame.
    ///
    /// Every walker renders once. Its events go to the growth rules
    /// first and to `observer` second. Children born spent then render
    /// once through the same listeners, which is their `die`. Deaths and
    /// new children are applied after that.
    ///
    /// ### Returns
    /// The number of walkers alive after the frame.
    pub fn tick_observed(
        &mut self,
        surface: &mut dyn Surface,
        observer: &mut dyn GrowthListener,
    ) -> usize {
        if self.population.is_empty() {
            return 0;
        }

        let mut frame = Frame {
            config: &self.config,
            rng: &mut self.rng,
            surface,
        };
        let mut coordinator = Coordinator::new(&mut self.next_id, &mut self.stats);
        render_all(
            self.population.iter_mut(),
            &mut frame,
            &mut coordinator,
            &mut *observer,
        );
        let mut stillborn = coordinator.take_stillborn();
        render_all(stillborn.iter_mut(), &mut frame, &mut coordinator, observer);
        let settlement = coordinator.finish();

        self.population.remove_all(&settlement.dead);
        self.population.extend(settlement.spawned);

        self.stats.frames += 1;
        self.stats.peak_population = self.stats.peak_population.max(self.population.len());
        if self.population.is_empty() {
            debug!(
                frames = self.stats.frames,
                branches = self.stats.branches,
                leaves = self.stats.leaves,
                "tree finished growing"
            );
        }
        self.population.len()
    }

    fn allocate_id(&mut self) -> WalkerId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Renders each walker once, reporting to the growth rules and then to
/// `observer`.
fn render_all<'w>(
    walkers: impl Iterator<Item = &'w mut Branch>,
    frame: &mut Frame<'_>,
    coordinator: &mut Coordinator<'_>,
    observer: &mut dyn GrowthListener,
) {
    let mut emitter = EventEmitter::new();
    emitter.on(coordinator);
    emitter.on(observer);

    for walker in walkers {
        walker.render(frame, &mut emitter);
    }
}
