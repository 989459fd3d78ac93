//! Walker lifecycle events and their dispatch.
//!
//! A walker never decides what its events mean. It reports them to a
//! [`GrowthListener`] together with the current [`Frame`], and the
//! listener (usually the [`crate::coordinator::Coordinator`]) applies
//! the growth rules.

use rand::rngs::StdRng;

use crate::{branch::Branch, config::GrowthConfig, surface::Surface};

/// Everything a walker or listener may touch while a frame is running.
pub struct Frame<'a> {
    pub config: &'a GrowthConfig,
    pub rng: &'a mut StdRng,
    pub surface: &'a mut dyn Surface,
}

/// Reaction to the three walker events.
///
/// Every method defaults to doing nothing, so observers only implement
/// what they care about.
pub trait GrowthListener {
    /// `parent` wants a leaf at its current (pre-step) position.
    fn on_spawn_leaf(&mut self, _parent: &Branch, _frame: &mut Frame<'_>) {}

    /// `parent` wants a child branch at its current (pre-step) position.
    fn on_spawn_branch(&mut self, _parent: &Branch, _frame: &mut Frame<'_>) {}

    /// `walker` reached the end of its life. Sent exactly once per walker.
    fn on_die(&mut self, _walker: &Branch, _frame: &mut Frame<'_>) {}
}

impl GrowthListener for () {}

/// Ordered fan-out to several listeners.
///
/// Listeners are invoked synchronously in registration order. With no
/// listeners every event is a no-op.
#[derive(Default)]
pub struct EventEmitter<'l> {
    listeners: Vec<&'l mut dyn GrowthListener>,
}

impl<'l> EventEmitter<'l> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` after all existing ones.
    pub fn on(&mut self, listener: &'l mut dyn GrowthListener) {
        self.listeners.push(listener);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl GrowthListener for EventEmitter<'_> {
    fn on_spawn_leaf(&mut self, parent: &Branch, frame: &mut Frame<'_>) {
        for l in self.listeners.iter_mut() {
            l.on_spawn_leaf(parent, frame);
        }
    }

    fn on_spawn_branch(&mut self, parent: &Branch, frame: &mut Frame<'_>) {
        for l in self.listeners.iter_mut() {
            l.on_spawn_branch(parent, frame);
        }
    }

    fn on_die(&mut self, walker: &Branch, frame: &mut Frame<'_>) {
        for l in self.listeners.iter_mut() {
            l.on_die(walker, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{surface::Recorder, types::Vector};
    use rand::SeedableRng;

    /// Appends `(tag, event)` to a shared log.
    struct Tagged<'a> {
        tag: &'static str,
        log: &'a std::cell::RefCell<Vec<(&'static str, &'static str)>>,
    }

    impl GrowthListener for Tagged<'_> {
        fn on_spawn_leaf(&mut self, _: &Branch, _: &mut Frame<'_>) {
            self.log.borrow_mut().push((self.tag, "leaf"));
        }

        fn on_die(&mut self, _: &Branch, _: &mut Frame<'_>) {
            self.log.borrow_mut().push((self.tag, "die"));
        }
    }

    #[test]
    fn dispatches_in_registration_order() {
        let log = std::cell::RefCell::new(Vec::new());
        let mut first = Tagged { tag: "a", log: &log };
        let mut second = Tagged { tag: "b", log: &log };

        let cfg = GrowthConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut surface = Recorder::new();
        let mut frame = Frame {
            config: &cfg,
            rng: &mut rng,
            surface: &mut surface,
        };
        let walker = Branch::new(0, Vector::ZERO, 0.0, 5.0, 0);

        let mut emitter = EventEmitter::new();
        emitter.on(&mut first);
        emitter.on(&mut second);
        assert_eq!(emitter.len(), 2);

        emitter.on_spawn_leaf(&walker, &mut frame);
        emitter.on_die(&walker, &mut frame);
        // Unhandled event falls through to the default no-op.
        emitter.on_spawn_branch(&walker, &mut frame);

        assert_eq!(
            *log.borrow(),
            vec![("a", "leaf"), ("b", "leaf"), ("a", "die"), ("b", "die")]
        );
    }

    #[test]
    fn empty_emitter_is_a_no_op() {
        let cfg = GrowthConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut surface = Recorder::new();
        let mut frame = Frame {
            config: &cfg,
            rng: &mut rng,
            surface: &mut surface,
        };
        let walker = Branch::new(0, Vector::ZERO, 0.0, 5.0, 0);

        let mut emitter = EventEmitter::new();
        assert!(emitter.is_empty());
        emitter.on_spawn_branch(&walker, &mut frame);
        emitter.on_die(&walker, &mut frame);
        assert!(surface.segments.is_empty());
    }
}
