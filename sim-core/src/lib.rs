//! Core library for growing a 2-D tree from wandering, shrinking walkers.
//!
//! Main components:
//! - [`types`] — vector alias, walker ids, heading helpers.
//! - [`surface`] — the drawing surface contract and a recording surface.
//! - [`config`] — tuning constants for the growth rules.
//! - [`error`] — configuration errors.
//! - [`events`] — walker events, listeners and ordered fan-out.
//! - [`leaf`] — one-shot leaf strokes.
//! - [`branch`] — the walker state machine.
//! - [`coordinator`] — growth rules reacting to walker events.
//! - [`population`] — the set of live walkers.
//! - [`simulation`] — the per-frame driver and reset.
//! - [`stats`] — running totals for a run.

pub mod branch;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod leaf;
pub mod population;
pub mod simulation;
pub mod stats;
pub mod surface;
pub mod types;
