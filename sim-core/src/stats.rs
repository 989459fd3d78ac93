/// Running totals for one simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Frames ticked since the last reset.
    pub frames: u64,
    pub leaves: u64,
    /// Child branches that joined the population.
    pub branches: u64,
    /// `die` events, stillborn children included.
    pub deaths: u64,
    /// Children created at or below the size threshold.
    pub stillborn: u64,
    pub peak_population: usize,
    pub max_depth: u32,
}
