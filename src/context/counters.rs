//! Counters related to a context/solve.

/// Counters, updated as the search procedures work.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counters {
    /// Applicable operator instances applied to some state.
    pub expansions: u64,

    /// Partial plans taken from the breadth-first queue.
    pub plans_processed: u64,

    /// The deepest iteration the deepening driver has completed.
    pub depth_completed: u32,
}
