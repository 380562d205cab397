//! Microarchitectural configuration parameters, fixed at setup.

/// `r`, `k0..k2`, `f`, and the trace-dump range. Scheduling-queue capacity is
/// derived, not stored independently.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    /// Number of CDB result-bus slots.
    pub result_buses: u64,
    /// Functional-unit counts per op class (k0, k1, k2).
    pub fu_counts: [u64; 3],
    /// Fetch width per cycle.
    pub fetch_width: u64,
    /// Inclusive id range for per-instruction trace emission; 0 disables.
    pub begin_dump: u64,
    pub end_dump: u64,
}

impl Params {
    pub fn new(result_buses: u64, k0: u64, k1: u64, k2: u64, fetch_width: u64) -> Self {
        Self {
            result_buses,
            fu_counts: [k0, k1, k2],
            fetch_width,
            begin_dump: 0,
            end_dump: 0,
        }
    }

    pub fn with_dump_range(mut self, begin_dump: u64, end_dump: u64) -> Self {
        self.begin_dump = begin_dump;
        self.end_dump = end_dump;
        self
    }

    /// `2 * (k0 + k1 + k2)`.
    pub fn scheduling_capacity(&self) -> u64 {
        2 * self.fu_counts.iter().sum::<u64>()
    }
}
