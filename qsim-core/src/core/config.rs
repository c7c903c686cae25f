/// Per-run configuration, threaded explicitly into [`crate::Engine::run`]
/// rather than read from process-wide globals. Modelled as an explicit
/// value instead of mutable statics so a run's flags are read once and
/// cannot drift mid-sweep.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Disables the parallel sweep planner; every sweep runs on the calling
    /// thread.
    pub force_serial: bool,
    /// Number of measurement shots. Ignored if the circuit has no
    /// measurements.
    pub shots: u64,
    /// Whether a measurement result also carries the full amplitude array.
    pub include_state_vector: bool,
    /// Seeds the measurement sampler. `None` draws from OS entropy.
    pub prng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            force_serial: false,
            shots: 1024,
            include_state_vector: false,
            prng_seed: None,
        }
    }
}
