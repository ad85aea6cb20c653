/// Monitoring counters for every silent rejection and streaming action.
///
/// The core never panics on malformed or adversarial input; instead each
/// discard bumps a counter here so saturation or event storms are visible
/// to whoever is watching.
#[derive(Clone, Debug, Default)]
pub struct TerrainStats {
    pub chunks_loaded: u64,
    pub chunks_unloaded: u64,
    /// Loads deferred because the store was at capacity.
    pub load_retries: u64,

    pub events_applied: u64,
    /// Events rejected for NaN positions or non-positive radius/magnitude.
    pub events_malformed: u64,
    /// Events that overlapped loaded chunks but moved no cell.
    pub events_no_effect: u64,
    /// Events that overlapped no loaded chunk and were dropped.
    pub events_outside: u64,

    pub sync_recorded: u64,
    pub sync_superseded: u64,
    pub sync_transmitted: u64,
    pub sync_acknowledged: u64,
    pub sync_applied: u64,
    pub sync_rejected_authority: u64,
    pub sync_rejected_stale: u64,
    pub sync_rejected_repeat: u64,
}
