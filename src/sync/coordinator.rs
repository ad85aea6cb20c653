//! Batching, prioritization, and reconciliation of deformation events.
//!
//! The coordinator runs on its own cadence, slower than the simulation tick,
//! and is always invoked between ticks — it never observes a chunk mid-way
//! through the deform or recover phases. `harvest` and `receive` are pure
//! in-memory operations; actual transmission belongs to the host's
//! transport.

use log::debug;

use crate::config::SyncPolicy;
use crate::stats::TerrainStats;
use crate::sync::admission::{self, Admission, AppliedEvent};
use crate::sync::event::{DeformationEvent, DeformationKind};
use crate::terrain::chunk::ChunkStore;
use crate::terrain::deform::{self, ApplyOutcome};
use crate::config::TerrainConfig;

/// Transport-side lifecycle of a pending record. Acknowledged and superseded
/// records are removed from the pending list outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordState {
    Pending,
    Transmitted,
}

/// A locally generated event waiting to reach the peers.
#[derive(Clone, Copy, Debug)]
pub struct SyncRecord {
    pub event: DeformationEvent,
    pub priority: i32,
    pub needs_transmit: bool,
    pub state: RecordState,
}

pub struct SyncCoordinator {
    policy: SyncPolicy,
    pending: Vec<SyncRecord>,
    recent: Vec<AppliedEvent>,
    last_sync: f64,
}

impl SyncCoordinator {
    pub fn new(policy: SyncPolicy) -> Self {
        Self {
            policy,
            pending: Vec::new(),
            recent: Vec::new(),
            last_sync: 0.0,
        }
    }

    /// Whether a harvest pass is due at the given simulation time.
    pub fn due(&self, now: f64) -> bool {
        now - self.last_sync >= self.policy.interval
    }

    /// Queue a locally applied authoritative event for transmission.
    ///
    /// If an un-acknowledged record for the same deformation already exists,
    /// the newer of the two supersedes it — only the newest version of a
    /// deformation ever goes out.
    pub fn record(&mut self, event: DeformationEvent, stats: &mut TerrainStats) {
        let priority = priority_of(&event);
        if let Some(existing) = self
            .pending
            .iter_mut()
            .find(|record| record.event.matches(&event, &self.policy))
        {
            if event.timestamp >= existing.event.timestamp {
                *existing = SyncRecord {
                    event,
                    priority,
                    needs_transmit: true,
                    state: RecordState::Pending,
                };
                stats.sync_superseded += 1;
            } else {
                debug!("dropped out-of-date duplicate of a pending record: {event:?}");
            }
            return;
        }

        self.pending.push(SyncRecord {
            event,
            priority,
            needs_transmit: true,
            state: RecordState::Pending,
        });
        stats.sync_recorded += 1;
    }

    /// Drain everything that needs transmitting, highest priority first.
    /// Drained records stay pending (now Transmitted) until acknowledged or
    /// aged out, so local authority still shadows late inbound duplicates.
    pub fn harvest(&mut self, now: f64, stats: &mut TerrainStats) -> Vec<DeformationEvent> {
        self.last_sync = now;

        let mut batch: Vec<(i32, DeformationEvent)> = Vec::new();
        for record in &mut self.pending {
            if record.needs_transmit {
                record.needs_transmit = false;
                record.state = RecordState::Transmitted;
                batch.push((record.priority, record.event));
            }
        }

        // Transmitted records past the staleness window would be discarded
        // by every peer anyway; stop shadowing with them.
        let policy = &self.policy;
        self.pending
            .retain(|record| record.needs_transmit || now - record.event.timestamp <= policy.max_delay);

        stats.sync_transmitted += batch.len() as u64;
        batch.sort_by(|a, b| b.0.cmp(&a.0));
        batch.into_iter().map(|(_, event)| event).collect()
    }

    /// Transport confirmation that a peer received the event.
    pub fn acknowledge(&mut self, event: &DeformationEvent, stats: &mut TerrainStats) -> bool {
        if let Some(index) = self.pending.iter().position(|record| {
            record.state == RecordState::Transmitted && record.event.matches(event, &self.policy)
        }) {
            self.pending.remove(index);
            stats.sync_acknowledged += 1;
            true
        } else {
            false
        }
    }

    /// Reconcile one inbound peer event: admission control, then application
    /// through the deformation engine.
    pub fn receive(
        &mut self,
        store: &mut ChunkStore,
        config: &TerrainConfig,
        stats: &mut TerrainStats,
        event: DeformationEvent,
        now: f64,
    ) -> Admission {
        let verdict = admission::admit(&event, now, &self.pending, &self.recent, &self.policy);
        match verdict {
            Admission::LocalAuthority => {
                stats.sync_rejected_authority += 1;
                debug!("discarded peer event shadowed by local authority: {event:?}");
            }
            Admission::Stale => {
                stats.sync_rejected_stale += 1;
                debug!("discarded stale peer event: {event:?}");
            }
            Admission::Repeat => {
                stats.sync_rejected_repeat += 1;
                debug!("discarded repeated peer event: {event:?}");
            }
            Admission::Accept => {
                if deform::apply(store, config, stats, &event, now) == ApplyOutcome::Applied {
                    stats.sync_applied += 1;
                }
                // Remembered regardless of outcome so a retransmit of an
                // event that missed loaded chunks is still suppressed.
                self.recent.push(AppliedEvent {
                    event,
                    applied_at: now,
                });
                let policy = &self.policy;
                self.recent
                    .retain(|applied| now - applied.applied_at <= policy.max_delay);
            }
        }
        verdict
    }

    pub fn pending(&self) -> &[SyncRecord] {
        &self.pending
    }
}

/// Weighted transmit priority: big, terrain-shaping events go first.
fn priority_of(event: &DeformationEvent) -> i32 {
    let mut priority = 0;

    if event.magnitude > 1.0 {
        priority += 3;
    } else if event.magnitude > 0.5 {
        priority += 2;
    } else if event.magnitude > 0.1 {
        priority += 1;
    }

    priority += match event.kind {
        DeformationKind::Indentation => 2,
        DeformationKind::Elevation => 3,
        DeformationKind::Smoothing => 1,
        DeformationKind::Erosion => 1,
    };

    if event.radius > 5.0 {
        priority += 2;
    } else if event.radius > 2.0 {
        priority += 1;
    }

    priority
}

#[cfg(test)]
pub(crate) fn priority_for_test(event: &DeformationEvent) -> i32 {
    priority_of(event)
}
