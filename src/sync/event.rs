//! The deformation event model shared by local simulation and peers.

use nalgebra::Point3;

use crate::config::SyncPolicy;

/// How a deformation reshapes the cells it touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeformationKind {
    /// Lowers height; the normal wheel-load case.
    Indentation,
    /// Raises height (displaced material, explosions).
    Elevation,
    /// Pulls each cell toward its neighborhood average.
    Smoothing,
    /// Pulls toward baseline, scaled by local mud level.
    Erosion,
}

/// One localized terrain deformation, immutable once created.
///
/// Produced by contact sampling or received from a peer; consumed exactly
/// once by the deformation engine, then retained briefly by the sync
/// coordinator for duplicate suppression if it traveled over the network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformationEvent {
    pub position: Point3<f32>,
    pub radius: f32,
    /// Depth for indentation/elevation, blend weight for smoothing/erosion.
    pub magnitude: f32,
    pub kind: DeformationKind,
    /// Simulation time at the event's source.
    pub timestamp: f64,
    /// Peer that produced the event.
    pub source: u32,
    /// Whether the source is trusted to win conflicts.
    pub authoritative: bool,
}

impl DeformationEvent {
    /// True for events the engine must reject as no-ops: non-finite
    /// positions, non-positive radius or magnitude.
    pub fn is_malformed(&self) -> bool {
        !self.position.x.is_finite()
            || !self.position.y.is_finite()
            || !self.position.z.is_finite()
            || !self.radius.is_finite()
            || self.radius <= 0.0
            || !self.magnitude.is_finite()
            || self.magnitude <= 0.0
            || !self.timestamp.is_finite()
    }

    /// Duplicate predicate: two events are the same deformation when their
    /// positions, radii, and timestamps all agree within the policy
    /// tolerances. Only one of a duplicate pair may ever be applied.
    pub fn matches(&self, other: &DeformationEvent, policy: &SyncPolicy) -> bool {
        nalgebra::distance(&self.position, &other.position) < policy.position_tolerance
            && (self.radius - other.radius).abs() < policy.radius_tolerance
            && (self.timestamp - other.timestamp).abs() < policy.time_tolerance
    }
}
