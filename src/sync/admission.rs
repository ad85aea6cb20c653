//! Pure admission control for inbound peer events.
//!
//! The conflict-resolution policy lives here as functions of plain data so
//! it can be tested without a chunk store or transport attached.

use crate::config::SyncPolicy;
use crate::sync::coordinator::SyncRecord;
use crate::sync::event::DeformationEvent;

/// Verdict for one inbound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Accept,
    /// A locally pending authoritative duplicate exists; local authority wins.
    LocalAuthority,
    /// Older than the staleness window.
    Stale,
    /// An equivalent event was applied too recently.
    Repeat,
}

/// An event already applied, kept briefly for duplicate suppression.
#[derive(Clone, Copy, Debug)]
pub struct AppliedEvent {
    pub event: DeformationEvent,
    pub applied_at: f64,
}

/// Decide whether an inbound event may be applied. Check order matters:
/// authority is evaluated before staleness so an overridden event is
/// reported as an authority conflict even when it is also old.
pub fn admit(
    event: &DeformationEvent,
    now: f64,
    pending: &[SyncRecord],
    recent: &[AppliedEvent],
    policy: &SyncPolicy,
) -> Admission {
    if !event.authoritative
        && pending
            .iter()
            .any(|record| record.event.authoritative && record.event.matches(event, policy))
    {
        return Admission::LocalAuthority;
    }

    if now - event.timestamp > policy.max_delay {
        return Admission::Stale;
    }

    if recent.iter().any(|applied| {
        applied.event.matches(event, policy) && now - applied.applied_at < policy.min_reapply
    }) {
        return Admission::Repeat;
    }

    Admission::Accept
}
