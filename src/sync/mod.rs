pub mod admission;
pub mod coordinator;
pub mod event;

pub use admission::Admission;
pub use coordinator::{RecordState, SyncCoordinator, SyncRecord};
pub use event::{DeformationEvent, DeformationKind};

#[cfg(test)]
mod tests;
