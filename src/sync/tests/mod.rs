mod coordinator_tests;

use nalgebra::Point3;

use crate::sync::event::{DeformationEvent, DeformationKind};

pub(crate) fn test_event(timestamp: f64) -> DeformationEvent {
    DeformationEvent {
        position: Point3::new(4.0, 0.0, 4.0),
        radius: 2.0,
        magnitude: 0.5,
        kind: DeformationKind::Indentation,
        timestamp,
        source: 7,
        authoritative: false,
    }
}
