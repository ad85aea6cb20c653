use super::test_event;
use crate::config::{SyncPolicy, TerrainConfig};
use crate::stats::TerrainStats;
use crate::sync::admission::Admission;
use crate::sync::coordinator::{priority_for_test, RecordState, SyncCoordinator};
use crate::sync::event::{DeformationEvent, DeformationKind};
use crate::terrain::chunk::{Chunk, ChunkStore};
use crate::terrain::coords::ChunkCoords;
use crate::terrain::generator::TerrainGenerator;
use nalgebra::Point3;
use test_case::test_case;

fn coordinator() -> (SyncCoordinator, TerrainStats) {
    (
        SyncCoordinator::new(SyncPolicy::default()),
        TerrainStats::default(),
    )
}

fn authoritative(timestamp: f64) -> DeformationEvent {
    let mut event = test_event(timestamp);
    event.authoritative = true;
    event
}

fn small_world() -> (ChunkStore, TerrainConfig) {
    let config = TerrainConfig {
        resolution: 16,
        ..TerrainConfig::default()
    };
    let generator = TerrainGenerator::new(config.seed);
    let mut store = ChunkStore::new(config.max_resident_chunks);
    let coord = ChunkCoords { x: 0, z: 0 };
    let (base, hardness, mud) = generator.generate(coord, &config);
    store
        .allocate_with(coord, || Chunk::new(coord, &config, base, hardness, mud, 0.0))
        .unwrap();
    (store, config)
}

#[test_case(1.5, DeformationKind::Elevation, 6.0, 8; "big elevation")]
#[test_case(0.7, DeformationKind::Indentation, 3.0, 5; "medium indentation")]
#[test_case(0.05, DeformationKind::Smoothing, 1.0, 1; "tiny smoothing")]
#[test_case(0.2, DeformationKind::Erosion, 1.0, 2; "small erosion")]
fn priority_weights(magnitude: f32, kind: DeformationKind, radius: f32, expected: i32) {
    let mut event = authoritative(0.0);
    event.magnitude = magnitude;
    event.kind = kind;
    event.radius = radius;
    assert_eq!(priority_for_test(&event), expected);
}

#[test]
fn harvest_drains_highest_priority_first() {
    let (mut coordinator, mut stats) = coordinator();

    let mut small = authoritative(0.0);
    small.magnitude = 0.05;
    small.kind = DeformationKind::Smoothing;
    coordinator.record(small, &mut stats);

    let mut big = authoritative(0.0);
    big.position = Point3::new(100.0, 0.0, 100.0);
    big.magnitude = 2.0;
    big.kind = DeformationKind::Elevation;
    big.radius = 6.0;
    coordinator.record(big, &mut stats);

    let batch = coordinator.harvest(0.1, &mut stats);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].kind, DeformationKind::Elevation);
    assert_eq!(stats.sync_transmitted, 2);

    // Nothing left to transmit until new events arrive.
    assert!(coordinator.harvest(0.2, &mut stats).is_empty());
}

#[test]
fn newer_event_supersedes_pending_duplicate() {
    let (mut coordinator, mut stats) = coordinator();

    coordinator.record(authoritative(1.0), &mut stats);
    coordinator.record(authoritative(1.05), &mut stats);

    assert_eq!(coordinator.pending().len(), 1, "only the newest is kept");
    assert_eq!(coordinator.pending()[0].event.timestamp, 1.05);
    assert_eq!(stats.sync_superseded, 1);

    // An older duplicate arriving late does not roll the record back, and
    // does not count as a supersession: nothing was replaced.
    coordinator.record(authoritative(0.98), &mut stats);
    assert_eq!(coordinator.pending()[0].event.timestamp, 1.05);
    assert_eq!(stats.sync_superseded, 1);
}

#[test]
fn acknowledge_clears_only_transmitted_records() {
    let (mut coordinator, mut stats) = coordinator();
    let event = authoritative(1.0);
    coordinator.record(event, &mut stats);

    // Not sent yet: nothing to acknowledge.
    assert!(!coordinator.acknowledge(&event, &mut stats));

    let batch = coordinator.harvest(1.1, &mut stats);
    assert_eq!(coordinator.pending()[0].state, RecordState::Transmitted);
    assert!(coordinator.acknowledge(&batch[0], &mut stats));
    assert!(coordinator.pending().is_empty());
    assert_eq!(stats.sync_acknowledged, 1);
}

#[test]
fn harvest_ages_out_unacknowledged_records() {
    let (mut coordinator, mut stats) = coordinator();
    let event = authoritative(1.0);
    coordinator.record(event, &mut stats);
    coordinator.harvest(1.1, &mut stats);

    // Way past the staleness window with no acknowledgment: the record is
    // dropped rather than shadowing future traffic forever.
    coordinator.harvest(5.0, &mut stats);
    assert!(coordinator.pending().is_empty());
    assert!(!coordinator.acknowledge(&event, &mut stats));
}

#[test]
fn receive_applies_through_the_engine() {
    let (mut coordinator, mut stats) = coordinator();
    let (mut store, config) = small_world();

    let coord = ChunkCoords { x: 0, z: 0 };
    let before = store.get(&coord).unwrap().height().to_vec();

    let verdict = coordinator.receive(&mut store, &config, &mut stats, authoritative(0.0), 0.05);
    assert_eq!(verdict, Admission::Accept);
    assert_eq!(stats.sync_applied, 1);
    assert!(store.get(&coord).unwrap().height() != &before[..]);
}

#[test]
fn receive_is_idempotent_within_tolerance() {
    let (mut coordinator, mut stats) = coordinator();
    let (mut store, config) = small_world();
    let coord = ChunkCoords { x: 0, z: 0 };

    coordinator.receive(&mut store, &config, &mut stats, authoritative(0.0), 0.05);
    let after_first = store.get(&coord).unwrap().height().to_vec();

    // Identical deformation 0.05 s later: inside every tolerance.
    let verdict = coordinator.receive(&mut store, &config, &mut stats, authoritative(0.05), 0.06);
    assert_eq!(verdict, Admission::Repeat);
    assert_eq!(store.get(&coord).unwrap().height(), &after_first[..]);
    assert_eq!(stats.sync_rejected_repeat, 1);
}

#[test]
fn local_authority_wins_inside_the_coordinator() {
    let (mut coordinator, mut stats) = coordinator();
    let (mut store, config) = small_world();

    coordinator.record(authoritative(0.0), &mut stats);

    let verdict = coordinator.receive(&mut store, &config, &mut stats, test_event(0.0), 0.05);
    assert_eq!(verdict, Admission::LocalAuthority);
    assert_eq!(stats.sync_rejected_authority, 1);
}

#[test]
fn stale_events_are_rejected() {
    let (mut coordinator, mut stats) = coordinator();
    let (mut store, config) = small_world();

    let verdict = coordinator.receive(&mut store, &config, &mut stats, authoritative(0.0), 2.0);
    assert_eq!(verdict, Admission::Stale);
    assert_eq!(stats.sync_rejected_stale, 1);
}
