//! # Compliance Engine Properties
//!
//! End-to-end checks of status resolution, summaries, statistics, and
//! filtering against a small practice snapshot evaluated as of 2026-01-15.

use chrono::NaiveDate;
use praxis_core::{DeviceId, ReferenceDate, TeamMemberId, TrainingRecordId};
use praxis_training::{
    compute_statistics, filter_members, resolve_status, summarize_device, summarize_member,
    DefaultMembershipPolicy, Device, PracticeStatistics, Snapshot, StatusFilter, TeamMember,
    TrainingRecord, TrainingStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn as_of() -> ReferenceDate {
    ReferenceDate::new(date(2026, 1, 15))
}

fn mid(s: &str) -> TeamMemberId {
    TeamMemberId::new(s).unwrap()
}

fn did(s: &str) -> DeviceId {
    DeviceId::new(s).unwrap()
}

fn record(id: &str, member: &str, device: &str, trained: NaiveDate) -> TrainingRecord {
    TrainingRecord::new(TrainingRecordId::new(id).unwrap(), mid(member), did(device), trained)
}

// =========================================================================
// Pair status
// =========================================================================

#[test]
fn no_training_is_untrained_without_governing_record() {
    let status = resolve_status(&mid("m-1"), &did("d-1"), &[], as_of());
    assert_eq!(status.status, TrainingStatus::Untrained);
    assert!(status.governing.is_none());
}

#[test]
fn invalidated_records_are_invisible() {
    let only_invalid = vec![record("t-1", "m-1", "d-1", date(2025, 12, 1)).invalidated()];
    assert_eq!(
        resolve_status(&mid("m-1"), &did("d-1"), &only_invalid, as_of()).status,
        TrainingStatus::Untrained
    );

    // Adding an invalidated record to a valid one changes nothing.
    let valid = record("t-2", "m-1", "d-1", date(2025, 1, 1)).with_valid_until(date(2026, 1, 10));
    let with_noise = vec![valid.clone(), only_invalid[0].clone()];
    assert_eq!(
        resolve_status(&mid("m-1"), &did("d-1"), &[valid], as_of()),
        resolve_status(&mid("m-1"), &did("d-1"), &with_noise, as_of()),
    );
}

#[test]
fn no_expiry_is_trained_at_any_date() {
    let records = vec![record("t-1", "m-1", "d-1", date(2001, 5, 1))];
    for as_of in [date(2001, 5, 1), date(2026, 1, 15), date(2099, 12, 31)] {
        let status = resolve_status(&mid("m-1"), &did("d-1"), &records, ReferenceDate::new(as_of));
        assert_eq!(status.status, TrainingStatus::Trained);
    }
}

#[test]
fn expiry_boundaries() {
    let cases = [
        (date(2026, 1, 10), TrainingStatus::Expired),
        (date(2026, 2, 1), TrainingStatus::Expiring),
        (date(2026, 3, 1), TrainingStatus::Trained),
    ];
    for (until, expected) in cases {
        let records = vec![record("t-1", "m-1", "d-1", date(2025, 1, 1)).with_valid_until(until)];
        let status = resolve_status(&mid("m-1"), &did("d-1"), &records, as_of());
        assert_eq!(status.status, expected, "valid_until = {until}");
    }
}

#[test]
fn most_recent_training_wins() {
    let records = vec![
        record("t-old", "m-1", "d-1", date(2024, 1, 1)),
        record("t-new", "m-1", "d-1", date(2025, 6, 1)).with_valid_until(date(2026, 1, 1)),
    ];
    let status = resolve_status(&mid("m-1"), &did("d-1"), &records, as_of());
    // The newer training has lapsed even though the older one never would.
    assert_eq!(status.status, TrainingStatus::Expired);
    assert_eq!(status.governing.unwrap().id.as_str(), "t-new");
}

#[test]
fn tie_break_is_independent_of_input_order() {
    let day = date(2025, 6, 1);
    let a = record("t-a", "m-1", "d-1", day).with_valid_until(date(2026, 1, 1));
    let b = record("t-b", "m-1", "d-1", day).with_valid_until(date(2026, 6, 1));
    let c = record("t-c", "m-1", "d-1", day).with_valid_until(date(2026, 1, 20));

    let orders = [
        vec![a.clone(), b.clone(), c.clone()],
        vec![c.clone(), a.clone(), b.clone()],
        vec![b, c, a],
    ];
    for records in &orders {
        let status = resolve_status(&mid("m-1"), &did("d-1"), records, as_of());
        assert_eq!(status.governing.unwrap().id.as_str(), "t-c");
        assert_eq!(status.status, TrainingStatus::Expiring);
    }
}

// =========================================================================
// Summaries and statistics
// =========================================================================

fn practice() -> (Vec<Device>, Vec<TeamMember>, Vec<TrainingRecord>) {
    let devices = vec![
        Device::new(did("d-1"), "Autoklav"),
        Device::new(did("d-2"), "EKG"),
    ];
    let members = vec![
        TeamMember::new(mid("m-1"), "Anna", "Schmidt"),
        TeamMember::new(mid("m-2"), "Jonas", "Weber"),
        TeamMember::new(mid("m-3"), "Petra", "Klein"),
    ];
    let records = vec![
        record("t-1", "m-1", "d-1", date(2025, 1, 1)),
        record("t-2", "m-1", "d-2", date(2025, 1, 1)).with_valid_until(date(2026, 2, 1)),
        record("t-3", "m-2", "d-1", date(2025, 1, 1)).with_valid_until(date(2026, 1, 10)),
    ];
    (devices, members, records)
}

#[test]
fn member_and_device_summaries() {
    let (devices, members, records) = practice();

    let anna = summarize_member(&mid("m-1"), &devices, &records, as_of());
    assert_eq!((anna.trained, anna.expiring, anna.expired, anna.untrained), (2, 1, 0, 0));
    assert_eq!(anna.completion_percent(), 100);

    let autoklav = summarize_device(&did("d-1"), &members, &records, as_of());
    assert_eq!(
        (autoklav.trained, autoklav.expired, autoklav.untrained, autoklav.total),
        (1, 1, 1, 3)
    );
    assert_eq!(autoklav.completion_percent(), 33);
}

#[test]
fn statistics_cover_full_cross_product() {
    let (devices, members, records) = practice();
    let stats = compute_statistics(&devices, &members, &records, as_of());
    assert_eq!(
        stats,
        PracticeStatistics {
            total_devices: 2,
            total_members: 3,
            total_required: 6,
            trained_combinations: 2,
            expiring_count: 1,
            expired_count: 1,
            completion_rate: 33,
        }
    );
    assert_eq!(stats.uncovered(), 4);
}

#[test]
fn empty_practice_has_zero_completion() {
    let stats = compute_statistics(&[], &[], &[], as_of());
    assert_eq!(stats.completion_rate, 0);
    assert_eq!(stats.total_required, 0);
}

// =========================================================================
// Filtering
// =========================================================================

#[test]
fn filter_composes_query_and_status_in_order() {
    let (devices, mut members, records) = practice();
    members.push(TeamMember::new(mid("m-4"), "Jana", "Schmitz"));

    let summary = |m: &TeamMember| summarize_member(&m.id, &devices, &records, as_of());

    let untrained: Vec<_> = filter_members(&members, "", StatusFilter::Untrained, summary)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(untrained, vec!["m-2", "m-3", "m-4"]);

    let schm_untrained: Vec<_> = filter_members(&members, "schm", StatusFilter::Untrained, summary)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(schm_untrained, vec!["m-4"]);

    let fully: Vec<_> = filter_members(&members, "", StatusFilter::Trained, summary)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(fully, vec!["m-1"]);
}

// =========================================================================
// Snapshot boundary
// =========================================================================

#[test]
fn inactive_entities_are_excluded_from_statistics() {
    let json = r#"{
        "devices": [
            {"id": "d-1", "name": "Autoklav", "is_active": true},
            {"id": "d-2", "name": "Ausgemustert", "is_active": false},
            {"id": "d-3", "name": "Ohne Flag"}
        ],
        "team_members": [
            {"id": "m-1", "first_name": "Anna", "last_name": "Schmidt", "is_active": true},
            {"id": "m-2", "first_name": "Jonas", "last_name": "Weber", "is_active": false}
        ],
        "trainings": [
            {"id": "t-1", "device_id": "d-1", "team_member_id": "m-1", "training_date": "2025-03-01",
             "valid_until": "", "is_valid": true, "training_type": "initial", "trainer_role": "manufacturer"},
            {"id": "t-2", "device_id": "d-2", "team_member_id": "m-2", "training_date": "2025-03-01T09:30:00Z"}
        ]
    }"#;
    let snap = Snapshot::from_json_str(json).unwrap();
    let devices = snap.active_devices();
    let members = snap.active_members(&DefaultMembershipPolicy);
    let stats = compute_statistics(&devices, &members, &snap.trainings, as_of());
    assert_eq!(stats.total_required, 1);
    assert_eq!(stats.trained_combinations, 1);
    assert_eq!(stats.completion_rate, 100);

    let matrix = snap.evaluate(&DefaultMembershipPolicy, as_of());
    assert_eq!(matrix.excluded_records(), 1);
}
