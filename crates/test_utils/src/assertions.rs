//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::PartyId;
use domain_engagement::{ApplicationStatus, EngagementError, EngagementRecord, TimelineAction, TimelineEvent};

/// Asserts that an engagement has exactly one accepted application and
/// that it belongs to the expected lawyer
pub fn assert_assigned_to(record: &EngagementRecord, lawyer_id: PartyId) {
    assert_eq!(
        record.lawyer_assigned,
        Some(lawyer_id),
        "Expected case {} assigned to {}, got {:?}",
        record.case_id,
        lawyer_id,
        record.lawyer_assigned
    );

    let accepted: Vec<_> = record
        .applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Accepted)
        .collect();
    assert_eq!(
        accepted.len(),
        1,
        "Expected exactly one accepted application, got {}",
        accepted.len()
    );
    assert_eq!(accepted[0].lawyer_id, lawyer_id);
}

/// Asserts that no application on the record is still pending
pub fn assert_no_pending_applications(record: &EngagementRecord) {
    let pending: Vec<_> = record
        .applications
        .iter()
        .filter(|a| a.is_pending())
        .map(|a| a.lawyer_id)
        .collect();
    assert!(
        pending.is_empty(),
        "Expected no pending applications, found {:?}",
        pending
    );
}

/// Asserts that a timeline reads as the given sequence of actions
pub fn assert_timeline(events: &[TimelineEvent], expected: &[TimelineAction]) {
    let actions: Vec<TimelineAction> = events.iter().map(|e| e.action).collect();
    assert_eq!(
        actions, expected,
        "Timeline mismatch: got {:?}, expected {:?}",
        actions, expected
    );
}

/// Asserts that an engagement error belongs to the conflict class, which
/// must always leave records unchanged
pub fn assert_conflict(result: Result<impl std::fmt::Debug, EngagementError>) {
    match result {
        Err(e) if e.is_conflict() => {}
        Err(e) => panic!("Expected a conflict error, got {:?}", e),
        Ok(v) => panic!("Expected a conflict error, got Ok({:?})", v),
    }
}
