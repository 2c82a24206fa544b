//! Engagement record aggregate

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CaseId, PartyId};

use crate::application::{Application, ApplicationStatus};
use crate::error::EngagementError;

/// Per-case engagement state: applications and the assignment decision
///
/// Lives 1:1 with a case, created together with it. The set of interested
/// lawyers is derived from pending applications rather than tracked in a
/// second structure, so the two can never drift apart under partial
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecord {
    /// The case this record belongs to
    pub case_id: CaseId,
    /// All applications ever submitted, in submission order
    pub applications: Vec<Application>,
    /// The single assigned lawyer, set at most once
    pub lawyer_assigned: Option<PartyId>,
    /// Last mutation timestamp
    pub last_updated: DateTime<Utc>,
    /// Optimistic-concurrency token for conditional writes
    pub version: u64,
}

impl EngagementRecord {
    /// Creates the empty record for a freshly opened case
    pub fn new(case_id: CaseId) -> Self {
        Self {
            case_id,
            applications: Vec::new(),
            lawyer_assigned: None,
            last_updated: Utc::now(),
            version: 0,
        }
    }

    /// The lawyers currently interested in the case
    ///
    /// Derived: a lawyer is "requested" exactly while their application is
    /// pending.
    pub fn lawyer_requests(&self) -> BTreeSet<PartyId> {
        self.applications
            .iter()
            .filter(|a| a.is_pending())
            .map(|a| a.lawyer_id)
            .collect()
    }

    /// Looks up a lawyer's application, regardless of status
    pub fn application_for(&self, lawyer_id: PartyId) -> Option<&Application> {
        self.applications.iter().find(|a| a.lawyer_id == lawyer_id)
    }

    /// True once a lawyer has been assigned and messaging is open
    pub fn channel_open(&self) -> bool {
        self.lawyer_assigned.is_some()
    }

    /// Applications ordered by submission time, oldest first
    pub fn applications_by_submission(&self) -> Vec<Application> {
        let mut apps = self.applications.clone();
        apps.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        apps
    }

    /// Records a new application
    ///
    /// Each `(case, lawyer)` pair may hold at most one application, ever;
    /// a rejected lawyer does not get a second attempt.
    pub fn record_application(&mut self, application: Application) -> Result<(), EngagementError> {
        if self.application_for(application.lawyer_id).is_some() {
            return Err(EngagementError::DuplicateApplication {
                case_id: self.case_id.to_string(),
                lawyer_id: application.lawyer_id.to_string(),
            });
        }
        self.applications.push(application);
        self.last_updated = Utc::now();
        Ok(())
    }

    /// Binds exactly one lawyer to the case
    ///
    /// Accepts the named lawyer's pending application and supersedes every
    /// other pending application by marking it rejected.
    pub fn assign(&mut self, lawyer_id: PartyId) -> Result<(), EngagementError> {
        if self.lawyer_assigned.is_some() {
            return Err(EngagementError::AlreadyAssigned {
                case_id: self.case_id.to_string(),
            });
        }

        let has_pending = self
            .application_for(lawyer_id)
            .map(|a| a.is_pending())
            .unwrap_or(false);
        if !has_pending {
            return Err(EngagementError::NotFound(format!(
                "no pending application from {} on case {}",
                lawyer_id, self.case_id
            )));
        }

        for application in &mut self.applications {
            if !application.is_pending() {
                continue;
            }
            application.status = if application.lawyer_id == lawyer_id {
                ApplicationStatus::Accepted
            } else {
                ApplicationStatus::Rejected
            };
        }
        self.lawyer_assigned = Some(lawyer_id);
        self.last_updated = Utc::now();
        Ok(())
    }

    /// Rejects a single pending application
    pub fn reject(&mut self, lawyer_id: PartyId) -> Result<(), EngagementError> {
        let application = self
            .applications
            .iter_mut()
            .find(|a| a.lawyer_id == lawyer_id && a.is_pending())
            .ok_or_else(|| {
                EngagementError::NotFound(format!(
                    "no pending application from {} on case {}",
                    lawyer_id, self.case_id
                ))
            })?;
        application.status = ApplicationStatus::Rejected;
        self.last_updated = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_applicants(n: usize) -> (EngagementRecord, Vec<PartyId>) {
        let mut record = EngagementRecord::new(CaseId::new());
        let lawyers: Vec<PartyId> = (0..n).map(|_| PartyId::new()).collect();
        for lawyer in &lawyers {
            record
                .record_application(Application::submit(*lawyer, "cover"))
                .unwrap();
        }
        (record, lawyers)
    }

    #[test]
    fn test_duplicate_application_rejected() {
        let (mut record, lawyers) = record_with_applicants(1);
        let result = record.record_application(Application::submit(lawyers[0], "again"));
        assert!(matches!(
            result,
            Err(EngagementError::DuplicateApplication { .. })
        ));
        assert_eq!(record.applications.len(), 1);
    }

    #[test]
    fn test_lawyer_requests_derived_from_pending() {
        let (mut record, lawyers) = record_with_applicants(3);
        assert_eq!(record.lawyer_requests().len(), 3);

        record.reject(lawyers[0]).unwrap();
        let requests = record.lawyer_requests();
        assert_eq!(requests.len(), 2);
        assert!(!requests.contains(&lawyers[0]));
    }

    #[test]
    fn test_assign_supersedes_other_pending() {
        let (mut record, lawyers) = record_with_applicants(3);
        record.assign(lawyers[1]).unwrap();

        assert_eq!(record.lawyer_assigned, Some(lawyers[1]));
        assert!(record.lawyer_requests().is_empty());
        assert_eq!(
            record.application_for(lawyers[1]).unwrap().status,
            ApplicationStatus::Accepted
        );
        assert_eq!(
            record.application_for(lawyers[0]).unwrap().status,
            ApplicationStatus::Rejected
        );
        assert_eq!(
            record.application_for(lawyers[2]).unwrap().status,
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn test_assign_twice_fails() {
        let (mut record, lawyers) = record_with_applicants(2);
        record.assign(lawyers[0]).unwrap();
        let result = record.assign(lawyers[1]);
        assert!(matches!(result, Err(EngagementError::AlreadyAssigned { .. })));
        assert_eq!(record.lawyer_assigned, Some(lawyers[0]));
    }

    #[test]
    fn test_assign_requires_pending_application() {
        let (mut record, lawyers) = record_with_applicants(2);
        record.reject(lawyers[0]).unwrap();
        assert!(matches!(
            record.assign(lawyers[0]),
            Err(EngagementError::NotFound(_))
        ));
        // An unknown lawyer cannot be assigned either
        assert!(record.assign(PartyId::new()).is_err());
    }

    #[test]
    fn test_reject_unknown_lawyer_fails() {
        let (mut record, _) = record_with_applicants(1);
        assert!(record.reject(PartyId::new()).is_err());
    }

    #[test]
    fn test_channel_opens_on_assignment() {
        let (mut record, lawyers) = record_with_applicants(1);
        assert!(!record.channel_open());
        record.assign(lawyers[0]).unwrap();
        assert!(record.channel_open());
    }
}
