//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use core_kernel::{AttachmentId, Money, PartyId};
use domain_engagement::intake::OpenCaseRequest;
use domain_engagement::{Application, EngagementRecord};
use domain_case::CaseType;

use crate::fixtures::{CaseFixtures, MoneyFixtures};

/// Builder for case intake requests
pub struct OpenCaseRequestBuilder {
    title: String,
    case_type: CaseType,
    client_role: String,
    budget: Option<Money>,
    attachments: Vec<AttachmentId>,
}

impl Default for OpenCaseRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenCaseRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            title: CaseFixtures::title().to_string(),
            case_type: CaseFixtures::case_type(),
            client_role: CaseFixtures::client_role().to_string(),
            budget: Some(MoneyFixtures::usd_budget()),
            attachments: Vec::new(),
        }
    }

    /// Sets the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the case type
    pub fn with_case_type(mut self, case_type: CaseType) -> Self {
        self.case_type = case_type;
        self
    }

    /// Sets the client role
    pub fn with_client_role(mut self, role: impl Into<String>) -> Self {
        self.client_role = role.into();
        self
    }

    /// Sets the budget
    pub fn with_budget(mut self, budget: Option<Money>) -> Self {
        self.budget = budget;
        self
    }

    /// Adds an attachment
    pub fn with_attachment(mut self, id: AttachmentId) -> Self {
        self.attachments.push(id);
        self
    }

    /// Builds the request
    pub fn build(self) -> OpenCaseRequest {
        OpenCaseRequest {
            title: self.title,
            case_type: self.case_type,
            client_role: self.client_role,
            budget: self.budget,
            attachments: self.attachments,
        }
    }
}

/// Builder for engagement records pre-loaded with applications
pub struct EngagementRecordBuilder {
    record: EngagementRecord,
}

impl EngagementRecordBuilder {
    /// Creates a builder for the given case
    pub fn new(case_id: core_kernel::CaseId) -> Self {
        Self {
            record: EngagementRecord::new(case_id),
        }
    }

    /// Adds a pending application from the given lawyer
    ///
    /// # Panics
    ///
    /// Panics if the lawyer has already applied; builders are for valid
    /// setups only.
    pub fn with_application(mut self, lawyer_id: PartyId) -> Self {
        self.record
            .record_application(Application::submit(lawyer_id, CaseFixtures::cover_letter()))
            .expect("duplicate application in builder");
        self
    }

    /// Assigns the given lawyer, superseding other pending applications
    ///
    /// # Panics
    ///
    /// Panics if the lawyer never applied or one is already assigned.
    pub fn with_assignment(mut self, lawyer_id: PartyId) -> Self {
        self.record
            .assign(lawyer_id)
            .expect("invalid assignment in builder");
        self
    }

    /// Builds the record
    pub fn build(self) -> EngagementRecord {
        self.record
    }
}
