//! Case intake
//!
//! A case and its engagement record are created together: the case store
//! holds the posting, the engagement record holds everything that happens
//! to it afterwards.

use std::sync::Arc;

use core_kernel::{ActorContext, AttachmentId, Money};
use domain_case::{Case, CasePort, CaseType};

use crate::engagement::EngagementRecord;
use crate::error::EngagementError;
use crate::ports::EngagementStorePort;
use crate::recorder::TimelineRecorder;
use crate::timeline::TimelineAction;

/// What a client provides when posting a case
#[derive(Debug, Clone)]
pub struct OpenCaseRequest {
    pub title: String,
    pub case_type: CaseType,
    pub client_role: String,
    pub budget: Option<Money>,
    pub attachments: Vec<AttachmentId>,
}

/// Service that opens cases
pub struct CaseIntake {
    case_port: Arc<dyn CasePort>,
    store: Arc<dyn EngagementStorePort>,
    recorder: Arc<TimelineRecorder>,
}

impl CaseIntake {
    pub fn new(
        case_port: Arc<dyn CasePort>,
        store: Arc<dyn EngagementStorePort>,
        recorder: Arc<TimelineRecorder>,
    ) -> Self {
        Self {
            case_port,
            store,
            recorder,
        }
    }

    /// Opens a new case with its engagement record
    ///
    /// Only clients post cases. The two creates are not transactional; if
    /// the engagement create fails the operation errors out and the caller
    /// retries, the case create being idempotent per id.
    pub async fn open_case(
        &self,
        actor: ActorContext,
        request: OpenCaseRequest,
    ) -> Result<Case, EngagementError> {
        if !actor.is_client() {
            return Err(EngagementError::Unauthorized(
                "only clients may open cases".to_string(),
            ));
        }

        let case = Case::open(
            actor.actor_id,
            request.title,
            request.case_type,
            request.client_role,
            request.budget,
        )?
        .with_attachments(request.attachments);

        let case = self.case_port.create_case(&case, None).await?;
        self.store
            .create_engagement(&EngagementRecord::new(case.id), None)
            .await?;
        self.recorder
            .append(case.id, TimelineAction::CaseOpened, actor)
            .await?;

        tracing::info!(case_id = %case.id, owner_id = %case.owner_id, "case opened");
        Ok(case)
    }
}
