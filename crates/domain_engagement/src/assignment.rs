//! Assignment lifecycle
//!
//! The client picks exactly one lawyer from the applicant pool. Accepting
//! an application assigns the lawyer, supersedes the other pending
//! applications and moves the case into progress; from there the client
//! can file and close the case.

use std::sync::Arc;

use core_kernel::{ActorContext, CaseId, PartyId};
use domain_case::{Case, CasePort, CaseStatus};
use domain_notification::{NotificationDraft, NotificationKind, Notifier};

use crate::engagement::EngagementRecord;
use crate::error::EngagementError;
use crate::locks::CaseLockRegistry;
use crate::ports::EngagementStorePort;
use crate::recorder::TimelineRecorder;
use crate::timeline::TimelineAction;

const MAX_WRITE_ATTEMPTS: u32 = 3;

/// Service for assigning a lawyer and advancing the case lifecycle
pub struct AssignmentManager {
    case_port: Arc<dyn CasePort>,
    store: Arc<dyn EngagementStorePort>,
    recorder: Arc<TimelineRecorder>,
    notifier: Arc<Notifier>,
    locks: Arc<CaseLockRegistry>,
}

impl AssignmentManager {
    pub fn new(
        case_port: Arc<dyn CasePort>,
        store: Arc<dyn EngagementStorePort>,
        recorder: Arc<TimelineRecorder>,
        notifier: Arc<Notifier>,
        locks: Arc<CaseLockRegistry>,
    ) -> Self {
        Self {
            case_port,
            store,
            recorder,
            notifier,
            locks,
        }
    }

    /// Accepts one application, assigning its lawyer to the case
    ///
    /// The single-assignment check re-runs against a fresh read on every
    /// write attempt, so two owners racing to accept different lawyers
    /// resolve to exactly one assignment; the loser gets
    /// `AlreadyAssigned`.
    pub async fn accept_application(
        &self,
        actor: ActorContext,
        case_id: CaseId,
        lawyer_id: PartyId,
    ) -> Result<EngagementRecord, EngagementError> {
        let _guard = self.locks.acquire(case_id).await;

        let mut case = self.owned_case(actor, case_id).await?;

        // A case that left pending with an assignment in place reports
        // AlreadyAssigned; without one it is simply no longer open.
        let current = self.store.get_engagement(case_id, None).await?;
        if current.lawyer_assigned.is_none() && !case.accepts_applications() {
            return Err(EngagementError::CaseNotOpen {
                case_id: case_id.to_string(),
            });
        }

        let engagement = self
            .write_engagement(case_id, |record| record.assign(lawyer_id))
            .await?;

        case.update_status(CaseStatus::InProgress)?;
        self.case_port
            .set_status(case_id, CaseStatus::InProgress, None)
            .await?;

        self.recorder
            .append(case_id, TimelineAction::LawyerAssigned, actor)
            .await?;

        self.notifier
            .notify(
                case.owner_id,
                NotificationDraft::new(
                    NotificationKind::AssignmentConfirmed,
                    format!("A lawyer was assigned to \"{}\"", case.title),
                    case_id,
                ),
            )
            .await;
        self.notifier
            .notify(
                lawyer_id,
                NotificationDraft::new(
                    NotificationKind::LawyerAssigned,
                    format!("You were assigned to \"{}\"", case.title),
                    case_id,
                ),
            )
            .await;

        tracing::info!(case_id = %case_id, lawyer_id = %lawyer_id, "lawyer assigned");
        Ok(engagement)
    }

    /// Rejects one pending application
    ///
    /// Rejection is final for that lawyer; it does not emit a
    /// notification.
    pub async fn reject_application(
        &self,
        actor: ActorContext,
        case_id: CaseId,
        lawyer_id: PartyId,
    ) -> Result<EngagementRecord, EngagementError> {
        let _guard = self.locks.acquire(case_id).await;

        self.owned_case(actor, case_id).await?;

        let engagement = self
            .write_engagement(case_id, |record| record.reject(lawyer_id))
            .await?;

        self.recorder
            .append(case_id, TimelineAction::ApplicationRejected, actor)
            .await?;

        tracing::info!(case_id = %case_id, lawyer_id = %lawyer_id, "application rejected");
        Ok(engagement)
    }

    /// Marks an in-progress case as filed with the court
    pub async fn file_case(
        &self,
        actor: ActorContext,
        case_id: CaseId,
    ) -> Result<Case, EngagementError> {
        let _guard = self.locks.acquire(case_id).await;

        let mut case = self.owned_case(actor, case_id).await?;
        case.update_status(CaseStatus::Filed)?;
        let case = self
            .case_port
            .set_status(case_id, CaseStatus::Filed, None)
            .await?;

        self.recorder
            .append(case_id, TimelineAction::CaseFiled, actor)
            .await?;

        tracing::info!(case_id = %case_id, "case filed");
        Ok(case)
    }

    /// Closes a case, ending the engagement
    ///
    /// The assigned lawyer, if any, is told the engagement is over.
    pub async fn close_case(
        &self,
        actor: ActorContext,
        case_id: CaseId,
    ) -> Result<Case, EngagementError> {
        let _guard = self.locks.acquire(case_id).await;

        let mut case = self.owned_case(actor, case_id).await?;
        case.update_status(CaseStatus::Closed)?;
        let case = self
            .case_port
            .set_status(case_id, CaseStatus::Closed, None)
            .await?;

        self.recorder
            .append(case_id, TimelineAction::CaseClosed, actor)
            .await?;

        let engagement = self.store.get_engagement(case_id, None).await?;
        if let Some(lawyer_id) = engagement.lawyer_assigned {
            self.notifier
                .notify(
                    lawyer_id,
                    NotificationDraft::new(
                        NotificationKind::CaseClosed,
                        format!("\"{}\" was closed", case.title),
                        case_id,
                    ),
                )
                .await;
        }

        tracing::info!(case_id = %case_id, "case closed");
        Ok(case)
    }

    /// Fetches a case and checks the actor owns it
    async fn owned_case(
        &self,
        actor: ActorContext,
        case_id: CaseId,
    ) -> Result<Case, EngagementError> {
        let case = self.case_port.get_case(case_id, None).await?;
        if !case.is_owned_by(actor.actor_id) {
            return Err(EngagementError::Unauthorized(
                "only the case owner may manage applications".to_string(),
            ));
        }
        Ok(case)
    }

    /// Applies a mutation to the engagement record under a bounded
    /// conditional-write loop
    async fn write_engagement<F>(
        &self,
        case_id: CaseId,
        mutate: F,
    ) -> Result<EngagementRecord, EngagementError>
    where
        F: Fn(&mut EngagementRecord) -> Result<(), EngagementError>,
    {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut engagement = self.store.get_engagement(case_id, None).await?;
            let expected = engagement.version;
            mutate(&mut engagement)?;

            match self.store.save_engagement(&engagement, expected, None).await {
                Ok(stored) => return Ok(stored),
                Err(e) if e.is_version_conflict() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(EngagementError::Contention {
            case_id: case_id.to_string(),
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }
}
