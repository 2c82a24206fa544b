//! Application workflow
//!
//! Lawyers submit applications while a case is pending; the client reviews
//! the applicant list joined with lawyer profiles.

use std::sync::Arc;

use core_kernel::{ActorContext, CaseId};
use domain_case::CasePort;
use domain_notification::{NotificationDraft, NotificationKind, Notifier};

use crate::application::Application;
use crate::error::EngagementError;
use crate::locks::CaseLockRegistry;
use crate::ports::{EngagementStorePort, LawyerProfile, ProfileDirectoryPort};
use crate::recorder::TimelineRecorder;
use crate::timeline::TimelineAction;

/// Maximum conditional-write attempts before reporting contention
const MAX_WRITE_ATTEMPTS: u32 = 3;

/// An application joined with the lawyer's directory profile
#[derive(Debug, Clone)]
pub struct ApplicationView {
    pub application: Application,
    /// None when the profile directory does not know the lawyer
    pub lawyer: Option<LawyerProfile>,
}

/// Service for submitting and listing applications
pub struct ApplicationWorkflow {
    case_port: Arc<dyn CasePort>,
    store: Arc<dyn EngagementStorePort>,
    profiles: Arc<dyn ProfileDirectoryPort>,
    recorder: Arc<TimelineRecorder>,
    notifier: Arc<Notifier>,
    locks: Arc<CaseLockRegistry>,
}

impl ApplicationWorkflow {
    pub fn new(
        case_port: Arc<dyn CasePort>,
        store: Arc<dyn EngagementStorePort>,
        profiles: Arc<dyn ProfileDirectoryPort>,
        recorder: Arc<TimelineRecorder>,
        notifier: Arc<Notifier>,
        locks: Arc<CaseLockRegistry>,
    ) -> Self {
        Self {
            case_port,
            store,
            profiles,
            recorder,
            notifier,
            locks,
        }
    }

    /// Submits a lawyer's application to a pending case
    ///
    /// The duplicate check runs against a fresh read on every write
    /// attempt, immediately before the conditional write: a retried or
    /// concurrent submission from the same lawyer fails
    /// `DuplicateApplication` instead of creating a second application.
    pub async fn submit_application(
        &self,
        actor: ActorContext,
        case_id: CaseId,
        cover_letter: &str,
    ) -> Result<Application, EngagementError> {
        if !actor.is_lawyer() {
            return Err(EngagementError::Unauthorized(
                "only lawyers may apply to cases".to_string(),
            ));
        }
        if cover_letter.trim().is_empty() {
            return Err(EngagementError::Validation(
                "cover letter is required".to_string(),
            ));
        }

        let _guard = self.locks.acquire(case_id).await;

        let case = self.case_port.get_case(case_id, None).await?;
        if !case.accepts_applications() {
            return Err(EngagementError::CaseNotOpen {
                case_id: case_id.to_string(),
            });
        }

        let application = Application::submit(actor.actor_id, cover_letter);

        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut engagement = self.store.get_engagement(case_id, None).await?;
            let expected = engagement.version;
            engagement.record_application(application.clone())?;

            match self.store.save_engagement(&engagement, expected, None).await {
                Ok(_) => {
                    self.recorder
                        .append(case_id, TimelineAction::ApplicationSubmitted, actor)
                        .await?;

                    self.notifier
                        .notify(
                            case.owner_id,
                            NotificationDraft::new(
                                NotificationKind::NewApplication,
                                format!("A lawyer applied to \"{}\"", case.title),
                                case_id,
                            ),
                        )
                        .await;
                    self.notifier
                        .notify(
                            actor.actor_id,
                            NotificationDraft::new(
                                NotificationKind::ApplicationSubmitted,
                                format!("Your application to \"{}\" was submitted", case.title),
                                case_id,
                            ),
                        )
                        .await;

                    tracing::info!(
                        case_id = %case_id,
                        lawyer_id = %actor.actor_id,
                        "application submitted"
                    );
                    return Ok(application);
                }
                Err(e) if e.is_version_conflict() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(EngagementError::Contention {
            case_id: case_id.to_string(),
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }

    /// Lists a case's applications, oldest submission first
    ///
    /// Each entry is joined with the lawyer's directory profile; unknown
    /// lawyers degrade to id-only entries.
    pub async fn list_applications(
        &self,
        case_id: CaseId,
    ) -> Result<Vec<ApplicationView>, EngagementError> {
        let engagement = self.store.get_engagement(case_id, None).await?;

        let mut views = Vec::with_capacity(engagement.applications.len());
        for application in engagement.applications_by_submission() {
            let lawyer = self
                .profiles
                .get_profile(application.lawyer_id, None)
                .await?;
            views.push(ApplicationView { application, lawyer });
        }
        Ok(views)
    }
}
