//! Service stack harness
//!
//! Wires every repository and service over one in-memory document store,
//! mirroring the production wiring, so integration tests exercise the
//! real persistence path instead of per-crate mocks.

use std::sync::Arc;

use domain_case::{BlobStorePort, CasePort};
use domain_engagement::{
    ApplicationWorkflow, AssignmentManager, CaseIntake, CaseLockRegistry, MessagingChannel,
    TimelineRecorder,
};
use domain_notification::{NotificationService, Notifier};
use infra_store::{
    CaseRepository, EngagementRepository, InboxRepository, MemoryStore, StoreBlobStore,
    StoreProfileDirectory,
};

/// A fully wired service stack over a fresh `MemoryStore`
pub struct ServiceHarness {
    pub store: Arc<MemoryStore>,
    pub cases: Arc<dyn CasePort>,
    pub engagements: Arc<EngagementRepository>,
    pub profiles: Arc<StoreProfileDirectory>,
    pub blobs: Arc<StoreBlobStore>,
    pub intake: Arc<CaseIntake>,
    pub workflow: Arc<ApplicationWorkflow>,
    pub assignment: Arc<AssignmentManager>,
    pub messaging: Arc<MessagingChannel>,
    pub recorder: Arc<TimelineRecorder>,
    pub notifications: Arc<NotificationService>,
}

impl Default for ServiceHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let cases: Arc<dyn CasePort> = Arc::new(CaseRepository::new(store.clone()));
        let engagements = Arc::new(EngagementRepository::new(store.clone()));
        let inboxes = Arc::new(InboxRepository::new(store.clone()));
        let profiles = Arc::new(StoreProfileDirectory::new(store.clone()));
        let blobs = Arc::new(StoreBlobStore::new(store.clone()));

        let recorder = Arc::new(TimelineRecorder::new(engagements.clone()));
        let notifications = Arc::new(NotificationService::new(inboxes));
        let notifier = Arc::new(Notifier::new(notifications.clone()));
        let locks = Arc::new(CaseLockRegistry::new());

        let intake = Arc::new(CaseIntake::new(
            cases.clone(),
            engagements.clone(),
            recorder.clone(),
        ));
        let workflow = Arc::new(ApplicationWorkflow::new(
            cases.clone(),
            engagements.clone(),
            profiles.clone(),
            recorder.clone(),
            notifier.clone(),
            locks.clone(),
        ));
        let assignment = Arc::new(AssignmentManager::new(
            cases.clone(),
            engagements.clone(),
            recorder.clone(),
            notifier,
            locks,
        ));
        let messaging = Arc::new(MessagingChannel::new(cases.clone(), engagements.clone()));

        Self {
            store,
            cases,
            engagements,
            profiles,
            blobs,
            intake,
            workflow,
            assignment,
            messaging,
            recorder,
            notifications,
        }
    }
}
