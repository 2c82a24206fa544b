//! Tests for inbox unread-count derivation

use core_kernel::{CaseId, PartyId};
use domain_notification::{NotificationDraft, NotificationInbox, NotificationKind};
use proptest::prelude::*;

fn filled_inbox(entries: usize) -> NotificationInbox {
    let mut inbox = NotificationInbox::new(PartyId::new());
    for i in 0..entries {
        inbox.push(
            NotificationDraft::new(
                NotificationKind::NewApplication,
                format!("application {i}"),
                CaseId::new(),
            )
            .into_notification(),
        );
    }
    inbox
}

#[test]
fn test_unread_matches_entry_count() {
    let inbox = filled_inbox(7);
    assert_eq!(inbox.unread_count, 7);
    assert_eq!(inbox.notifications.len(), 7);
}

proptest! {
    /// The stored unread count always equals the number of entries whose
    /// read flag is still false, no matter which subset gets marked read.
    #[test]
    fn prop_unread_count_is_derived(total in 1usize..20, reads in proptest::collection::vec(any::<prop::sample::Index>(), 0..40)) {
        let mut inbox = filled_inbox(total);
        for index in reads {
            let id = inbox.notifications[index.index(total)].id;
            inbox.mark_read(id);
        }
        let expected = inbox.notifications.iter().filter(|n| !n.read).count();
        prop_assert_eq!(inbox.unread_count, expected);
    }
}
