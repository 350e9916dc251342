use storeguard_core::models::NotificationKind;
use storeguard_core::records::Certificate;

/// Decides whether a classified certificate gets a notification this run.
///
/// Classification itself never consults this; the sweep filters each
/// bucket through the policy just before building requests, so a
/// different suppression strategy is a drop-in replacement.
pub trait NotificationPolicy: Send + Sync {
    fn should_notify(&self, certificate: &Certificate, kind: NotificationKind) -> bool;
}

/// Re-notify on every sweep. A still-expired certificate is nagged
/// daily until it is renewed or deactivated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyEveryRun;

impl NotificationPolicy for NotifyEveryRun {
    fn should_notify(&self, _certificate: &Certificate, _kind: NotificationKind) -> bool {
        true
    }
}
