use match_core::domain::UserId;
use match_core::store::MatchNotification;
use match_core::{Announcement, DataAccessError, Notifier};
use tracing::info;

/// Delivers notifications as structured log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn payload(user_id: &UserId, announcement: &Announcement) -> Result<String, DataAccessError> {
        let notification = MatchNotification::new_match(user_id, announcement);
        serde_json::to_string(&notification).map_err(|err| DataAccessError::new(err.to_string()))
    }
}

impl Notifier for LoggingNotifier {
    fn notify_deliverer_of_match(
        &self,
        deliverer_user_id: &UserId,
        announcement: &Announcement,
    ) -> Result<(), DataAccessError> {
        let payload = Self::payload(deliverer_user_id, announcement)?;
        info!(
            component = "notifier",
            user_id = %deliverer_user_id,
            announcement_id = %announcement.id,
            notification = %payload,
            "deliverer notified"
        );
        Ok(())
    }
}
