use crate::notify::{Announcer, AnnouncementKind};
use notify_rust::{Notification, Urgency};

pub struct DesktopAnnouncer;

impl Announcer for DesktopAnnouncer {
    fn announce(&self, message: &str, kind: AnnouncementKind) {
        let urgency = match kind {
            AnnouncementKind::Info => Urgency::Low,
            AnnouncementKind::Success => Urgency::Normal,
            AnnouncementKind::Warning => Urgency::Critical,
        };

        let mut notification = Notification::new();
        notification.summary("taskflow");
        notification.body(message);
        notification.urgency(urgency);

        if let Err(err) = notification.show() {
            log::warn!("desktop announcement failed: {err}");
        }
    }
}
