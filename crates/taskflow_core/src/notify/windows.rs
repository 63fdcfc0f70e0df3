use crate::notify::{Announcer, AnnouncementKind};
use tauri_winrt_notification::Toast;

pub struct DesktopAnnouncer;

impl Announcer for DesktopAnnouncer {
    fn announce(&self, message: &str, kind: AnnouncementKind) {
        let shown = Toast::new(Toast::POWERSHELL_APP_ID)
            .title("taskflow")
            .text1(message)
            .text2(&kind.to_string())
            .show();

        if let Err(err) = shown {
            log::warn!("desktop announcement failed: {err}");
        }
    }
}
