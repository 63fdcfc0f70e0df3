use std::fmt;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::DesktopAnnouncer;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::DesktopAnnouncer;

/// Severity of a user-facing announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    Info,
    Success,
    Warning,
}

impl fmt::Display for AnnouncementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        };
        f.write_str(label)
    }
}

/// Observational feedback sink invoked after each mutation. Announcements
/// never affect the collection.
pub trait Announcer {
    fn announce(&self, message: &str, kind: AnnouncementKind);
}

pub struct NoopAnnouncer;

impl Announcer for NoopAnnouncer {
    fn announce(&self, _message: &str, _kind: AnnouncementKind) {}
}

/// Writes announcements to stderr, keeping stdout free for command output.
pub struct ConsoleAnnouncer;

impl Announcer for ConsoleAnnouncer {
    fn announce(&self, message: &str, kind: AnnouncementKind) {
        eprintln!("[{kind}] {message}");
    }
}

const DESKTOP_ENV_VAR: &str = "TASKFLOW_DESKTOP_ANNOUNCE";

/// Console announcements by default; desktop toasts when opted in via the
/// environment on a platform that supports them.
pub fn announcer_from_env() -> Box<dyn Announcer> {
    if std::env::var(DESKTOP_ENV_VAR).is_ok()
        && let Some(desktop) = desktop_announcer()
    {
        return desktop;
    }
    Box::new(ConsoleAnnouncer)
}

#[cfg(any(target_os = "linux", windows))]
fn desktop_announcer() -> Option<Box<dyn Announcer>> {
    Some(Box::new(DesktopAnnouncer))
}

#[cfg(not(any(target_os = "linux", windows)))]
fn desktop_announcer() -> Option<Box<dyn Announcer>> {
    None
}

#[cfg(test)]
mod tests {
    use super::{Announcer, AnnouncementKind, NoopAnnouncer};

    #[test]
    fn kind_labels_are_stable() {
        assert_eq!(AnnouncementKind::Info.to_string(), "info");
        assert_eq!(AnnouncementKind::Success.to_string(), "success");
        assert_eq!(AnnouncementKind::Warning.to_string(), "warning");
    }

    #[test]
    fn noop_announcer_accepts_everything() {
        NoopAnnouncer.announce("anything", AnnouncementKind::Info);
    }
}
