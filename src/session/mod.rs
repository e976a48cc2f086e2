//! Per-visitor state: the submission store, elevated mode, the logo unlock
//! gesture and pending toast notices.

pub mod credential;
pub mod flag;
pub mod gesture;
mod registry;

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::store::SubmissionStore;

pub use credential::AdminCredential;
pub use flag::{AccessLevel, SessionFlag};
pub use gesture::UnlockGesture;
pub use registry::{SessionHandle, SessionRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Destructive,
}

/// A transient message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub tone: NoticeTone,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            tone: NoticeTone::Success,
        }
    }

    pub fn destructive(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            tone: NoticeTone::Destructive,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// What a logo activation led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    None,
    PromptOpened,
    LoggedOut,
}

impl GestureAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureAction::None => "none",
            GestureAction::PromptOpened => "prompt",
            GestureAction::LoggedOut => "logged_out",
        }
    }
}

#[derive(Debug)]
pub struct SiteSession {
    store: SubmissionStore,
    flag: SessionFlag,
    gesture: UnlockGesture,
    prompt_open: bool,
    notices: Vec<Notice>,
    last_seen: Instant,
}

impl SiteSession {
    pub fn new(unlock_window: Duration, unlock_activations: u32) -> Self {
        Self {
            store: SubmissionStore::new(),
            flag: SessionFlag::new(),
            gesture: UnlockGesture::new(unlock_window, unlock_activations),
            prompt_open: false,
            notices: Vec::new(),
            last_seen: Instant::now(),
        }
    }

    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SubmissionStore {
        &mut self.store
    }

    pub fn flag(&self) -> &SessionFlag {
        &self.flag
    }

    pub fn is_elevated(&self) -> bool {
        self.flag.is_elevated()
    }

    pub fn prompt_open(&self) -> bool {
        self.prompt_open
    }

    pub fn close_prompt(&mut self) {
        self.prompt_open = false;
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drains pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_seen = now;
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }

    /// Feeds one logo activation into the unlock gesture.
    pub fn logo_activated(&mut self, now: Instant) -> GestureAction {
        if !self.gesture.activate(now) {
            debug!(progress = self.gesture.progress(now), "logo activation counted");
            return GestureAction::None;
        }

        if self.flag.is_elevated() {
            self.flag.set_elevated(false);
            self.push_notice(
                Notice::success("Admin mode disabled")
                    .with_description("You have logged out of admin mode."),
            );
            info!("admin mode disabled by logo gesture");
            GestureAction::LoggedOut
        } else {
            self.prompt_open = true;
            GestureAction::PromptOpened
        }
    }

    /// Checks a candidate secret. On success the session is elevated and the
    /// prompt closes; on failure the prompt stays open for another attempt.
    pub fn submit_credential(&mut self, candidate: &str, credential: &AdminCredential) -> bool {
        if credential.verify(candidate) {
            self.flag.set_elevated(true);
            self.prompt_open = false;
            self.push_notice(
                Notice::success("Admin mode enabled").with_description("Welcome to the admin panel!"),
            );
            info!("admin mode enabled");
            true
        } else {
            self.push_notice(Notice::destructive("Invalid password").with_description("Please try again."));
            warn!("rejected admin credential attempt");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AdmissionFields, CollectionKind};

    fn session() -> SiteSession {
        SiteSession::new(Duration::from_millis(2000), 3)
    }

    fn triple_click(session: &mut SiteSession, base: Instant) -> GestureAction {
        session.logo_activated(base);
        session.logo_activated(base + Duration::from_millis(1000));
        session.logo_activated(base + Duration::from_millis(1900))
    }

    #[test]
    fn gesture_opens_prompt_then_secret_elevates() {
        let credential = AdminCredential::from_secret("VIS-BEST").unwrap();
        let mut session = session();

        assert_eq!(triple_click(&mut session, Instant::now()), GestureAction::PromptOpened);
        assert!(session.prompt_open());

        assert!(!session.submit_credential("wrong", &credential));
        assert!(session.prompt_open());
        assert!(!session.is_elevated());
        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].tone, NoticeTone::Destructive);

        assert!(session.submit_credential("VIS-BEST", &credential));
        assert!(!session.prompt_open());
        assert!(session.is_elevated());
        assert_eq!(session.take_notices()[0].title, "Admin mode enabled");
    }

    #[test]
    fn gesture_while_elevated_logs_out() {
        let credential = AdminCredential::from_secret("VIS-BEST").unwrap();
        let mut session = session();
        session.submit_credential("VIS-BEST", &credential);
        session.take_notices();

        assert_eq!(triple_click(&mut session, Instant::now()), GestureAction::LoggedOut);
        assert!(!session.is_elevated());
        assert!(!session.prompt_open());
        assert_eq!(session.take_notices()[0].title, "Admin mode disabled");
    }

    #[test]
    fn spaced_out_clicks_do_nothing() {
        let mut session = session();
        let base = Instant::now();

        assert_eq!(session.logo_activated(base), GestureAction::None);
        assert_eq!(
            session.logo_activated(base + Duration::from_millis(2500)),
            GestureAction::None
        );
        assert_eq!(
            session.logo_activated(base + Duration::from_millis(3000)),
            GestureAction::None
        );
        assert!(!session.prompt_open());
    }

    #[test]
    fn store_stays_queryable_after_logout() {
        let credential = AdminCredential::from_secret("VIS-BEST").unwrap();
        let mut session = session();
        session.submit_credential("VIS-BEST", &credential);
        session.store_mut().add_admission(AdmissionFields {
            student_name: "Asha Rao".into(),
            ..Default::default()
        });

        triple_click(&mut session, Instant::now());
        assert!(!session.is_elevated());
        assert_eq!(session.store().len(CollectionKind::Admissions), 1);
    }

    #[test]
    fn notices_drain_once() {
        let mut session = session();
        session.push_notice(Notice::success("Message Sent!"));

        assert_eq!(session.take_notices().len(), 1);
        assert!(session.take_notices().is_empty());
    }
}
