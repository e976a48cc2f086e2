use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLevel {
    #[default]
    Normal,
    Elevated,
}

/// The session's elevated-mode switch. Observers follow it through a watch channel.
#[derive(Debug)]
pub struct SessionFlag {
    level: watch::Sender<AccessLevel>,
}

impl Default for SessionFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFlag {
    pub fn new() -> Self {
        let (level, _) = watch::channel(AccessLevel::Normal);
        Self { level }
    }

    pub fn level(&self) -> AccessLevel {
        *self.level.borrow()
    }

    pub fn is_elevated(&self) -> bool {
        self.level() == AccessLevel::Elevated
    }

    pub fn set_elevated(&self, elevated: bool) {
        let next = if elevated {
            AccessLevel::Elevated
        } else {
            AccessLevel::Normal
        };
        self.level.send_replace(next);
    }

    pub fn subscribe(&self) -> watch::Receiver<AccessLevel> {
        self.level.subscribe()
    }
}
