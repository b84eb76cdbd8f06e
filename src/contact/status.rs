use std::time::Duration;

use crate::config::SiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

impl StatusKind {
    pub fn as_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub fn dismiss_after(&self, config: &SiteConfig) -> Duration {
        match self {
            Self::Success => config.success_dismiss,
            Self::Error | Self::Info => config.notice_dismiss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub link: Option<String>,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            link: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, text)
    }

    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.link = Some(href.into());
        self
    }
}

/// The form's single status slot.
///
/// Every `show` bumps the generation; `dismiss` only clears the slot if it is still
/// showing the message it was scheduled for, so a stale timer never hides a newer
/// message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBoard {
    generation: u64,
    current: Option<StatusMessage>,
}

impl StatusBoard {
    pub fn show(&mut self, message: StatusMessage) -> u64 {
        self.generation += 1;
        self.current = Some(message);
        self.generation
    }

    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub enabled: bool,
    pub label: &'static str,
}

impl ButtonState {
    pub const IDLE_LABEL: &'static str = "Send Message";
    pub const SENDING_LABEL: &'static str = "Sending...";

    pub fn idle() -> Self {
        Self {
            enabled: true,
            label: Self::IDLE_LABEL,
        }
    }

    pub fn sending() -> Self {
        Self {
            enabled: false,
            label: Self::SENDING_LABEL,
        }
    }

    pub fn is_sending(&self) -> bool {
        !self.enabled
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_dismiss_is_ignored() {
        let mut board = StatusBoard::default();
        let info = board.show(StatusMessage::info("Using fallback method..."));
        let err = board.show(StatusMessage::error("Could not send automatically."));

        assert!(!board.dismiss(info));
        assert_eq!(
            board.current().map(|m| m.kind),
            Some(StatusKind::Error)
        );
        assert!(board.dismiss(err));
        assert!(board.current().is_none());
        // second dismiss of same generation is a no-op
        assert!(!board.dismiss(err));
    }

    #[test]
    fn test_dismiss_durations_by_kind() {
        let config = SiteConfig::default();
        assert_eq!(StatusKind::Success.dismiss_after(&config).as_millis(), 5000);
        assert_eq!(StatusKind::Error.dismiss_after(&config).as_millis(), 3000);
        assert_eq!(StatusKind::Info.dismiss_after(&config).as_millis(), 3000);
    }

    #[test]
    fn test_button_states() {
        assert!(!ButtonState::idle().is_sending());
        assert!(ButtonState::sending().is_sending());
        assert_eq!(ButtonState::default().label, "Send Message");
    }
}
