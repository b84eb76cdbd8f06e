mod mailto;
mod status;
mod transport;

pub use mailto::mailto_link;
pub use status::{ButtonState, StatusBoard, StatusKind, StatusMessage};
pub use transport::{FormPayload, HttpTransport, Transport, TransportError};

use std::{fmt, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

use crate::{config::SiteConfig, schedule::Scheduler};

const MIN_MESSAGE_LEN: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

pub const SENT_TEXT: &str = "Message sent successfully! I'll reply within 24 hours.";
pub const FALLBACK_TEXT: &str = "Using fallback method...";
pub const FALLBACK_FAILED_TEXT: &str = "Could not send automatically.";
pub const FALLBACK_LINK_TEXT: &str = "Click here to send via email";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        };
        write!(f, "{s}")
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill all required fields correctly.")]
    MissingField(Field),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Message should be at least 10 characters.")]
    MessageTooShort,
}

/// Raw field values as read from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionAttempt {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl SubmissionAttempt {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Subject, &self.subject),
            (Field::Message, &self.message),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_LEN {
            return Err(ValidationError::MessageTooShort);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    Sent,
    FellBack(TransportError),
    Busy,
}

/// What the controller needs from the rendered form.
pub trait ContactView: Clone + 'static {
    fn read_fields(&self) -> SubmissionAttempt;
    fn reset_fields(&self);
    fn button(&self) -> ButtonState;
    fn set_button(&self, state: ButtonState);
    /// Shows `message`, returning its generation.
    fn show_status(&self, message: StatusMessage) -> u64;
    fn dismiss_status(&self, generation: u64);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub category: &'static str,
    pub label: &'static str,
}

impl AnalyticsEvent {
    pub fn contact_form_submit() -> Self {
        Self {
            name: "contact_form_submit",
            category: "engagement",
            label: "Contact Form",
        }
    }
}

/// Fire-and-forget event sink. Implementations swallow their own failures.
pub trait Analytics {
    fn track(&self, event: &AnalyticsEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnalytics;

impl Analytics for NoAnalytics {
    fn track(&self, _event: &AnalyticsEvent) {}
}

/// Restores the submit button when the network step is over, however it ends.
struct SendingGuard<'a, V: ContactView> {
    view: &'a V,
}

impl<'a, V: ContactView> SendingGuard<'a, V> {
    fn start(view: &'a V) -> Self {
        view.set_button(ButtonState::sending());
        Self { view }
    }
}

impl<V: ContactView> Drop for SendingGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_button(ButtonState::idle());
    }
}

pub struct ContactController<V, T, S, A = NoAnalytics> {
    view: V,
    transport: T,
    scheduler: S,
    analytics: A,
    config: SiteConfig,
}

impl<V, T, S> ContactController<V, T, S, NoAnalytics>
where
    V: ContactView,
    T: Transport,
    S: Scheduler + Clone + 'static,
{
    pub fn new(view: V, transport: T, scheduler: S, config: SiteConfig) -> Self {
        Self {
            view,
            transport,
            scheduler,
            analytics: NoAnalytics,
            config,
        }
    }
}

impl<V, T, S, A> ContactController<V, T, S, A>
where
    V: ContactView,
    T: Transport,
    S: Scheduler + Clone + 'static,
    A: Analytics,
{
    pub fn with_analytics<B: Analytics>(self, analytics: B) -> ContactController<V, T, S, B> {
        ContactController {
            view: self.view,
            transport: self.transport,
            scheduler: self.scheduler,
            analytics,
            config: self.config,
        }
    }

    /// Reads the form and runs one submission attempt to completion.
    pub async fn submit(&self) -> SubmitOutcome {
        let attempt = self.view.read_fields();
        self.submit_attempt(attempt).await
    }

    pub async fn submit_attempt(&self, attempt: SubmissionAttempt) -> SubmitOutcome {
        if self.view.button().is_sending() {
            log::debug!("contact form already sending, ignoring submit");
            return SubmitOutcome::Busy;
        }

        if let Err(e) = attempt.validate() {
            log::debug!("contact form rejected: {e:?}");
            self.announce(StatusMessage::error(e.to_string()));
            return SubmitOutcome::Rejected(e);
        }

        let payload = FormPayload::from(&attempt);
        let res = {
            let _guard = SendingGuard::start(&self.view);
            self.transport.post(&payload).await
        };

        match res {
            Ok(()) => {
                log::info!("contact form sent");
                self.announce(StatusMessage::success(SENT_TEXT));
                self.view.reset_fields();
                self.analytics.track(&AnalyticsEvent::contact_form_submit());
                SubmitOutcome::Sent
            }
            Err(e) => {
                log::error!("Form submission error: {e}");
                self.fall_back(attempt);
                SubmitOutcome::FellBack(e)
            }
        }
    }

    fn fall_back(&self, attempt: SubmissionAttempt) {
        self.announce(StatusMessage::info(FALLBACK_TEXT));

        let view = self.view.clone();
        let scheduler = self.scheduler.clone();
        let config = self.config.clone();
        self.scheduler
            .schedule_fn(self.config.fallback_delay, move || {
                let link = mailto_link(&config.contact_email, &attempt);
                let message = StatusMessage::error(FALLBACK_FAILED_TEXT).with_link(link);
                announce(&view, &scheduler, &config, message);
            });
    }

    fn announce(&self, message: StatusMessage) {
        announce(&self.view, &self.scheduler, &self.config, message);
    }
}

fn announce<V, S>(view: &V, scheduler: &S, config: &SiteConfig, message: StatusMessage)
where
    V: ContactView,
    S: Scheduler,
{
    let after = message.kind.dismiss_after(config);
    let generation = view.show_status(message);
    let view = view.clone();
    scheduler.schedule(after, Box::new(move || view.dismiss_status(generation)));
}
