use leptos::{ev::SubmitEvent, prelude::*};
use wasm_bindgen::{JsCast, JsValue};

use super::BrowserScheduler;
use crate::{
    config::SiteConfig,
    contact::{
        Analytics, AnalyticsEvent, ButtonState, ContactController, ContactView, HttpTransport,
        StatusBoard, StatusMessage, SubmissionAttempt, FALLBACK_LINK_TEXT,
    },
};

/// Form state held in signals, so the controller can drive the rendered form.
#[derive(Clone, Copy)]
struct SignalContactView {
    name: RwSignal<String>,
    email: RwSignal<String>,
    subject: RwSignal<String>,
    message: RwSignal<String>,
    button: RwSignal<ButtonState>,
    status: RwSignal<StatusBoard>,
}

impl SignalContactView {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            subject: RwSignal::new(String::new()),
            message: RwSignal::new(String::new()),
            button: RwSignal::new(ButtonState::idle()),
            status: RwSignal::new(StatusBoard::default()),
        }
    }
}

impl ContactView for SignalContactView {
    fn read_fields(&self) -> SubmissionAttempt {
        SubmissionAttempt::new(
            self.name.get_untracked(),
            self.email.get_untracked(),
            self.subject.get_untracked(),
            self.message.get_untracked(),
        )
    }

    fn reset_fields(&self) {
        for field in [self.name, self.email, self.subject, self.message] {
            field.set(String::new());
        }
    }

    fn button(&self) -> ButtonState {
        self.button.get_untracked()
    }

    fn set_button(&self, state: ButtonState) {
        self.button.set(state);
    }

    fn show_status(&self, message: StatusMessage) -> u64 {
        let mut generation = 0;
        self.status.update(|b| generation = b.show(message));
        generation
    }

    fn dismiss_status(&self, generation: u64) {
        self.status.update(|b| {
            b.dismiss(generation);
        });
    }
}

/// Sends events through the page's `gtag` snippet when it's loaded.
#[derive(Debug, Clone, Copy)]
struct GtagAnalytics;

impl Analytics for GtagAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        let window: JsValue = window().into();
        let Ok(gtag) = js_sys::Reflect::get(&window, &JsValue::from_str("gtag")) else {
            return;
        };
        let Some(gtag) = gtag.dyn_ref::<js_sys::Function>() else {
            return;
        };
        let params = serde_json::json!({
            "event_category": event.category,
            "event_label": event.label,
        });
        let Ok(params) = js_sys::JSON::parse(&params.to_string()) else {
            return;
        };
        if let Err(e) = gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(event.name),
            &params,
        ) {
            log::debug!("gtag call failed: {e:?}");
        }
    }
}

#[component]
pub fn ContactForm() -> impl IntoView {
    let config = SiteConfig::from_build_env();
    let form = SignalContactView::new();
    let endpoint = config.form_endpoint.clone();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let controller = ContactController::new(
            form,
            HttpTransport::new(config.form_endpoint.clone()),
            BrowserScheduler,
            config.clone(),
        )
        .with_analytics(GtagAnalytics);
        leptos::task::spawn_local(async move {
            let outcome = controller.submit().await;
            log::debug!("contact form outcome: {outcome:?}");
        });
    };

    let status = move || {
        form.status.with(|b| b.current().cloned()).map(|m| {
            view! {
                <div class=format!("form-status {}", m.kind.as_class())>
                    {m.text}
                    {m
                        .link
                        .map(|href| {
                            view! {
                                <br />
                                <a href=href class="mailto-link">
                                    {FALLBACK_LINK_TEXT}
                                </a>
                            }
                        })}
                </div>
            }
        })
    };

    view! {
        <form id="contactForm" class="contact-form" action=endpoint method="POST" on:submit=on_submit>
            <div class="form-row">
                <div class="form-group">
                    <label for="name">"Name"</label>
                    <input id="name" name="name" type="text" required bind:value=form.name />
                </div>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input id="email" name="email" type="email" required bind:value=form.email />
                </div>
            </div>
            <input type="hidden" name="_replyto" prop:value=form.email />
            <div class="form-group">
                <label for="subject">"Subject"</label>
                <input id="subject" name="subject" type="text" required bind:value=form.subject />
            </div>
            <div class="form-group">
                <label for="message">"Message"</label>
                <textarea id="message" name="message" rows="5" required bind:value=form.message />
            </div>
            <button
                id="submitBtn"
                type="submit"
                class="btn btn-primary"
                disabled=move || !form.button.with(|b| b.enabled)
            >
                <i class=move || {
                    if form.button.with(|b| b.is_sending()) {
                        "fas fa-spinner fa-spin"
                    } else {
                        "fas fa-paper-plane"
                    }
                } />
                " "
                {move || form.button.with(|b| b.label)}
            </button>
            {status}
        </form>
    }
}
