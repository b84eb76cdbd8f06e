mod contact;
mod header;
mod homepage;
mod reveal;

use std::time::Duration;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::{config::build_year, schedule::{Scheduler, Task}};
use header::Header;
use homepage::HomePage;
use reveal::RevealProvider;

/// [`Scheduler`] backed by `window.setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn now(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn schedule(&self, delay: Duration, task: Task) {
        set_timeout(task, delay);
    }
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <link
                    rel="stylesheet"
                    href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css"
                />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    Effect::new(move |_| {
        if let Some(body) = document().body() {
            if let Err(e) = body.class_list().add_1("loaded") {
                log::warn!("couldn't mark body as loaded: {e:?}");
            }
        }
    });

    view! {
        <Title formatter=|title| format!("Portfolio - {title}") />

        <Router>
            <RevealProvider>
                <Header />
                <main>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=path!("/") view=HomePage />
                    </Routes>
                </main>
                <Footer />
            </RevealProvider>
        </Router>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p>{format!("© {} Portfolio. Built with Rust and Leptos.", build_year())}</p>
        </footer>
    }
}
