use leptos::{ev::MouseEvent, prelude::*};
use leptos_use::use_window_scroll;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::effects::{active_section, header_scrolled, NavMenu};

pub const NAV_LINKS: [(&str, &str); 7] = [
    ("home", "Home"),
    ("about", "About"),
    ("experience", "Experience"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("education", "Education"),
    ("contact", "Contact"),
];

/// Smoothly scrolls to the `#id` anchor instead of jumping.
pub fn scroll_to_anchor(ev: &MouseEvent, id: &str) {
    let Some(target) = document().get_element_by_id(id) else {
        return;
    };
    ev.prevent_default();
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}

#[component]
pub fn Header() -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();
    let (menu, set_menu) = signal(NavMenu::default());
    let (active, set_active) = signal(None::<String>);

    Effect::new(move |_| {
        scroll_y.track();
        let doc = document();
        let tops = NAV_LINKS
            .iter()
            .filter_map(|(id, _)| {
                doc.get_element_by_id(id)
                    .map(|el| (*id, el.get_bounding_client_rect().top()))
            })
            .collect::<Vec<_>>();
        let current = active_section(tops).map(str::to_string);
        if current != active.get_untracked() {
            set_active(current);
        }
    });

    view! {
        <header class:scrolled=move || header_scrolled(scroll_y.get())>
            <nav class="navbar">
                <a href="#home" class="logo" on:click=move |ev| scroll_to_anchor(&ev, "home")>
                    "Portfolio"
                </a>
                <ul class="nav-links" class:show=move || menu.get().is_open()>
                    {NAV_LINKS
                        .into_iter()
                        .map(|(id, label)| {
                            view! {
                                <li>
                                    <a
                                        href=format!("#{id}")
                                        class:active=move || active.get().as_deref() == Some(id)
                                        on:click=move |ev| {
                                            scroll_to_anchor(&ev, id);
                                            set_menu.update(|m| m.close());
                                        }
                                    >
                                        {label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <button
                    class="mobile-menu"
                    class:active=move || menu.get().is_open()
                    aria-label="Toggle navigation"
                    on:click=move |_| set_menu.update(|m| m.toggle())
                >
                    <i class="fas fa-bars" />
                </button>
            </nav>
        </header>
    }
}
