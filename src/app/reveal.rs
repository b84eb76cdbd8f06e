use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use leptos::{html, prelude::*};
use leptos_use::{
    use_intersection_observer_with_options, use_window_scroll, UseIntersectionObserverOptions,
};

use super::BrowserScheduler;
use crate::reveal::{counter, Counter, GroupKind, RevealEngine, RevealSink, Trigger};

type RevealedSet = HashSet<(GroupKind, usize)>;

/// Publishes reveals into a signal the watched elements read their class from.
#[derive(Clone, Copy)]
struct SignalSink {
    revealed: RwSignal<RevealedSet>,
}

impl RevealSink for SignalSink {
    fn reveal(&self, kind: GroupKind, index: usize) {
        self.revealed.update(|s| {
            s.insert((kind, index));
        });
    }
}

#[derive(Clone, Copy)]
struct Watched {
    kind: GroupKind,
    index: usize,
    node: NodeRef<html::Div>,
}

#[derive(Clone, Copy)]
pub struct RevealContext {
    engine: StoredValue<Arc<Mutex<RevealEngine<BrowserScheduler, SignalSink>>>>,
    nodes: StoredValue<Vec<Watched>>,
    revealed: RwSignal<RevealedSet>,
}

impl RevealContext {
    fn new() -> Self {
        let revealed = RwSignal::new(RevealedSet::new());
        let engine = RevealEngine::new(BrowserScheduler, SignalSink { revealed });
        Self {
            engine: StoredValue::new(Arc::new(Mutex::new(engine))),
            nodes: StoredValue::new(Vec::new()),
            revealed,
        }
    }

    fn register(&self, kind: GroupKind, node: NodeRef<html::Div>) -> usize {
        let index = self.engine.with_value(|e| {
            e.lock()
                .expect("should be able to lock reveal engine")
                .register(kind)
        });
        self.nodes
            .update_value(|nodes| nodes.push(Watched { kind, index, node }));
        index
    }

    pub fn is_revealed(&self, kind: GroupKind, index: usize) -> bool {
        self.revealed.with(|s| s.contains(&(kind, index)))
    }

    fn poll_all(&self) {
        let viewport = window()
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let nodes = self.nodes.get_value();
        for kind in GroupKind::ALL.into_iter().filter(|k| k.is_polled()) {
            let mut tops = nodes
                .iter()
                .filter(|w| w.kind == kind)
                .map(|w| {
                    let top = w
                        .node
                        .get_untracked()
                        .map(|el| el.get_bounding_client_rect().top())
                        .unwrap_or(f64::INFINITY);
                    (w.index, top)
                })
                .collect::<Vec<_>>();
            if tops.is_empty() {
                continue;
            }
            tops.sort_by_key(|(i, _)| *i);
            let tops = tops.into_iter().map(|(_, t)| t).collect::<Vec<_>>();
            self.engine.with_value(|e| {
                e.lock()
                    .expect("should be able to lock reveal engine")
                    .poll(kind, &tops, viewport)
            });
        }
    }

    fn intersect(&self, kind: GroupKind, index: usize, is_intersecting: bool) -> bool {
        self.engine.with_value(|e| {
            e.lock()
                .expect("should be able to lock reveal engine")
                .intersect(kind, index, is_intersecting)
                .unobserve
        })
    }
}

/// Owns the page's reveal engine and re-checks scroll-polled groups on every scroll.
#[component]
pub fn RevealProvider(children: Children) -> impl IntoView {
    let ctx = RevealContext::new();
    provide_context(ctx);

    let (_, scroll_y) = use_window_scroll();
    // runs once after mount, then on every scroll tick
    Effect::new(move |_| {
        scroll_y.track();
        ctx.poll_all();
    });

    children()
}

/// A watched element. Gains `fade-in visible` once the engine reveals it.
#[component]
pub fn Reveal(
    kind: GroupKind,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] id: Option<String>,
    children: Children,
) -> impl IntoView {
    let ctx = expect_context::<RevealContext>();
    let node = NodeRef::<html::Div>::new();
    let index = ctx.register(kind, node);

    if let Trigger::Intersection(opts) = kind.config().trigger {
        use_intersection_observer_with_options(
            node,
            move |entries, observer| {
                for entry in entries {
                    let unobserve = ctx.intersect(kind, index, entry.is_intersecting());
                    if unobserve {
                        observer.unobserve(&entry.target());
                    }
                }
            },
            UseIntersectionObserverOptions::default()
                .thresholds(vec![opts.threshold])
                .root_margin(opts.root_margin),
        );
    }

    let classes = move || {
        let base = format!("{} {}", kind.class(), class);
        if ctx.is_revealed(kind, index) {
            format!("{base} fade-in visible")
        } else {
            base
        }
    };

    view! {
        <div node_ref=node id=id class=classes>
            {children()}
        </div>
    }
}

/// A stat figure that counts up once the counters group is revealed.
#[component]
pub fn StatCounter(#[prop(into)] value: String) -> impl IntoView {
    let ctx = expect_context::<RevealContext>();
    let text = RwSignal::new(value.clone());
    let started = StoredValue::new(false);

    Effect::new(move |_| {
        if !ctx.is_revealed(GroupKind::Counters, 0) || started.get_value() {
            return;
        }
        started.set_value(true);
        let Some(c) = Counter::parse(&text.get_untracked()) else {
            log::debug!("stat {} isn't numeric, skipping counter", value);
            return;
        };
        counter::animate(&BrowserScheduler, c, move |frame| text.set(frame));
    });

    view! { <h3>{text}</h3> }
}
