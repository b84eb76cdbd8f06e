pub mod counter;

use std::{collections::HashMap, time::Duration};

use crate::schedule::Scheduler;

pub use counter::Counter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKind {
    Section,
    ProjectCard,
    Timeline,
    StatCard,
    SkillCategory,
    AchievementCard,
    ExperienceCard,
    Education,
    Counters,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
    pub one_shot: bool,
}

const CARD_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.2,
    root_margin: "0px 0px -100px 0px",
    one_shot: false,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Revealed once the element's top is `offset` px above the viewport bottom.
    Scroll { offset: f64 },
    Intersection(ObserverOptions),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupConfig {
    pub trigger: Trigger,
    pub stagger: Duration,
    /// Group whose entries are all revealed along with this one.
    pub cascade: Option<GroupKind>,
}

impl GroupKind {
    pub const ALL: [GroupKind; 9] = [
        Self::Section,
        Self::ProjectCard,
        Self::Timeline,
        Self::StatCard,
        Self::SkillCategory,
        Self::AchievementCard,
        Self::ExperienceCard,
        Self::Education,
        Self::Counters,
    ];

    pub fn config(&self) -> GroupConfig {
        let ms = Duration::from_millis;
        match self {
            Self::Section | Self::ProjectCard => GroupConfig {
                trigger: Trigger::Scroll { offset: 150.0 },
                stagger: Duration::ZERO,
                cascade: None,
            },
            Self::Timeline => GroupConfig {
                trigger: Trigger::Scroll { offset: 100.0 },
                stagger: ms(200),
                cascade: None,
            },
            Self::StatCard => GroupConfig {
                trigger: Trigger::Scroll { offset: 100.0 },
                stagger: ms(100),
                cascade: None,
            },
            Self::SkillCategory => GroupConfig {
                trigger: Trigger::Intersection(CARD_OBSERVER),
                stagger: ms(100),
                cascade: None,
            },
            Self::AchievementCard => GroupConfig {
                trigger: Trigger::Intersection(CARD_OBSERVER),
                stagger: ms(150),
                cascade: None,
            },
            Self::ExperienceCard => GroupConfig {
                trigger: Trigger::Intersection(CARD_OBSERVER),
                stagger: ms(200),
                cascade: None,
            },
            Self::Education => GroupConfig {
                trigger: Trigger::Intersection(ObserverOptions {
                    threshold: 0.3,
                    root_margin: "0px",
                    one_shot: false,
                }),
                stagger: Duration::ZERO,
                cascade: Some(Self::Timeline),
            },
            Self::Counters => GroupConfig {
                trigger: Trigger::Intersection(ObserverOptions {
                    threshold: 0.5,
                    root_margin: "0px",
                    one_shot: true,
                }),
                stagger: Duration::ZERO,
                cascade: None,
            },
        }
    }

    pub fn is_polled(&self) -> bool {
        matches!(self.config().trigger, Trigger::Scroll { .. })
    }

    /// CSS class for the group's elements, matching the stylesheet.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::ProjectCard => "project-card",
            Self::Timeline => "timeline-item",
            Self::StatCard => "stat-card",
            Self::SkillCategory => "skill-category",
            Self::AchievementCard => "achievement-card",
            Self::ExperienceCard => "experience-card",
            Self::Education => "education",
            Self::Counters => "education-stats",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchEntry {
    pub index: usize,
    pub revealed: bool,
}

#[derive(Debug, Clone, Default)]
struct WatchGroup {
    entries: Vec<WatchEntry>,
}

impl WatchGroup {
    fn add(&mut self) -> usize {
        let index = self.entries.len();
        self.entries.push(WatchEntry {
            index,
            revealed: false,
        });
        index
    }

    // Flips the flag and returns true only the first time.
    fn mark(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) if !entry.revealed => {
                entry.revealed = true;
                true
            }
            _ => false,
        }
    }
}

/// Applies the visual side of a reveal.
pub trait RevealSink: Clone + 'static {
    fn reveal(&self, kind: GroupKind, index: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntersectOutcome {
    pub revealed: bool,
    pub unobserve: bool,
}

/// Tracks every watched element on the page and decides when each one is revealed.
///
/// Reveal flags are monotonic: once an entry is revealed, later scroll ticks or
/// intersections leave it alone. Stagger delays use the entry's registration index,
/// not its position within the batch being revealed.
pub struct RevealEngine<S, K> {
    groups: HashMap<GroupKind, WatchGroup>,
    scheduler: S,
    sink: K,
}

impl<S, K> RevealEngine<S, K>
where
    S: Scheduler + Clone + 'static,
    K: RevealSink,
{
    pub fn new(scheduler: S, sink: K) -> Self {
        Self {
            groups: HashMap::new(),
            scheduler,
            sink,
        }
    }

    /// Registers one element and returns its index within the group.
    pub fn register(&mut self, kind: GroupKind) -> usize {
        self.groups.entry(kind).or_default().add()
    }

    pub fn register_many(&mut self, kind: GroupKind, count: usize) {
        for _ in 0..count {
            self.register(kind);
        }
    }

    pub fn len(&self, kind: GroupKind) -> usize {
        self.groups.get(&kind).map(|g| g.entries.len()).unwrap_or(0)
    }

    pub fn is_revealed(&self, kind: GroupKind, index: usize) -> bool {
        self.groups
            .get(&kind)
            .and_then(|g| g.entries.get(index))
            .map(|e| e.revealed)
            .unwrap_or(false)
    }

    /// Checks a scroll-polled group against the viewport. `tops` holds each entry's
    /// bounding-rect top in index order. Returns how many entries were newly revealed.
    pub fn poll(&mut self, kind: GroupKind, tops: &[f64], viewport_height: f64) -> usize {
        let offset = match kind.config().trigger {
            Trigger::Scroll { offset } => offset,
            Trigger::Intersection(_) => {
                log::debug!("{kind:?} is observer driven, ignoring poll");
                return 0;
            }
        };
        let visible = tops
            .iter()
            .enumerate()
            .filter(|(_, top)| **top < viewport_height - offset)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        visible
            .into_iter()
            .filter(|i| self.reveal_entry(kind, *i))
            .count()
    }

    /// Handles one observer entry for an intersection-driven group.
    pub fn intersect(&mut self, kind: GroupKind, index: usize, is_intersecting: bool) -> IntersectOutcome {
        if !is_intersecting {
            return IntersectOutcome::default();
        }
        let config = kind.config();
        let one_shot = match config.trigger {
            Trigger::Intersection(opts) => opts.one_shot,
            Trigger::Scroll { .. } => false,
        };
        let revealed = self.reveal_entry(kind, index);
        // cascades run on every intersection, already revealed entries are skipped
        if let Some(cascade) = config.cascade {
            self.reveal_all(cascade);
        }
        IntersectOutcome {
            revealed,
            unobserve: one_shot,
        }
    }

    /// Reveals every entry of a group with the group's stagger.
    pub fn reveal_all(&mut self, kind: GroupKind) -> usize {
        (0..self.len(kind))
            .filter(|i| self.reveal_entry(kind, *i))
            .count()
    }

    fn reveal_entry(&mut self, kind: GroupKind, index: usize) -> bool {
        let marked = self
            .groups
            .get_mut(&kind)
            .map(|g| g.mark(index))
            .unwrap_or(false);
        if !marked {
            return false;
        }

        let delay = kind.config().stagger * index as u32;
        if delay.is_zero() {
            self.sink.reveal(kind, index);
        } else {
            let sink = self.sink.clone();
            self.scheduler
                .schedule_fn(delay, move || sink.reveal(kind, index));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::schedule::ManualScheduler;

    #[derive(Clone)]
    struct RecordingSink {
        sched: ManualScheduler,
        hits: Rc<RefCell<Vec<(GroupKind, usize, u64)>>>,
    }

    impl RevealSink for RecordingSink {
        fn reveal(&self, kind: GroupKind, index: usize) {
            self.hits.borrow_mut().push((kind, index, self.sched.now()));
        }
    }

    fn engine() -> (
        RevealEngine<ManualScheduler, RecordingSink>,
        ManualScheduler,
        Rc<RefCell<Vec<(GroupKind, usize, u64)>>>,
    ) {
        let sched = ManualScheduler::new();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = RecordingSink {
            sched: sched.clone(),
            hits: hits.clone(),
        };
        (RevealEngine::new(sched.clone(), sink), sched, hits)
    }

    #[test]
    fn test_timeline_stagger() {
        let (mut engine, sched, hits) = engine();
        engine.register_many(GroupKind::Timeline, 3);
        sched.advance(1000);

        let revealed = engine.poll(GroupKind::Timeline, &[10.0, 200.0, 400.0], 800.0);
        assert_eq!(revealed, 3);
        sched.run_until_idle();

        let times = hits.borrow().iter().map(|(_, i, t)| (*i, *t)).collect::<Vec<_>>();
        assert_eq!(times, vec![(0, 1000), (1, 1200), (2, 1400)]);
    }

    #[test]
    fn test_poll_threshold() {
        let (mut engine, _sched, hits) = engine();
        engine.register_many(GroupKind::Section, 2);

        // 800 - 150 = 650 is the cut-off, exclusive
        assert_eq!(engine.poll(GroupKind::Section, &[650.0, 649.9], 800.0), 1);
        assert!(!engine.is_revealed(GroupKind::Section, 0));
        assert!(engine.is_revealed(GroupKind::Section, 1));
        assert_eq!(*hits.borrow(), vec![(GroupKind::Section, 1, 0)]);

        engine.register_many(GroupKind::StatCard, 1);
        assert_eq!(engine.poll(GroupKind::StatCard, &[699.0], 800.0), 1);
    }

    #[test]
    fn test_stagger_uses_static_index() {
        let (mut engine, sched, hits) = engine();
        engine.register_many(GroupKind::Timeline, 4);

        // only the last two come into view on this tick
        engine.poll(GroupKind::Timeline, &[900.0, 900.0, 100.0, 100.0], 800.0);
        sched.run_until_idle();

        let times = hits.borrow().iter().map(|(_, i, t)| (*i, *t)).collect::<Vec<_>>();
        assert_eq!(times, vec![(2, 400), (3, 600)]);
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let (mut engine, sched, hits) = engine();
        engine.register_many(GroupKind::Timeline, 2);

        assert_eq!(engine.poll(GroupKind::Timeline, &[0.0, 0.0], 800.0), 2);
        // scrolled back up, then down again
        assert_eq!(engine.poll(GroupKind::Timeline, &[2000.0, 2000.0], 800.0), 0);
        assert_eq!(engine.poll(GroupKind::Timeline, &[0.0, 0.0], 800.0), 0);
        sched.run_until_idle();

        assert_eq!(hits.borrow().len(), 2);
        assert!(engine.is_revealed(GroupKind::Timeline, 0));
        assert!(engine.is_revealed(GroupKind::Timeline, 1));
    }

    #[test]
    fn test_unknown_entries_are_noops() {
        let (mut engine, _sched, hits) = engine();
        assert_eq!(engine.poll(GroupKind::ProjectCard, &[0.0, 0.0], 800.0), 0);
        assert_eq!(
            engine.intersect(GroupKind::SkillCategory, 3, true),
            IntersectOutcome {
                revealed: false,
                unobserve: false
            }
        );
        assert!(hits.borrow().is_empty());
    }

    #[test]
    fn test_observer_groups_ignore_polling() {
        let (mut engine, _sched, hits) = engine();
        engine.register_many(GroupKind::SkillCategory, 2);
        assert_eq!(engine.poll(GroupKind::SkillCategory, &[0.0, 0.0], 800.0), 0);
        assert!(hits.borrow().is_empty());
    }

    #[test]
    fn test_intersection_stagger_and_repeat() {
        let (mut engine, sched, hits) = engine();
        engine.register_many(GroupKind::AchievementCard, 3);

        assert!(!engine.intersect(GroupKind::AchievementCard, 2, false).revealed);
        let out = engine.intersect(GroupKind::AchievementCard, 2, true);
        assert!(out.revealed);
        assert!(!out.unobserve);
        assert!(!engine.intersect(GroupKind::AchievementCard, 2, true).revealed);
        sched.run_until_idle();

        assert_eq!(*hits.borrow(), vec![(GroupKind::AchievementCard, 2, 300)]);
    }

    #[test]
    fn test_education_cascades_into_timeline() {
        let (mut engine, sched, hits) = engine();
        engine.register(GroupKind::Education);
        engine.register_many(GroupKind::Timeline, 3);
        // first item already scrolled into view
        engine.poll(GroupKind::Timeline, &[0.0, 5000.0, 5000.0], 800.0);

        let out = engine.intersect(GroupKind::Education, 0, true);
        assert!(out.revealed);
        sched.run_until_idle();

        let hits = hits.borrow();
        let timeline = hits
            .iter()
            .filter(|(k, _, _)| *k == GroupKind::Timeline)
            .map(|(_, i, t)| (*i, *t))
            .collect::<Vec<_>>();
        assert_eq!(timeline, vec![(0, 0), (1, 200), (2, 400)]);
    }

    #[test]
    fn test_counters_are_one_shot() {
        let (mut engine, _sched, hits) = engine();
        engine.register(GroupKind::Counters);

        let out = engine.intersect(GroupKind::Counters, 0, true);
        assert_eq!(
            out,
            IntersectOutcome {
                revealed: true,
                unobserve: true
            }
        );
        assert_eq!(*hits.borrow(), vec![(GroupKind::Counters, 0, 0)]);
    }

    #[test]
    fn test_group_table() {
        assert!(GroupKind::Section.is_polled());
        assert!(GroupKind::Timeline.is_polled());
        assert!(!GroupKind::SkillCategory.is_polled());
        match GroupKind::SkillCategory.config().trigger {
            Trigger::Intersection(opts) => {
                assert_eq!(opts.threshold, 0.2);
                assert_eq!(opts.root_margin, "0px 0px -100px 0px");
            }
            t => panic!("unexpected trigger {t:?}"),
        }
        assert_eq!(GroupKind::StatCard.config().stagger, Duration::from_millis(100));
        assert_eq!(GroupKind::AchievementCard.config().stagger, Duration::from_millis(150));
    }
}
