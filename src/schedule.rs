use std::{
    cell::RefCell,
    cmp::Ordering,
    collections::BinaryHeap,
    rc::Rc,
    time::Duration,
};

pub type Task = Box<dyn FnOnce() + 'static>;

/// Deferred execution on the page's single event loop.
///
/// Everything time-based on the site (status dismissal, the mailto fallback delay,
/// staggered reveals, counter ticks, the typewriter) goes through this trait so that
/// tests can drive time by hand with [`ManualScheduler`].
pub trait Scheduler {
    /// Milliseconds since the scheduler was created.
    fn now(&self) -> u64;

    fn schedule(&self, delay: Duration, task: Task);

    fn schedule_fn<F>(&self, delay: Duration, task: F)
    where
        F: FnOnce() + 'static,
        Self: Sized,
    {
        self.schedule(delay, Box::new(task));
    }
}

struct Pending {
    due: u64,
    seq: u64,
    task: Task,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// reversed so the BinaryHeap pops the earliest task first
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct ManualState {
    now: u64,
    seq: u64,
    queue: BinaryHeap<Pending>,
}

/// Simulated clock. Nothing runs until [`ManualScheduler::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Moves the clock forward by `ms`, running every task that falls due on the way
    /// in due-time order. Tasks scheduled by running tasks are honoured if they fall
    /// inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.state.borrow().now + ms;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                match state.queue.peek() {
                    Some(p) if p.due <= target => {
                        let p = state.queue.pop().expect("peeked task should exist");
                        state.now = p.due;
                        Some(p.task)
                    }
                    _ => None,
                }
            };
            // run outside the borrow, tasks may schedule more work
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }

    /// Runs until the queue is empty. Returns the final clock value.
    pub fn run_until_idle(&self) -> u64 {
        loop {
            let due = self.state.borrow().queue.peek().map(|p| p.due);
            match due {
                Some(due) => {
                    let now = self.now();
                    self.advance(due.saturating_sub(now));
                }
                None => return self.now(),
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> u64 {
        self.state.borrow().now
    }

    fn schedule(&self, delay: Duration, task: Task) {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay.as_millis() as u64;
        let seq = state.seq;
        state.seq += 1;
        state.queue.push(Pending { due, seq, task });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_run_in_due_order() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, name) in [(300, "c"), (100, "a"), (200, "b")] {
            let log = log.clone();
            sched.schedule_fn(Duration::from_millis(delay), move || {
                log.borrow_mut().push(name)
            });
        }

        sched.advance(150);
        assert_eq!(*log.borrow(), vec!["a"]);
        sched.advance(150);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(sched.now(), 300);
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second"] {
            let log = log.clone();
            sched.schedule_fn(Duration::from_millis(10), move || {
                log.borrow_mut().push(name)
            });
        }
        sched.advance(10);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_nested_scheduling_within_window() {
        let sched = ManualScheduler::new();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let inner_sched = sched.clone();
        let inner_hits = hits.clone();
        sched.schedule_fn(Duration::from_millis(30), move || {
            inner_hits.borrow_mut().push(inner_sched.now());
            let again = inner_hits.clone();
            let s = inner_sched.clone();
            inner_sched.schedule_fn(Duration::from_millis(30), move || {
                again.borrow_mut().push(s.now())
            });
        });

        sched.advance(100);
        assert_eq!(*hits.borrow(), vec![30, 60]);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_run_until_idle() {
        let sched = ManualScheduler::new();
        sched.schedule_fn(Duration::from_millis(5000), || {});
        sched.schedule_fn(Duration::from_millis(1000), || {});
        assert_eq!(sched.run_until_idle(), 5000);
        assert_eq!(sched.pending(), 0);
    }
}
