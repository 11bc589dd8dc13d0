use std::io::Write;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
struct Stopwatch {
    started: Option<Instant>,
    elapsed: Duration,
    children: TimerList,
}

impl Stopwatch {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.started.take() {
            self.elapsed += instant.elapsed();
        }
    }
}

// named timers, kept in the order they were first started
#[derive(Debug, Default, Clone)]
struct TimerList(Vec<(&'static str, Stopwatch)>);

impl TimerList {
    fn get(&self, key: &str) -> Option<&Stopwatch> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, t)| t)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Stopwatch> {
        self.0.iter_mut().find(|(k, _)| *k == key).map(|(_, t)| t)
    }

    fn entry(&mut self, key: &'static str) -> &mut Stopwatch {
        let idx = match self.0.iter().position(|(k, _)| *k == key) {
            Some(idx) => idx,
            None => {
                self.0.push((key, Stopwatch::default()));
                self.0.len() - 1
            }
        };
        &mut self.0[idx].1
    }

    fn total(&self) -> Duration {
        self.0.iter().map(|(_, t)| t.elapsed).sum()
    }

    fn print(&self, out: &mut dyn Write, depth: usize) -> std::io::Result<()> {
        for (key, t) in self.0.iter() {
            writeln!(out, "{:indent$}{key} : {:?}", "", t.elapsed, indent = 4 * depth)?;
            t.children.print(out, depth + 1)?;
        }
        Ok(())
    }
}

/// Nested wall clock timers.
///
/// Starting a timer while another is running makes the new one a child
/// of the running one.  Repeated start/stop cycles of the same timer
/// accumulate.
#[derive(Default, Debug, Clone)]
pub struct Timers {
    stack: Vec<&'static str>,
    timers: TimerList,
}

impl Timers {
    fn active_mut(&mut self) -> Option<&mut Stopwatch> {
        let (first, rest) = self.stack.split_first()?;
        let mut active = self.timers.get_mut(first)?;
        for key in rest {
            active = active.children.get_mut(key)?;
        }
        Some(active)
    }

    /// start timer `key` as a child of the currently running timer
    pub fn start_as_current(&mut self, key: &'static str) {
        match self.active_mut() {
            Some(parent) => parent.children.entry(key).start(),
            None => self.timers.entry(key).start(),
        }
        self.stack.push(key);
    }

    /// stop the most recently started timer
    pub fn stop_current(&mut self) {
        if let Some(active) = self.active_mut() {
            active.stop();
        }
        self.stack.pop();
    }

    /// discard a top level timer and everything below it
    pub fn reset_timer(&mut self, key: &'static str) {
        *self.timers.entry(key) = Stopwatch::default();
    }

    /// accumulated time of the timer at `path`, e.g. `&["solve", "assembly"]`
    pub fn elapsed(&self, path: &[&str]) -> Option<Duration> {
        let (first, rest) = path.split_first()?;
        let mut t = self.timers.get(first)?;
        for key in rest {
            t = t.children.get(key)?;
        }
        Some(t.elapsed)
    }

    /// total time over all top level timers
    pub fn total_time(&self) -> Duration {
        self.timers.total()
    }

    pub fn print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        self.timers.print(out, 0)
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {
        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;
