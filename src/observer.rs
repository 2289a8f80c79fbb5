//! Progress events emitted by the sorting algorithms.
//!
//! Algorithms report every logical key comparison and every genuine exchange to
//! an [`ObservationSink`], then finish with a single `on_done`. A renderer sits
//! behind the sink and typically presents one frame per event, so calls may
//! block the algorithm for as long as the frame takes.

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

/// Consumer of algorithm progress.
pub trait ObservationSink {
    /// Positions `i` and `j` were compared by key.
    fn on_compare(&mut self, i: usize, j: usize);

    /// The samples at positions `i` and `j` were exchanged.
    fn on_swap(&mut self, i: usize, j: usize);

    /// The algorithm returned. Emitted exactly once per run.
    fn on_done(&mut self);
}

impl<S: ObservationSink + ?Sized> ObservationSink for &mut S {
    fn on_compare(&mut self, i: usize, j: usize) {
        (**self).on_compare(i, j);
    }

    fn on_swap(&mut self, i: usize, j: usize) {
        (**self).on_swap(i, j);
    }

    fn on_done(&mut self) {
        (**self).on_done();
    }
}

/// One recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortEvent {
    Compare(usize, usize),
    Swap(usize, usize),
    Done,
}

impl SortEvent {
    /// Indices a renderer should highlight for this event.
    pub fn highlight(&self) -> Option<(usize, usize)> {
        match *self {
            SortEvent::Compare(i, j) | SortEvent::Swap(i, j) => Some((i, j)),
            SortEvent::Done => None,
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ObservationSink for NullSink {
    fn on_compare(&mut self, _i: usize, _j: usize) {}
    fn on_swap(&mut self, _i: usize, _j: usize) {}
    fn on_done(&mut self) {}
}

/// Records the full event stream in program order.
///
/// The same input always yields the same log, which makes it the basis for
/// replay and for asserting exact algorithm behavior in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<SortEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SortEvent] {
        &self.events
    }

    pub fn comparisons(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            SortEvent::Compare(i, j) => Some((i, j)),
            _ => None,
        })
    }

    pub fn swaps(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            SortEvent::Swap(i, j) => Some((i, j)),
            _ => None,
        })
    }

    pub fn done_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SortEvent::Done))
            .count()
    }
}

impl ObservationSink for EventLog {
    fn on_compare(&mut self, i: usize, j: usize) {
        self.events.push(SortEvent::Compare(i, j));
    }

    fn on_swap(&mut self, i: usize, j: usize) {
        self.events.push(SortEvent::Swap(i, j));
    }

    fn on_done(&mut self) {
        self.events.push(SortEvent::Done);
    }
}

/// Throttles the algorithm to an animation cadence.
///
/// Each event counts as one presented frame: the sink sleeps until both the
/// per-event delay and the frame target time have passed since the previous
/// frame, then forwards the event to the wrapped sink.
pub struct PacedSink<S> {
    inner: S,
    step_delay: Duration,
    frame_target: Duration,
    previous_frame: Option<Instant>,
    frames: u64,
}

impl<S: ObservationSink> PacedSink<S> {
    /// `frame_rate` of zero disables the frame cap and only applies `step_delay`.
    pub fn new(inner: S, step_delay: Duration, frame_rate: u32) -> Self {
        let frame_target = if frame_rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / frame_rate as f64)
        };
        Self {
            inner,
            step_delay,
            frame_target,
            previous_frame: None,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Minimum spacing between two presented frames.
    pub fn frame_interval(&self) -> Duration {
        self.step_delay.max(self.frame_target)
    }

    fn wait_for_frame(&mut self) {
        let interval = self.frame_interval();
        if let Some(previous) = self.previous_frame {
            let delta = previous.elapsed();
            if delta < interval {
                thread::sleep(interval - delta);
            }
        }
        self.previous_frame = Some(Instant::now());
        self.frames += 1;
    }
}

impl<S: ObservationSink> ObservationSink for PacedSink<S> {
    fn on_compare(&mut self, i: usize, j: usize) {
        self.wait_for_frame();
        trace!(frame = self.frames, i, j, "compare");
        self.inner.on_compare(i, j);
    }

    fn on_swap(&mut self, i: usize, j: usize) {
        self.wait_for_frame();
        trace!(frame = self.frames, i, j, "swap");
        self.inner.on_swap(i, j);
    }

    fn on_done(&mut self) {
        trace!(frames = self.frames, "done");
        self.inner.on_done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_log_records_in_order() {
        let mut log = EventLog::new();
        log.on_compare(0, 1);
        log.on_swap(0, 1);
        log.on_done();
        assert_eq!(
            log.events(),
            &[SortEvent::Compare(0, 1), SortEvent::Swap(0, 1), SortEvent::Done]
        );
        assert_eq!(log.comparisons().count(), 1);
        assert_eq!(log.swaps().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(log.done_count(), 1);
    }

    #[test]
    fn highlight_skips_done() {
        assert_eq!(SortEvent::Compare(2, 5).highlight(), Some((2, 5)));
        assert_eq!(SortEvent::Done.highlight(), None);
    }

    #[test]
    fn paced_sink_forwards_and_counts_frames() {
        let mut sink = PacedSink::new(EventLog::new(), Duration::ZERO, 0);
        sink.on_compare(0, 1);
        sink.on_swap(0, 1);
        sink.on_done();
        assert_eq!(sink.frames(), 2);
        assert_eq!(sink.into_inner().events().len(), 3);
    }

    #[test]
    fn paced_sink_spaces_frames() {
        let mut sink = PacedSink::new(NullSink, Duration::from_millis(5), 0);
        let start = Instant::now();
        for _ in 0..4 {
            sink.on_compare(0, 1);
        }
        // First frame is immediate, the remaining three wait one interval each.
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn frame_interval_uses_slower_of_delay_and_rate() {
        let sink = PacedSink::new(NullSink, Duration::from_millis(10), 60);
        assert!(sink.frame_interval() > Duration::from_millis(16));
        let sink = PacedSink::new(NullSink, Duration::from_millis(40), 60);
        assert_eq!(sink.frame_interval(), Duration::from_millis(40));
    }
}
