//! Playback state machine.
//!
//! A [`Timeline`] owns the current time, play/stop state, loop mode, direction,
//! speed and bounds. It does not know what it animates: every method that can
//! move the playhead takes an [`Evaluate`] target that is asked to sample at
//! the new in-duration time.

use std::fmt;

use serde::{Deserialize, Serialize};

const MIN_DURATION: f32 = 1e-6;

/// Upper bound on how often one time event fires during a single update.
/// A step spanning more loop passes than this fires the event this many times.
pub const MAX_EVENT_CROSSINGS_PER_STEP: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoopMode {
    /// Play once and stop at the exceeded bound.
    #[default]
    None,
    /// Wrap around to the opposite bound.
    Repeat,
    /// Alternate direction every period.
    PingPong,
}

/// Something sampled by a timeline after it moves.
pub trait Evaluate {
    fn evaluate(&mut self, in_duration_time: f32);
}

impl Evaluate for () {
    fn evaluate(&mut self, _in_duration_time: f32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeEventId(u32);

struct TimeEvent {
    id: TimeEventId,
    time: f32,
    callback: Box<dyn FnMut()>,
}

type Callback = Box<dyn FnMut()>;

/// Plain playback fields, enough to restore a timeline exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub time: f32,
    pub begin_bound: f32,
    pub end_bound: f32,
    pub reversed: bool,
    pub speed: f32,
    pub loop_mode: LoopMode,
    pub playing: bool,
}

pub struct Timeline {
    time: f32,
    in_duration_time: f32,
    begin_bound: f32,
    end_bound: f32,
    direction: f32,
    speed: f32,
    loop_mode: LoopMode,
    playing: bool,

    // Sorted by time.
    time_events: Vec<TimeEvent>,
    next_event_id: u32,

    on_play: Vec<Callback>,
    on_stop: Vec<Callback>,
    on_played: Vec<Callback>,
    on_update: Vec<Box<dyn FnMut(f32)>>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("time", &self.time)
            .field("in_duration_time", &self.in_duration_time)
            .field("begin_bound", &self.begin_bound)
            .field("end_bound", &self.end_bound)
            .field("direction", &self.direction)
            .field("speed", &self.speed)
            .field("loop_mode", &self.loop_mode)
            .field("playing", &self.playing)
            .field("time_events", &self.time_events.len())
            .finish_non_exhaustive()
    }
}

impl Timeline {
    /// Stopped timeline spanning `[0, duration]`.
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            time: 0.0,
            in_duration_time: 0.0,
            begin_bound: 0.0,
            end_bound: duration.max(0.0),
            direction: 1.0,
            speed: 1.0,
            loop_mode: LoopMode::None,
            playing: false,
            time_events: Vec::new(),
            next_event_id: 0,
            on_play: Vec::new(),
            on_stop: Vec::new(),
            on_played: Vec::new(),
            on_update: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------------

    /// Advances by `dt` seconds. No-op while stopped.
    pub fn update(&mut self, dt: f32, target: &mut dyn Evaluate) {
        if !self.playing {
            return;
        }

        let step = self.direction * dt * self.speed;
        let prev_time = self.time;
        let prev_in_duration = self.in_duration_time;
        self.time += step;

        let mut finished = false;
        if self.loop_mode == LoopMode::None {
            let reached = if step >= 0.0 {
                self.time >= self.end_bound
            } else {
                self.time <= self.begin_bound
            };
            if reached || self.time < self.begin_bound || self.time > self.end_bound {
                self.time = self.time.clamp(self.begin_bound, self.end_bound);
                finished = true;
            }
        }

        self.in_duration_time = self.in_duration_time_at(self.time);
        target.evaluate(self.in_duration_time);

        self.fire_time_events(prev_time, prev_in_duration);

        let in_duration_time = self.in_duration_time;
        for callback in &mut self.on_update {
            callback(in_duration_time);
        }

        if finished {
            self.playing = false;
            run_all(&mut self.on_stop);
            run_all(&mut self.on_played);
        }
    }

    /// Folds an unbounded `time` into the bounds according to the loop mode.
    #[must_use]
    pub fn in_duration_time_at(&self, time: f32) -> f32 {
        let duration = self.duration();
        match self.loop_mode {
            LoopMode::None => time.clamp(self.begin_bound, self.end_bound),
            LoopMode::Repeat => self.begin_bound + wrap(time - self.begin_bound, duration),
            LoopMode::PingPong => {
                let phase = wrap(time - self.begin_bound, duration * 2.0);
                // Odd periods run end -> begin.
                let folded = if phase <= duration {
                    phase
                } else {
                    duration * 2.0 - phase
                };
                self.begin_bound + folded
            }
        }
    }

    fn fire_time_events(&mut self, prev_time: f32, prev_in_duration: f32) {
        if self.time_events.is_empty() {
            return;
        }

        // Looping modes count crossings on the unfolded time axis, so a wrap
        // inside one step fires each event once per pass.
        let (from, to) = match self.loop_mode {
            LoopMode::None => (prev_in_duration, self.in_duration_time),
            LoopMode::Repeat | LoopMode::PingPong => (prev_time, self.time),
        };
        let (lo, hi) = (from.min(to), from.max(to));
        if lo >= hi {
            return;
        }

        let loop_mode = self.loop_mode;
        let begin = self.begin_bound;
        let end = self.end_bound;
        let duration = self.duration();

        for event in &mut self.time_events {
            let t = event.time;
            if t < begin || t > end {
                continue;
            }

            let crossings = match loop_mode {
                LoopMode::None => u64::from(lo < t && t <= hi),
                LoopMode::Repeat => count_crossings(t, duration, lo, hi),
                LoopMode::PingPong => {
                    let period = duration * 2.0;
                    let mirrored = 2.0 * end - t;
                    let forward = count_crossings(t, period, lo, hi);
                    if (mirrored - t).abs() <= MIN_DURATION || (t - begin).abs() <= MIN_DURATION {
                        forward
                    } else {
                        forward + count_crossings(mirrored, period, lo, hi)
                    }
                }
            };

            if crossings > MAX_EVENT_CROSSINGS_PER_STEP {
                log::debug!(
                    "Time event at {t} crossed {crossings} times in one step, firing {MAX_EVENT_CROSSINGS_PER_STEP}"
                );
            }
            for _ in 0..crossings.min(MAX_EVENT_CROSSINGS_PER_STEP) {
                (event.callback)();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------

    /// Starts playback from the current time and samples immediately.
    pub fn play(&mut self, target: &mut dyn Evaluate) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.in_duration_time = self.in_duration_time_at(self.time);
        target.evaluate(self.in_duration_time);
        run_all(&mut self.on_play);
    }

    /// Stops playback, sampling once more at the current position.
    pub fn stop(&mut self, target: &mut dyn Evaluate) {
        if !self.playing {
            return;
        }
        self.playing = false;
        target.evaluate(self.in_duration_time);
        run_all(&mut self.on_stop);
    }

    pub fn set_playing(&mut self, playing: bool, target: &mut dyn Evaluate) {
        if playing {
            self.play(target);
        } else {
            self.stop(target);
        }
    }

    pub fn toggle(&mut self, target: &mut dyn Evaluate) {
        self.set_playing(!self.playing, target);
    }

    /// Jumps to the bound playback starts from (begin, or end when reversed)
    /// and plays.
    pub fn rewind_and_play(&mut self, target: &mut dyn Evaluate) {
        let start = if self.is_reversed() {
            self.end_bound
        } else {
            self.begin_bound
        };
        self.set_time(start, target);
        self.play(target);
    }

    pub fn play_forward(&mut self, target: &mut dyn Evaluate) {
        self.direction = 1.0;
        self.play(target);
    }

    pub fn play_back(&mut self, target: &mut dyn Evaluate) {
        self.direction = -1.0;
        self.play(target);
    }

    /// Restricts playback to `[begin, end]` and plays it from the start.
    pub fn play_in_bounds(&mut self, begin: f32, end: f32, target: &mut dyn Evaluate) {
        self.direction = 1.0;
        self.set_bounds(begin, end);
        self.rewind_and_play(target);
    }

    /// Restricts playback to `[begin, end]` and plays it backwards from `end`.
    pub fn play_back_in_bounds(&mut self, begin: f32, end: f32, target: &mut dyn Evaluate) {
        self.direction = -1.0;
        self.set_bounds(begin, end);
        self.rewind_and_play(target);
    }

    pub fn go_to_begin(&mut self, target: &mut dyn Evaluate) {
        self.set_time(self.begin_bound, target);
    }

    pub fn go_to_end(&mut self, target: &mut dyn Evaluate) {
        self.set_time(self.end_bound, target);
    }

    /// Jumps to `time` and samples there. Time events do not fire on jumps.
    ///
    /// With [`LoopMode::None`] a time outside the bounds is clamped and stops
    /// playback.
    pub fn set_time(&mut self, time: f32, target: &mut dyn Evaluate) {
        let out_of_bounds = time < self.begin_bound || time > self.end_bound;
        self.time = if self.loop_mode == LoopMode::None {
            time.clamp(self.begin_bound, self.end_bound)
        } else {
            time
        };
        self.in_duration_time = self.in_duration_time_at(self.time);
        target.evaluate(self.in_duration_time);

        if out_of_bounds && self.loop_mode == LoopMode::None && self.playing {
            self.playing = false;
            run_all(&mut self.on_stop);
        }
    }

    /// Jumps to a fraction of the duration, `0.0` = begin, `1.0` = end.
    pub fn set_rel_time(&mut self, relative: f32, target: &mut dyn Evaluate) {
        self.set_time(self.begin_bound + relative * self.duration(), target);
    }

    // ------------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------------

    /// Sets playback bounds. A reversed pair is swapped and flips the direction.
    /// Non-finite bounds are rejected and leave the bounds unchanged.
    pub fn set_bounds(&mut self, begin: f32, end: f32) {
        if !begin.is_finite() || !end.is_finite() {
            log::warn!("Ignoring non-finite timeline bounds [{begin}, {end}]");
            return;
        }
        let (begin, end) = if begin > end {
            self.direction = -self.direction;
            (end, begin)
        } else {
            (begin, end)
        };
        self.begin_bound = begin;
        self.end_bound = end;
        self.in_duration_time = self.in_duration_time_at(self.time);
    }

    /// Moves the end bound so that the duration is `duration`.
    pub fn set_duration(&mut self, duration: f32) {
        self.set_bounds(self.begin_bound, self.begin_bound + duration.max(0.0));
    }

    pub fn set_loop(&mut self, loop_mode: LoopMode) {
        self.loop_mode = loop_mode;
        self.in_duration_time = self.in_duration_time_at(self.time);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.direction = if reverse { -1.0 } else { 1.0 };
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.direction < 0.0
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[must_use]
    pub fn in_duration_time(&self) -> f32 {
        self.in_duration_time
    }

    /// In-duration time as a fraction of the duration.
    #[must_use]
    pub fn relative_time(&self) -> f32 {
        let duration = self.duration();
        if duration < MIN_DURATION {
            0.0
        } else {
            (self.in_duration_time - self.begin_bound) / duration
        }
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.end_bound - self.begin_bound
    }

    #[must_use]
    pub fn begin_bound(&self) -> f32 {
        self.begin_bound
    }

    #[must_use]
    pub fn end_bound(&self) -> f32 {
        self.end_bound
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Registers `callback` to fire whenever playback crosses `time`.
    pub fn add_time_event(&mut self, time: f32, callback: impl FnMut() + 'static) -> TimeEventId {
        let id = TimeEventId(self.next_event_id);
        self.next_event_id += 1;

        let index = self.time_events.partition_point(|e| e.time <= time);
        self.time_events.insert(
            index,
            TimeEvent {
                id,
                time,
                callback: Box::new(callback),
            },
        );
        id
    }

    pub fn remove_time_event(&mut self, id: TimeEventId) -> bool {
        let before = self.time_events.len();
        self.time_events.retain(|e| e.id != id);
        before != self.time_events.len()
    }

    pub fn clear_time_events(&mut self) {
        self.time_events.clear();
    }

    #[must_use]
    pub fn time_event_count(&self) -> usize {
        self.time_events.len()
    }

    pub fn on_play(&mut self, callback: impl FnMut() + 'static) {
        self.on_play.push(Box::new(callback));
    }

    /// Fires on every stop, including reaching a bound with [`LoopMode::None`].
    pub fn on_stop(&mut self, callback: impl FnMut() + 'static) {
        self.on_stop.push(Box::new(callback));
    }

    /// Fires when playback runs into a bound with [`LoopMode::None`].
    pub fn on_played(&mut self, callback: impl FnMut() + 'static) {
        self.on_played.push(Box::new(callback));
    }

    /// Fires after every update with the new in-duration time.
    pub fn on_update(&mut self, callback: impl FnMut(f32) + 'static) {
        self.on_update.push(Box::new(callback));
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            time: self.time,
            begin_bound: self.begin_bound,
            end_bound: self.end_bound,
            reversed: self.is_reversed(),
            speed: self.speed,
            loop_mode: self.loop_mode,
            playing: self.playing,
        }
    }

    /// Restores playback fields without firing callbacks or sampling.
    pub fn restore(&mut self, snapshot: &TimelineSnapshot) {
        self.begin_bound = snapshot.begin_bound.min(snapshot.end_bound);
        self.end_bound = snapshot.begin_bound.max(snapshot.end_bound);
        self.set_reverse(snapshot.reversed);
        self.speed = snapshot.speed;
        self.loop_mode = snapshot.loop_mode;
        self.playing = snapshot.playing;
        self.time = snapshot.time;
        self.in_duration_time = self.in_duration_time_at(self.time);
    }
}

fn run_all(callbacks: &mut [Callback]) {
    for callback in callbacks {
        callback();
    }
}

fn wrap(value: f32, period: f32) -> f32 {
    if period < MIN_DURATION {
        0.0
    } else {
        value.rem_euclid(period)
    }
}

/// Number of points `point + k * period` inside `(lo, hi]`.
fn count_crossings(point: f32, period: f32, lo: f32, hi: f32) -> u64 {
    if period < MIN_DURATION {
        return 0;
    }
    let upper = ((hi - point) / period).floor();
    let lower = ((lo - point) / period).floor();
    (upper - lower).max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn repeat_set_time_wraps() {
        let mut timeline = Timeline::new(2.0);
        timeline.set_loop(LoopMode::Repeat);
        timeline.set_time(2.5, &mut ());
        assert!(approx(timeline.in_duration_time(), 0.5));
    }

    #[test]
    fn repeat_negative_time_wraps() {
        let mut timeline = Timeline::new(2.0);
        timeline.set_loop(LoopMode::Repeat);
        assert!(approx(timeline.in_duration_time_at(-0.5), 1.5));
    }

    #[test]
    fn pingpong_runs_back_on_odd_periods() {
        let mut timeline = Timeline::new(2.0);
        timeline.set_loop(LoopMode::PingPong);
        assert!(approx(timeline.in_duration_time_at(2.5), 1.5));
        assert!(approx(timeline.in_duration_time_at(4.5), 0.5));
    }

    #[test]
    fn stopped_timeline_ignores_update() {
        let mut timeline = Timeline::new(1.0);
        timeline.update(0.5, &mut ());
        assert_eq!(timeline.time(), 0.0);
    }

    #[test]
    fn once_stops_at_end_and_fires_played() {
        let (stops, on_stop) = counter();
        let (played, on_played) = counter();
        let mut timeline = Timeline::new(1.0);
        timeline.on_stop(on_stop);
        timeline.on_played(on_played);

        timeline.play(&mut ());
        timeline.update(0.6, &mut ());
        assert!(timeline.is_playing());
        timeline.update(0.6, &mut ());

        assert!(!timeline.is_playing());
        assert!(approx(timeline.time(), 1.0));
        assert_eq!(stops.get(), 1);
        assert_eq!(played.get(), 1);
    }

    #[test]
    fn set_time_out_of_bounds_stops_once_mode() {
        let (stops, on_stop) = counter();
        let mut timeline = Timeline::new(1.0);
        timeline.on_stop(on_stop);
        timeline.play(&mut ());
        timeline.set_time(5.0, &mut ());
        assert!(!timeline.is_playing());
        assert!(approx(timeline.in_duration_time(), 1.0));
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn reversed_bounds_swap_and_flip_direction() {
        let mut timeline = Timeline::new(1.0);
        timeline.set_bounds(3.0, 1.0);
        assert_eq!(timeline.begin_bound(), 1.0);
        assert_eq!(timeline.end_bound(), 3.0);
        assert!(timeline.is_reversed());
    }

    #[test]
    fn speed_and_direction_scale_step() {
        let mut timeline = Timeline::new(10.0);
        timeline.set_speed(2.0);
        timeline.set_time(5.0, &mut ());
        timeline.play_back(&mut ());
        timeline.update(1.0, &mut ());
        assert!(approx(timeline.time(), 3.0));
    }

    #[test]
    fn time_event_fires_once_per_crossing_across_wrap() {
        let (near_start, on_near_start) = counter();
        let (middle, on_middle) = counter();
        let mut timeline = Timeline::new(2.0);
        timeline.set_loop(LoopMode::Repeat);
        timeline.add_time_event(0.1, on_near_start);
        timeline.add_time_event(1.0, on_middle);

        timeline.set_time(1.9, &mut ());
        timeline.play(&mut ());
        timeline.update(0.4, &mut ());

        assert_eq!(near_start.get(), 1);
        assert_eq!(middle.get(), 0);
    }

    #[test]
    fn time_event_fires_in_both_directions() {
        let (hits, on_hit) = counter();
        let mut timeline = Timeline::new(2.0);
        timeline.add_time_event(1.0, on_hit);

        timeline.play(&mut ());
        timeline.update(1.5, &mut ());
        timeline.play_back(&mut ());
        timeline.update(1.0, &mut ());

        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn remove_time_event() {
        let mut timeline = Timeline::new(1.0);
        let id = timeline.add_time_event(0.5, || {});
        assert!(timeline.remove_time_event(id));
        assert!(!timeline.remove_time_event(id));
        assert_eq!(timeline.time_event_count(), 0);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut timeline = Timeline::new(4.0);
        timeline.set_loop(LoopMode::PingPong);
        timeline.set_speed(0.5);
        timeline.set_time(5.0, &mut ());
        let snapshot = timeline.snapshot();

        let mut restored = Timeline::default();
        restored.restore(&snapshot);
        assert_eq!(restored.snapshot(), snapshot);
        assert!(approx(restored.in_duration_time(), timeline.in_duration_time()));
    }

    #[test]
    fn rewind_and_play_starts_from_begin() {
        let mut timeline = Timeline::new(2.0);
        timeline.set_time(1.2, &mut ());
        timeline.rewind_and_play(&mut ());

        assert!(timeline.is_playing());
        assert_eq!(timeline.time(), 0.0);
        timeline.update(0.5, &mut ());
        assert!(approx(timeline.time(), 0.5));
    }

    #[test]
    fn rewind_and_play_reversed_starts_from_end() {
        let mut timeline = Timeline::new(2.0);
        timeline.set_reverse(true);
        timeline.set_time(0.5, &mut ());
        timeline.rewind_and_play(&mut ());

        assert!(timeline.is_playing());
        assert_eq!(timeline.time(), 2.0);
        timeline.update(0.5, &mut ());
        assert!(approx(timeline.time(), 1.5));
    }

    #[test]
    fn set_rel_time_maps_into_bounds() {
        let mut timeline = Timeline::new(1.0);
        timeline.set_bounds(1.0, 3.0);
        timeline.set_rel_time(0.5, &mut ());
        assert!(approx(timeline.in_duration_time(), 2.0));
        timeline.set_rel_time(1.0, &mut ());
        assert!(approx(timeline.in_duration_time(), 3.0));
    }

    #[test]
    fn play_in_bounds_runs_forward_from_begin() {
        let mut timeline = Timeline::new(4.0);
        timeline.play_in_bounds(0.5, 1.5, &mut ());

        assert!(approx(timeline.time(), 0.5));
        timeline.update(0.25, &mut ());
        assert!(approx(timeline.time(), 0.75));
        timeline.update(1.0, &mut ());
        assert!(approx(timeline.time(), 1.5));
        assert!(!timeline.is_playing());
    }

    #[test]
    fn play_back_in_bounds_runs_backward_from_end() {
        let mut timeline = Timeline::new(4.0);
        timeline.play_back_in_bounds(0.5, 1.5, &mut ());

        assert!(timeline.is_reversed());
        assert!(approx(timeline.time(), 1.5));
        timeline.update(0.25, &mut ());
        assert!(approx(timeline.time(), 1.25));
    }

    #[test]
    fn pingpong_event_fires_twice_per_period() {
        let (stepped, on_stepped) = counter();
        let mut timeline = Timeline::new(1.0);
        timeline.set_loop(LoopMode::PingPong);
        timeline.add_time_event(0.25, on_stepped);
        timeline.play(&mut ());
        for _ in 0..40 {
            timeline.update(0.1, &mut ());
        }
        assert_eq!(stepped.get(), 4);

        let (jumped, on_jumped) = counter();
        let mut timeline = Timeline::new(1.0);
        timeline.set_loop(LoopMode::PingPong);
        timeline.add_time_event(0.25, on_jumped);
        timeline.play(&mut ());
        timeline.update(4.0, &mut ());
        assert_eq!(jumped.get(), 4);
    }

    #[test]
    fn huge_step_caps_event_firings() {
        let (hits, on_hit) = counter();
        let mut timeline = Timeline::new(1e-3);
        timeline.set_loop(LoopMode::Repeat);
        timeline.add_time_event(5e-4, on_hit);

        timeline.play(&mut ());
        timeline.update(1e9, &mut ());
        assert_eq!(u64::from(hits.get()), MAX_EVENT_CROSSINGS_PER_STEP);
    }

    #[test]
    fn non_finite_bounds_are_ignored() {
        let mut timeline = Timeline::new(2.0);
        timeline.set_bounds(f32::NAN, 1.0);
        timeline.set_bounds(0.5, f32::INFINITY);

        assert_eq!(timeline.begin_bound(), 0.0);
        assert_eq!(timeline.end_bound(), 2.0);
        assert!(approx(timeline.in_duration_time_at(5.0), 2.0));
    }
}
