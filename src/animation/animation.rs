use crate::animation::animated_value::{AnimatedValue, AnimationValue, AnyAnimatedValue};
use crate::animation::timeline::{Evaluate, LoopMode, Timeline, TimelineSnapshot};

#[derive(Debug, Clone, Default)]
struct AnimatedValues(Vec<AnyAnimatedValue>);

impl Evaluate for AnimatedValues {
    fn evaluate(&mut self, in_duration_time: f32) {
        for value in &mut self.0 {
            value.evaluate(in_duration_time);
        }
    }
}

/// A timeline together with the animated values it drives.
///
/// The timeline's duration follows the longest value track; call
/// [`Animation::recalculate_duration`] after editing keys through
/// [`Animation::value_as_mut`].
#[derive(Debug, Default)]
pub struct Animation {
    timeline: Timeline,
    values: AnimatedValues,
}

impl Animation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<AnyAnimatedValue>) -> Self {
        self.add_value(value);
        self
    }

    #[must_use]
    pub fn with_loop(mut self, loop_mode: LoopMode) -> Self {
        self.timeline.set_loop(loop_mode);
        self
    }

    /// Adds a value and returns its index.
    pub fn add_value(&mut self, value: impl Into<AnyAnimatedValue>) -> usize {
        self.values.0.push(value.into());
        self.recalculate_duration();
        self.values.0.len() - 1
    }

    #[must_use]
    pub fn values(&self) -> &[AnyAnimatedValue] {
        &self.values.0
    }

    pub(crate) fn values_mut(&mut self) -> &mut [AnyAnimatedValue] {
        &mut self.values.0
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<&AnyAnimatedValue> {
        self.values.0.get(index)
    }

    #[must_use]
    pub fn value_as<T: AnimationValue>(&self, index: usize) -> Option<&AnimatedValue<T>> {
        self.values.0.get(index).and_then(|v| v.downcast::<T>())
    }

    pub fn value_as_mut<T: AnimationValue>(&mut self, index: usize) -> Option<&mut AnimatedValue<T>> {
        self.values.0.get_mut(index).and_then(|v| v.downcast_mut::<T>())
    }

    /// Index of the first value animating `path`.
    #[must_use]
    pub fn find_value(&self, path: &str) -> Option<usize> {
        self.values.0.iter().position(|v| v.target_path() == path)
    }

    /// Sets the end bound to the length of the longest track.
    pub fn recalculate_duration(&mut self) {
        let duration = self
            .values
            .0
            .iter()
            .map(AnyAnimatedValue::length)
            .fold(0.0_f32, f32::max);
        self.timeline.set_duration(duration);
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.timeline.duration()
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Direct timeline access for parameters and events. Transport calls made
    /// here do not sample the values; use the methods on `Animation` for that.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn update(&mut self, dt: f32) {
        self.timeline.update(dt, &mut self.values);
    }

    /// Samples every value at the current in-duration time.
    pub fn evaluate(&mut self) {
        self.values.evaluate(self.timeline.in_duration_time());
    }

    pub fn play(&mut self) {
        self.timeline.play(&mut self.values);
    }

    pub fn stop(&mut self) {
        self.timeline.stop(&mut self.values);
    }

    pub fn toggle(&mut self) {
        self.timeline.toggle(&mut self.values);
    }

    pub fn rewind_and_play(&mut self) {
        self.timeline.rewind_and_play(&mut self.values);
    }

    pub fn play_forward(&mut self) {
        self.timeline.play_forward(&mut self.values);
    }

    pub fn play_back(&mut self) {
        self.timeline.play_back(&mut self.values);
    }

    pub fn play_in_bounds(&mut self, begin: f32, end: f32) {
        self.timeline.play_in_bounds(begin, end, &mut self.values);
    }

    pub fn play_back_in_bounds(&mut self, begin: f32, end: f32) {
        self.timeline.play_back_in_bounds(begin, end, &mut self.values);
    }

    pub fn go_to_begin(&mut self) {
        self.timeline.go_to_begin(&mut self.values);
    }

    pub fn go_to_end(&mut self) {
        self.timeline.go_to_end(&mut self.values);
    }

    pub fn set_time(&mut self, time: f32) {
        self.timeline.set_time(time, &mut self.values);
    }

    pub fn set_rel_time(&mut self, relative: f32) {
        self.timeline.set_rel_time(relative, &mut self.values);
    }

    pub fn set_loop(&mut self, loop_mode: LoopMode) {
        self.timeline.set_loop(loop_mode);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.timeline.set_speed(speed);
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.timeline.is_playing()
    }

    #[must_use]
    pub fn time(&self) -> f32 {
        self.timeline.time()
    }

    #[must_use]
    pub fn in_duration_time(&self) -> f32 {
        self.timeline.in_duration_time()
    }

    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        self.timeline.snapshot()
    }

    /// Restores playback fields and resamples the values there.
    pub fn restore(&mut self, snapshot: &TimelineSnapshot) {
        self.timeline.restore(snapshot);
        self.evaluate();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::animation::target::TargetBinding;

    #[test]
    fn duration_follows_longest_track() {
        let animation = Animation::new()
            .with_value(AnimatedValue::linear("a", 0.0_f32, 1.0, 1.5))
            .with_value(AnimatedValue::linear("b", Vec2::ZERO, Vec2::ONE, 3.0));
        assert!((animation.duration() - 3.0).abs() < 1e-6);
        assert_eq!(animation.find_value("b"), Some(1));
    }

    #[test]
    fn update_drives_values() {
        let cell = Rc::new(Cell::new(0.0_f32));
        let mut animation = Animation::new().with_value(
            AnimatedValue::linear("x", 0.0_f32, 4.0, 2.0).with_target(TargetBinding::cell(Rc::clone(&cell))),
        );

        animation.play();
        animation.update(1.0);
        assert!((cell.get() - 2.0).abs() < 1e-4);

        animation.update(5.0);
        assert!(!animation.is_playing());
        assert!((cell.get() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn restore_resamples() {
        let cell = Rc::new(Cell::new(0.0_f32));
        let mut animation = Animation::new().with_value(
            AnimatedValue::linear("x", 0.0_f32, 10.0, 1.0).with_target(TargetBinding::cell(Rc::clone(&cell))),
        );
        animation.set_time(0.3);
        let snapshot = animation.snapshot();

        animation.set_time(1.0);
        animation.restore(&snapshot);
        assert!((cell.get() - 3.0).abs() < 1e-3);
    }
}
