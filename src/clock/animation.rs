//! Deferred presentation of puzzle mutations.
//!
//! State changes are applied immediately; their visual events queue up here
//! and are played back one at a time by whoever drives `tick`. The queue
//! never touches puzzle state, and animations are never cancelled: a reset
//! during playback just appends more events.

use std::collections::VecDeque;
use std::time::Duration;

use super::gears::ClockDelta;
use crate::config::AnimationConfig;

/// What the presentation layer needs to animate one mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisualEvent {
    GearTurned {
        gear: usize,
        deltas: ClockDelta,
        magnitude: u32,
    },
    PinMoved {
        pin: usize,
        up: bool,
    },
    OrientationFlipped {
        to_front: bool,
    },
}

impl VisualEvent {
    pub fn duration(&self, timing: &AnimationConfig) -> Duration {
        let ms = match self {
            VisualEvent::GearTurned { magnitude, .. } => {
                timing.gear_step_ms * u64::from((*magnitude).max(1))
            }
            VisualEvent::PinMoved { .. } => timing.pin_ms,
            VisualEvent::OrientationFlipped { .. } => timing.flip_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Result of advancing the queue by one frame.
#[derive(Debug, PartialEq)]
pub enum AnimationTick<'a> {
    /// Nothing queued.
    Idle,
    /// `progress` is in `0.0..1.0`.
    Playing {
        event: &'a VisualEvent,
        progress: f32,
    },
    /// The current animation reached its end on this frame.
    Finished(VisualEvent),
}

struct Playing {
    event: VisualEvent,
    elapsed: Duration,
    duration: Duration,
}

/// FIFO of pending visual events with one animation in flight.
pub struct AnimationQueue {
    timing: AnimationConfig,
    pending: VecDeque<VisualEvent>,
    current: Option<Playing>,
}

impl AnimationQueue {
    pub fn new(timing: AnimationConfig) -> Self {
        AnimationQueue {
            timing,
            pending: VecDeque::new(),
            current: None,
        }
    }

    pub fn push(&mut self, event: VisualEvent) {
        self.pending.push_back(event);
    }

    /// Number of animations not yet finished, including the one in flight.
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    /// Advance the in-flight animation by `dt`.
    ///
    /// Starts the next pending event if none is playing. A finished animation
    /// is reported once; the following event begins on the next tick.
    pub fn tick(&mut self, dt: Duration) -> AnimationTick<'_> {
        if self.current.is_none() {
            match self.pending.pop_front() {
                Some(event) => {
                    let duration = event.duration(&self.timing);
                    self.current = Some(Playing {
                        event,
                        elapsed: Duration::ZERO,
                        duration,
                    });
                }
                None => return AnimationTick::Idle,
            }
        }

        let done = match self.current.as_mut() {
            Some(playing) => {
                playing.elapsed += dt;
                playing.elapsed >= playing.duration
            }
            None => return AnimationTick::Idle,
        };

        if done {
            return match self.current.take() {
                Some(playing) => AnimationTick::Finished(playing.event),
                None => AnimationTick::Idle,
            };
        }

        match self.current.as_ref() {
            Some(playing) => AnimationTick::Playing {
                event: &playing.event,
                progress: playing.elapsed.as_secs_f32() / playing.duration.as_secs_f32(),
            },
            None => AnimationTick::Idle,
        }
    }

    /// Play everything to completion and return the events in order.
    pub fn finish_all(&mut self) -> Vec<VisualEvent> {
        let mut done = Vec::with_capacity(self.len());
        if let Some(playing) = self.current.take() {
            done.push(playing.event);
        }
        done.extend(self.pending.drain(..));
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> AnimationConfig {
        AnimationConfig {
            gear_step_ms: 100,
            pin_ms: 50,
            flip_ms: 400,
        }
    }

    #[test]
    fn test_idle_when_empty() {
        let mut queue = AnimationQueue::new(timing());
        assert_eq!(queue.tick(Duration::from_millis(16)), AnimationTick::Idle);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_plays_in_fifo_order() {
        let mut queue = AnimationQueue::new(timing());
        queue.push(VisualEvent::PinMoved { pin: 0, up: false });
        queue.push(VisualEvent::OrientationFlipped { to_front: false });
        assert_eq!(queue.len(), 2);

        match queue.tick(Duration::from_millis(25)) {
            AnimationTick::Playing { event, progress } => {
                assert_eq!(*event, VisualEvent::PinMoved { pin: 0, up: false });
                assert!((progress - 0.5).abs() < 1e-6);
            }
            other => panic!("expected pin animation, got {other:?}"),
        }
        assert_eq!(
            queue.tick(Duration::from_millis(25)),
            AnimationTick::Finished(VisualEvent::PinMoved { pin: 0, up: false })
        );
        assert!(!queue.is_animating());

        match queue.tick(Duration::from_millis(100)) {
            AnimationTick::Playing { event, .. } => {
                assert_eq!(*event, VisualEvent::OrientationFlipped { to_front: false });
            }
            other => panic!("expected flip animation, got {other:?}"),
        }
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_gear_duration_scales_with_magnitude() {
        let event = VisualEvent::GearTurned {
            gear: 2,
            deltas: [0; 18],
            magnitude: 6,
        };
        assert_eq!(event.duration(&timing()), Duration::from_millis(600));
    }

    #[test]
    fn test_finish_all_drains_queue() {
        let mut queue = AnimationQueue::new(timing());
        queue.push(VisualEvent::PinMoved { pin: 1, up: true });
        queue.push(VisualEvent::PinMoved { pin: 2, up: true });
        queue.tick(Duration::from_millis(1));
        let events = queue.finish_all();
        assert_eq!(events.len(), 2);
        assert!(queue.is_empty());
    }
}
