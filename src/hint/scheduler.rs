//! Outbound capabilities the controller drives: hint animation and entity lifecycle.
use std::fmt;

use bevy::math::{
    curve::{Curve, EaseFunction},
    Vec3,
};

/// Opaque handle to a scheduled tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

impl TweenHandle {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Easing curves used by the hint animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    InOutQuad,
    /// Overshoots the target before settling.
    OutBack,
    /// Pulls back before accelerating away.
    InBack,
}

impl Easing {
    pub fn ease_function(self) -> EaseFunction {
        match self {
            Self::Linear => EaseFunction::Linear,
            Self::InOutQuad => EaseFunction::QuadraticInOut,
            Self::OutBack => EaseFunction::BackOut,
            Self::InBack => EaseFunction::BackIn,
        }
    }

    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn sample(self, t: f32) -> f32 {
        self.ease_function().sample_clamped(t)
    }
}

/// Opacity change towards `target` (0 = transparent, 1 = opaque).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTween {
    pub target: f32,
    pub duration: f32,
}

/// Local-position change towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveTween {
    pub target: Vec3,
    pub duration: f32,
    pub easing: Easing,
}

/// Tracks that run together and complete as one; the completion is reported
/// once the longest track finishes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TweenRequest {
    pub fade: Option<FadeTween>,
    pub movement: Option<MoveTween>,
}

impl TweenRequest {
    pub fn duration(&self) -> f32 {
        let fade = self.fade.map(|fade| fade.duration).unwrap_or(0.0);
        let movement = self.movement.map(|movement| movement.duration).unwrap_or(0.0);
        fade.max(movement)
    }
}

/// Infinite yoyo on the vertical axis between the current position and `target_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopTween {
    pub target_y: f32,
    pub duration: f32,
    pub easing: Easing,
}

/// Animation backend used by the controller.
///
/// Implementations must never report completion for a cancelled handle, and
/// cancelling an unknown or finished handle must be harmless. Looping tweens
/// never complete.
pub trait AnimationScheduler {
    /// Places the hint immediately, without animating.
    fn snap(&mut self, position: Vec3, opacity: f32);
    /// Shows or hides the hint visual as a whole.
    fn set_hint_active(&mut self, active: bool);
    fn start(&mut self, request: TweenRequest) -> TweenHandle;
    fn start_loop(&mut self, tween: LoopTween) -> TweenHandle;
    fn cancel(&mut self, handle: TweenHandle);
}

/// Host-side lifecycle of the entity that owns the controller.
pub trait EntityLifecycle {
    fn deactivate_entity(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_their_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::InOutQuad,
            Easing::OutBack,
            Easing::InBack,
        ] {
            assert!(easing.sample(0.0).abs() < 1e-5, "{:?} at 0", easing);
            assert!((easing.sample(1.0) - 1.0).abs() < 1e-5, "{:?} at 1", easing);
        }
    }

    #[test]
    fn back_curves_overshoot() {
        assert!(Easing::OutBack.sample(0.7) > 1.0);
        assert!(Easing::InBack.sample(0.2) < 0.0);
        assert!((Easing::InOutQuad.sample(0.5) - 0.5).abs() < 1e-5);
        assert_eq!(Easing::OutBack.sample(1.5), Easing::OutBack.sample(1.0));
    }

    #[test]
    fn request_duration_is_the_longest_track() {
        let request = TweenRequest {
            fade: Some(FadeTween {
                target: 1.0,
                duration: 0.25,
            }),
            movement: Some(MoveTween {
                target: Vec3::ZERO,
                duration: 0.75,
                easing: Easing::OutBack,
            }),
        };
        assert_eq!(request.duration(), 0.75);
        assert_eq!(TweenRequest::default().duration(), 0.0);
    }
}
