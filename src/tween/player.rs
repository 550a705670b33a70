//! Per-hint tween storage implementing the controller's animation capability.
use bevy::prelude::*;

use crate::hint::scheduler::{
    AnimationScheduler, FadeTween, LoopTween, MoveTween, TweenHandle, TweenRequest,
};

/// Visual pose the tween player writes back to the hint entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HintPose {
    pub position: Vec3,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy)]
enum TweenTrack {
    Joined {
        fade: Option<(f32, FadeTween)>,
        movement: Option<(Vec3, MoveTween)>,
        duration: f32,
    },
    Yoyo {
        from_y: f32,
        tween: LoopTween,
    },
}

#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    handle: TweenHandle,
    track: TweenTrack,
    elapsed: f32,
}

/// Tweens running on one hint entity.
///
/// Cancelled tweens are dropped immediately and never reported as finished.
#[derive(Component, Debug)]
pub struct TweenPlayer {
    next_handle: u64,
    pose: HintPose,
    active: bool,
    tweens: Vec<ActiveTween>,
}

impl TweenPlayer {
    /// Starts fully opaque at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            next_handle: 1,
            pose: HintPose {
                position,
                opacity: 1.0,
            },
            active: true,
            tweens: Vec::new(),
        }
    }

    pub fn pose(&self) -> HintPose {
        self.pose
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_running(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Whether a looping tween (the hint bounce) is running.
    pub fn is_looping(&self) -> bool {
        self.tweens
            .iter()
            .any(|tween| matches!(tween.track, TweenTrack::Yoyo { .. }))
    }

    pub fn is_playing(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|tween| tween.handle == handle)
    }

    /// Advances every tween by `delta` seconds and returns the handles of
    /// non-looping tweens that finished during this step.
    pub fn advance(&mut self, delta: f32) -> Vec<TweenHandle> {
        let mut finished = Vec::new();
        let mut pose = self.pose;

        for tween in self.tweens.iter_mut() {
            tween.elapsed += delta.max(0.0);
            match tween.track {
                TweenTrack::Joined {
                    fade,
                    movement,
                    duration,
                } => {
                    if let Some((start, fade)) = fade {
                        let t = progress(tween.elapsed, fade.duration);
                        pose.opacity = start + (fade.target - start) * t;
                    }
                    if let Some((start, movement)) = movement {
                        let t = progress(tween.elapsed, movement.duration);
                        pose.position = start.lerp(movement.target, movement.easing.sample(t));
                    }
                    if tween.elapsed >= duration {
                        finished.push(tween.handle);
                    }
                }
                TweenTrack::Yoyo { from_y, tween: bounce } => {
                    if bounce.duration <= 0.0 {
                        continue;
                    }
                    let cycles = tween.elapsed / bounce.duration;
                    let phase = cycles.fract();
                    let t = if (cycles as u64) % 2 == 0 {
                        phase
                    } else {
                        1.0 - phase
                    };
                    pose.position.y = from_y + (bounce.target_y - from_y) * bounce.easing.sample(t);
                }
            }
        }

        self.pose = pose;
        self.tweens
            .retain(|tween| !finished.contains(&tween.handle));
        finished
    }

    fn issue_handle(&mut self) -> TweenHandle {
        let handle = TweenHandle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

impl AnimationScheduler for TweenPlayer {
    fn snap(&mut self, position: Vec3, opacity: f32) {
        self.pose = HintPose { position, opacity };
    }

    fn set_hint_active(&mut self, active: bool) {
        self.active = active;
    }

    fn start(&mut self, request: TweenRequest) -> TweenHandle {
        let handle = self.issue_handle();
        let track = TweenTrack::Joined {
            fade: request.fade.map(|fade| (self.pose.opacity, fade)),
            movement: request.movement.map(|movement| (self.pose.position, movement)),
            duration: request.duration(),
        };
        self.tweens.push(ActiveTween {
            handle,
            track,
            elapsed: 0.0,
        });
        debug!(target: "tween", "Started {} ({:.2}s)", handle, request.duration());
        handle
    }

    fn start_loop(&mut self, tween: LoopTween) -> TweenHandle {
        let handle = self.issue_handle();
        self.tweens.push(ActiveTween {
            handle,
            track: TweenTrack::Yoyo {
                from_y: self.pose.position.y,
                tween,
            },
            elapsed: 0.0,
        });
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) {
        self.tweens.retain(|tween| tween.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::scheduler::Easing;

    fn show_request(target: Vec3) -> TweenRequest {
        TweenRequest {
            fade: Some(FadeTween {
                target: 1.0,
                duration: 0.5,
            }),
            movement: Some(MoveTween {
                target,
                duration: 1.0,
                easing: Easing::Linear,
            }),
        }
    }

    #[test]
    fn joined_request_finishes_with_longest_track() {
        let mut player = TweenPlayer::at(Vec3::ZERO);
        player.snap(Vec3::ZERO, 0.0);
        let handle = player.start(show_request(Vec3::new(0.0, 10.0, 0.0)));

        assert!(player.advance(0.5).is_empty());
        assert!((player.pose().opacity - 1.0).abs() < 1e-5);
        assert!((player.pose().position.y - 5.0).abs() < 1e-4);

        assert_eq!(player.advance(0.5), vec![handle]);
        assert_eq!(player.pose().position, Vec3::new(0.0, 10.0, 0.0));
        assert!(!player.is_running());
    }

    #[test]
    fn cancelled_tweens_never_finish() {
        let mut player = TweenPlayer::at(Vec3::ZERO);
        let handle = player.start(show_request(Vec3::ONE));
        player.cancel(handle);
        player.cancel(handle);

        assert!(player.advance(5.0).is_empty());
        assert!(!player.is_playing(handle));
        assert_eq!(player.pose().position, Vec3::ZERO);
    }

    #[test]
    fn zero_duration_finishes_on_next_step() {
        let mut player = TweenPlayer::at(Vec3::ZERO);
        let handle = player.start(TweenRequest {
            fade: Some(FadeTween {
                target: 0.0,
                duration: 0.0,
            }),
            movement: None,
        });
        assert_eq!(player.advance(0.0), vec![handle]);
        assert_eq!(player.pose().opacity, 0.0);
    }

    #[test]
    fn yoyo_bounces_and_never_finishes() {
        let mut player = TweenPlayer::at(Vec3::new(0.0, 2.0, 0.0));
        let handle = player.start_loop(LoopTween {
            target_y: 3.0,
            duration: 1.0,
            easing: Easing::Linear,
        });

        assert!(player.advance(0.25).is_empty());
        assert!((player.pose().position.y - 2.25).abs() < 1e-4);
        assert!(player.advance(1.0).is_empty());
        assert!((player.pose().position.y - 2.75).abs() < 1e-4);
        assert!(player.is_playing(handle));
        assert!(player.is_looping());

        player.cancel(handle);
        assert!(!player.is_running());
        assert!(!player.is_looping());
    }
}
