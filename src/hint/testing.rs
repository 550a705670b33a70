//! Recording scheduler used by unit tests; tweens finish only when told to.
use std::collections::HashMap;

use bevy::math::Vec3;

use super::scheduler::{AnimationScheduler, LoopTween, TweenHandle, TweenRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Running {
    Request(usize),
    Loop,
}

#[derive(Debug, Default)]
pub struct FakeScheduler {
    next: u64,
    running: HashMap<TweenHandle, Running>,
    request_handles: Vec<TweenHandle>,
    pub requests: Vec<TweenRequest>,
    pub loops: Vec<LoopTween>,
    pub cancelled: Vec<TweenHandle>,
    pub position: Vec3,
    pub opacity: f32,
    pub hint_active: bool,
}

impl FakeScheduler {
    fn issue(&mut self) -> TweenHandle {
        self.next += 1;
        TweenHandle::new(self.next)
    }

    /// Handle of the most recently started non-looping request.
    pub fn last_request(&self) -> Option<TweenHandle> {
        self.request_handles.last().copied()
    }

    /// Finishes a running request and applies its end state. Returns `false`
    /// for cancelled, finished or looping handles.
    pub fn complete(&mut self, handle: TweenHandle) -> bool {
        let Some(Running::Request(index)) = self.running.get(&handle).copied() else {
            return false;
        };
        self.running.remove(&handle);

        let request = self.requests[index];
        if let Some(fade) = request.fade {
            self.opacity = fade.target;
        }
        if let Some(movement) = request.movement {
            self.position = movement.target;
        }
        true
    }

    pub fn active_requests(&self) -> usize {
        self.running
            .values()
            .filter(|running| matches!(running, Running::Request(_)))
            .count()
    }

    pub fn active_loops(&self) -> usize {
        self.running
            .values()
            .filter(|running| matches!(running, Running::Loop))
            .count()
    }
}

impl AnimationScheduler for FakeScheduler {
    fn snap(&mut self, position: Vec3, opacity: f32) {
        self.position = position;
        self.opacity = opacity;
    }

    fn set_hint_active(&mut self, active: bool) {
        self.hint_active = active;
    }

    fn start(&mut self, request: TweenRequest) -> TweenHandle {
        let handle = self.issue();
        self.requests.push(request);
        self.request_handles.push(handle);
        self.running
            .insert(handle, Running::Request(self.requests.len() - 1));
        handle
    }

    fn start_loop(&mut self, tween: LoopTween) -> TweenHandle {
        let handle = self.issue();
        self.loops.push(tween);
        self.running.insert(handle, Running::Loop);
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) {
        if self.running.remove(&handle).is_some() {
            self.cancelled.push(handle);
        }
    }
}
