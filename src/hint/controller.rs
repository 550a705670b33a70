//! Interaction hint state machine shared by NPCs and interactable objects.
use std::fmt;

use bevy::{
    log::{debug, error},
    math::Vec3,
};

use super::{
    errors::InteractError,
    listeners::{InteractionListener, ListenerId, ListenerRegistry},
    policy::{ConsumeScope, ConsumptionPolicy},
    scheduler::{
        AnimationScheduler, EntityLifecycle, Easing, FadeTween, LoopTween, MoveTween,
        TweenHandle, TweenRequest,
    },
    settings::HintSettings,
};

/// Animation phase of the hint visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintPhase {
    Idle,
    Showing,
    Visible,
    Hiding,
}

/// Externally observable controller state. `Consumed` takes precedence over
/// whatever phase the hint visual is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintState {
    Idle,
    Showing,
    Visible,
    Hiding,
    Consumed,
}

impl fmt::Display for HintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Showing => "showing",
            Self::Visible => "visible",
            Self::Hiding => "hiding",
            Self::Consumed => "consumed",
        };
        write!(f, "{}", label)
    }
}

/// Whether the hint node has something to render at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintSurface {
    Present,
    /// Degraded mode: animations are skipped, transitions still happen.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Consumption {
    None,
    UntilRelisten,
    UntilHidden,
}

/// Drives the show/bounce/hide lifecycle of one entity's interaction hint and
/// dispatches interaction listeners.
///
/// All calls are synchronous. Animation completions are fed back through
/// [`InteractionHintController::on_animation_complete`]; completions for
/// handles the controller no longer owns are ignored.
#[derive(Debug)]
pub struct InteractionHintController {
    settings: HintSettings,
    policy: ConsumptionPolicy,
    rest_position: Vec3,
    surface: HintSurface,
    phase: HintPhase,
    interactable: bool,
    consumption: Consumption,
    fade_handle: Option<TweenHandle>,
    bounce_handle: Option<TweenHandle>,
    listeners: ListenerRegistry,
    disappear_on_invisible: bool,
}

impl InteractionHintController {
    /// Creates a controller for a hint resting at `rest_position` (local space).
    pub fn new(
        settings: HintSettings,
        policy: ConsumptionPolicy,
        rest_position: Vec3,
        surface: HintSurface,
    ) -> Self {
        if surface == HintSurface::Missing {
            error!(
                target: "interaction",
                "Hint has no renderable surface; hint animations will be skipped"
            );
        }

        Self {
            settings,
            policy,
            rest_position,
            surface,
            phase: HintPhase::Idle,
            interactable: false,
            consumption: Consumption::None,
            fade_handle: None,
            bounce_handle: None,
            listeners: ListenerRegistry::default(),
            disappear_on_invisible: false,
        }
    }

    /// Puts the hint into its hidden starting pose.
    pub fn initialize(&mut self, scheduler: &mut impl AnimationScheduler) {
        if self.is_degraded() {
            return;
        }
        scheduler.snap(self.hidden_position(), 0.0);
        scheduler.set_hint_active(false);
    }

    pub fn settings(&self) -> &HintSettings {
        &self.settings
    }

    pub fn policy(&self) -> ConsumptionPolicy {
        self.policy
    }

    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    pub fn hidden_position(&self) -> Vec3 {
        self.rest_position - Vec3::new(0.0, self.settings.offset(), 0.0)
    }

    pub fn phase(&self) -> HintPhase {
        self.phase
    }

    pub fn state(&self) -> HintState {
        if self.is_consumed() {
            return HintState::Consumed;
        }
        match self.phase {
            HintPhase::Idle => HintState::Idle,
            HintPhase::Showing => HintState::Showing,
            HintPhase::Visible => HintState::Visible,
            HintPhase::Hiding => HintState::Hiding,
        }
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    pub fn is_consumed(&self) -> bool {
        self.consumption != Consumption::None
    }

    pub fn is_degraded(&self) -> bool {
        self.surface == HintSurface::Missing
    }

    pub fn fade_active(&self) -> bool {
        self.fade_handle.is_some()
    }

    pub fn bounce_active(&self) -> bool {
        self.bounce_handle.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn disappear_on_invisible(&self) -> bool {
        self.disappear_on_invisible
    }

    /// Arms (or disarms) the one-shot disappearance. Arming drops interactability
    /// right away.
    pub fn set_disappear_on_invisible(&mut self, disappear: bool) {
        self.disappear_on_invisible = disappear;
        if disappear {
            self.interactable = false;
        }
    }

    /// The player entered the trigger zone.
    pub fn on_enter(&mut self, scheduler: &mut impl AnimationScheduler) {
        if self.is_consumed() {
            return;
        }
        if matches!(self.phase, HintPhase::Showing | HintPhase::Visible) {
            return;
        }

        self.cancel_fade(scheduler);
        self.interactable = !self.disappear_on_invisible;

        if self.is_degraded() {
            self.phase = HintPhase::Visible;
            return;
        }

        scheduler.set_hint_active(true);
        scheduler.snap(self.hidden_position(), 0.0);
        let handle = scheduler.start(TweenRequest {
            fade: Some(FadeTween {
                target: 1.0,
                duration: self.settings.fade_duration(),
            }),
            movement: Some(MoveTween {
                target: self.rest_position,
                duration: self.settings.slide_duration(),
                easing: Easing::OutBack,
            }),
        });
        self.fade_handle = Some(handle);
        self.phase = HintPhase::Showing;
        debug!(target: "interaction", "Hint showing ({})", handle);
    }

    /// The player left the trigger zone.
    pub fn on_exit(&mut self, scheduler: &mut impl AnimationScheduler) {
        if self.is_consumed() {
            return;
        }

        self.cancel_bounce(scheduler);
        self.interactable = false;

        if matches!(self.phase, HintPhase::Idle | HintPhase::Hiding) {
            return;
        }

        self.cancel_fade(scheduler);

        if self.is_degraded() {
            self.finish_hide(scheduler);
            return;
        }

        let handle = scheduler.start(TweenRequest {
            fade: Some(FadeTween {
                target: 0.0,
                duration: self.settings.fade_duration(),
            }),
            movement: Some(MoveTween {
                target: self.hidden_position(),
                duration: self.settings.slide_duration(),
                easing: Easing::InBack,
            }),
        });
        self.fade_handle = Some(handle);
        self.phase = HintPhase::Hiding;
        debug!(target: "interaction", "Hint hiding ({})", handle);
    }

    /// Reports that a non-looping tween finished on its own.
    pub fn on_animation_complete(
        &mut self,
        handle: TweenHandle,
        scheduler: &mut impl AnimationScheduler,
    ) {
        if self.fade_handle != Some(handle) {
            return;
        }
        self.fade_handle = None;

        match self.phase {
            HintPhase::Showing => {
                self.phase = HintPhase::Visible;
                self.start_bounce(scheduler);
            }
            HintPhase::Hiding => self.finish_hide(scheduler),
            HintPhase::Idle | HintPhase::Visible => {}
        }
    }

    /// Runs every listener, hides the hint, and clears the registry.
    ///
    /// Silently ignored while not interactable. Cleanup always runs; the first
    /// listener failure is returned afterwards.
    pub fn interact(
        &mut self,
        scheduler: &mut impl AnimationScheduler,
    ) -> Result<(), InteractError> {
        if !self.interactable {
            return Ok(());
        }

        let outcome = self.listeners.invoke_all();

        self.on_exit(scheduler);
        self.interactable = false;
        self.consumption = match self.policy.on_interact {
            ConsumeScope::UntilRelisten => Consumption::UntilRelisten,
            ConsumeScope::CurrentCycle if self.phase == HintPhase::Idle => Consumption::None,
            ConsumeScope::CurrentCycle => Consumption::UntilHidden,
        };
        self.clear_listeners(scheduler);

        outcome
    }

    /// Registers a listener and lifts any consumption.
    pub fn add_listener(&mut self, listener: InteractionListener) -> ListenerId {
        self.consumption = Consumption::None;
        self.listeners.add(listener)
    }

    /// Returns `false` if the listener was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Empties the registry. Under a consuming policy a shown hint is hidden
    /// first, since a consumed controller ignores the later exit.
    pub fn clear_listeners(&mut self, scheduler: &mut impl AnimationScheduler) {
        self.listeners.clear();
        if !self.policy.consume_on_clear {
            return;
        }
        if matches!(self.phase, HintPhase::Showing | HintPhase::Visible) {
            self.on_exit(scheduler);
        }
        self.consumption = Consumption::UntilRelisten;
    }

    /// The host reports that the entity left the visible region. Returns
    /// `true` when this triggered the one-shot disappearance.
    pub fn on_visibility_lost(
        &mut self,
        scheduler: &mut impl AnimationScheduler,
        host: &mut impl EntityLifecycle,
    ) -> bool {
        if !self.disappear_on_invisible {
            return false;
        }
        self.disappear(scheduler, host);
        true
    }

    /// Deactivates the whole entity and disarms the disappearance flag.
    pub fn disappear(
        &mut self,
        scheduler: &mut impl AnimationScheduler,
        host: &mut impl EntityLifecycle,
    ) {
        self.cancel_fade(scheduler);
        self.cancel_bounce(scheduler);
        self.interactable = false;
        self.phase = HintPhase::Idle;
        if !self.is_degraded() {
            scheduler.snap(self.hidden_position(), 0.0);
            scheduler.set_hint_active(false);
        }

        host.deactivate_entity();
        self.disappear_on_invisible = false;
    }

    fn start_bounce(&mut self, scheduler: &mut impl AnimationScheduler) {
        self.cancel_bounce(scheduler);
        let handle = scheduler.start_loop(LoopTween {
            target_y: self.rest_position.y + self.settings.bounce_amplitude(),
            duration: self.settings.bounce_duration(),
            easing: Easing::InOutQuad,
        });
        self.bounce_handle = Some(handle);
    }

    fn finish_hide(&mut self, scheduler: &mut impl AnimationScheduler) {
        if !self.is_degraded() {
            scheduler.set_hint_active(false);
        }
        self.phase = HintPhase::Idle;
        if self.consumption == Consumption::UntilHidden {
            self.consumption = Consumption::None;
        }
    }

    fn cancel_fade(&mut self, scheduler: &mut impl AnimationScheduler) {
        if let Some(handle) = self.fade_handle.take() {
            scheduler.cancel(handle);
        }
    }

    fn cancel_bounce(&mut self, scheduler: &mut impl AnimationScheduler) {
        if let Some(handle) = self.bounce_handle.take() {
            scheduler.cancel(handle);
        }
    }
}
