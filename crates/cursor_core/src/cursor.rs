//! The gaze cursor: state tracking, pose blending and host wiring.
//!
//! A host drives one [`Cursor`] per gaze ray:
//! - `initialize` once (registers listeners, shows the visual),
//! - `handle_input_event` / `on_focused_object_changed` as events arrive,
//! - `tick` once per frame,
//! - `shutdown` when the cursor goes away.
//!
//! Everything runs on the frame thread; events are plain field mutations.

use crate::blend::{Aim, FrameTime, smooth_toward, target_pose};
use crate::config::CursorConfig;
use crate::hooks::{CursorHooks, DefaultHooks};
use crate::services::{
    CursorSnapshot, GazeProvider, InputEvent, InputEventSource, ModifierLookup, PoseModifier,
    Shared,
};
use crate::signals::InputSignals;
use crate::state::StateInputs;
use crate::visual::CursorVisual;
use ecs_core::{CursorId, CursorState, EntityId, Transform};
use glam::{Quat, Vec3};
use std::rc::Rc;
use tracing::{debug, info};

/// Gaze cursor: discrete interaction state plus a smoothed pose, driven once per frame.
pub struct Cursor<H: CursorHooks = DefaultHooks> {
    id: CursorId,
    cfg: CursorConfig,
    hooks: H,
    gaze: Option<Shared<dyn GazeProvider>>,
    input: Option<Shared<dyn InputEventSource>>,
    visual: Option<Box<dyn CursorVisual>>,
    registered: bool,
    visible: bool,
    state: CursorState,
    signals: InputSignals,
    targeted_object: Option<EntityId>,
    targeted_modifier: Option<Rc<dyn PoseModifier>>,
    pose: Transform,
}

impl Cursor<DefaultHooks> {
    #[must_use]
    pub fn plain(id: CursorId, cfg: CursorConfig) -> Self {
        Self::new(id, cfg, DefaultHooks)
    }
}

impl<H: CursorHooks> Cursor<H> {
    #[must_use]
    pub fn new(id: CursorId, cfg: CursorConfig, hooks: H) -> Self {
        Self {
            id,
            cfg,
            hooks,
            gaze: None,
            input: None,
            visual: None,
            registered: false,
            visible: false,
            state: CursorState::None,
            signals: InputSignals::default(),
            targeted_object: None,
            targeted_modifier: None,
            pose: Transform::default(),
        }
    }

    #[must_use]
    pub fn with_gaze(mut self, gaze: Shared<dyn GazeProvider>) -> Self {
        self.gaze = Some(gaze);
        self
    }

    #[must_use]
    pub fn with_input(mut self, input: Shared<dyn InputEventSource>) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn with_visual(mut self, visual: Box<dyn CursorVisual>) -> Self {
        self.visual = Some(visual);
        self
    }

    // --- lifecycle -------------------------------------------------------

    /// Register with host services and show the cursor.
    pub fn initialize(&mut self) {
        self.register();
        self.set_visibility(true);
    }

    /// Unregister, drop the target and hand tracking, park in `Contextual`, hide.
    pub fn shutdown(&mut self) {
        self.unregister();
        self.targeted_object = None;
        self.targeted_modifier = None;
        self.signals.clear_sources();
        self.force_state(CursorState::Contextual);
        self.set_visibility(false);
    }

    /// Back to the freshly constructed state. Registration and visibility are kept.
    pub fn reset(&mut self) {
        self.targeted_object = None;
        self.targeted_modifier = None;
        self.signals = InputSignals::default();
        self.pose = Transform::default();
        self.force_state(CursorState::None);
    }

    fn register(&mut self) {
        if self.registered {
            return;
        }
        if let Some(gaze) = &self.gaze {
            gaze.borrow_mut().add_focus_listener(self.id);
        }
        if let Some(input) = &self.input {
            input.borrow_mut().add_global_listener(self.id);
        }
        self.registered = true;
        debug!(
            target: "cursor",
            id = self.id.0,
            gaze = self.gaze.is_some(),
            input = self.input.is_some(),
            "registered"
        );
    }

    fn unregister(&mut self) {
        if !self.registered {
            return;
        }
        if let Some(gaze) = &self.gaze {
            gaze.borrow_mut().remove_focus_listener(self.id);
        }
        if let Some(input) = &self.input {
            input.borrow_mut().remove_global_listener(self.id);
        }
        self.registered = false;
        debug!(target: "cursor", id = self.id.0, "unregistered");
    }

    // --- events ----------------------------------------------------------

    pub fn handle_input_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Down(_) => self.signals.press(),
            InputEvent::Up(_) => self.signals.release(),
            InputEvent::Clicked(data) => self.hooks.on_input_clicked(data),
            InputEvent::SourceDetected(_) => self.signals.source_detected(),
            InputEvent::SourceLost(_) => {
                self.signals.source_lost();
            }
        }
    }

    /// The gazed object changed. Looks up and binds the new object's modifier.
    pub fn on_focused_object_changed(
        &mut self,
        previous: Option<EntityId>,
        new: Option<EntityId>,
        lookup: &dyn ModifierLookup,
    ) {
        self.targeted_object = new;
        self.targeted_modifier = new.and_then(|obj| lookup.modifier_for(obj));
        if let Some(m) = &self.targeted_modifier {
            m.bind_cursor(self.id);
        }
        debug!(
            target: "cursor",
            from = ?previous,
            to = ?new,
            modifier = self.targeted_modifier.is_some(),
            "focus changed"
        );
    }

    /// Force `Contextual`, forgetting tracked hands.
    pub fn disable_input(&mut self) {
        self.signals.clear_sources();
        self.force_state(CursorState::Contextual);
    }

    /// Leave `Contextual` (or any state) for `None`.
    pub fn enable_input(&mut self) {
        self.force_state(CursorState::None);
    }

    /// Store `state` unconditionally, notifying hooks first.
    pub fn force_state(&mut self, state: CursorState) {
        self.hooks.on_state_change(self.state, state);
        info!(target: "cursor", from = %self.state, to = %state, reason = "forced");
        self.state = state;
    }

    // --- per frame -------------------------------------------------------

    /// Classify and store this frame's state. Returns the stored state.
    pub fn update_state(&mut self) -> CursorState {
        let inputs = StateInputs {
            current: self.state,
            hand_visible: self.signals.hand_visible(),
            input_down: self.signals.input_down(),
            has_target: self.targeted_object.is_some(),
        };
        let next = self.hooks.check_state(&inputs);
        if next != self.state {
            self.hooks.on_state_change(self.state, next);
            info!(target: "cursor", from = %self.state, to = %next, reason = "classified");
            self.state = next;
        }
        self.state
    }

    /// Per-frame update: classify, then blend the pose toward the gaze target.
    /// Without a gaze provider only the state is updated.
    pub fn tick(&mut self, time: FrameTime) {
        self.update_state();
        let Some(gaze) = self.gaze.clone() else {
            return;
        };
        let (origin, direction, hit) = {
            let g = gaze.borrow();
            (g.origin(), g.direction(), g.hit())
        };
        self.update_pose(origin, direction, hit.map(|h| (h.point, h.normal, h.object)), time);
    }

    fn update_pose(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        hit: Option<(Vec3, Vec3, Option<EntityId>)>,
        time: FrameTime,
    ) {
        let aim = match hit {
            Some((point, normal, Some(object))) => {
                self.targeted_object = Some(object);
                match &self.targeted_modifier {
                    Some(m) => Aim::Modified(m.modified_pose(&self.snapshot())),
                    None => Aim::Surface { point, normal },
                }
            }
            _ => {
                self.targeted_object = None;
                self.targeted_modifier = None;
                Aim::Free
            }
        };
        let target = target_pose(&self.cfg, origin, direction, aim, self.pose.rotation);
        let dt = time.select(self.cfg.use_unscaled_time);
        self.pose = smooth_toward(&self.cfg, &self.pose, &target, dt);
    }

    // --- accessors -------------------------------------------------------

    pub fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
        if let Some(v) = self.visual.as_mut() {
            v.set_active(visible);
        }
        self.hooks.on_visibility(visible);
    }

    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
    #[inline]
    #[must_use]
    pub fn id(&self) -> CursorId {
        self.id
    }
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CursorConfig {
        &self.cfg
    }
    #[inline]
    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }
    #[inline]
    #[must_use]
    pub fn signals(&self) -> &InputSignals {
        &self.signals
    }
    #[inline]
    #[must_use]
    pub fn is_hand_visible(&self) -> bool {
        self.signals.hand_visible()
    }
    #[inline]
    #[must_use]
    pub fn is_input_down(&self) -> bool {
        self.signals.input_down()
    }
    #[inline]
    #[must_use]
    pub fn targeted_object(&self) -> Option<EntityId> {
        self.targeted_object
    }
    #[inline]
    #[must_use]
    pub fn has_modifier(&self) -> bool {
        self.targeted_modifier.is_some()
    }
    #[inline]
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered
    }
    #[inline]
    #[must_use]
    pub fn pose(&self) -> &Transform {
        &self.pose
    }
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.translation
    }
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.pose.rotation
    }
    #[inline]
    #[must_use]
    pub fn local_scale(&self) -> Vec3 {
        self.pose.scale
    }
    #[must_use]
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            id: self.id,
            state: self.state,
            pose: self.pose,
        }
    }
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}
