//! Scenario replay: drives a cursor through scripted frames.
//!
//! Stands in for the host engine: owns a gaze provider fed from the scenario,
//! raises focus changes when the hit object changes, forwards input events
//! and ticks the cursor once per frame.

use anyhow::{Result, bail};
use cursor_core::services::{CursorSnapshot, ModifierLookup, PoseModifier};
use cursor_core::{
    Cursor, CursorHooks, CursorId, CursorState, EntityId, EventData, FrameTime, GazeHit,
    GazeProvider, InputEvent, Transform,
};
use data_runtime::scenario::{Scenario, ScenarioEvent, ScenarioFrame, ScenarioModifier};
use ecs_core::parse::parse_cursor_state;
use glam::{Quat, Vec3};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Gaze provider whose per-frame data is written by the harness.
#[derive(Debug, Default)]
pub struct ScriptedGaze {
    pub origin: Vec3,
    pub direction: Vec3,
    pub hit: Option<GazeHit>,
    pub listeners: Vec<CursorId>,
}

impl ScriptedGaze {
    fn load_frame(&mut self, f: &ScenarioFrame) {
        self.origin = Vec3::from_array(f.origin);
        self.direction = Vec3::from_array(f.direction).normalize_or_zero();
        self.hit = f.hit.as_ref().map(|h| GazeHit {
            point: Vec3::from_array(h.point),
            normal: Vec3::from_array(h.normal).normalize_or_zero(),
            object: Some(EntityId(h.object)),
        });
    }
}

impl GazeProvider for ScriptedGaze {
    fn hit(&self) -> Option<GazeHit> {
        self.hit
    }
    fn origin(&self) -> Vec3 {
        self.origin
    }
    fn direction(&self) -> Vec3 {
        self.direction
    }
    fn add_focus_listener(&mut self, listener: CursorId) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }
    fn remove_focus_listener(&mut self, listener: CursorId) {
        self.listeners.retain(|l| *l != listener);
    }
}

/// Modifier that always returns the same pose.
#[derive(Debug)]
pub struct FixedPoseModifier {
    pose: Transform,
    bound: Cell<Option<CursorId>>,
}

impl FixedPoseModifier {
    #[must_use]
    pub fn new(pose: Transform) -> Self {
        Self {
            pose,
            bound: Cell::new(None),
        }
    }

    #[must_use]
    pub fn bound_cursor(&self) -> Option<CursorId> {
        self.bound.get()
    }
}

impl PoseModifier for FixedPoseModifier {
    fn bind_cursor(&self, cursor: CursorId) {
        self.bound.set(Some(cursor));
    }
    fn modified_pose(&self, _cursor: &CursorSnapshot) -> Transform {
        self.pose
    }
}

/// Object -> modifier table built from the scenario.
#[derive(Debug, Default)]
pub struct ModifierTable(HashMap<EntityId, Rc<FixedPoseModifier>>);

impl ModifierTable {
    #[must_use]
    pub fn from_scenario(mods: &[ScenarioModifier]) -> Self {
        let map = mods
            .iter()
            .map(|m| {
                let pose = Transform::new(
                    Vec3::from_array(m.position),
                    Quat::from_array(m.rotation).normalize(),
                    Vec3::from_array(m.scale),
                );
                (EntityId(m.object), Rc::new(FixedPoseModifier::new(pose)))
            })
            .collect();
        Self(map)
    }

    #[must_use]
    pub fn get(&self, object: EntityId) -> Option<&Rc<FixedPoseModifier>> {
        self.0.get(&object)
    }
}

impl ModifierLookup for ModifierTable {
    fn modifier_for(&self, object: EntityId) -> Option<Rc<dyn PoseModifier>> {
        self.0
            .get(&object)
            .map(|m| Rc::clone(m) as Rc<dyn PoseModifier>)
    }
}

/// Cursor state and pose after one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub index: usize,
    pub state: CursorState,
    pub pose: Transform,
}

/// Host stand-in owning the cursor and its services for one scenario run.
pub struct Harness<H: CursorHooks> {
    pub cursor: Cursor<H>,
    pub gaze: Rc<RefCell<ScriptedGaze>>,
    pub modifiers: ModifierTable,
    focused: Option<EntityId>,
}

impl<H: CursorHooks> Harness<H> {
    /// Wire `cursor` to a scripted gaze provider and initialize it.
    pub fn new(cursor: Cursor<H>, scenario: &Scenario) -> Self {
        let gaze = Rc::new(RefCell::new(ScriptedGaze::default()));
        let mut cursor = cursor.with_gaze(gaze.clone());
        cursor.initialize();
        Self {
            cursor,
            gaze,
            modifiers: ModifierTable::from_scenario(&scenario.modifiers),
            focused: None,
        }
    }

    /// Feed one frame: gaze data, focus change, input events, tick.
    pub fn step(&mut self, index: usize, frame: &ScenarioFrame) -> Result<FrameReport> {
        self.gaze.borrow_mut().load_frame(frame);
        let now_focused = frame.hit.as_ref().map(|h| EntityId(h.object));
        if now_focused != self.focused {
            self.cursor
                .on_focused_object_changed(self.focused, now_focused, &self.modifiers);
            self.focused = now_focused;
        }
        for ev in &frame.events {
            self.deliver(*ev);
        }
        self.cursor.tick(FrameTime {
            delta: frame.dt,
            unscaled_delta: frame.unscaled_dt.unwrap_or(frame.dt),
        });
        let report = FrameReport {
            index,
            state: self.cursor.state(),
            pose: *self.cursor.pose(),
        };
        if let Some(name) = &frame.expect {
            check_state(name, report.state, &format!("frame {index}"))?;
        }
        debug!(target: "harness", frame = index, state = %report.state, "tick");
        Ok(report)
    }

    fn deliver(&mut self, ev: ScenarioEvent) {
        let data = EventData::default();
        match ev {
            ScenarioEvent::Down => self.cursor.handle_input_event(&InputEvent::Down(data)),
            ScenarioEvent::Up => self.cursor.handle_input_event(&InputEvent::Up(data)),
            ScenarioEvent::Clicked => self.cursor.handle_input_event(&InputEvent::Clicked(data)),
            ScenarioEvent::SourceDetected => self
                .cursor
                .handle_input_event(&InputEvent::SourceDetected(data)),
            ScenarioEvent::SourceLost => self
                .cursor
                .handle_input_event(&InputEvent::SourceLost(data)),
            ScenarioEvent::DisableInput => self.cursor.disable_input(),
            ScenarioEvent::EnableInput => self.cursor.enable_input(),
        }
    }
}

fn check_state(expected: &str, actual: CursorState, at: &str) -> Result<()> {
    let Some(want) = parse_cursor_state(expected) else {
        bail!("{at}: unknown expected state '{expected}'");
    };
    if want != actual {
        bail!("{at}: expected state {want}, got {actual}");
    }
    Ok(())
}

/// Replay every frame of `scenario` through `cursor`.
pub fn run_scenario<H: CursorHooks>(
    scenario: &Scenario,
    cursor: Cursor<H>,
) -> Result<(Vec<FrameReport>, Harness<H>)> {
    let mut harness = Harness::new(cursor, scenario);
    let mut reports = Vec::with_capacity(scenario.frames.len());
    for (i, frame) in scenario.frames.iter().enumerate() {
        reports.push(harness.step(i, frame)?);
    }
    if let (Some(name), Some(last)) = (&scenario.expect_final, reports.last()) {
        check_state(name, last.state, "final")?;
    }
    Ok((reports, harness))
}
