use cursor_core::hooks::RecordingHooks;
use cursor_core::services::NoModifiers;
use cursor_core::visual::{CursorVisual, FlagVisual, ObjectCursor};
use cursor_core::{
    Cursor, CursorConfig, CursorId, CursorSnapshot, CursorState, EntityId, EventData, FrameTime,
    GazeHit, GazeProvider, InputEvent, InputEventSource, ModifierLookup, PoseModifier, Transform,
};
use glam::{Quat, Vec3};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct FakeGaze {
    origin: Vec3,
    direction: Vec3,
    hit: Option<GazeHit>,
    listeners: Vec<CursorId>,
    adds: usize,
    removes: usize,
}

impl GazeProvider for FakeGaze {
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
        self.adds += 1;
        self.listeners.push(listener);
    }
    fn remove_focus_listener(&mut self, listener: CursorId) {
        self.removes += 1;
        self.listeners.retain(|l| *l != listener);
    }
}

#[derive(Default)]
struct FakeInput {
    listeners: Vec<CursorId>,
}

impl InputEventSource for FakeInput {
    fn add_global_listener(&mut self, listener: CursorId) {
        self.listeners.push(listener);
    }
    fn remove_global_listener(&mut self, listener: CursorId) {
        self.listeners.retain(|l| *l != listener);
    }
}

struct SnapModifier {
    pose: Transform,
    bound: Cell<Option<CursorId>>,
}

impl PoseModifier for SnapModifier {
    fn bind_cursor(&self, cursor: CursorId) {
        self.bound.set(Some(cursor));
    }
    fn modified_pose(&self, _cursor: &CursorSnapshot) -> Transform {
        self.pose
    }
}

#[derive(Default)]
struct Modifiers(HashMap<EntityId, Rc<SnapModifier>>);

impl ModifierLookup for Modifiers {
    fn modifier_for(&self, object: EntityId) -> Option<Rc<dyn PoseModifier>> {
        self.0.get(&object).map(|m| m.clone() as Rc<dyn PoseModifier>)
    }
}

fn snappy() -> CursorConfig {
    CursorConfig {
        position_lerp_time: 0.1,
        scale_lerp_time: 0.1,
        rotation_lerp_time: 0.1,
        ..Default::default()
    }
}

fn rig() -> (Cursor<RecordingHooks>, Rc<RefCell<FakeGaze>>, Rc<RefCell<FakeInput>>) {
    let gaze = Rc::new(RefCell::new(FakeGaze {
        direction: Vec3::Z,
        ..Default::default()
    }));
    let input = Rc::new(RefCell::new(FakeInput::default()));
    let cursor = Cursor::new(CursorId(7), snappy(), RecordingHooks::default())
        .with_gaze(gaze.clone())
        .with_input(input.clone());
    (cursor, gaze, input)
}

fn ev() -> EventData {
    EventData { source_id: 1 }
}

#[test]
fn registration_is_idempotent() {
    let (mut c, gaze, input) = rig();
    c.initialize();
    c.initialize();
    assert!(c.is_registered());
    assert_eq!(gaze.borrow().adds, 1);
    assert_eq!(input.borrow().listeners, vec![CursorId(7)]);
    c.shutdown();
    c.shutdown();
    assert!(!c.is_registered());
    assert_eq!(gaze.borrow().removes, 1);
    assert!(input.borrow().listeners.is_empty());
    // re-enable after shutdown registers again
    c.initialize();
    assert_eq!(gaze.borrow().adds, 2);
}

#[test]
fn missing_services_degrade_to_noop() {
    let mut c = Cursor::plain(CursorId(1), CursorConfig::default());
    c.initialize();
    c.tick(FrameTime::uniform(0.016));
    assert_eq!(c.state(), CursorState::Observing);
    assert_eq!(*c.pose(), Transform::default());
}

#[test]
fn free_gaze_tick_moves_to_default_distance() {
    let (mut c, _gaze, _input) = rig();
    c.initialize();
    c.tick(FrameTime::uniform(0.1));
    assert!(c.position().abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));
    assert!((c.rotation() * Vec3::Z).abs_diff_eq(Vec3::NEG_Z, 1e-4));
    assert_eq!(c.targeted_object(), None);
}

#[test]
fn hover_select_release_cycle_over_target() {
    let (mut c, gaze, _input) = rig();
    c.initialize();
    let obj = EntityId(42);
    gaze.borrow_mut().hit = Some(GazeHit {
        point: Vec3::new(0.0, 0.0, 5.0),
        normal: Vec3::NEG_Z,
        object: Some(obj),
    });
    c.on_focused_object_changed(None, Some(obj), &NoModifiers);
    c.handle_input_event(&InputEvent::SourceDetected(ev()));
    c.tick(FrameTime::uniform(0.1));
    assert_eq!(c.state(), CursorState::Hovering);
    assert!(c.position().abs_diff_eq(Vec3::new(0.0, 0.0, 4.98), 1e-4));

    c.handle_input_event(&InputEvent::Down(ev()));
    c.tick(FrameTime::uniform(0.1));
    assert_eq!(c.state(), CursorState::Selecting);
    c.handle_input_event(&InputEvent::Up(ev()));
    c.tick(FrameTime::uniform(0.1));
    assert_eq!(c.state(), CursorState::Released);
    c.tick(FrameTime::uniform(0.1));
    assert_eq!(c.state(), CursorState::Hovering);

    let changes = &c.hooks().changes;
    assert_eq!(
        changes.iter().map(|(_, to)| *to).collect::<Vec<_>>(),
        vec![
            CursorState::Hovering,
            CursorState::Selecting,
            CursorState::Released,
            CursorState::Hovering
        ]
    );
}

#[test]
fn losing_the_hit_clears_target_and_modifier() {
    let (mut c, gaze, _input) = rig();
    c.initialize();
    let obj = EntityId(3);
    let modifier = Rc::new(SnapModifier {
        pose: Transform::new(Vec3::new(1.0, 1.0, 1.0), Quat::IDENTITY, Vec3::splat(2.0)),
        bound: Cell::new(None),
    });
    let mut lookup = Modifiers::default();
    lookup.0.insert(obj, modifier.clone());

    gaze.borrow_mut().hit = Some(GazeHit {
        point: Vec3::new(0.0, 0.0, 3.0),
        normal: Vec3::NEG_Z,
        object: Some(obj),
    });
    c.on_focused_object_changed(None, Some(obj), &lookup);
    assert_eq!(modifier.bound.get(), Some(CursorId(7)));
    assert!(c.has_modifier());

    c.tick(FrameTime::uniform(0.1));
    assert!(c.position().abs_diff_eq(Vec3::ONE, 1e-5));
    assert!(c.local_scale().abs_diff_eq(Vec3::splat(2.0), 1e-5));

    gaze.borrow_mut().hit = None;
    c.tick(FrameTime::uniform(0.1));
    assert_eq!(c.targeted_object(), None);
    assert!(!c.has_modifier());
    // scale does not persist once the modifier is gone
    assert!(c.local_scale().abs_diff_eq(Vec3::ONE, 1e-5));
}

#[test]
fn focus_to_nothing_drops_modifier() {
    let (mut c, _gaze, _input) = rig();
    let obj = EntityId(9);
    let mut lookup = Modifiers::default();
    lookup.0.insert(
        obj,
        Rc::new(SnapModifier {
            pose: Transform::default(),
            bound: Cell::new(None),
        }),
    );
    c.on_focused_object_changed(None, Some(obj), &lookup);
    assert!(c.has_modifier());
    c.on_focused_object_changed(Some(obj), None, &lookup);
    assert!(!c.has_modifier());
    assert_eq!(c.targeted_object(), None);
}

#[test]
fn disable_input_is_sticky_until_enabled() {
    let (mut c, _gaze, _input) = rig();
    c.initialize();
    c.handle_input_event(&InputEvent::SourceDetected(ev()));
    c.handle_input_event(&InputEvent::SourceDetected(ev()));
    c.disable_input();
    assert_eq!(c.state(), CursorState::Contextual);
    assert!(!c.is_hand_visible());
    assert_eq!(c.signals().visible_sources(), 0);

    c.handle_input_event(&InputEvent::Down(ev()));
    c.handle_input_event(&InputEvent::SourceDetected(ev()));
    for _ in 0..3 {
        c.tick(FrameTime::uniform(0.016));
        assert_eq!(c.state(), CursorState::Contextual);
    }

    c.enable_input();
    assert_eq!(c.state(), CursorState::None);
    c.tick(FrameTime::uniform(0.016));
    assert_eq!(c.state(), CursorState::Selecting);
}

#[test]
fn hand_counter_tracks_multiple_sources() {
    let (mut c, _gaze, _input) = rig();
    c.handle_input_event(&InputEvent::SourceDetected(ev()));
    c.handle_input_event(&InputEvent::SourceDetected(ev()));
    c.handle_input_event(&InputEvent::SourceLost(ev()));
    assert!(c.is_hand_visible());
    c.update_state();
    assert_eq!(c.state(), CursorState::Interacting);
    c.handle_input_event(&InputEvent::SourceLost(ev()));
    assert!(!c.is_hand_visible());
    // unmatched loss stays at zero
    c.handle_input_event(&InputEvent::SourceLost(ev()));
    assert_eq!(c.signals().visible_sources(), 0);
    c.handle_input_event(&InputEvent::SourceDetected(ev()));
    assert!(c.is_hand_visible());
}

#[test]
fn unscaled_time_drives_smoothing_when_configured() {
    let gaze = Rc::new(RefCell::new(FakeGaze {
        direction: Vec3::Z,
        ..Default::default()
    }));
    let cfg = CursorConfig {
        position_lerp_time: 1.0,
        use_unscaled_time: true,
        ..Default::default()
    };
    let mut c = Cursor::plain(CursorId(2), cfg).with_gaze(gaze);
    c.tick(FrameTime {
        delta: 0.0,
        unscaled_delta: 0.5,
    });
    assert!(c.position().abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-5));
}

#[test]
fn visibility_follows_lifecycle() {
    let flag = FlagVisual::default();
    let mut c =
        Cursor::plain(CursorId(5), CursorConfig::default()).with_visual(Box::new(flag.clone()));
    c.initialize();
    assert!(c.is_visible() && flag.is_active());
    c.set_visibility(false);
    assert!(!flag.is_active());
    c.set_visibility(true);
    c.shutdown();
    assert!(!c.is_visible() && !flag.is_active());
    assert_eq!(c.state(), CursorState::Contextual);
}

#[test]
fn reset_returns_to_initial_state() {
    let (mut c, _gaze, _input) = rig();
    c.initialize();
    c.handle_input_event(&InputEvent::Down(ev()));
    c.tick(FrameTime::uniform(0.1));
    c.reset();
    assert_eq!(c.state(), CursorState::None);
    assert!(!c.is_input_down());
    assert_eq!(*c.pose(), Transform::default());
    assert!(c.is_registered());
}

#[test]
fn hit_without_object_counts_as_no_hit() {
    let (mut c, gaze, _input) = rig();
    c.initialize();
    let obj = EntityId(11);
    let mut lookup = Modifiers::default();
    lookup.0.insert(
        obj,
        Rc::new(SnapModifier {
            pose: Transform::from_translation(Vec3::new(4.0, 0.0, 0.0)),
            bound: Cell::new(None),
        }),
    );
    c.on_focused_object_changed(None, Some(obj), &lookup);
    assert!(c.has_modifier());

    gaze.borrow_mut().hit = Some(GazeHit {
        point: Vec3::new(0.0, 0.0, 6.0),
        normal: Vec3::NEG_Z,
        object: None,
    });
    c.tick(FrameTime::uniform(0.1));
    assert_eq!(c.targeted_object(), None);
    assert!(!c.has_modifier());
    // free-floating at the default distance, not on the reported point
    assert!(c.position().abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));
}

#[test]
fn force_state_overrides_contextual_and_always_notifies() {
    let (mut c, _gaze, _input) = rig();
    c.disable_input();
    assert_eq!(c.state(), CursorState::Contextual);
    c.force_state(CursorState::Hovering);
    assert_eq!(c.state(), CursorState::Hovering);
    c.force_state(CursorState::Hovering);
    assert_eq!(
        c.hooks().changes,
        vec![
            (CursorState::None, CursorState::Contextual),
            (CursorState::Contextual, CursorState::Hovering),
            (CursorState::Hovering, CursorState::Hovering),
        ]
    );
    // classification resumes from the forced state
    c.update_state();
    assert_eq!(c.state(), CursorState::Observing);
}

#[test]
fn object_cursor_visuals_go_dark_when_hidden() {
    let dot = FlagVisual::default();
    let hooks =
        ObjectCursor::new().with_visual(CursorState::Observing, "dot", Box::new(dot.clone()));
    let mut c = Cursor::new(CursorId(8), snappy(), hooks);
    c.initialize();
    c.tick(FrameTime::uniform(0.016));
    assert!(dot.is_active());

    c.set_visibility(false);
    assert!(!c.is_visible() && !dot.is_active());
    c.set_visibility(true);
    assert!(dot.is_active());

    c.shutdown();
    assert!(!dot.is_active());
    assert_eq!(c.hooks().active_visual(), None);
}
