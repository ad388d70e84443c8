//! A task card's interaction layer.
//!
//! One [`TaskCard`] exists per rendered task. The list owner feeds it the
//! raw pointer events captured by that card, together with a
//! [`CardContext`] lending the shared timer scheduler, drag coordinator,
//! rendering surface and callbacks. The card never mutates tasks; moves
//! leave it as a [`ReorderIntent`] for the owner to commit.

use crate::config::GestureConfig;
use crate::domain::{ReorderIntent, Task};
use crate::error::Result;
use crate::drag::{CardVisual, DragCoordinator, DragSession, HoverChange};
use crate::gesture::{Gesture, GestureRecognizer, InputSource, PointerEvent, TimerId, TimerScheduler};
use crate::surface::{resolve_drop, DropPoint, DropResolution, DropTarget, Surface};
use std::sync::Arc;
use tracing::{debug, warn};

/// Callbacks the list owner supplies. Every method defaults to a no-op.
pub trait CardListener {
    fn on_edit(&mut self, _task: &Task) {}

    fn on_delete(&mut self, _task: &Task) {}

    fn on_toggle_complete(&mut self, _task: &Task) {}

    fn on_edit_mode_changed(&mut self, _task: &Task, _edit_mode: bool) {}

    fn on_drag_start(&mut self, _task: &Task) {}

    /// Resolved drop from a mouse drag
    fn on_drop(&mut self, _intent: &ReorderIntent) {}

    /// Resolved drop from a touch drag
    fn on_touch_drop(&mut self, _intent: &ReorderIntent) {}

    /// Advisory: a drop target started showing its indicator
    fn on_drag_enter(&mut self, _target: &DropTarget) {}

    /// Advisory: a drop target stopped showing its indicator
    fn on_drag_leave(&mut self, _target: &DropTarget) {}
}

/// Shared collaborators lent to a card for the duration of one event
pub struct CardContext<'a> {
    pub timers: &'a mut dyn TimerScheduler,
    pub drag: &'a mut DragCoordinator,
    pub surface: &'a dyn Surface,
    pub listener: &'a mut dyn CardListener,
}

impl<'a> CardContext<'a> {
    pub fn new(
        timers: &'a mut dyn TimerScheduler,
        drag: &'a mut DragCoordinator,
        surface: &'a dyn Surface,
        listener: &'a mut dyn CardListener,
    ) -> Self {
        Self {
            timers,
            drag,
            surface,
            listener,
        }
    }
}

/// What the host should do after delivering an event
#[derive(Debug, Clone, PartialEq)]
pub struct EventResponse {
    pub gesture: Gesture,
    pub prevent_default: bool,
    /// Set when a release resolved into a move
    pub intent: Option<ReorderIntent>,
}

/// Interaction state for one rendered task
#[derive(Debug)]
pub struct TaskCard {
    task: Arc<Task>,
    index: usize,
    recognizer: GestureRecognizer,
}

impl TaskCard {
    pub fn new(task: Arc<Task>, index: usize, config: &GestureConfig) -> Result<Self> {
        Ok(Self {
            task,
            index,
            recognizer: GestureRecognizer::new(config.clone())?,
        })
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Re-supplies task data after the owner committed a change.
    /// Edit mode survives; an in-flight drag keeps its own snapshot.
    pub fn update(&mut self, task: Arc<Task>, index: usize) {
        self.task = task;
        self.index = index;
    }

    pub fn is_edit_mode(&self) -> bool {
        self.recognizer.is_edit_mode()
    }

    /// Cards are only draggable in edit mode
    pub fn is_draggable(&self) -> bool {
        self.recognizer.is_edit_mode()
    }

    pub fn visual(&self, drag: &DragCoordinator) -> CardVisual {
        CardVisual {
            edit_mode: self.is_edit_mode(),
            dragging: drag.is_carrying(&self.task.id),
            drop_target: drag.is_drop_target(&self.task.list_id, self.index),
        }
    }

    pub fn handle(&mut self, event: &PointerEvent, ctx: &mut CardContext<'_>) -> EventResponse {
        let recognition = self.recognizer.handle(event, ctx.timers);
        let mut response = EventResponse {
            gesture: recognition.gesture,
            prevent_default: recognition.prevent_default,
            intent: None,
        };

        match recognition.gesture {
            Gesture::DragStart => {
                let session = DragSession::new(Arc::clone(&self.task), self.index, event.source);
                match ctx.drag.begin(session) {
                    Ok(()) => ctx.listener.on_drag_start(&self.task),
                    Err(e) => {
                        warn!(task_id = %self.task.id, error = %e, "Drag not armed");
                        self.recognizer.abort_drag();
                        response.gesture = Gesture::None;
                    }
                }
            }
            Gesture::DragMove(_) => {
                if ctx.drag.is_carrying(&self.task.id) {
                    let target = resolve_drop(ctx.surface, drop_point(event)).into_target();
                    let change = ctx.drag.hover(target);
                    notify_hover(ctx.listener, change);
                }
            }
            Gesture::DragEnd(_) => {
                response.intent = self.finish_drag(event, ctx);
            }
            Gesture::DragCancel => {
                if ctx.drag.is_carrying(&self.task.id) {
                    if let Some(session) = ctx.drag.cancel() {
                        if let Some(hover) = session.hover {
                            ctx.listener.on_drag_leave(&hover);
                        }
                    }
                }
            }
            _ => {}
        }

        response
    }

    /// Forwards a fired timer. Timers belonging to other cards are ignored.
    pub fn on_timer(&mut self, id: TimerId, ctx: &mut CardContext<'_>) -> Gesture {
        let gesture = self.recognizer.on_timer(id, ctx.timers);
        if gesture == Gesture::EnteredEditMode {
            debug!(task_id = %self.task.id, "Entered edit mode");
            ctx.listener.on_edit_mode_changed(&self.task, true);
        }
        gesture
    }

    /// The explicit "done" affordance; the only way out of edit mode
    pub fn exit_edit_mode(&mut self, ctx: &mut CardContext<'_>) -> bool {
        if self.recognizer.exit_edit_mode() == Gesture::ExitedEditMode {
            debug!(task_id = %self.task.id, "Exited edit mode");
            ctx.listener.on_edit_mode_changed(&self.task, false);
            true
        } else {
            false
        }
    }

    pub fn edit(&self, listener: &mut dyn CardListener) {
        listener.on_edit(&self.task);
    }

    pub fn delete(&self, listener: &mut dyn CardListener) {
        listener.on_delete(&self.task);
    }

    pub fn toggle_complete(&self, listener: &mut dyn CardListener) {
        listener.on_toggle_complete(&self.task);
    }

    /// Called when the card leaves the list. Clears any pending timer and
    /// releases a drag this card was carrying without emitting an intent.
    pub fn unmount(mut self, ctx: &mut CardContext<'_>) {
        self.recognizer.teardown(ctx.timers);
        if ctx.drag.is_carrying(&self.task.id) {
            if let Some(session) = ctx.drag.cancel() {
                if let Some(hover) = session.hover {
                    ctx.listener.on_drag_leave(&hover);
                }
            }
        }
    }

    fn finish_drag(&self, event: &PointerEvent, ctx: &mut CardContext<'_>) -> Option<ReorderIntent> {
        if !ctx.drag.is_carrying(&self.task.id) {
            return None;
        }
        let session = ctx.drag.finish()?;
        if let Some(hover) = &session.hover {
            ctx.listener.on_drag_leave(hover);
        }

        match resolve_drop(ctx.surface, drop_point(event)) {
            DropResolution::Resolved(target) => {
                let intent = target.into_intent(Task::clone(&session.task));
                debug!(
                    task_id = %intent.task.id,
                    list_id = %intent.destination_list_id,
                    index = ?intent.destination_index,
                    "Drop resolved"
                );
                match session.source {
                    InputSource::Mouse => ctx.listener.on_drop(&intent),
                    InputSource::Touch => ctx.listener.on_touch_drop(&intent),
                }
                Some(intent)
            }
            DropResolution::Abandoned(reason) => {
                debug!(task_id = %session.task.id, reason = ?reason, "Drop abandoned");
                None
            }
        }
    }
}

fn drop_point(event: &PointerEvent) -> DropPoint {
    event
        .target
        .map(DropPoint::Node)
        .unwrap_or(DropPoint::At(event.position))
}

fn notify_hover(listener: &mut dyn CardListener, change: HoverChange) {
    if let Some(left) = &change.left {
        listener.on_drag_leave(left);
    }
    if let Some(entered) = &change.entered {
        listener.on_drag_enter(entered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Board, ListId, MoveOutcome, TaskId, TaskList};
    use crate::error::TaskdeckError;
    use crate::gesture::{ManualTimers, Point, PointerPhase};
    use crate::surface::{NodeId, Rect, SceneTree, Tag};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Recorded {
        Edit(TaskId),
        Delete(TaskId),
        Toggle(TaskId),
        EditMode(bool),
        DragStart(TaskId),
        Drop(ReorderIntent),
        TouchDrop(ReorderIntent),
        Enter(DropTarget),
        Leave(DropTarget),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Recorded>,
    }

    impl Recorder {
        fn intents(&self) -> Vec<&ReorderIntent> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Recorded::Drop(i) | Recorded::TouchDrop(i) => Some(i),
                    _ => None,
                })
                .collect()
        }
    }

    impl CardListener for Recorder {
        fn on_edit(&mut self, task: &Task) {
            self.events.push(Recorded::Edit(task.id));
        }
        fn on_delete(&mut self, task: &Task) {
            self.events.push(Recorded::Delete(task.id));
        }
        fn on_toggle_complete(&mut self, task: &Task) {
            self.events.push(Recorded::Toggle(task.id));
        }
        fn on_edit_mode_changed(&mut self, _task: &Task, edit_mode: bool) {
            self.events.push(Recorded::EditMode(edit_mode));
        }
        fn on_drag_start(&mut self, task: &Task) {
            self.events.push(Recorded::DragStart(task.id));
        }
        fn on_drop(&mut self, intent: &ReorderIntent) {
            self.events.push(Recorded::Drop(intent.clone()));
        }
        fn on_touch_drop(&mut self, intent: &ReorderIntent) {
            self.events.push(Recorded::TouchDrop(intent.clone()));
        }
        fn on_drag_enter(&mut self, target: &DropTarget) {
            self.events.push(Recorded::Enter(target.clone()));
        }
        fn on_drag_leave(&mut self, target: &DropTarget) {
            self.events.push(Recorded::Leave(target.clone()));
        }
    }

    /// Two lists side by side on a page, three cards each, 100px tall.
    /// listA spans x 0..200, listB spans x 200..400, the page continues to y 1000.
    struct Harness {
        timers: ManualTimers,
        drag: DragCoordinator,
        scene: SceneTree,
        listener: Recorder,
        board: Board,
        card_nodes: Vec<NodeId>,
    }

    impl Harness {
        fn new() -> Self {
            let mut scene = SceneTree::new();
            let page = scene.add_root(Rect::new(0.0, 0.0, 400.0, 1000.0));
            let mut lists = Vec::new();
            let mut card_nodes = Vec::new();

            for (column, name) in ["listA", "listB"].iter().enumerate() {
                let x = column as f64 * 200.0;
                let container = scene.add_child(page, Rect::new(x, 0.0, 200.0, 600.0)).unwrap();
                scene.set_tag(container, Tag::ListId, *name).unwrap();

                let list_id = ListId::from(*name);
                let mut tasks = Vec::new();
                for i in 0..3 {
                    let card = scene
                        .add_child(container, Rect::new(x, i as f64 * 100.0, 200.0, 90.0))
                        .unwrap();
                    scene.set_tag(card, Tag::TaskIndex, i.to_string()).unwrap();
                    card_nodes.push(card);
                    tasks.push(Task::new(format!("{} #{}", name, i), list_id.clone(), i));
                }
                lists.push(TaskList::new(list_id, *name, tasks));
            }

            Self {
                timers: ManualTimers::new(),
                drag: DragCoordinator::new(),
                scene,
                listener: Recorder::default(),
                board: Board::new(lists),
                card_nodes,
            }
        }

        fn ctx(&mut self) -> CardContext<'_> {
            CardContext::new(&mut self.timers, &mut self.drag, &self.scene, &mut self.listener)
        }

        fn card(&self, list: &str, index: usize) -> TaskCard {
            let task = self.board.list(&ListId::from(list)).unwrap().tasks()[index].clone();
            TaskCard::new(Arc::new(task), index, &GestureConfig::default()).unwrap()
        }

        fn send(&mut self, card: &mut TaskCard, phase: PointerPhase, source: InputSource, x: f64, y: f64) -> EventResponse {
            let event = PointerEvent::new(phase, source, Point::new(x, y));
            card.handle(&event, &mut self.ctx())
        }

        fn touch(&mut self, card: &mut TaskCard, phase: PointerPhase, x: f64, y: f64) -> EventResponse {
            self.send(card, phase, InputSource::Touch, x, y)
        }

        fn hold(&mut self, card: &mut TaskCard, ms: u64) -> Vec<Gesture> {
            let fired = self.timers.advance(Duration::from_millis(ms));
            fired
                .into_iter()
                .map(|id| card.on_timer(id, &mut self.ctx()))
                .collect()
        }

        fn enter_edit_mode(&mut self, card: &mut TaskCard) {
            self.touch(card, PointerPhase::Down, 50.0, 50.0);
            self.hold(card, 500);
            self.touch(card, PointerPhase::Up, 50.0, 50.0);
            assert!(card.is_edit_mode());
            self.listener.events.clear();
        }
    }

    #[test]
    fn test_scenario_long_press_enters_edit_mode() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        assert!(!card.is_draggable());

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        assert_eq!(h.hold(&mut card, 600), vec![Gesture::EnteredEditMode]);

        assert!(card.is_edit_mode());
        assert!(card.is_draggable());
        assert!(card.visual(&h.drag).shows_drag_handle());
        assert_eq!(h.listener.events, vec![Recorded::EditMode(true)]);
    }

    #[test]
    fn test_tap_in_idle_has_no_side_effects() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        h.hold(&mut card, 200);
        let response = h.touch(&mut card, PointerPhase::Up, 50.0, 50.0);

        assert_eq!(response.gesture, Gesture::Tap);
        assert!(response.intent.is_none());
        assert!(h.hold(&mut card, 1_000).is_empty());
        assert!(!card.is_edit_mode());
        assert!(h.listener.events.is_empty());
    }

    #[test]
    fn test_scroll_in_idle_is_not_prevented() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        let response = h.touch(&mut card, PointerPhase::Move, 50.0, 60.0);

        assert_eq!(response.gesture, Gesture::Scroll);
        assert!(!response.prevent_default);
        assert!(h.hold(&mut card, 1_000).is_empty());
        assert!(!card.is_edit_mode());
    }

    #[test]
    fn test_press_in_edit_mode_arms_drag_on_next_event() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);

        let response = h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        assert_eq!(response.gesture, Gesture::DragStart);
        assert!(response.prevent_default);
        assert!(card.recognizer().is_dragging());
        assert!(h.drag.is_carrying(&card.task().id));
        assert_eq!(h.listener.events, vec![Recorded::DragStart(card.task().id)]);

        let visual = card.visual(&h.drag);
        assert!(visual.dragging);
        assert_eq!(visual.opacity(), CardVisual::CARRIED_OPACITY);
    }

    #[test]
    fn test_scenario_drop_on_card_in_other_list() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        let moved = h.touch(&mut card, PointerPhase::Move, 250.0, 230.0);
        assert!(moved.prevent_default);
        let response = h.touch(&mut card, PointerPhase::Up, 250.0, 230.0);

        let intent = response.intent.expect("drop should resolve");
        assert_eq!(intent.destination_list_id, ListId::from("listB"));
        assert_eq!(intent.destination_index, Some(2));
        assert_eq!(intent.task.id, card.task().id);

        assert_eq!(h.listener.intents(), vec![&intent]);
        assert!(matches!(h.listener.events.last(), Some(Recorded::TouchDrop(_))));
        assert!(!h.drag.is_active());
        assert!(card.is_edit_mode());
    }

    #[test]
    fn test_scenario_drop_outside_lists() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 1);
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 150.0);
        h.touch(&mut card, PointerPhase::Move, 100.0, 900.0);
        let response = h.touch(&mut card, PointerPhase::Up, 100.0, 900.0);

        assert!(response.intent.is_none());
        assert!(h.listener.intents().is_empty());

        let visual = card.visual(&h.drag);
        assert!(visual.edit_mode);
        assert!(!visual.dragging);
        assert!(!visual.drop_target);
        assert_eq!(visual.opacity(), 1.0);
    }

    #[test]
    fn test_drop_on_empty_list_space_appends() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        let response = h.touch(&mut card, PointerPhase::Up, 300.0, 550.0);

        let intent = response.intent.unwrap();
        assert_eq!(intent.destination_list_id, ListId::from("listB"));
        assert_eq!(intent.destination_index, None);
    }

    #[test]
    fn test_cancel_emits_nothing_and_resets_indicators() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        let neighbour = h.card("listA", 2);
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        h.touch(&mut card, PointerPhase::Move, 50.0, 250.0);
        assert!(neighbour.visual(&h.drag).drop_target);

        let response = h.touch(&mut card, PointerPhase::Cancel, 50.0, 250.0);
        assert_eq!(response.gesture, Gesture::DragCancel);
        assert!(response.intent.is_none());
        assert!(h.listener.intents().is_empty());

        assert!(!neighbour.visual(&h.drag).drop_target);
        assert!(!card.visual(&h.drag).dragging);
        assert!(card.is_edit_mode());
        assert_eq!(
            h.listener.events.last(),
            Some(&Recorded::Leave(DropTarget::new(ListId::from("listA"), Some(2))))
        );
    }

    #[test]
    fn test_hover_enter_and_leave_sequence() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        h.touch(&mut card, PointerPhase::Move, 50.0, 150.0);
        h.touch(&mut card, PointerPhase::Move, 60.0, 160.0);
        h.touch(&mut card, PointerPhase::Move, 250.0, 50.0);

        // The second move stays over the same card and changes nothing
        let a1 = DropTarget::new(ListId::from("listA"), Some(1));
        let b0 = DropTarget::new(ListId::from("listB"), Some(0));
        assert_eq!(
            h.listener.events,
            vec![
                Recorded::DragStart(card.task().id),
                Recorded::Enter(a1.clone()),
                Recorded::Leave(a1),
                Recorded::Enter(b0),
            ]
        );
    }

    #[test]
    fn test_repeated_drops_stay_in_edit_mode() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);

        for _ in 0..3 {
            h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
            h.touch(&mut card, PointerPhase::Move, 50.0, 250.0);
            let response = h.touch(&mut card, PointerPhase::Up, 50.0, 250.0);
            assert!(response.intent.is_some());
            assert!(card.is_edit_mode());
        }
        assert_eq!(h.listener.intents().len(), 3);
        assert!(!h.listener.events.contains(&Recorded::EditMode(false)));
    }

    #[test]
    fn test_explicit_exit_leaves_edit_mode() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);

        assert!(card.exit_edit_mode(&mut h.ctx()));
        assert!(!card.is_edit_mode());
        assert_eq!(h.listener.events, vec![Recorded::EditMode(false)]);
        assert!(!card.exit_edit_mode(&mut h.ctx()));

        // The next press is a long-press candidate again, not a drag
        let response = h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        assert_eq!(response.gesture, Gesture::LongPressArmed);
        assert!(!h.drag.is_active());
    }

    #[test]
    fn test_mouse_drop_on_native_target() {
        let mut h = Harness::new();
        let mut card = h.card("listB", 1);
        h.enter_edit_mode(&mut card);

        h.send(&mut card, PointerPhase::Down, InputSource::Mouse, 250.0, 150.0);
        let target = h.card_nodes[0];
        let event = PointerEvent::mouse(PointerPhase::Up, 0.0, 0.0).with_target(target);
        let response = card.handle(&event, &mut h.ctx());

        let intent = response.intent.unwrap();
        assert_eq!(intent.destination_list_id, ListId::from("listA"));
        assert_eq!(intent.destination_index, Some(0));
        assert!(matches!(h.listener.events.last(), Some(Recorded::Drop(_))));
    }

    #[test]
    fn test_second_card_cannot_start_while_one_is_carried() {
        let mut h = Harness::new();
        let mut first = h.card("listA", 0);
        let mut second = h.card("listA", 1);
        h.enter_edit_mode(&mut first);
        h.enter_edit_mode(&mut second);

        h.touch(&mut first, PointerPhase::Down, 50.0, 50.0);
        let response = h.touch(&mut second, PointerPhase::Down, 50.0, 150.0);

        assert_eq!(response.gesture, Gesture::None);
        assert!(!second.recognizer().is_dragging());
        assert!(second.is_edit_mode());
        assert!(h.drag.is_carrying(&first.task().id));

        // The refused card's release must not end the other card's session
        let release = h.touch(&mut second, PointerPhase::Up, 250.0, 50.0);
        assert!(release.intent.is_none());
        assert!(h.drag.is_carrying(&first.task().id));
    }

    #[test]
    fn test_intent_commits_through_board() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        let intent = h.touch(&mut card, PointerPhase::Up, 250.0, 130.0).intent.unwrap();

        let outcome = h.board.apply(&intent).unwrap();
        assert!(matches!(outcome, MoveOutcome::Moved { .. }));
        let (task, placement) = h.board.find_task(&intent.task.id).unwrap();
        assert_eq!(task.list_id, ListId::from("listB"));
        assert_eq!(placement.index, 1);

        card.update(Arc::new(task.clone()), placement.index);
        assert!(card.is_edit_mode());
        assert_eq!(card.index(), 1);
    }

    #[test]
    fn test_update_mid_drag_keeps_drag_start_snapshot() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        let original = card.task().clone();
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        h.touch(&mut card, PointerPhase::Move, 250.0, 130.0);

        // The owner re-renders while the card is in flight
        let mut renamed = original.clone();
        renamed.title = "Renamed mid-drag".to_string();
        renamed.order = 7;
        card.update(Arc::new(renamed), 2);

        assert!(h.drag.is_carrying(&card.task().id));
        let visual = card.visual(&h.drag);
        assert!(visual.dragging);
        assert!(visual.edit_mode);
        let session = h.drag.active().unwrap();
        assert_eq!(session.task.title, original.title);
        assert_eq!(session.source_index, 0);

        let intent = h.touch(&mut card, PointerPhase::Up, 250.0, 130.0).intent.unwrap();
        assert_eq!(intent.task.id, original.id);
        assert_eq!(intent.task.title, original.title);
        assert_eq!(intent.task.order, original.order);
        assert_eq!(intent.destination_list_id, ListId::from("listB"));
        assert_eq!(intent.destination_index, Some(1));

        assert!(!h.drag.is_carrying(&card.task().id));
        let visual = card.visual(&h.drag);
        assert!(!visual.dragging);
        assert!(!visual.drop_target);
        assert!(visual.edit_mode);
        assert_eq!(card.task().title, "Renamed mid-drag");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let h = Harness::new();
        let task = h.board.list(&ListId::from("listA")).unwrap().tasks()[0].clone();
        let config = GestureConfig {
            move_tolerance: Some(f64::NAN),
            ..GestureConfig::default()
        };
        let err = TaskCard::new(Arc::new(task), 0, &config).unwrap_err();
        assert!(matches!(err, TaskdeckError::ConfigError(_)));
    }

    #[test]
    fn test_drop_onto_own_slot_is_emitted() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 1);
        h.enter_edit_mode(&mut card);

        h.touch(&mut card, PointerPhase::Down, 50.0, 150.0);
        let intent = h.touch(&mut card, PointerPhase::Up, 50.0, 150.0).intent.unwrap();
        assert_eq!(intent.destination_index, Some(1));
        assert_eq!(h.board.apply(&intent).unwrap(), MoveOutcome::Unchanged);
    }

    #[test]
    fn test_pass_through_actions() {
        let mut h = Harness::new();
        let card = h.card("listA", 0);
        let id = card.task().id;

        card.edit(&mut h.listener);
        card.toggle_complete(&mut h.listener);
        card.delete(&mut h.listener);

        assert_eq!(
            h.listener.events,
            vec![Recorded::Edit(id), Recorded::Toggle(id), Recorded::Delete(id)]
        );
    }

    #[test]
    fn test_unmount_clears_pending_timer() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);
        assert_eq!(h.timers.pending(), 1);

        card.unmount(&mut h.ctx());
        assert_eq!(h.timers.pending(), 0);
    }

    #[test]
    fn test_unmount_mid_drag_releases_session() {
        let mut h = Harness::new();
        let mut card = h.card("listA", 0);
        h.enter_edit_mode(&mut card);
        h.touch(&mut card, PointerPhase::Down, 50.0, 50.0);

        card.unmount(&mut h.ctx());
        assert!(!h.drag.is_active());
        assert!(h.listener.intents().is_empty());
    }
}
