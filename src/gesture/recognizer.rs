use crate::config::GestureConfig;
use crate::error::Result;
use crate::gesture::event::{InputSource, Point, PointerEvent, PointerPhase};
use crate::gesture::timer::{TimerId, TimerScheduler};
use chrono::{DateTime, Utc};
use tracing::trace;

/// A press that may still turn into a long-press
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPress {
    pub timer: TimerId,
    pub origin: Point,
    pub source: InputSource,
    pub pressed_at: DateTime<Utc>,
}

/// A press in edit mode that is carrying the card
#[derive(Debug, Clone, PartialEq)]
pub struct ArmedDrag {
    pub origin: Point,
    pub last: Point,
    pub source: InputSource,
    pub armed_at: DateTime<Utc>,
}

/// Per-card gesture state.
///
/// ```text
/// Idle --press--> PendingLongPress --timer--> EditMode --press--> Dragging
///  ^                 |  move / release           ^                  |
///  +-----------------+                           +--release/cancel--+
/// EditMode --exit_edit_mode--> Idle
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    PendingLongPress(PendingPress),
    EditMode,
    Dragging(ArmedDrag),
}

/// What a single input event meant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    None,
    /// Released before the long-press fired; left to the controls under the press
    Tap,
    /// Moved before the long-press fired; the host keeps scrolling
    Scroll,
    LongPressArmed,
    EnteredEditMode,
    ExitedEditMode,
    DragStart,
    DragMove(Point),
    DragEnd(Point),
    DragCancel,
}

/// Outcome of feeding one event to the recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recognition {
    pub gesture: Gesture,
    /// The host must suppress its default handling (scrolling) for this event
    pub prevent_default: bool,
}

impl Recognition {
    fn passive(gesture: Gesture) -> Self {
        Self {
            gesture,
            prevent_default: false,
        }
    }
}

/// Disambiguates tap, long-press and drag from one card's input stream
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    state: GestureState,
}

impl GestureRecognizer {
    /// Rejects configurations that would stop movement from cancelling a long-press
    pub fn new(config: GestureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: GestureState::Idle,
        })
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Edit mode persists while a drag is in flight
    pub fn is_edit_mode(&self) -> bool {
        matches!(self.state, GestureState::EditMode | GestureState::Dragging(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        match &self.state {
            GestureState::PendingLongPress(press) => Some(press.timer),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: &PointerEvent, timers: &mut dyn TimerScheduler) -> Recognition {
        let recognition = match event.phase {
            PointerPhase::Down => self.on_press(event, timers),
            PointerPhase::Move => self.on_move(event, timers),
            PointerPhase::Up => self.on_release(event, timers),
            PointerPhase::Cancel => self.on_cancel(timers),
        };
        trace!(
            phase = ?event.phase,
            source = ?event.source,
            gesture = ?recognition.gesture,
            prevent_default = recognition.prevent_default,
            "Recognized pointer event"
        );
        recognition
    }

    /// Handles a fired timer. Ids other than the pending long-press are stale and ignored.
    pub fn on_timer(&mut self, id: TimerId, timers: &mut dyn TimerScheduler) -> Gesture {
        let pressed_at = match &self.state {
            GestureState::PendingLongPress(press) if press.timer == id => press.pressed_at,
            _ => {
                trace!(timer = id.as_raw(), "Ignoring stale timer");
                return Gesture::None;
            }
        };
        timers.cancel(id);
        self.state = GestureState::EditMode;
        let held_for = Utc::now() - pressed_at;
        trace!(held_ms = held_for.num_milliseconds(), "Long-press threshold reached");
        Gesture::EnteredEditMode
    }

    /// Leaves edit mode. Only honoured from the resting edit-mode state.
    pub fn exit_edit_mode(&mut self) -> Gesture {
        match self.state {
            GestureState::EditMode => {
                self.state = GestureState::Idle;
                Gesture::ExitedEditMode
            }
            _ => Gesture::None,
        }
    }

    /// Drops an armed drag back to edit mode without a release
    pub fn abort_drag(&mut self) {
        if self.is_dragging() {
            self.state = GestureState::EditMode;
        }
    }

    /// Clears any pending long-press timer, for card removal
    pub fn teardown(&mut self, timers: &mut dyn TimerScheduler) {
        self.clear_pending(timers);
    }

    fn on_press(&mut self, event: &PointerEvent, timers: &mut dyn TimerScheduler) -> Recognition {
        match self.state {
            GestureState::Idle | GestureState::PendingLongPress(_) => {
                // Never stack timers: a lingering press is discarded first
                self.clear_pending(timers);
                let timer = timers.schedule(self.config.long_press());
                self.state = GestureState::PendingLongPress(PendingPress {
                    timer,
                    origin: event.position,
                    source: event.source,
                    pressed_at: Utc::now(),
                });
                Recognition::passive(Gesture::LongPressArmed)
            }
            GestureState::EditMode => {
                self.state = GestureState::Dragging(ArmedDrag {
                    origin: event.position,
                    last: event.position,
                    source: event.source,
                    armed_at: Utc::now(),
                });
                self.dragging(Gesture::DragStart)
            }
            GestureState::Dragging(_) => self.dragging(Gesture::None),
        }
    }

    fn on_move(&mut self, event: &PointerEvent, timers: &mut dyn TimerScheduler) -> Recognition {
        match &mut self.state {
            GestureState::PendingLongPress(press) => {
                let moved_beyond = match self.config.move_tolerance {
                    None => true,
                    Some(tolerance) => press.origin.distance_to(event.position) > tolerance,
                };
                if moved_beyond {
                    self.clear_pending(timers);
                    Recognition::passive(Gesture::Scroll)
                } else {
                    Recognition::passive(Gesture::None)
                }
            }
            GestureState::Dragging(drag) => {
                drag.last = event.position;
                self.dragging(Gesture::DragMove(event.position))
            }
            GestureState::Idle | GestureState::EditMode => Recognition::passive(Gesture::None),
        }
    }

    fn on_release(&mut self, event: &PointerEvent, timers: &mut dyn TimerScheduler) -> Recognition {
        match self.state {
            GestureState::PendingLongPress(_) => {
                self.clear_pending(timers);
                Recognition::passive(Gesture::Tap)
            }
            GestureState::Dragging(_) => {
                self.state = GestureState::EditMode;
                self.dragging(Gesture::DragEnd(event.position))
            }
            GestureState::Idle | GestureState::EditMode => Recognition::passive(Gesture::None),
        }
    }

    fn on_cancel(&mut self, timers: &mut dyn TimerScheduler) -> Recognition {
        match self.state {
            GestureState::PendingLongPress(_) => {
                self.clear_pending(timers);
                Recognition::passive(Gesture::None)
            }
            GestureState::Dragging(_) => {
                self.state = GestureState::EditMode;
                self.dragging(Gesture::DragCancel)
            }
            GestureState::Idle | GestureState::EditMode => Recognition::passive(Gesture::None),
        }
    }

    fn dragging(&self, gesture: Gesture) -> Recognition {
        Recognition {
            gesture,
            prevent_default: self.config.suppress_scroll_while_dragging,
        }
    }

    fn clear_pending(&mut self, timers: &mut dyn TimerScheduler) {
        if let GestureState::PendingLongPress(press) = &self.state {
            timers.cancel(press.timer);
            self.state = GestureState::Idle;
        }
    }
}
