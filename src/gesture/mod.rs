pub mod event;
pub mod recognizer;
pub mod timer;

pub use event::{InputSource, Point, PointerEvent, PointerPhase};
pub use recognizer::{ArmedDrag, Gesture, GestureRecognizer, GestureState, PendingPress, Recognition};
#[cfg(feature = "tokio-timers")]
pub use timer::TokioTimers;
pub use timer::{ManualTimers, TimerId, TimerScheduler};
