pub mod session;

pub use session::{CardVisual, DragCoordinator, DragSession, HoverChange};
