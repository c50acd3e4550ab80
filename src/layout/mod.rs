//! Layout system for dashboard widget arrangement.

mod engine;

pub use engine::{DropTarget, LayoutEngine, WidgetSlot};
