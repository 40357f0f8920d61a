mod controls;
mod counter;
mod popup;
mod status_bar;

pub use controls::ControlsWidget;
pub use counter::{CounterPanel, CounterWidget};
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
