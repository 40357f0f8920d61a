pub mod app;
pub mod canvas;
pub mod event;
pub mod font;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use font::{DigitStyle, FontMeasurer};
pub use theme::{load_theme, Theme};
pub use widgets::CounterWidget;
