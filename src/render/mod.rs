pub mod scroll;
pub mod text;

pub use scroll::{ScrollCommand, ScrollDriver, ViewportLayout};
pub use text::{format_timestamp, render_window};
