// Widget implementations for the screen zones and overlays.

pub mod form;
pub mod popup;
pub mod roster;
pub mod status_bar;
