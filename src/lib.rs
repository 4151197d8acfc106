// (C) 2025 - Enzo Lombardi
// Paneled - panel-composition TUI framework
// Core modules
pub mod app;
pub mod core;
pub mod display;
pub mod input;
pub mod layout;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub mod prelude {
    pub use crate::app::Ui;
    pub use crate::core::error::{PaneledError, Result};
    pub use crate::core::geometry::{Area, Position, Span};
    pub use crate::core::style::{BorderSet, Style};
    pub use crate::display::{Cell, Display};
    pub use crate::input::{
        EventHooks, KeyCode, KeystrokeEvent, Modifiers, MouseButton, MouseEvent, MouseMotion,
    };
    pub use crate::layout::{Alignment, PanelLayout, SizeMethod};
    pub use crate::ui::{
        AreaDef, ButtonInterior, CompositeInterior, DataSource, Interior, InteriorLayout,
        Padding, Panel, PanelManager, PanelOpts, TextInputInterior, TrackDef, ViewInterior,
    };
}
