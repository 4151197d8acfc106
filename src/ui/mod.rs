// (C) 2025 - Enzo Lombardi
// Panel composition: interiors, panels, and the panel manager.
pub mod button;
pub mod composite;
pub mod interior;
pub mod interior_layout;
pub mod panel;
pub mod panel_manager;
pub mod text_input;
pub mod view;

pub use button::{ActionTrigger, ButtonAction, ButtonInterior, ButtonStyles};
pub use composite::CompositeInterior;
pub use interior::{Interior, InteriorBase};
pub use interior_layout::{AreaDef, InteriorArea, InteriorLayout, Padding, TrackDef};
pub use panel::{Panel, PanelOpts};
pub use panel_manager::PanelManager;
pub use text_input::{TextInputChrome, TextInputInterior, TextInputState};
pub use view::{DataSource, ViewInterior};
