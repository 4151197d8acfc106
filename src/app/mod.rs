// (C) 2025 - Enzo Lombardi

//! Application facade: wires the display, the input decoder and the panel
//! manager into one event loop.
//!
//! # Architecture
//!
//! ```text
//! Ui
//! ├── Display (double-buffered rendering)
//! ├── Input (poll + byte queue + decoder)
//! └── PanelManager (panels, hover, focus)
//! ```
//!
//! Each loop turn renders a frame, then blocks in the readiness wait for
//! up to the escape-disambiguation timeout. Decoded events route into the
//! panel manager; `Ctrl+D` requests exit. `SIGWINCH` recalculates every
//! panel against the new bounds before the next frame is emitted in full.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paneled::app::Ui;
//! use paneled::layout::{Alignment, PanelLayout, SizeMethod};
//! use paneled::ui::{Padding, InteriorLayout, Panel, PanelOpts, TextInputInterior};
//! use paneled::core::geometry::Position;
//!
//! fn main() -> std::process::ExitCode {
//!     let mut ui = Ui::new().expect("terminal init");
//!     let layout = PanelLayout {
//!         align: Alignment::TOP,
//!         size_method: SizeMethod::Fixed,
//!         size: Position::new(0, 3),
//!     };
//!     let input = TextInputInterior::new(InteriorLayout::whole(Padding::BORDER));
//!     ui.add_panel(Panel::new(PanelOpts::new("query", layout), Box::new(input)));
//!     std::process::ExitCode::from(ui.run() as u8)
//! }
//! ```

use crate::core::error::{PaneledError, Result};
use crate::core::geometry::{Area, Position};
use crate::display::Display;
use crate::input::{
    EventHooks, Input, KeyCode, KeystrokeEvent, Modifiers, MouseEvent,
};
use crate::terminal::Backend;
#[cfg(unix)]
use crate::terminal::TtyBackend;
use crate::ui::{Panel, PanelManager};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

/// The facade owning the three subsystems.
pub struct Ui {
    display: Display,
    input: Input,
    panels: Rc<RefCell<PanelManager>>,
}

impl Ui {
    /// Build against the controlling terminal.
    #[cfg(unix)]
    pub fn new() -> Result<Self> {
        Self::with_backend(Box::new(TtyBackend::new()))
    }

    /// Build against any backend (an in-memory one for headless use).
    pub fn with_backend(backend: Box<dyn Backend>) -> Result<Self> {
        let mut display = Display::new(backend)?;
        let panels = Rc::new(RefCell::new(PanelManager::new()));

        let hook_panels = Rc::clone(&panels);
        display.set_resize_handler(Box::new(move |size: Position| {
            hook_panels.borrow_mut().recalculate(bounds_for(size));
        }))?;

        Ok(Self {
            display,
            input: Input::new(),
            panels,
        })
    }

    pub fn add_panel(&mut self, panel: Panel) -> usize {
        self.panels.borrow_mut().add_panel(panel)
    }

    /// Shared handle to the panel manager, e.g. for focus control.
    pub fn panels(&self) -> Rc<RefCell<PanelManager>> {
        Rc::clone(&self.panels)
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    /// Lay every panel out against the current display bounds.
    pub fn recalculate(&mut self) {
        let bounds = self.display.bounds();
        self.panels.borrow_mut().recalculate(bounds);
    }

    /// Draw one frame: clear, panels, differential emit.
    pub fn render(&mut self) -> Result<()> {
        self.display.clear();
        self.panels.borrow_mut().render(&mut self.display);
        self.display.render()
    }

    /// Run until the user requests exit or the input path fails.
    ///
    /// # Errors
    ///
    /// Ends with the exit-requested kind on `Ctrl+D`, the queue-full kind
    /// on fatal input overflow, or the read kind when an OS read fails.
    pub fn event_loop(&mut self) -> Result<()> {
        self.recalculate();
        info!("entering event loop");

        let result = loop {
            if let Err(e) = self.render() {
                break Err(e);
            }
            let mut hooks = UiHooks {
                panels: &self.panels,
                exit_requested: false,
            };
            if let Err(e) = self.input.handle_events(&mut hooks) {
                break Err(e);
            }
            if hooks.exit_requested {
                break Err(PaneledError::exit_requested());
            }
        };

        let _ = self.display.erase();
        result
    }

    /// [`event_loop`](Self::event_loop) mapped onto the integer exit
    /// convention: `0` for a clean exit, the OS error code for failed
    /// reads, the queue-full code for fatal overflow.
    pub fn run(&mut self) -> i32 {
        match self.event_loop() {
            Ok(()) => 0,
            Err(e) if e.is_exit_requested() => {
                info!("exit requested");
                0
            }
            Err(e) => {
                log::error!("event loop failed: {e}");
                e.exit_status()
            }
        }
    }
}

fn bounds_for(size: Position) -> Area {
    if size.x == 0 || size.y == 0 {
        Area::INVALID
    } else {
        Area::from_coords(0, 0, size.x - 1, size.y - 1)
    }
}

/// Bridges decoder events onto the panel manager. Mouse positions arrive
/// zero-based from the decoder and pass through unchanged.
struct UiHooks<'a> {
    panels: &'a RefCell<PanelManager>,
    exit_requested: bool,
}

impl EventHooks for UiHooks<'_> {
    fn on_hover(&mut self, hover: &MouseEvent) {
        self.panels.borrow_mut().hover(hover.position);
    }

    fn on_press(&mut self, press: &MouseEvent) {
        self.panels.borrow_mut().press(press.position, press.button);
    }

    fn on_release(&mut self, release: &MouseEvent) {
        self.panels
            .borrow_mut()
            .release(release.position, release.button);
    }

    fn on_scroll(&mut self, scroll: &MouseEvent) {
        self.panels
            .borrow_mut()
            .scroll(scroll.position, scroll.button);
    }

    fn on_keystroke(&mut self, keystroke: &KeystrokeEvent) {
        // Ctrl+D leaves the loop.
        if keystroke.code == KeyCode::KeyD && keystroke.modifier.contains(Modifiers::CTRL) {
            debug!("exit keystroke");
            self.exit_requested = true;
            return;
        }
        // Tab cycles panel focus.
        if keystroke.code == KeyCode::Tab && keystroke.modifier.is_empty() {
            self.panels.borrow_mut().focus_next_panel();
            return;
        }
        self.panels.borrow_mut().keystroke(keystroke);
    }
}
