// (C) 2025 - Enzo Lombardi
// Showcase - a three-panel layout driving every interior kind.
//
// Run inside a real terminal. Ctrl+D exits, Tab moves focus, the mouse
// hovers/clicks/scrolls. Log output lands in showcase.log.

use paneled::prelude::*;
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

fn log_panel() -> Panel {
    let lines: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(
        (1..=40).map(|n| format!("log entry {n}")).collect(),
    ));

    let mut grid = InteriorLayout::new(
        &[TrackDef::relative(100, 1)],
        &[TrackDef::fixed(1, 8)],
        Padding::BORDER,
    );
    for row in 0..8 {
        grid.add_area(AreaDef::cell(0, row));
    }

    let amount_lines = Rc::clone(&lines);
    let render_lines = Rc::clone(&lines);
    let source = DataSource::new(
        move || amount_lines.borrow().len(),
        move |display, area, limit, index, hovered| {
            if index >= limit {
                return;
            }
            let style = if hovered {
                Style::new("\x1b[7m")
            } else {
                Style::new("\x1b[2m")
            };
            let text = render_lines.borrow()[index].clone();
            display.draw_string_aligned(
                &text,
                *area,
                &style,
                Alignment::LEFT | Alignment::V_CENTER,
            );
        },
    );

    let layout = PanelLayout {
        align: Alignment::TOP,
        size_method: SizeMethod::Relative,
        size: Position::new(0, 60),
    };
    Panel::new(
        PanelOpts::new("log", layout).style(Style::new("\x1b[36m")),
        Box::new(ViewInterior::new(grid, source)),
    )
}

fn actions_panel() -> Panel {
    use paneled::ui::{ActionTrigger, ButtonAction, ButtonStyles};

    let button = ButtonInterior::new(InteriorLayout::whole(Padding::BORDER), "[ beep ]")
        .with_styles(ButtonStyles {
            normal: Style::new("\x1b[37m"),
            hovered: Style::new("\x1b[1;37m"),
            pressed: Style::new("\x1b[7m"),
        })
        .with_action(ButtonAction::new(ActionTrigger::OnRelease, || {
            log::info!("beep");
        }));

    let layout = PanelLayout {
        align: Alignment::LEFT,
        size_method: SizeMethod::Relative,
        size: Position::new(30, 0),
    };
    Panel::new(
        PanelOpts::new("actions", layout).border(BorderSet::DOUBLE),
        Box::new(button),
    )
}

fn query_panel() -> Panel {
    let input = TextInputInterior::new(InteriorLayout::whole(Padding::NONE))
        .with_submit(|text| log::info!("submitted: {}", String::from_utf8_lossy(text)));

    let layout = PanelLayout {
        align: Alignment::BOTTOM,
        size_method: SizeMethod::Fixed,
        size: Position::new(0, 0),
    };
    Panel::new(PanelOpts::new("query", layout), Box::new(input))
}

fn main() -> ExitCode {
    if let Ok(file) = std::fs::File::create("showcase.log") {
        let _ = simplelog::WriteLogger::init(
            simplelog::LevelFilter::Debug,
            simplelog::Config::default(),
            file,
        );
    }

    let mut ui = match Ui::new() {
        Ok(ui) => ui,
        Err(e) => {
            eprintln!("terminal init failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    ui.add_panel(log_panel());
    ui.add_panel(actions_panel());
    ui.add_panel(query_panel());
    ui.panels().borrow_mut().set_focused(2);

    ExitCode::from(ui.run().clamp(0, 255) as u8)
}
