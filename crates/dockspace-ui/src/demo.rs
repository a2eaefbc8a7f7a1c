//! The demo windows drawn over the dockspace.

use dear_imgui_rs::{Condition, Ui};

use dockspace_core::ansi::{self, Rgba};
use dockspace_core::Options;

use crate::dock_ui::{DockspaceId, FrameAction, FrameContent};

/// Font Awesome "search" glyph, from the merged icon font.
pub const ICON_SEARCH: &str = "\u{f002}";

const EGG_GREEN: Rgba = [0.2, 1.0, 0.0, 1.0];

/// Menu bar, a closable custom window, the metrics window, the icon font
/// window and the toolkit's demo window.
#[derive(Debug, Clone)]
pub struct DemoWindows {
    show_custom_window: bool,
    show_metrics_window: bool,
    show_demo_window: bool,
}

impl DemoWindows {
    pub fn new(options: &Options) -> Self {
        Self {
            show_custom_window: options.show_custom_window,
            show_metrics_window: options.show_metrics_window,
            show_demo_window: options.show_demo_window,
        }
    }

    pub fn custom_window_open(&self) -> bool {
        self.show_custom_window
    }

    fn main_menu(ui: &Ui) -> FrameAction {
        let mut action = FrameAction::Continue;
        if let Some(_bar) = ui.begin_main_menu_bar() {
            if let Some(_menu) = ui.begin_menu("File") {
                if ui.menu_item_with_shortcut("Quit", "Cmd+Q") {
                    log::info!("quit selected from the menu");
                    action = FrameAction::Quit;
                }
            }
        }
        action
    }

    fn custom_window(&mut self, ui: &Ui) {
        if !self.show_custom_window {
            return;
        }
        ui.window("Custom window")
            .opened(&mut self.show_custom_window)
            .build(|| {
                ui.text("Bar");
                text_ansi(ui, "B\x1b[31marA\x1b[mnsi ", None);
                text_ansi(ui, "Eg\x1b[31mgAn\x1b[msi ", Some(EGG_GREEN));
                text_ansi(ui, "Eggs", Some(EGG_GREEN));
            });
    }

    fn font_window(ui: &Ui, dockspace: DockspaceId) {
        // Docks into the host the first time it appears; the user may move it after.
        ui.set_next_window_dock_id_with_cond(dockspace.into(), Condition::FirstUseEver);
        ui.window("font").build(|| {
            ui.text(ICON_SEARCH);
        });
    }
}

impl FrameContent<Ui> for DemoWindows {
    fn build(&mut self, ui: &Ui, dockspace: DockspaceId) -> FrameAction {
        let action = Self::main_menu(ui);
        self.custom_window(ui);
        if self.show_metrics_window {
            ui.show_metrics_window(&mut self.show_metrics_window);
        }
        Self::font_window(ui, dockspace);
        if self.show_demo_window {
            ui.show_demo_window(&mut self.show_demo_window);
        }
        action
    }
}

/// Text runs of `text` with SGR colors resolved against `base`.
pub fn colored_runs(text: &str, base: Option<Rgba>) -> Vec<(String, Option<Rgba>)> {
    ansi::parse(text)
        .into_iter()
        .map(|segment| (segment.text, segment.color.or(base)))
        .collect()
}

/// Draws ANSI-colored text on one line. Unsupported escape sequences are dropped.
pub fn text_ansi(ui: &Ui, text: &str, base: Option<Rgba>) {
    for (i, (run, color)) in colored_runs(text, base).into_iter().enumerate() {
        if i > 0 {
            ui.same_line_with_spacing(0.0, 0.0);
        }
        match color {
            Some(color) => ui.text_colored(color, run),
            None => ui.text(run),
        }
    }
}
