//! Modulator selector popup.

use crate::Theme;
use egui::{Ui, vec2};
use vibrato_core::ModType;

/// Buttons per selector row.
const COLUMNS: usize = 4;

/// Grid of one button per selectable modulator.
///
/// Created when the slot's selector button is pressed and dropped as soon as
/// a modulator is chosen, the button is pressed again or another panel asks
/// popups to close.
#[derive(Debug, Default)]
pub struct Selector;

impl Selector {
    /// Fresh selector.
    pub fn new() -> Self {
        Self
    }

    /// Render the grid. Returns the modulator clicked this frame, if any.
    pub fn ui(&self, ui: &mut Ui, theme: &Theme) -> Option<ModType> {
        let mut picked = None;
        egui::Frame::new()
            .fill(theme.darken)
            .corner_radius(theme.thickness)
            .inner_margin(theme.thickness * 2.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.id().with("mod_selector"))
                    .spacing(vec2(theme.thickness, theme.thickness))
                    .show(ui, |ui| {
                        for (i, t) in ModType::ALL.into_iter().enumerate() {
                            let button = egui::Button::new(t.button_label()).min_size(vec2(56.0, 36.0));
                            if ui.add(button).on_hover_text(t.description()).clicked() {
                                picked = Some(t);
                            }
                            if (i + 1) % COLUMNS == 0 {
                                ui.end_row();
                            }
                        }
                    });
            });
        picked
    }
}
