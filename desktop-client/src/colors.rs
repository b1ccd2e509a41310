use common::games::snake::CellKind;
use eframe::egui;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x1e, 0x24);

pub fn cell_color(kind: CellKind) -> egui::Color32 {
    match kind {
        CellKind::Empty => egui::Color32::from_rgb(0x2c, 0x2f, 0x38),
        CellKind::Snake => egui::Color32::from_rgb(0x3c, 0xb3, 0x71),
        CellKind::Food => egui::Color32::from_rgb(0xe0, 0x3c, 0x31),
        CellKind::ReversalFood => egui::Color32::from_rgb(0x9b, 0x59, 0xd0),
    }
}
