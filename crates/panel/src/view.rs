//! egui rendering of the stance panel
//!
//! Drawing never touches the stance directly. Widgets edit local copies of
//! the [`PanelView`] values and report what changed as [`PanelAction`]s.

use stancecore::MULTIPLIER_RANGE;

use crate::controller::{PanelAction, PanelView, WheelScope};

const PRESET_LIST_HEIGHT: f32 = 160.0;

/// Widget id of the preset name field
pub const PRESET_NAME_ID: &str = "stance_preset_name";

/// Draw the panel window and collect this frame's actions
pub fn draw_panel(ctx: &egui::Context, view: &PanelView) -> Vec<PanelAction> {
    let mut actions = Vec::new();
    let mut open = true;

    egui::Window::new("Wheel Stance")
        .open(&mut open)
        .resizable(false)
        .default_width(360.0)
        .show(ctx, |ui| draw_contents(ui, view, &mut actions));

    if !open {
        actions.push(PanelAction::Close);
    }
    actions
}

fn draw_contents(ui: &mut egui::Ui, view: &PanelView, actions: &mut Vec<PanelAction>) {
    let mut scope = view.scope;
    egui::ComboBox::from_label("Wheel")
        .selected_text(scope.label())
        .show_ui(ui, |ui| {
            for option in WheelScope::ALL {
                ui.selectable_value(&mut scope, option, option.label());
            }
        });
    if scope != view.scope {
        actions.push(PanelAction::SelectScope(scope));
    }

    ui.separator();

    for (field, value) in view.fields {
        let (min, max) = field.ui_range();
        let mut edited = value;
        ui.horizontal(|ui| {
            let slider = egui::Slider::new(&mut edited, min..=max)
                .text(field.label())
                .suffix(format!(" {}", field.unit()));
            if ui.add(slider).changed() {
                actions.push(PanelAction::SetField(field, edited));
            }
            if ui.small_button("Reset").clicked() {
                actions.push(PanelAction::ResetField(field));
            }
        });
    }

    let mut multiplier = view.multiplier;
    let (min, max) = MULTIPLIER_RANGE;
    if ui
        .add(egui::Slider::new(&mut multiplier, min..=max).text("Global Multiplier").suffix("×"))
        .changed()
    {
        actions.push(PanelAction::SetMultiplier(multiplier));
    }

    ui.separator();
    ui.heading("Presets");

    ui.horizontal(|ui| {
        let mut name = view.preset_name.clone();
        let name_edit = egui::TextEdit::singleline(&mut name)
            .id(egui::Id::new(PRESET_NAME_ID))
            .hint_text("Preset name");
        let response = ui.add(name_edit);
        if response.changed() {
            actions.push(PanelAction::EditPresetName(name));
        }
        if ui.button("Save").clicked() {
            actions.push(PanelAction::SavePreset);
        }
    });

    egui::ScrollArea::vertical()
        .max_height(PRESET_LIST_HEIGHT)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            if view.presets.is_empty() {
                ui.weak("No presets saved");
            }
            for entry in &view.presets {
                ui.horizontal(|ui| {
                    ui.label(format!("{}. {}", entry.index, entry.name));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Delete").clicked() {
                            actions.push(PanelAction::DeletePreset(entry.index));
                        }
                        if ui.small_button("Load").clicked() {
                            actions.push(PanelAction::LoadPreset(entry.index));
                        }
                    });
                });
            }
        });

    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Reset All").clicked() {
            actions.push(PanelAction::ResetAll);
        }
        if ui.button("Apply").clicked() {
            actions.push(PanelAction::Apply);
        }
        if ui.button("Close").clicked() {
            actions.push(PanelAction::Close);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PresetEntry;
    use stancecore::StanceField;

    fn sample_view() -> PanelView {
        PanelView {
            scope: WheelScope::All,
            fields: StanceField::ALL.map(|field| (field, 0.0)),
            multiplier: 1.0,
            preset_name: String::new(),
            presets: vec![PresetEntry { index: 1, name: "Street".to_string(), timestamp: 0 }],
        }
    }

    #[test]
    fn test_idle_frame_produces_no_actions() {
        let ctx = egui::Context::default();
        let view = sample_view();
        let mut actions = Vec::new();

        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                actions = draw_panel(ctx, &view);
            });
            assert!(actions.is_empty(), "unexpected actions: {actions:?}");
        }
    }

    #[test]
    fn test_typing_in_name_field_edits_preset_name() {
        let ctx = egui::Context::default();
        let view = sample_view();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                draw_panel(ctx, &view);
            });
        }

        ctx.memory_mut(|memory| memory.request_focus(egui::Id::new(PRESET_NAME_ID)));
        let input = egui::RawInput { events: vec![egui::Event::Text("Drift".to_string())], ..Default::default() };
        let mut actions = Vec::new();
        let _ = ctx.run(input, |ctx| {
            actions = draw_panel(ctx, &view);
        });

        assert_eq!(actions, vec![PanelAction::EditPresetName("Drift".to_string())]);
    }
}
