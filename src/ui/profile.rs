use crate::theme::Theme;
use crate::ui::intent::Intent;
use eframe::egui::{self, RichText, TextStyle};

fn field(ui: &mut egui::Ui, theme: &Theme, label: &str, value: &str) {
    ui.label(RichText::new(label).color(theme.text_muted).size(13.0));
    theme.panel_frame(theme.surface_2, theme.spacing_12 as i8).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.add(egui::Label::new(RichText::new(value).size(17.0)).truncate());
    });
    ui.add_space(theme.spacing_16);
}

pub fn render(ui: &mut egui::Ui, theme: &Theme, user_email: &str, intents: &mut Vec<Intent>) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(420.0);
        ui.add_space(theme.spacing_24 * 1.5);
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            ui.label(RichText::new("Meu Perfil").text_style(TextStyle::Heading).strong());
            ui.add_space(theme.spacing_24);
            field(ui, theme, "Email", user_email);
            field(ui, theme, "Senha", "********");
            ui.add_space(theme.spacing_8);
            if ui
                .add(
                    theme
                        .primary_button("Sair da Conta")
                        .min_size(egui::vec2(ui.available_width(), theme.button_height)),
                )
                .clicked()
            {
                intents.push(Intent::RequestLogout);
            }
        });
    });
}
