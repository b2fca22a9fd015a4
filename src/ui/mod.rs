pub mod analysis;
pub mod auth;
pub mod format;
pub mod history;
pub mod home;
pub mod images;
pub mod intent;
pub mod profile;
pub mod upload;

use crate::session::{Confirmation, Screen};
use crate::theme::Theme;
use eframe::egui::{self, RichText};
use intent::Intent;

pub const APP_TITLE: &str = "StyleScope AI";

const NAV_ITEMS: [(Screen, &str); 3] = [
    (Screen::Home, "Início"),
    (Screen::History, "Histórico"),
    (Screen::Profile, "Perfil"),
];

/// Top bar: back arrow off the home screen, app name, profile shortcut.
pub fn render_header(ui: &mut egui::Ui, theme: &Theme, screen: Screen, intents: &mut Vec<Intent>) {
    ui.horizontal(|ui| {
        ui.set_min_height(theme.button_height);
        if screen != Screen::Home
            && ui
                .add(theme.subtle_button("←", false))
                .on_hover_text("Voltar")
                .clicked()
        {
            intents.push(Intent::Navigate(Screen::Home));
        }
        ui.label(RichText::new(APP_TITLE).size(20.0).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(theme.subtle_button("Perfil", screen == Screen::Profile))
                .clicked()
            {
                intents.push(Intent::Navigate(Screen::Profile));
            }
        });
    });
}

pub fn render_footer(ui: &mut egui::Ui, theme: &Theme, screen: Screen, intents: &mut Vec<Intent>) {
    ui.add_space(theme.spacing_4);
    ui.columns(NAV_ITEMS.len(), |columns| {
        for (column, (target, label)) in columns.iter_mut().zip(NAV_ITEMS) {
            column.vertical_centered(|ui| {
                if ui.add(theme.subtle_button(label, screen == target)).clicked() {
                    intents.push(Intent::Navigate(target));
                }
            });
        }
    });
    ui.add_space(theme.spacing_4);
}

/// Modal asking the user to confirm a destructive action.
pub fn render_confirmation(
    ctx: &egui::Context,
    theme: &Theme,
    confirmation: Confirmation,
    intents: &mut Vec<Intent>,
) {
    egui::Area::new(egui::Id::new("confirmation_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(egui::Pos2::ZERO)
        .show(ctx, |ui| {
            let screen = ctx.screen_rect();
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(96));
            ui.allocate_rect(screen, egui::Sense::click());
        });

    egui::Window::new("Confirmação")
        .id(egui::Id::new("confirmation_window"))
        .order(egui::Order::Foreground)
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .frame(theme.card_frame())
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(RichText::new(confirmation.prompt()).size(16.0));
            ui.add_space(theme.spacing_16);
            ui.horizontal(|ui| {
                if ui.add(theme.subtle_button("Cancelar", false)).clicked() {
                    intents.push(Intent::ResolveConfirmation(false));
                }
                if ui.add(theme.primary_button("Confirmar")).clicked() {
                    intents.push(Intent::ResolveConfirmation(true));
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        intents.push(Intent::ResolveConfirmation(false));
    }
}
