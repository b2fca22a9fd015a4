use crate::history::{AnalysisRecord, HistoryStore};
use crate::theme::Theme;
use crate::ui::format::{local_date, long_date};
use crate::ui::home::record_thumbnail;
use crate::ui::images::TextureCache;
use crate::ui::intent::Intent;
use eframe::egui::{self, RichText, TextStyle};

const ROW_THUMBNAIL_SIDE: f32 = 88.0;
const SUMMARY_TAGS: usize = 2;

/// Names of the first recommendations, plus an ellipsis when more exist.
pub fn summary_tags(record: &AnalysisRecord) -> Vec<String> {
    let recommendations = &record.result.recommendations;
    let mut tags: Vec<String> = recommendations
        .iter()
        .take(SUMMARY_TAGS)
        .map(|recommendation| recommendation.name.clone())
        .collect();
    if recommendations.len() > SUMMARY_TAGS {
        tags.push("...".to_string());
    }
    tags
}

fn render_row(
    ui: &mut egui::Ui,
    theme: &Theme,
    textures: &mut TextureCache,
    record: &AnalysisRecord,
    intents: &mut Vec<Intent>,
) {
    let response = theme
        .card_frame()
        .inner_margin(egui::Margin::same(theme.spacing_16 as i8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                record_thumbnail(ui, theme, textures, record, ROW_THUMBNAIL_SIDE, intents);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("{} Face", record.result.analysis.face_shape))
                            .size(18.0)
                            .strong(),
                    );
                    ui.label(
                        RichText::new(format!(
                            "Análise de {}",
                            long_date(local_date(record.created_at))
                        ))
                        .color(theme.text_muted)
                        .size(13.0),
                    );
                    ui.horizontal_wrapped(|ui| {
                        for tag in summary_tags(record) {
                            theme.tag(ui, &tag, false);
                        }
                    });
                });
            });
        })
        .response;

    if response.interact(egui::Sense::click()).clicked() {
        intents.push(Intent::ViewHistoryItem(record.id.clone()));
    }
}

pub fn render(
    ui: &mut egui::Ui,
    theme: &Theme,
    textures: &mut TextureCache,
    history: &HistoryStore,
    intents: &mut Vec<Intent>,
) {
    ui.add_space(theme.spacing_24);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Histórico de Análises")
                .text_style(TextStyle::Heading)
                .strong(),
        );
        if !history.is_empty() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .link(RichText::new("Limpar histórico").color(theme.text_muted))
                    .clicked()
                {
                    intents.push(Intent::RequestClearHistory);
                }
            });
        }
    });
    ui.separator();
    ui.add_space(theme.spacing_16);

    if history.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(theme.spacing_24 * 2.0);
            ui.label(
                RichText::new("Nenhuma análise encontrada.")
                    .size(20.0)
                    .strong(),
            );
            ui.label(
                RichText::new("Comece uma nova análise para ver seu histórico aqui.")
                    .color(theme.text_muted),
            );
        });
        return;
    }

    for record in history.records() {
        render_row(ui, theme, textures, record, intents);
        ui.add_space(theme.spacing_8);
    }
}
