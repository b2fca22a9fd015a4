use crate::history::{AnalysisRecord, HistoryStore};
use crate::session::Screen;
use crate::theme::Theme;
use crate::ui::format::{local_date, short_date};
use crate::ui::images::{square_image, TextureCache};
use crate::ui::intent::Intent;
use eframe::egui::{self, RichText, TextStyle};

const RECENT_COUNT: usize = 3;
const THUMBNAIL_SIDE: f32 = 180.0;

pub fn record_texture_key(record: &AnalysisRecord) -> String {
    format!("record:{}:frontal", record.id)
}

/// Square thumbnail of a record's frontal photo; a click opens the record.
pub fn record_thumbnail(
    ui: &mut egui::Ui,
    theme: &Theme,
    textures: &mut TextureCache,
    record: &AnalysisRecord,
    side: f32,
    intents: &mut Vec<Intent>,
) {
    let texture = textures.get_or_load(&record_texture_key(record), &record.frontal_photo);
    let response = match texture {
        Some(texture) => square_image(ui, &texture, side),
        None => {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click());
            ui.painter().rect_filled(rect, theme.radius_8 as f32, theme.surface_2);
            response
        }
    };
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
    ui.vertical_centered(|ui| {
        ui.set_max_width(720.0);
        ui.add_space(theme.spacing_24 * 2.0);
        ui.label(
            RichText::new("Analisar Meu Rosto")
                .text_style(TextStyle::Name("title".into()))
                .strong(),
        );
        ui.add_space(theme.spacing_8);
        ui.label(
            RichText::new(
                "Descubra os cortes de cabelo ideais para você com a ajuda da inteligência artificial.",
            )
            .color(theme.text_muted)
            .size(18.0),
        );
        ui.add_space(theme.spacing_24 * 2.0);

        if ui
            .add(theme.primary_button("Iniciar Análise").min_size(egui::vec2(240.0, 52.0)))
            .clicked()
        {
            intents.push(Intent::StartUpload);
        }

        if history.is_empty() {
            return;
        }

        ui.add_space(theme.spacing_24 * 2.5);
        ui.label(
            RichText::new("Histórico Recente")
                .text_style(TextStyle::Name("section".into()))
                .strong(),
        );
        ui.add_space(theme.spacing_16);

        let recent = history.latest(RECENT_COUNT);
        ui.columns(RECENT_COUNT, |columns| {
            for (column, record) in columns.iter_mut().zip(recent) {
                column.vertical_centered(|ui| {
                    let side = ui.available_width().min(THUMBNAIL_SIDE);
                    record_thumbnail(ui, theme, textures, record, side, intents);
                    ui.label(
                        RichText::new(short_date(local_date(record.created_at)))
                            .color(theme.text_muted)
                            .size(13.0),
                    );
                });
            }
        });

        if history.len() > RECENT_COUNT {
            ui.add_space(theme.spacing_16);
            if ui
                .link(RichText::new("Ver todo o histórico").strong())
                .clicked()
            {
                intents.push(Intent::Navigate(Screen::History));
            }
        }
    });
}
