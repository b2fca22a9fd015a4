use crate::analysis::{FacialAnalysis, HaircutRecommendation};
use crate::history::AnalysisRecord;
use crate::session::AnalysisView;
use crate::theme::Theme;
use crate::ui::home::record_texture_key;
use crate::ui::images::{square_image, TextureCache};
use eframe::egui::{self, RichText, TextStyle};

pub fn detail_rows(analysis: &FacialAnalysis) -> [(&'static str, &str); 7] {
    [
        ("Formato do Rosto", analysis.face_shape.as_str()),
        ("Tipo de Cabelo", analysis.hair_type.as_str()),
        ("Linha da Mandíbula", analysis.jawline.as_str()),
        ("Formato da Testa", analysis.forehead.as_str()),
        ("Tom de Pele", analysis.skin_tone.as_str()),
        ("Perfil Lateral", analysis.side_profile.as_str()),
        ("Proporções Faciais", analysis.facial_proportions.as_str()),
    ]
}

fn render_detail(ui: &mut egui::Ui, theme: &Theme, label: &str, value: &str) {
    theme.detail_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new(label.to_uppercase())
                .color(theme.text_muted)
                .size(12.0)
                .strong(),
        );
        ui.label(RichText::new(value).size(17.0));
    });
}

fn render_recommendation(ui: &mut egui::Ui, theme: &Theme, recommendation: &HaircutRecommendation) {
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            ui.label(
                RichText::new(&recommendation.name)
                    .text_style(TextStyle::Name("section".into()))
                    .strong(),
            );
            ui.add_space(theme.spacing_8);
            for length in &recommendation.lengths {
                theme.tag(ui, length, true);
            }
        });
        ui.label(RichText::new(&recommendation.description).color(theme.text_muted));
        ui.add_space(theme.spacing_8);

        ui.columns(2, |columns| {
            for (column, (title, body)) in columns.iter_mut().zip([
                ("Por que funciona?", &recommendation.reason),
                ("Como estilizar?", &recommendation.styling),
            ]) {
                theme.detail_frame().show(column, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(title).strong());
                    ui.label(RichText::new(body.as_str()).color(theme.text_muted).size(13.0));
                });
            }
        });
    });
}

fn render_record(
    ui: &mut egui::Ui,
    theme: &Theme,
    textures: &mut TextureCache,
    record: &AnalysisRecord,
) {
    let analysis = &record.result.analysis;

    ui.vertical_centered(|ui| {
        ui.add_space(theme.spacing_24);
        ui.label(
            RichText::new("Sua Análise e Recomendações")
                .text_style(TextStyle::Heading)
                .strong(),
        );
    });
    ui.add_space(theme.spacing_24);

    ui.horizontal_top(|ui| {
        let photo_side = (ui.available_width() / 3.0).min(320.0);
        if let Some(texture) =
            textures.get_or_load(&record_texture_key(record), &record.frontal_photo)
        {
            square_image(ui, &texture, photo_side);
        } else {
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(photo_side, photo_side), egui::Sense::hover());
            ui.painter().rect_filled(rect, theme.radius_8 as f32, theme.surface_2);
            egui::Spinner::new().paint_at(ui, rect.shrink(photo_side / 2.0 - 14.0));
        }

        ui.vertical(|ui| {
            ui.label(
                RichText::new("Resumo da Análise Facial")
                    .text_style(TextStyle::Name("section".into()))
                    .strong(),
            );
            ui.separator();
            let rows = detail_rows(analysis);
            let (pairs, last) = rows.split_at(rows.len() - 1);
            for pair in pairs.chunks(2) {
                ui.columns(2, |columns| {
                    for (column, (label, value)) in columns.iter_mut().zip(pair) {
                        render_detail(column, theme, label, value);
                    }
                });
            }
            for (label, value) in last {
                render_detail(ui, theme, label, value);
            }
        });
    });

    ui.add_space(theme.spacing_24 * 2.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Cortes Recomendados")
                .text_style(TextStyle::Heading)
                .strong(),
        );
    });
    ui.add_space(theme.spacing_16);
    for recommendation in &record.result.recommendations {
        render_recommendation(ui, theme, recommendation);
        ui.add_space(theme.spacing_16);
    }
}

pub fn render(ui: &mut egui::Ui, theme: &Theme, textures: &mut TextureCache, view: AnalysisView<'_>) {
    match view {
        AnalysisView::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.add(egui::Spinner::new().size(56.0).color(theme.accent_primary));
                ui.add_space(theme.spacing_16);
                ui.label(
                    RichText::new("Analisando suas feições...")
                        .text_style(TextStyle::Name("section".into()))
                        .strong(),
                );
                ui.label(
                    RichText::new(
                        "Aguarde, a IA está trabalhando para encontrar os melhores cortes para você.",
                    )
                    .color(theme.text_muted),
                );
            });
        }
        AnalysisView::Failed(message) => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                theme.error_frame().show(ui, |ui| {
                    ui.label(
                        RichText::new("Ocorreu um Erro")
                            .color(theme.danger)
                            .size(20.0)
                            .strong(),
                    );
                    ui.label(RichText::new(message).color(theme.danger));
                });
            });
        }
        AnalysisView::Empty => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.label("Nenhuma análise para exibir.");
            });
        }
        AnalysisView::Showing(record) => render_record(ui, theme, textures, record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::sample_result;

    #[test]
    fn face_shape_is_the_first_labelled_detail() {
        let result = sample_result();
        let rows = detail_rows(&result.analysis);
        assert_eq!(rows[0], ("Formato do Rosto", "Oval"));
        assert_eq!(rows[6].0, "Proporções Faciais");
    }

    #[test]
    fn every_analysis_field_is_shown_once() {
        let result = sample_result();
        let analysis = &result.analysis;
        let values: Vec<&str> = detail_rows(analysis).iter().map(|(_, value)| *value).collect();
        for field in [
            &analysis.face_shape,
            &analysis.facial_proportions,
            &analysis.jawline,
            &analysis.forehead,
            &analysis.side_profile,
            &analysis.hair_type,
            &analysis.skin_tone,
        ] {
            assert_eq!(values.iter().filter(|value| **value == field.as_str()).count(), 1);
        }
    }
}
