use crate::theme::Theme;
use crate::ui::images::{square_image, TextureCache};
use crate::ui::intent::{Intent, PhotoSlot};
use eframe::egui::{self, RichText, TextStyle};
use std::path::{Path, PathBuf};

const SLOT_SIDE: f32 = 300.0;

#[derive(Debug, Default, Clone)]
pub struct PhotoState {
    pub path_input: String,
    pub payload: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    request: u64,
}

impl PhotoState {
    pub fn preview_key(&self, slot: PhotoSlot) -> String {
        format!("upload:{}:{}", slot.key(), self.request)
    }
}

/// Photos picked on the upload screen, each already encoded for transmission.
#[derive(Debug, Default, Clone)]
pub struct UploadForm {
    pub frontal: PhotoState,
    pub side: PhotoState,
}

impl UploadForm {
    pub fn slot(&self, slot: PhotoSlot) -> &PhotoState {
        match slot {
            PhotoSlot::Frontal => &self.frontal,
            PhotoSlot::Side => &self.side,
        }
    }

    pub fn slot_mut(&mut self, slot: PhotoSlot) -> &mut PhotoState {
        match slot {
            PhotoSlot::Frontal => &mut self.frontal,
            PhotoSlot::Side => &mut self.side,
        }
    }

    /// Clears both slots. Request numbers keep counting so that encodes
    /// started before the reset can never match a later pick.
    pub fn reset(&mut self) {
        for state in [&mut self.frontal, &mut self.side] {
            *state = PhotoState {
                request: state.request,
                ..PhotoState::default()
            };
        }
    }

    /// Marks a slot as loading and returns the request number the encoded
    /// result must carry to be accepted.
    pub fn begin_load(&mut self, slot: PhotoSlot, path: &Path) -> u64 {
        let state = self.slot_mut(slot);
        state.request += 1;
        state.path_input = path.display().to_string();
        state.loading = true;
        state.payload = None;
        state.error = None;
        state.request
    }

    /// Applies an encoding result unless a newer pick replaced it.
    pub fn finish_load(&mut self, slot: PhotoSlot, request: u64, result: Result<String, String>) -> bool {
        let state = self.slot_mut(slot);
        if state.request != request {
            return false;
        }
        state.loading = false;
        match result {
            Ok(payload) => {
                state.payload = Some(payload);
                state.error = None;
            }
            Err(message) => {
                state.payload = None;
                state.error = Some(message);
            }
        }
        true
    }

    pub fn payloads(&self) -> Option<(String, String)> {
        if self.frontal.loading || self.side.loading {
            return None;
        }
        Some((self.frontal.payload.clone()?, self.side.payload.clone()?))
    }

    pub fn is_ready(&self) -> bool {
        self.payloads().is_some()
    }
}

fn render_slot(
    ui: &mut egui::Ui,
    theme: &Theme,
    textures: &mut TextureCache,
    slot: PhotoSlot,
    state: &mut PhotoState,
    intents: &mut Vec<Intent>,
) {
    let side = ui.available_width().min(SLOT_SIDE);
    let preview = state
        .payload
        .as_ref()
        .and_then(|payload| textures.get_or_load(&state.preview_key(slot), payload));

    match preview {
        Some(texture) => {
            square_image(ui, &texture, side);
        }
        None => {
            egui::Frame::new()
                .fill(theme.surface_1)
                .stroke(egui::Stroke::new(2.0, theme.border_subtle))
                .corner_radius(egui::CornerRadius::same(theme.radius_8))
                .show(ui, |ui| {
                    ui.set_min_size(egui::vec2(side - 4.0, side - 4.0));
                    ui.vertical_centered(|ui| {
                        ui.add_space(side / 2.0 - 40.0);
                        if state.loading || state.payload.is_some() {
                            ui.add(egui::Spinner::new().size(28.0));
                        } else {
                            ui.label(RichText::new(slot.label()).strong());
                            ui.label(
                                RichText::new(slot.instruction())
                                    .color(theme.text_muted)
                                    .size(12.0),
                            );
                        }
                    });
                });
        }
    }

    ui.add_space(theme.spacing_8);
    ui.horizontal(|ui| {
        let input = ui.add(
            egui::TextEdit::singleline(&mut state.path_input)
                .hint_text("Caminho da imagem")
                .desired_width(side - 110.0),
        );
        let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(
                !state.path_input.trim().is_empty() && !state.loading,
                egui::Button::new("Carregar"),
            )
            .clicked();
        if (submitted || clicked) && !state.path_input.trim().is_empty() {
            intents.push(Intent::PickPhoto {
                slot,
                path: PathBuf::from(state.path_input.trim()),
            });
        }
    });

    if let Some(error) = &state.error {
        ui.label(RichText::new(error).color(theme.danger).size(12.0));
    }
}

pub fn render(
    ui: &mut egui::Ui,
    theme: &Theme,
    textures: &mut TextureCache,
    form: &mut UploadForm,
    in_flight: bool,
    intents: &mut Vec<Intent>,
) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(760.0);
        ui.add_space(theme.spacing_24 * 1.5);
        ui.label(RichText::new("Envie suas fotos").text_style(TextStyle::Heading).strong());
        ui.label(
            RichText::new("Para a melhor análise, siga as instruções em cada campo.")
                .color(theme.text_muted),
        );
        ui.label(
            RichText::new("Você também pode arrastar as fotos para esta janela.")
                .color(theme.text_muted)
                .size(12.0),
        );
        ui.add_space(theme.spacing_24);

        ui.columns(2, |columns| {
            for (column, slot) in columns.iter_mut().zip([PhotoSlot::Frontal, PhotoSlot::Side]) {
                column.vertical_centered(|ui| {
                    render_slot(ui, theme, textures, slot, form.slot_mut(slot), intents);
                });
            }
        });

        ui.add_space(theme.spacing_24);
        let ready = form.is_ready() && !in_flight;
        if ui
            .add_enabled(
                ready,
                theme.primary_button("Analisar").min_size(egui::vec2(240.0, 52.0)),
            )
            .clicked()
        {
            intents.push(Intent::BeginAnalysis);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_only_when_both_photos_are_encoded() {
        let mut form = UploadForm::default();
        assert!(!form.is_ready());

        let frontal = form.begin_load(PhotoSlot::Frontal, Path::new("front.jpg"));
        assert!(form.finish_load(PhotoSlot::Frontal, frontal, Ok("RlJPTlQ=".to_string())));
        assert!(!form.is_ready());

        let side = form.begin_load(PhotoSlot::Side, Path::new("side.jpg"));
        assert!(!form.is_ready());
        assert!(form.finish_load(PhotoSlot::Side, side, Ok("U0lERQ==".to_string())));

        assert_eq!(
            form.payloads(),
            Some(("RlJPTlQ=".to_string(), "U0lERQ==".to_string()))
        );
    }

    #[test]
    fn stale_encoding_results_are_ignored() {
        let mut form = UploadForm::default();
        let first = form.begin_load(PhotoSlot::Frontal, Path::new("old.jpg"));
        let second = form.begin_load(PhotoSlot::Frontal, Path::new("new.jpg"));

        assert!(!form.finish_load(PhotoSlot::Frontal, first, Ok("b2xk".to_string())));
        assert!(form.frontal.loading);
        assert!(form.finish_load(PhotoSlot::Frontal, second, Ok("bmV3".to_string())));
        assert_eq!(form.frontal.payload.as_deref(), Some("bmV3"));
        assert_eq!(form.frontal.path_input, "new.jpg");
    }

    #[test]
    fn encodes_started_before_a_reset_stay_stale() {
        let mut form = UploadForm::default();
        let old = form.begin_load(PhotoSlot::Frontal, Path::new("a.jpg"));
        let old_key = form.frontal.preview_key(PhotoSlot::Frontal);
        form.reset();
        assert!(form.frontal.path_input.is_empty());

        let new = form.begin_load(PhotoSlot::Frontal, Path::new("b.jpg"));
        assert_ne!(old, new);
        assert_ne!(old_key, form.frontal.preview_key(PhotoSlot::Frontal));

        assert!(!form.finish_load(PhotoSlot::Frontal, old, Ok("QQ==".to_string())));
        assert!(form.frontal.payload.is_none());
        assert!(form.finish_load(PhotoSlot::Frontal, new, Ok("Qg==".to_string())));
        assert_eq!(form.frontal.payload.as_deref(), Some("Qg=="));
        assert_eq!(form.frontal.path_input, "b.jpg");
    }

    #[test]
    fn failed_encoding_clears_payload_and_shows_error() {
        let mut form = UploadForm::default();
        let request = form.begin_load(PhotoSlot::Side, Path::new("side.jpg"));
        form.finish_load(PhotoSlot::Side, request, Ok("QQ==".to_string()));

        let request = form.begin_load(PhotoSlot::Side, Path::new("missing.jpg"));
        form.finish_load(PhotoSlot::Side, request, Err("não foi possível ler".to_string()));

        assert!(form.side.payload.is_none());
        assert_eq!(form.side.error.as_deref(), Some("não foi possível ler"));
    }
}
