use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub accent_primary: Color32,
    pub accent_hover: Color32,
    pub danger: Color32,
    pub danger_surface: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub border_subtle: Color32,
    pub spacing_4: f32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub spacing_24: f32,
    pub radius_8: u8,
    pub radius_12: u8,
    pub radius_pill: u8,
    pub button_height: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::WHITE,
            surface_1: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            surface_2: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            accent_primary: Color32::BLACK,
            accent_hover: Color32::from_rgb(0x1F, 0x29, 0x37),
            danger: Color32::from_rgb(0xDC, 0x26, 0x26),
            danger_surface: Color32::from_rgb(0xFE, 0xF2, 0xF2),
            text_primary: Color32::BLACK,
            text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            text_on_accent: Color32::WHITE,
            border_subtle: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            spacing_4: 4.0,
            spacing_8: Self::P8,
            spacing_12: 12.0,
            spacing_16: Self::P16,
            spacing_24: Self::P24,
            radius_8: Self::R8,
            radius_12: Self::R12,
            radius_pill: 255,
            button_height: 44.0,
        }
    }
}

impl Theme {
    pub const R8: u8 = 8;
    pub const R12: u8 = 12;
    pub const P8: f32 = 8.0;
    pub const P16: f32 = 16.0;
    pub const P24: f32 = 24.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface_0;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.surface_0;
        visuals.widgets.noninteractive.weak_bg_fill = self.surface_1;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.inactive.bg_fill = self.surface_2;
        visuals.widgets.inactive.weak_bg_fill = self.surface_2;
        visuals.widgets.inactive.bg_stroke = Stroke::NONE;
        visuals.widgets.hovered.bg_fill = self.border_subtle;
        visuals.widgets.hovered.weak_bg_fill = self.border_subtle;
        visuals.widgets.hovered.bg_stroke = Stroke::NONE;
        visuals.widgets.active.bg_fill = self.accent_hover;
        visuals.widgets.active.bg_stroke = Stroke::NONE;
        visuals.selection.bg_fill = self.border_subtle;
        visuals.selection.stroke = Stroke::new(1.0, self.accent_primary);
        visuals.window_fill = self.surface_0;
        visuals.window_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.window_corner_radius = CornerRadius::same(self.radius_12);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: [0, 8],
            blur: 24,
            spread: 0,
            color: Color32::from_rgba_premultiplied(0, 0, 0, 32),
        };

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(16.0, 10.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(30.0));
        style.text_styles.insert(TextStyle::Name("title".into()), FontId::proportional(44.0));
        style.text_styles.insert(TextStyle::Name("section".into()), FontId::proportional(22.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(15.0));
        style.text_styles.insert(TextStyle::Button, FontId::proportional(15.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn panel_frame(&self, fill: Color32, inner_padding: i8) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(inner_padding))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::NONE)
    }

    /// Bordered white card used for recommendations and history rows.
    pub fn card_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_0)
            .inner_margin(Margin::same(self.spacing_24 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::new(1.0, self.border_subtle))
            .shadow(egui::epaint::Shadow {
                offset: [0, 1],
                blur: 3,
                spread: 0,
                color: Color32::from_rgba_premultiplied(0, 0, 0, 12),
            })
    }

    pub fn detail_frame(&self) -> Frame {
        self.panel_frame(self.surface_1, self.spacing_16 as i8)
    }

    pub fn error_frame(&self) -> Frame {
        Frame::new()
            .fill(self.danger_surface)
            .inner_margin(Margin::same(self.spacing_24 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::new(1.0, Color32::from_rgb(0xFE, 0xCA, 0xCA)))
    }

    pub fn primary_button(&self, text: &str) -> egui::Button<'static> {
        egui::Button::new(
            egui::RichText::new(text.to_string())
                .color(self.text_on_accent)
                .strong(),
        )
        .fill(self.accent_primary)
        .corner_radius(CornerRadius::same(self.radius_pill))
        .min_size(egui::vec2(0.0, self.button_height))
    }

    pub fn subtle_button(&self, text: &str, active: bool) -> egui::Button<'static> {
        let (fill, color) = if active {
            (self.accent_primary, self.text_on_accent)
        } else {
            (Color32::TRANSPARENT, self.text_muted)
        };
        egui::Button::new(egui::RichText::new(text.to_string()).color(color))
            .fill(fill)
            .stroke(Stroke::NONE)
            .corner_radius(CornerRadius::same(self.radius_pill))
    }

    pub fn tag(&self, ui: &mut egui::Ui, text: &str, inverted: bool) {
        let (fill, color) = if inverted {
            (self.accent_primary, self.text_on_accent)
        } else {
            (self.surface_2, self.text_muted)
        };
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::symmetric(10, 4))
            .corner_radius(CornerRadius::same(self.radius_pill))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(text).color(color).size(12.0).strong());
            });
    }
}
