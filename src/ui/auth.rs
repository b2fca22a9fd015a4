use crate::theme::Theme;
use crate::ui::intent::Intent;
use eframe::egui::{self, RichText, TextStyle};

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn submit(&self) -> Option<Intent> {
        self.is_complete().then(|| Intent::Login {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn submit(&self) -> Option<Intent> {
        self.is_complete().then(|| Intent::Register {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Returns true when Enter was pressed in the field.
fn text_field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str, password: bool) -> bool {
    ui.label(RichText::new(label).size(13.0).strong());
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .password(password)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(8.0);
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

fn header(ui: &mut egui::Ui, theme: &Theme, title: &str, subtitle: &str) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(title).text_style(TextStyle::Heading).strong());
        ui.label(RichText::new(subtitle).color(theme.text_muted));
    });
    ui.add_space(theme.spacing_24);
}

fn submit_button(ui: &mut egui::Ui, theme: &Theme, label: &str, enabled: bool) -> bool {
    ui.add_enabled(
        enabled,
        theme
            .primary_button(label)
            .min_size(egui::vec2(ui.available_width(), theme.button_height)),
    )
    .clicked()
}

fn switch_link(ui: &mut egui::Ui, theme: &Theme, prompt: &str, action: &str) -> bool {
    let mut clicked = false;
    ui.add_space(theme.spacing_16);
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(prompt).color(theme.text_muted).size(13.0));
            clicked = ui.link(RichText::new(action).strong().size(13.0)).clicked();
        });
    });
    clicked
}

pub fn render_login(ui: &mut egui::Ui, theme: &Theme, form: &mut LoginForm, intents: &mut Vec<Intent>) {
    header(
        ui,
        theme,
        "Bem-vindo de volta",
        "Faça login para continuar sua jornada de estilo.",
    );

    let mut submitted = text_field(ui, "Email", &mut form.email, "seu@email.com", false);
    submitted |= text_field(ui, "Senha", &mut form.password, "********", true);
    submitted |= submit_button(ui, theme, "Entrar", form.is_complete());

    if submitted {
        intents.extend(form.submit());
    }
    if switch_link(ui, theme, "Não tem uma conta?", "Cadastre-se") {
        intents.push(Intent::ShowRegister);
    }
}

pub fn render_register(
    ui: &mut egui::Ui,
    theme: &Theme,
    form: &mut RegisterForm,
    intents: &mut Vec<Intent>,
) {
    header(
        ui,
        theme,
        "Crie sua Conta",
        "Comece a descobrir seu estilo perfeito hoje.",
    );

    let mut submitted = text_field(ui, "Nome", &mut form.name, "Seu nome completo", false);
    submitted |= text_field(ui, "Email", &mut form.email, "seu@email.com", false);
    submitted |= text_field(ui, "Senha", &mut form.password, "Crie uma senha forte", true);
    submitted |= submit_button(ui, theme, "Criar Conta", form.is_complete());

    if submitted {
        intents.extend(form.submit());
    }
    if switch_link(ui, theme, "Já tem uma conta?", "Faça login") {
        intents.push(Intent::ShowLogin);
    }
}
