use crate::analysis::Analyzer;
use crate::codec;
use crate::event::AppEvent;
use crate::session::{run_analysis, AuthScreen, Screen, Session};
use crate::theme::Theme;
use crate::ui::auth::{LoginForm, RegisterForm};
use crate::ui::images::{decode_color_image, TextureCache};
use crate::ui::intent::{assign_dropped_files, Intent, PhotoSlot};
use crate::ui::upload::UploadForm;
use crate::ui::{
    analysis, auth, history, home, profile, render_confirmation, render_footer, render_header,
    upload, APP_TITLE,
};
use eframe::egui::{self, ScrollArea};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

const PHOTO_READ_ERROR: &str = "Não foi possível ler a imagem selecionada.";

pub struct StyleScopeApp {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
    runtime: Handle,
    analyzer: Arc<dyn Analyzer>,
    session: Session,
    theme: Theme,
    theme_applied: bool,
    upload: UploadForm,
    login: LoginForm,
    register: RegisterForm,
    textures: TextureCache,
}

impl StyleScopeApp {
    pub fn new(runtime: Handle, analyzer: Arc<dyn Analyzer>, session: Session) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            rx,
            tx,
            runtime,
            analyzer,
            session,
            theme: Theme::default(),
            theme_applied: false,
            upload: UploadForm::default(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
            textures: TextureCache::default(),
        }
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(ctx, event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, ctx: &egui::Context, event: AppEvent) {
        match event {
            AppEvent::PhotoEncoded {
                slot,
                request,
                result,
            } => {
                if !self.upload.finish_load(slot, request, result) {
                    info!(slot = slot.key(), request, "discarding superseded photo");
                }
            }
            AppEvent::PreviewDecoded { key, result } => {
                self.textures.finish(ctx, &key, result);
            }
            AppEvent::AnalysisFinished(outcome) => {
                self.session.finish_analysis(outcome);
                if let Some(record) = self.session.current_record() {
                    info!(id = %record.id, "analysis ready");
                }
            }
        }
    }

    fn apply_intent(&mut self, ctx: &egui::Context, intent: Intent) {
        match intent {
            Intent::ShowLogin => self.session.show_login(),
            Intent::ShowRegister => self.session.show_register(),
            Intent::Login { email, password } => match self.session.login(&email, &password) {
                Ok(()) => self.login = LoginForm::default(),
                Err(err) => warn!("login rejected: {err}"),
            },
            Intent::Register {
                name,
                email,
                password,
            } => match self.session.register(&name, &email, &password) {
                Ok(()) => self.register = RegisterForm::default(),
                Err(err) => warn!("registration rejected: {err}"),
            },
            Intent::Navigate(screen) => self.session.navigate(screen),
            Intent::StartUpload => {
                self.reset_upload();
                self.session.start_upload();
            }
            Intent::PickPhoto { slot, path } => self.pick_photo(ctx, slot, path),
            Intent::BeginAnalysis => self.begin_analysis(ctx),
            Intent::ViewHistoryItem(id) => {
                let record = self
                    .session
                    .history()
                    .records()
                    .iter()
                    .find(|record| record.id == id)
                    .cloned();
                match record {
                    Some(record) => self.session.view_history_item(record),
                    None => warn!(id = %id, "history item not found"),
                }
            }
            Intent::RequestClearHistory => self.session.request_clear_history(),
            Intent::RequestLogout => self.session.request_logout(),
            Intent::ResolveConfirmation(accepted) => {
                let had_history = !self.session.history().is_empty();
                self.session.resolve_confirmation(accepted);
                if !self.session.is_authenticated() {
                    self.reset_upload();
                    self.login = LoginForm::default();
                    self.register = RegisterForm::default();
                    self.textures.clear();
                } else if had_history && self.session.history().is_empty() {
                    self.textures.clear();
                }
            }
        }
    }

    fn reset_upload(&mut self) {
        for slot in [PhotoSlot::Frontal, PhotoSlot::Side] {
            self.textures.forget(&self.upload.slot(slot).preview_key(slot));
        }
        self.upload.reset();
    }

    fn pick_photo(&mut self, ctx: &egui::Context, slot: PhotoSlot, path: PathBuf) {
        if self.session.screen() != Screen::Upload || self.session.in_flight() {
            return;
        }
        self.textures.forget(&self.upload.slot(slot).preview_key(slot));
        let request = self.upload.begin_load(slot, &path);

        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = codec::encode_file(&path).await.map_err(|err| {
                warn!(slot = slot.key(), "failed to encode photo: {err}");
                PHOTO_READ_ERROR.to_string()
            });
            if tx
                .send(AppEvent::PhotoEncoded {
                    slot,
                    request,
                    result,
                })
                .is_err()
            {
                warn!("ui is gone; dropping encoded photo");
            }
            ctx.request_repaint();
        });
    }

    fn begin_analysis(&mut self, ctx: &egui::Context) {
        let Some((frontal, side)) = self.upload.payloads() else {
            return;
        };
        let Some(ticket) = self.session.begin_analysis(frontal, side) else {
            return;
        };
        info!("analysis requested");

        let analyzer = Arc::clone(&self.analyzer);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = run_analysis(analyzer, ticket).await;
            if tx.send(AppEvent::AnalysisFinished(outcome)).is_err() {
                warn!("ui is gone; dropping analysis response");
            }
            ctx.request_repaint();
        });
    }

    /// Decodes the previews requested during the last frame on the runtime's
    /// blocking pool.
    fn spawn_preview_decodes(&mut self, ctx: &egui::Context) {
        for (key, payload) in self.textures.take_queued() {
            let tx = self.tx.clone();
            let ctx = ctx.clone();
            self.runtime.spawn_blocking(move || {
                let result = decode_color_image(&payload);
                if tx.send(AppEvent::PreviewDecoded { key, result }).is_err() {
                    warn!("ui is gone; dropping decoded preview");
                }
                ctx.request_repaint();
            });
        }
    }

    fn collect_dropped_files(&self, ctx: &egui::Context, intents: &mut Vec<Intent>) {
        if self.session.screen() != Screen::Upload || self.session.in_flight() {
            return;
        }
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if dropped.is_empty() {
            return;
        }
        let frontal_filled = self.upload.frontal.payload.is_some();
        let side_filled = self.upload.side.payload.is_some();
        intents.extend(
            assign_dropped_files(dropped, frontal_filled, side_filled)
                .into_iter()
                .map(|(slot, path)| Intent::PickPhoto { slot, path }),
        );
    }

    fn render_gate(&mut self, ctx: &egui::Context, intents: &mut Vec<Intent>) {
        let Self {
            session,
            theme,
            login,
            register,
            ..
        } = self;
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height().min(600.0) / 6.0 + theme.spacing_24);
                    ui.label(egui::RichText::new(APP_TITLE).size(20.0).strong());
                    ui.add_space(theme.spacing_16);
                    ui.set_max_width(400.0);
                    theme.card_frame().show(ui, |ui| match session.auth_screen() {
                        AuthScreen::Login => auth::render_login(ui, theme, login, intents),
                        AuthScreen::Register => {
                            auth::render_register(ui, theme, register, intents)
                        }
                    });
                });
            });
        });
    }

    fn render_shell(&mut self, ctx: &egui::Context, intents: &mut Vec<Intent>) {
        let Self {
            session,
            theme,
            upload,
            textures,
            ..
        } = self;
        let screen = session.screen();

        egui::TopBottomPanel::top("header")
            .frame(theme.panel_frame(theme.surface_0, theme.spacing_12 as i8))
            .show(ctx, |ui| render_header(ui, theme, screen, intents));

        egui::TopBottomPanel::bottom("footer")
            .frame(theme.panel_frame(theme.surface_0, theme.spacing_8 as i8))
            .show(ctx, |ui| render_footer(ui, theme, screen, intents));

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .id_salt(("screen", screen as u8))
                .auto_shrink([false, false])
                .show(ui, |ui| match screen {
                    Screen::Home => home::render(ui, theme, textures, session.history(), intents),
                    Screen::Upload => upload::render(
                        ui,
                        theme,
                        textures,
                        upload,
                        session.in_flight(),
                        intents,
                    ),
                    Screen::Analysis => {
                        analysis::render(ui, theme, textures, session.analysis_view())
                    }
                    Screen::History => {
                        history::render(ui, theme, textures, session.history(), intents)
                    }
                    Screen::Profile => profile::render(ui, theme, session.user_email(), intents),
                });
        });

        if let Some(confirmation) = session.pending_confirmation() {
            render_confirmation(ctx, theme, confirmation, intents);
        }
    }
}

impl eframe::App for StyleScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            self.theme.apply_visuals(ctx);
            self.theme_applied = true;
        }

        self.drain_events(ctx);

        let mut intents = Vec::new();
        if self.session.is_authenticated() {
            self.collect_dropped_files(ctx, &mut intents);
            self.render_shell(ctx, &mut intents);
        } else {
            self.render_gate(ctx, &mut intents);
        }

        for intent in intents {
            self.apply_intent(ctx, intent);
        }
        self.spawn_preview_decodes(ctx);
    }
}
