use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::{AnalysisError, AnalysisResult, Analyzer};
use crate::history::{AnalysisRecord, HistoryStore};

pub mod auth;

pub use auth::{AuthError, CredentialVerifier, SimulatedVerifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Upload,
    Analysis,
    History,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScreen {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    ClearHistory,
    Logout,
}

impl Confirmation {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::ClearHistory => {
                "Tem certeza que deseja limpar todo o histórico? Esta ação não pode ser desfeita."
            }
            Self::Logout => "Tem certeza que deseja sair?",
        }
    }
}

/// What the analysis screen shows; exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisView<'a> {
    Loading,
    Failed(&'a str),
    Showing(&'a AnalysisRecord),
    Empty,
}

/// An accepted request to analyze one pair of photos.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    epoch: u64,
    request: u64,
    pub frontal: String,
    pub side: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub ticket: AnalysisTicket,
    pub result: Result<AnalysisResult, AnalysisError>,
}

pub async fn run_analysis(analyzer: Arc<dyn Analyzer>, ticket: AnalysisTicket) -> AnalysisOutcome {
    let result = analyzer.analyze(&ticket.frontal, &ticket.side).await;
    AnalysisOutcome { ticket, result }
}

pub struct Session {
    verifier: Box<dyn CredentialVerifier>,
    history: HistoryStore,
    authenticated: bool,
    auth_screen: AuthScreen,
    user_email: String,
    screen: Screen,
    current: Option<AnalysisRecord>,
    in_flight: bool,
    error: Option<String>,
    pending_confirmation: Option<Confirmation>,
    epoch: u64,
    latest_request: u64,
}

impl Session {
    pub fn new(verifier: Box<dyn CredentialVerifier>, history: HistoryStore) -> Self {
        Self {
            verifier,
            history,
            authenticated: false,
            auth_screen: AuthScreen::Login,
            user_email: String::new(),
            screen: Screen::Home,
            current: None,
            in_flight: false,
            error: None,
            pending_confirmation: None,
            epoch: 0,
            latest_request: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn auth_screen(&self) -> AuthScreen {
        self.auth_screen
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn current_record(&self) -> Option<&AnalysisRecord> {
        self.current.as_ref()
    }

    pub fn pending_confirmation(&self) -> Option<Confirmation> {
        self.pending_confirmation
    }

    pub fn analysis_view(&self) -> AnalysisView<'_> {
        if self.in_flight {
            AnalysisView::Loading
        } else if let Some(error) = &self.error {
            AnalysisView::Failed(error)
        } else if let Some(record) = &self.current {
            AnalysisView::Showing(record)
        } else {
            AnalysisView::Empty
        }
    }

    pub fn show_login(&mut self) {
        if !self.authenticated {
            self.auth_screen = AuthScreen::Login;
        }
    }

    pub fn show_register(&mut self) {
        if !self.authenticated {
            self.auth_screen = AuthScreen::Register;
        }
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        if self.authenticated {
            return Ok(());
        }
        self.verifier.verify_login(email, password)?;
        self.enter(email);
        Ok(())
    }

    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        if self.authenticated {
            return Ok(());
        }
        self.verifier.verify_registration(name, email, password)?;
        self.enter(email);
        Ok(())
    }

    fn enter(&mut self, email: &str) {
        self.authenticated = true;
        self.user_email = email.trim().to_string();
        self.screen = Screen::Home;
        self.history.load();
        info!(email = %self.user_email, "session started");
    }

    pub fn navigate(&mut self, screen: Screen) {
        if self.authenticated {
            self.screen = screen;
        }
    }

    pub fn start_upload(&mut self) {
        self.navigate(Screen::Upload);
    }

    /// Moves from the upload screen into the loading state. Returns `None`
    /// when not on the upload screen, when a request is already running, or
    /// when either photo is missing.
    ///
    /// Opening a history item clears the loading state, so a second request
    /// can start while the first is still out. Only the newest request drives
    /// the loading, error and current-record state; older ones are still
    /// saved to history when they succeed.
    pub fn begin_analysis(&mut self, frontal: String, side: String) -> Option<AnalysisTicket> {
        if !self.authenticated
            || self.screen != Screen::Upload
            || self.in_flight
            || frontal.is_empty()
            || side.is_empty()
        {
            return None;
        }

        self.screen = Screen::Analysis;
        self.in_flight = true;
        self.error = None;
        self.current = None;
        self.latest_request = self.latest_request.wrapping_add(1);
        Some(AnalysisTicket {
            epoch: self.epoch,
            request: self.latest_request,
            frontal,
            side,
        })
    }

    /// Commits an analysis response. Responses are applied even when the user
    /// has navigated away since; only responses from an earlier session are
    /// dropped.
    pub fn finish_analysis(&mut self, outcome: AnalysisOutcome) {
        if !self.authenticated || outcome.ticket.epoch != self.epoch {
            warn!("dropping analysis response from a closed session");
            return;
        }

        let latest = outcome.ticket.request == self.latest_request;
        match outcome.result {
            Ok(result) => {
                let record =
                    AnalysisRecord::new(outcome.ticket.frontal, outcome.ticket.side, result);
                self.history.append(record.clone());
                if latest {
                    self.current = Some(record);
                }
            }
            Err(err) if latest => {
                self.error = Some(err.user_message().to_string());
            }
            Err(err) => warn!("superseded analysis request failed: {err}"),
        }
        if latest {
            self.in_flight = false;
        }
    }

    pub fn view_history_item(&mut self, record: AnalysisRecord) {
        if !self.authenticated {
            return;
        }
        self.current = Some(record);
        self.screen = Screen::Analysis;
        self.error = None;
        self.in_flight = false;
    }

    pub fn request_clear_history(&mut self) {
        if self.authenticated {
            self.pending_confirmation = Some(Confirmation::ClearHistory);
        }
    }

    pub fn request_logout(&mut self) {
        if self.authenticated {
            self.pending_confirmation = Some(Confirmation::Logout);
        }
    }

    pub fn resolve_confirmation(&mut self, accepted: bool) {
        let Some(confirmation) = self.pending_confirmation.take() else {
            return;
        };
        if !accepted {
            return;
        }

        match confirmation {
            Confirmation::ClearHistory => {
                self.history.clear();
                self.screen = Screen::Home;
                info!("history cleared");
            }
            Confirmation::Logout => self.logout(),
        }
    }

    fn logout(&mut self) {
        info!(email = %self.user_email, "session ended");
        self.authenticated = false;
        self.auth_screen = AuthScreen::Login;
        self.user_email.clear();
        self.screen = Screen::Home;
        self.history.unload();
        self.current = None;
        self.in_flight = false;
        self.error = None;
        self.pending_confirmation = None;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::sample_result;
    use crate::analysis::{AnalysisFuture, USER_FACING_ERROR};
    use crate::history::{KeyValueStore, MemoryStore, HISTORY_KEY};
    use std::sync::Mutex;

    struct ScriptedAnalyzer {
        replies: Mutex<Vec<Result<AnalysisResult, AnalysisError>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedAnalyzer {
        fn replying(reply: Result<AnalysisResult, AnalysisError>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(vec![reply]),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    impl Analyzer for ScriptedAnalyzer {
        fn analyze<'a>(&'a self, frontal: &'a str, side: &'a str) -> AnalysisFuture<'a> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .expect("calls lock")
                    .push((frontal.to_string(), side.to_string()));
                self.replies
                    .lock()
                    .expect("replies lock")
                    .pop()
                    .unwrap_or(Err(AnalysisError::EmptyResponse))
            })
        }
    }

    fn session_with(storage: &MemoryStore) -> Session {
        Session::new(
            Box::new(SimulatedVerifier),
            HistoryStore::new(Box::new(storage.clone())),
        )
    }

    fn logged_in(storage: &MemoryStore) -> Session {
        let mut session = session_with(storage);
        session
            .login("ana@example.com", "secret")
            .expect("login should succeed");
        session
    }

    fn seed_history(session: &mut Session, count: usize) {
        for index in 0..count {
            session.start_upload();
            let ticket = session
                .begin_analysis(format!("front-{index}"), format!("side-{index}"))
                .expect("ticket should issue");
            session.finish_analysis(AnalysisOutcome {
                ticket,
                result: Ok(sample_result()),
            });
        }
    }

    #[test]
    fn starts_unauthenticated_on_login() {
        let session = session_with(&MemoryStore::new());
        assert!(!session.is_authenticated());
        assert_eq!(session.auth_screen(), AuthScreen::Login);
        assert_eq!(session.screen(), Screen::Home);
        assert!(!session.in_flight());
        assert_eq!(session.analysis_view(), AnalysisView::Empty);
    }

    #[test]
    fn login_authenticates_and_lands_on_home() {
        let storage = MemoryStore::new();
        let mut session = session_with(&storage);
        session.show_register();
        session.show_login();

        session
            .login("ana@example.com", "secret")
            .expect("login should succeed");

        assert!(session.is_authenticated());
        assert_eq!(session.user_email(), "ana@example.com");
        assert_eq!(session.screen(), Screen::Home);
    }

    #[test]
    fn register_authenticates_with_the_given_email() {
        let mut session = session_with(&MemoryStore::new());
        session.show_register();
        assert_eq!(session.auth_screen(), AuthScreen::Register);

        session
            .register("Ana", "ana@example.com", "secret")
            .expect("registration should succeed");
        assert!(session.is_authenticated());
        assert_eq!(session.user_email(), "ana@example.com");
    }

    #[test]
    fn empty_credentials_keep_the_gate_closed() {
        let mut session = session_with(&MemoryStore::new());
        assert_eq!(
            session.login("", "secret"),
            Err(AuthError::MissingField("email"))
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn navigation_is_ignored_before_login() {
        let mut session = session_with(&MemoryStore::new());
        session.navigate(Screen::History);
        session.start_upload();
        assert_eq!(session.screen(), Screen::Home);
        assert!(session.begin_analysis("a".into(), "b".into()).is_none());
    }

    #[test]
    fn main_screens_form_a_free_graph() {
        let mut session = logged_in(&MemoryStore::new());
        for screen in [Screen::History, Screen::Profile, Screen::Upload, Screen::Home, Screen::Analysis] {
            session.navigate(screen);
            assert_eq!(session.screen(), screen);
        }
    }

    #[test]
    fn login_loads_stored_history() {
        let storage = MemoryStore::new();
        let mut first = logged_in(&storage);
        seed_history(&mut first, 2);

        let second = logged_in(&storage);
        assert_eq!(second.history().len(), 2);
    }

    #[tokio::test]
    async fn successful_analysis_shows_result_and_prepends_one_record() {
        let storage = MemoryStore::new();
        let mut session = logged_in(&storage);
        seed_history(&mut session, 1);
        let analyzer = ScriptedAnalyzer::replying(Ok(sample_result()));

        session.start_upload();
        let ticket = session
            .begin_analysis("RlJPTlQ=".into(), "U0lERQ==".into())
            .expect("ticket should issue");
        assert_eq!(session.screen(), Screen::Analysis);
        assert_eq!(session.analysis_view(), AnalysisView::Loading);

        let outcome = run_analysis(analyzer.clone(), ticket).await;
        session.finish_analysis(outcome);

        assert_eq!(session.screen(), Screen::Analysis);
        let AnalysisView::Showing(record) = session.analysis_view() else {
            panic!("expected result view");
        };
        assert_eq!(record.result.analysis.face_shape, "Oval");
        assert_eq!(record.result.recommendations.len(), 3);
        assert_eq!(record.frontal_photo, "RlJPTlQ=");
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().records()[0].id, record.id);
        assert_eq!(
            analyzer.calls.lock().expect("calls lock").clone(),
            vec![("RlJPTlQ=".to_string(), "U0lERQ==".to_string())]
        );

        let stored = storage
            .get(HISTORY_KEY)
            .expect("get should succeed")
            .expect("history should be persisted");
        assert!(stored.contains(&record.id));
    }

    #[tokio::test]
    async fn failed_analysis_shows_generic_error_and_keeps_history() {
        let storage = MemoryStore::new();
        let mut session = logged_in(&storage);
        seed_history(&mut session, 2);
        let analyzer = ScriptedAnalyzer::replying(Err(AnalysisError::Transport(
            "connection reset".to_string(),
        )));

        session.start_upload();
        let ticket = session
            .begin_analysis("QQ==".into(), "Qg==".into())
            .expect("ticket should issue");
        session.finish_analysis(run_analysis(analyzer, ticket).await);

        assert_eq!(session.screen(), Screen::Analysis);
        assert_eq!(session.analysis_view(), AnalysisView::Failed(USER_FACING_ERROR));
        assert!(!session.in_flight());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn only_one_analysis_may_be_in_flight() {
        let mut session = logged_in(&MemoryStore::new());
        session.start_upload();
        assert!(session.begin_analysis("".into(), "b".into()).is_none());
        assert!(session.begin_analysis("a".into(), "b".into()).is_some());

        session.start_upload();
        assert!(session.begin_analysis("a".into(), "b".into()).is_none());
    }

    #[test]
    fn late_response_commits_after_navigation() {
        let mut session = logged_in(&MemoryStore::new());
        session.start_upload();
        let ticket = session
            .begin_analysis("a".into(), "b".into())
            .expect("ticket should issue");
        session.navigate(Screen::History);

        session.finish_analysis(AnalysisOutcome {
            ticket,
            result: Ok(sample_result()),
        });

        assert_eq!(session.screen(), Screen::History);
        assert_eq!(session.history().len(), 1);
        assert!(session.current_record().is_some());
    }

    #[test]
    fn superseded_response_is_saved_without_ending_the_newer_request() {
        let mut session = logged_in(&MemoryStore::new());
        session.start_upload();
        let first = session
            .begin_analysis("a".into(), "b".into())
            .expect("first ticket should issue");

        let placeholder = AnalysisRecord::new("x".into(), "y".into(), sample_result());
        session.view_history_item(placeholder);
        session.start_upload();
        let second = session
            .begin_analysis("c".into(), "d".into())
            .expect("second ticket should issue");

        session.finish_analysis(AnalysisOutcome {
            ticket: first,
            result: Ok(sample_result()),
        });
        assert!(session.in_flight());
        assert_eq!(session.analysis_view(), AnalysisView::Loading);
        assert_eq!(session.history().len(), 1);

        session.finish_analysis(AnalysisOutcome {
            ticket: second,
            result: Err(AnalysisError::EmptyResponse),
        });
        assert!(!session.in_flight());
        assert_eq!(session.analysis_view(), AnalysisView::Failed(USER_FACING_ERROR));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn response_after_logout_is_dropped() {
        let storage = MemoryStore::new();
        let mut session = logged_in(&storage);
        session.start_upload();
        let ticket = session
            .begin_analysis("a".into(), "b".into())
            .expect("ticket should issue");
        session.request_logout();
        session.resolve_confirmation(true);
        session
            .login("bia@example.com", "secret")
            .expect("login should succeed");

        session.finish_analysis(AnalysisOutcome {
            ticket,
            result: Ok(sample_result()),
        });
        assert!(session.history().is_empty());
        assert!(session.current_record().is_none());
    }

    #[test]
    fn viewing_history_item_replays_without_analysis() {
        let mut session = logged_in(&MemoryStore::new());
        seed_history(&mut session, 2);
        let oldest = session.history().records()[1].clone();
        session.navigate(Screen::History);

        session.view_history_item(oldest.clone());

        assert_eq!(session.screen(), Screen::Analysis);
        assert_eq!(session.analysis_view(), AnalysisView::Showing(&oldest));
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn clear_history_confirmed_empties_and_returns_home() {
        let storage = MemoryStore::new();
        let mut session = logged_in(&storage);
        seed_history(&mut session, 3);
        session.navigate(Screen::History);

        session.request_clear_history();
        assert_eq!(session.pending_confirmation(), Some(Confirmation::ClearHistory));
        session.resolve_confirmation(true);

        assert!(session.history().is_empty());
        assert_eq!(session.screen(), Screen::Home);
        assert_eq!(session.pending_confirmation(), None);
        assert_eq!(
            storage.get(HISTORY_KEY).expect("get should succeed").as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn clear_history_declined_changes_nothing() {
        let mut session = logged_in(&MemoryStore::new());
        seed_history(&mut session, 3);
        session.navigate(Screen::History);

        session.request_clear_history();
        session.resolve_confirmation(false);

        assert_eq!(session.history().len(), 3);
        assert_eq!(session.screen(), Screen::History);
        assert_eq!(session.pending_confirmation(), None);
    }

    #[test]
    fn logout_confirmed_tears_down_but_keeps_stored_history() {
        let storage = MemoryStore::new();
        let mut session = logged_in(&storage);
        seed_history(&mut session, 2);
        session.navigate(Screen::Profile);

        session.request_logout();
        session.resolve_confirmation(true);

        assert!(!session.is_authenticated());
        assert_eq!(session.auth_screen(), AuthScreen::Login);
        assert_eq!(session.user_email(), "");
        assert_eq!(session.screen(), Screen::Home);
        assert!(session.history().is_empty());
        assert!(session.current_record().is_none());

        session
            .login("ana@example.com", "secret")
            .expect("login should succeed");
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn logout_declined_keeps_session() {
        let mut session = logged_in(&MemoryStore::new());
        session.navigate(Screen::Profile);
        session.request_logout();
        session.resolve_confirmation(false);

        assert!(session.is_authenticated());
        assert_eq!(session.screen(), Screen::Profile);
    }
}
