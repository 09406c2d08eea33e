//! Application state and core logic

use crate::api::{ActionDispatcher, TemplatePicker};
use crate::config::DashboardConfig;
use crate::error::{DispatchError, SubmitError};
use crate::flows::{
    ActiveMenu, ChannelNavigator, CreateOutcome, Navigator, OnComplete, PasswordResetFlow,
    ProjectCreationFlow, ResetToken, TemplateList,
};
use crate::state::{AppState, Dispatch, Form, Project, ProjectFormRow, Team, Template, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Results delivered to the UI loop from background tasks and timers
#[derive(Debug)]
pub enum UiEvent {
    ProjectCreateFinished(Result<Project, DispatchError>),
    TemplateApplied(Result<(), DispatchError>),
    PasswordChangeFinished(Result<(), DispatchError>),
    TemplatesLoaded(Result<Vec<Template>, DispatchError>),
    TeamsLoaded(Result<Vec<Team>, DispatchError>),
    /// Completion callback of the project flow
    ProjectCompleted { project: Project, redirect: bool },
    Navigate(String),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: DashboardConfig,
    pub project_flow: Option<ProjectCreationFlow>,
    pub reset_flow: Option<PasswordResetFlow>,
    dispatcher: Arc<dyn ActionDispatcher>,
    picker: Arc<dyn TemplatePicker>,
    navigator: Arc<dyn Navigator>,
    hide_type: bool,
    events_tx: UnboundedSender<UiEvent>,
    events_rx: UnboundedReceiver<UiEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: DashboardConfig,
        hide_type: bool,
        dispatcher: Arc<dyn ActionDispatcher>,
        picker: Arc<dyn TemplatePicker>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let navigator: Arc<dyn Navigator> = Arc::new(ChannelNavigator::new(events_tx.clone()));
        Self {
            state: AppState::default(),
            config,
            project_flow: None,
            reset_flow: None,
            dispatcher,
            picker,
            navigator,
            hide_type,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Open the first view: password reset when a link was given, project
    /// creation otherwise. Teams load in the background so the first frame
    /// draws at once.
    pub fn start(&mut self, reset_link: Option<&str>) {
        if let Some(link) = reset_link {
            self.open_password_reset(ResetToken::from_link(link));
            return;
        }

        self.navigate(View::ProjectCreate);
        self.state.status_message = Some("Loading teams...".to_string());
        let dispatcher = Arc::clone(&self.dispatcher);
        self.spawn_dispatch(
            Box::pin(async move { dispatcher.list_teams().await }),
            UiEvent::TeamsLoaded,
        );
    }

    fn on_teams_loaded(&mut self, result: Result<Vec<Team>, DispatchError>) {
        self.state.status_message = None;
        if self.state.current_view != View::ProjectCreate || self.project_flow.is_some() {
            tracing::debug!("Team list arrived after leaving the create form");
            return;
        }
        match self.choose_team(result) {
            Some(team) => {
                self.state.active_team = Some(team);
                self.open_project_create();
            }
            None => self.push_error("No team is available to create projects in"),
        }
    }

    /// Pick the configured team if the user belongs to it, else the first one
    fn choose_team(&mut self, result: Result<Vec<Team>, DispatchError>) -> Option<Team> {
        let preferred = self.config.team_id;
        match result {
            Ok(teams) => {
                let team = preferred
                    .and_then(|id| teams.iter().find(|t| t.id == id).cloned())
                    .or_else(|| teams.into_iter().next());
                if let Some(team) = &team {
                    if let Err(err) = self.config.remember_team(team.id) {
                        tracing::warn!("Could not save config: {}", err);
                    }
                }
                team
            }
            Err(err) => {
                self.push_error(format!("Failed to load teams: {err}"));
                preferred.map(|id| Team {
                    id,
                    name: format!("Team {id}"),
                })
            }
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        tracing::debug!("Navigating {:?} -> {:?}", self.state.current_view, view);
        self.state.current_view = view;
    }

    /// Open a fresh project creation form; needs an active team
    pub fn open_project_create(&mut self) {
        let Some(team) = self.state.active_team.clone() else {
            self.push_error("No team selected");
            return;
        };

        let tx = self.events_tx.clone();
        let on_complete: OnComplete = Arc::new(move |project, redirect| {
            if tx
                .send(UiEvent::ProjectCompleted { project, redirect })
                .is_err()
            {
                tracing::debug!("UI loop closed before project completion");
            }
        });

        self.project_flow = Some(ProjectCreationFlow::new(
            team.clone(),
            TemplateList::loading(),
            self.hide_type,
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.picker),
            on_complete,
        ));
        self.navigate(View::ProjectCreate);

        let dispatcher = Arc::clone(&self.dispatcher);
        self.spawn_dispatch(
            Box::pin(async move { dispatcher.list_templates(team.id).await }),
            UiEvent::TemplatesLoaded,
        );
    }

    /// Close the project modal, cancelling its pending timers
    pub fn close_project_create(&mut self) {
        self.project_flow = None;
        self.quit = true;
    }

    pub fn open_password_reset(&mut self, token: ResetToken) {
        self.state.clear_errors();
        self.reset_flow = Some(PasswordResetFlow::new(
            token,
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.navigator),
        ));
        self.navigate(View::PasswordReset);
    }

    /// Run a request on a background task and post its outcome to the UI loop
    fn spawn_dispatch<T: Send + 'static>(
        &self,
        dispatch: Dispatch<T>,
        wrap: fn(Result<T, DispatchError>) -> UiEvent,
    ) {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = dispatch.await;
            if tx.send(wrap(outcome)).is_err() {
                tracing::debug!("UI loop closed before request finished");
            }
        });
    }

    /// Drain pending events. Returns true if any were handled.
    pub fn process_events(&mut self) -> bool {
        let mut handled = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled = true;
        }
        handled
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ProjectCreateFinished(outcome) => self.on_project_created(outcome),
            UiEvent::TemplateApplied(outcome) => {
                let Some(flow) = self.project_flow.as_mut() else {
                    tracing::debug!("Template result arrived after the form closed");
                    return;
                };
                if flow.finish_apply_template(outcome).is_ok() {
                    self.state.status_message = Some("Template applied".to_string());
                }
            }
            UiEvent::PasswordChangeFinished(outcome) => {
                let Some(flow) = self.reset_flow.as_mut() else {
                    tracing::debug!("Password result arrived after the page closed");
                    return;
                };
                if flow.finish_submit(outcome).is_ok() {
                    self.state.status_message = Some("Password changed".to_string());
                }
            }
            UiEvent::TeamsLoaded(result) => self.on_teams_loaded(result),
            UiEvent::TemplatesLoaded(result) => {
                let Some(flow) = self.project_flow.as_mut() else {
                    return;
                };
                match result {
                    Ok(templates) => {
                        tracing::debug!("Loaded {} templates", templates.len());
                        flow.set_templates(templates);
                    }
                    Err(err) => {
                        flow.templates_failed();
                        self.push_error(format!("Failed to load templates: {err}"));
                    }
                }
            }
            UiEvent::ProjectCompleted { project, redirect } => {
                tracing::info!("Project {} ready (redirect={})", project.id, redirect);
                self.state.status_message = Some(if redirect {
                    format!("Project \"{}\" created", project.name)
                } else {
                    format!("Project \"{}\" created from template", project.name)
                });
                self.state.project = Some(project);
                self.project_flow = None;
                self.navigate(View::ProjectDetail);
            }
            UiEvent::Navigate(path) => match View::from_path(&path) {
                Some(View::Login) => {
                    self.reset_flow = None;
                    self.navigate(View::Login);
                }
                Some(View::ProjectCreate) => self.open_project_create(),
                Some(view) => self.navigate(view),
                None => tracing::warn!("Ignoring redirect to unknown path {}", path),
            },
        }
    }

    fn on_project_created(&mut self, outcome: Result<Project, DispatchError>) {
        let Some(flow) = self.project_flow.as_mut() else {
            tracing::debug!("Create result arrived after the form closed");
            return;
        };
        match flow.finish_create(outcome) {
            // Only the template path creates without redirect; hand the
            // project to the picker whatever the menu shows now
            Ok(CreateOutcome::Retained(project)) => match flow.start_apply_template() {
                Ok(dispatch) => self.spawn_dispatch(dispatch, UiEvent::TemplateApplied),
                Err(err) => {
                    tracing::warn!("Project {} kept without a template: {}", project.id, err);
                    self.push_error(format!(
                        "Project \"{}\" was created but the template could not be applied: {err}",
                        project.name
                    ));
                }
            },
            Ok(CreateOutcome::Completed(_)) => {}
            // Failures are shown inline by the form
            Err(_) => {}
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::ProjectCreate => self.handle_project_create_key(key),
            View::PasswordReset => self.handle_password_reset_key(key),
            View::Login => self.handle_login_key(key),
            View::ProjectDetail => self.handle_project_detail_key(key),
        }
        Ok(())
    }

    fn handle_project_create_key(&mut self, key: KeyEvent) {
        let Some(flow) = self.project_flow.as_mut() else {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.quit = true;
            }
            return;
        };

        let is_save = key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL);
        if is_save {
            match flow.active_menu() {
                ActiveMenu::Empty => self.submit_project(),
                ActiveMenu::Template => self.submit_template(),
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.close_project_create(),
            KeyCode::Tab => flow.form.next_field(),
            KeyCode::BackTab => flow.form.prev_field(),
            _ => match flow.form.active_row() {
                ProjectFormRow::Name => match key.code {
                    KeyCode::Char(c) => flow.input_char(c),
                    KeyCode::Backspace => flow.backspace(),
                    KeyCode::Down => flow.form.next_field(),
                    KeyCode::Enter => match flow.active_menu() {
                        ActiveMenu::Empty => self.submit_project(),
                        ActiveMenu::Template => flow.form.next_field(),
                    },
                    _ => {}
                },
                ProjectFormRow::Mode => match key.code {
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => {
                        flow.toggle_menu();
                    }
                    KeyCode::Up => flow.form.prev_field(),
                    KeyCode::Down => flow.form.next_field(),
                    _ => {}
                },
                ProjectFormRow::Actions => match (flow.active_menu(), key.code) {
                    (ActiveMenu::Empty, KeyCode::Enter) => self.submit_project(),
                    (ActiveMenu::Empty, KeyCode::Up) => flow.form.prev_field(),
                    (ActiveMenu::Template, KeyCode::Up | KeyCode::Char('k')) => {
                        flow.prev_template()
                    }
                    (ActiveMenu::Template, KeyCode::Down | KeyCode::Char('j')) => {
                        flow.next_template()
                    }
                    (ActiveMenu::Template, KeyCode::Enter) => self.submit_template(),
                    _ => {}
                },
            },
        }
    }

    fn submit_project(&mut self) {
        let Some(flow) = self.project_flow.as_mut() else {
            return;
        };
        match flow.start_create(false) {
            Ok(dispatch) => self.spawn_dispatch(dispatch, UiEvent::ProjectCreateFinished),
            Err(SubmitError::Invalid(_)) => {}
            Err(err) => self.state.status_message = Some(err.to_string()),
        }
    }

    /// Create without redirect (once), then apply the selected template
    fn submit_template(&mut self) {
        let Some(flow) = self.project_flow.as_mut() else {
            return;
        };
        let result = if flow.created().is_some() {
            flow.start_apply_template()
                .map(|dispatch| self.spawn_dispatch(dispatch, UiEvent::TemplateApplied))
        } else if flow.selected_template().is_none() {
            Err(SubmitError::Unavailable("Select a template first"))
        } else {
            flow.start_create(true)
                .map(|dispatch| self.spawn_dispatch(dispatch, UiEvent::ProjectCreateFinished))
        };
        match result {
            Ok(()) | Err(SubmitError::Invalid(_)) => {}
            Err(err) => self.state.status_message = Some(err.to_string()),
        }
    }

    fn handle_password_reset_key(&mut self, key: KeyEvent) {
        let Some(flow) = self.reset_flow.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => flow.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => flow.form.prev_field(),
            KeyCode::Enter => self.submit_password(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_password()
            }
            KeyCode::Char(c) => flow.input_char(c),
            KeyCode::Backspace => flow.backspace(),
            _ => {}
        }
    }

    fn submit_password(&mut self) {
        let Some(flow) = self.reset_flow.as_mut() else {
            return;
        };
        match flow.start_submit() {
            Ok(dispatch) => self.spawn_dispatch(dispatch, UiEvent::PasswordChangeFinished),
            Err(SubmitError::Invalid(_)) => {}
            Err(err) => self.state.status_message = Some(err.to_string()),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
            self.quit = true;
        }
    }

    fn handle_project_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => self.open_project_create(),
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockActionDispatcher, MockTemplatePicker};
    use crate::flows::REQUEST_FAILED_MESSAGE;
    use crate::state::SubmissionStatus;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    /// Let spawned requests finish and feed their results back
    async fn pump(app: &mut App) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
            app.process_events();
        }
    }

    fn team(id: i64) -> Team {
        Team {
            id,
            name: format!("Team {id}"),
        }
    }

    fn project(id: i64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            team_id: 7,
            brew_name: None,
            created_at: None,
        }
    }

    fn dispatcher_with_team() -> MockActionDispatcher {
        let mut dispatcher = MockActionDispatcher::new();
        dispatcher
            .expect_list_teams()
            .returning(|| Ok(vec![team(3), team(7)]));
        dispatcher.expect_list_templates().with(mockall::predicate::eq(7)).returning(|_| {
            Ok(vec![Template {
                id: 21,
                name: "Web analytics".to_string(),
                description: None,
            }])
        });
        dispatcher
    }

    fn create_app(dispatcher: MockActionDispatcher, picker: MockTemplatePicker) -> App {
        // team 7 is what list_teams returns, so nothing is written to disk
        let config = DashboardConfig {
            team_id: Some(7),
            ..Default::default()
        };
        App::new(config, false, Arc::new(dispatcher), Arc::new(picker))
    }

    #[tokio::test]
    async fn test_start_opens_project_create_in_configured_team() {
        let mut app = create_app(dispatcher_with_team(), MockTemplatePicker::new());
        app.start(None);
        pump(&mut app).await;
        pump(&mut app).await;

        assert_eq!(app.state.current_view, View::ProjectCreate);
        assert_eq!(app.state.active_team, Some(team(7)));
        let flow = app.project_flow.as_ref().unwrap();
        assert!(!flow.templates().loading);
        assert_eq!(flow.templates().data.len(), 1);
    }

    #[tokio::test]
    async fn test_start_falls_back_to_configured_team_when_listing_fails() {
        let mut dispatcher = MockActionDispatcher::new();
        dispatcher
            .expect_list_teams()
            .returning(|| Err(DispatchError::Rejected("offline".to_string())));
        dispatcher
            .expect_list_templates()
            .returning(|_| Ok(Vec::new()));
        let mut app = create_app(dispatcher, MockTemplatePicker::new());
        app.start(None);
        pump(&mut app).await;

        assert_eq!(app.state.active_team.as_ref().map(|t| t.id), Some(7));
        assert_eq!(app.state.current_error(), Some("Failed to load teams: offline"));
        assert!(app.project_flow.is_some());
    }

    #[tokio::test]
    async fn test_start_with_reset_link_opens_password_reset() {
        let mut dispatcher = MockActionDispatcher::new();
        dispatcher.expect_list_teams().never();
        let mut app = create_app(dispatcher, MockTemplatePicker::new());
        app.push_error("stale error");

        app.start(Some("https://dash.example.com/passwordReset?token=t&hash=h"));

        assert_eq!(app.state.current_view, View::PasswordReset);
        assert!(!app.state.has_errors());
        let token = app.reset_flow.as_ref().unwrap().token();
        assert_eq!(token.token(), Some("t"));
        assert_eq!(token.hash(), Some("h"));
    }

    #[tokio::test]
    async fn test_create_project_from_keyboard() {
        let mut dispatcher = dispatcher_with_team();
        dispatcher
            .expect_create_project()
            .times(1)
            .returning(|p| Ok(project(4, &p.name)));
        let mut app = create_app(dispatcher, MockTemplatePicker::new());
        app.start(None);
        pump(&mut app).await;

        type_text(&mut app, "My Project");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.project_flow.as_ref().unwrap().status().is_loading());

        pump(&mut app).await;

        assert_eq!(app.state.current_view, View::ProjectDetail);
        assert_eq!(app.state.project, Some(project(4, "My Project")));
        assert!(app.project_flow.is_none());
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Project \"My Project\" created")
        );
    }

    #[tokio::test]
    async fn test_blank_name_does_not_submit() {
        let mut dispatcher = dispatcher_with_team();
        dispatcher.expect_create_project().never();
        let mut app = create_app(dispatcher, MockTemplatePicker::new());
        app.start(None);
        pump(&mut app).await;

        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        pump(&mut app).await;

        let flow = app.project_flow.as_ref().unwrap();
        assert!(flow.status().is_idle());
        assert!(flow.error_message().is_some());
        assert_eq!(app.state.current_view, View::ProjectCreate);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_from_template_from_keyboard() {
        let mut dispatcher = dispatcher_with_team();
        dispatcher
            .expect_create_project()
            .times(1)
            .returning(|p| Ok(project(8, &p.name)));
        let mut picker = MockTemplatePicker::new();
        picker
            .expect_apply()
            .withf(|team_id, project_id, template| {
                *team_id == 7 && *project_id == 8 && template.id == 21
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mut app = create_app(dispatcher, picker);
        app.start(None);
        pump(&mut app).await;
        pump(&mut app).await;

        type_text(&mut app, "Traffic");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        pump(&mut app).await;

        let flow = app.project_flow.as_ref().unwrap();
        assert_eq!(flow.active_menu(), ActiveMenu::Template);
        assert_eq!(flow.created().map(|p| p.id), Some(8));
        assert_eq!(flow.template_status(), &SubmissionStatus::Succeeded(()));
        assert_eq!(app.state.current_view, View::ProjectCreate);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        pump(&mut app).await;

        assert_eq!(app.state.current_view, View::ProjectDetail);
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Project \"Traffic\" created from template")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_reset_redirects_to_login() {
        let mut dispatcher = MockActionDispatcher::new();
        dispatcher
            .expect_change_password()
            .times(1)
            .returning(|_| Ok(()));
        let mut app = create_app(dispatcher, MockTemplatePicker::new());
        app.start(Some("?token=t&hash=h"));

        type_text(&mut app, "abcdef");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "abcdef");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        pump(&mut app).await;

        let flow = app.reset_flow.as_ref().unwrap();
        assert!(flow.status().is_succeeded());
        assert_eq!(app.state.current_view, View::PasswordReset);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        pump(&mut app).await;

        assert_eq!(app.state.current_view, View::Login);
        assert!(app.reset_flow.is_none());
    }

    #[tokio::test]
    async fn test_password_failure_keeps_page() {
        let mut dispatcher = MockActionDispatcher::new();
        dispatcher
            .expect_change_password()
            .returning(|_| Err(DispatchError::Rejected("network error".to_string())));
        let mut app = create_app(dispatcher, MockTemplatePicker::new());
        app.start(Some("?token=t&hash=h"));

        type_text(&mut app, "abcdef");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "abcdef");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        pump(&mut app).await;

        let flow = app.reset_flow.as_ref().unwrap();
        assert_eq!(flow.error_message().as_deref(), Some(REQUEST_FAILED_MESSAGE));
        assert_eq!(flow.form.password.as_text(), "abcdef");
        assert_eq!(app.state.current_view, View::PasswordReset);
    }

    #[tokio::test]
    async fn test_templates_failure_pushes_error() {
        let mut dispatcher = MockActionDispatcher::new();
        dispatcher
            .expect_list_teams()
            .returning(|| Ok(vec![team(7)]));
        dispatcher
            .expect_list_templates()
            .returning(|_| Err(DispatchError::Rejected("forbidden".to_string())));
        let mut app = create_app(dispatcher, MockTemplatePicker::new());
        app.start(None);
        pump(&mut app).await;
        pump(&mut app).await;

        assert_eq!(
            app.state.current_error(),
            Some("Failed to load templates: forbidden")
        );
        assert!(!app.project_flow.as_ref().unwrap().templates().loading);
    }

    #[tokio::test]
    async fn test_error_dialog_swallows_keys_until_dismissed() {
        let mut app = create_app(dispatcher_with_team(), MockTemplatePicker::new());
        app.start(None);
        pump(&mut app).await;
        app.push_error("boom");

        type_text(&mut app, "x");
        assert_eq!(app.project_flow.as_ref().unwrap().form.name.as_text(), "");

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!app.state.has_errors());
        assert!(!app.should_quit());

        type_text(&mut app, "x");
        assert_eq!(app.project_flow.as_ref().unwrap().form.name.as_text(), "x");
    }

    #[tokio::test]
    async fn test_escape_closes_project_form() {
        let mut app = create_app(dispatcher_with_team(), MockTemplatePicker::new());
        app.start(None);
        pump(&mut app).await;

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.project_flow.is_none());
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_unknown_redirect_is_ignored() {
        let mut app = create_app(MockActionDispatcher::new(), MockTemplatePicker::new());
        app.start(Some("?token=t"));

        app.events_tx
            .send(UiEvent::Navigate("/nowhere".to_string()))
            .unwrap();
        assert!(app.process_events());
        assert_eq!(app.state.current_view, View::PasswordReset);
        assert!(app.reset_flow.is_some());
    }

    #[tokio::test]
    async fn test_start_draws_before_teams_arrive() {
        let mut app = create_app(dispatcher_with_team(), MockTemplatePicker::new());
        app.start(None);

        assert_eq!(app.state.current_view, View::ProjectCreate);
        assert_eq!(app.state.status_message.as_deref(), Some("Loading teams..."));
        assert!(app.project_flow.is_none());
        type_text(&mut app, "x");
        assert!(!app.should_quit());

        pump(&mut app).await;
        assert_eq!(app.state.status_message, None);
        assert_eq!(app.state.active_team, Some(team(7)));
        assert!(app.project_flow.is_some());
    }

    /// Type a name, switch to template mode and land on the template list
    fn choose_template_mode(app: &mut App, name: &str) {
        type_text(app, name);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap();
    }

    fn single_apply_picker() -> MockTemplatePicker {
        let mut picker = MockTemplatePicker::new();
        picker.expect_apply().times(1).returning(|_, _, _| Ok(()));
        picker
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_during_template_transition_applies_once() {
        let mut dispatcher = dispatcher_with_team();
        dispatcher
            .expect_create_project()
            .times(1)
            .returning(|p| Ok(project(8, &p.name)));
        let mut app = create_app(dispatcher, single_apply_picker());
        app.start(None);
        pump(&mut app).await;
        pump(&mut app).await;

        choose_template_mode(&mut app, "Traffic");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        pump(&mut app).await;

        app.handle_key(key(KeyCode::Enter)).unwrap();
        pump(&mut app).await;

        assert_eq!(app.project_flow.as_ref().unwrap().pending_timers(), 1);
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("The form was already submitted")
        );

        tokio::time::sleep(Duration::from_millis(1001)).await;
        pump(&mut app).await;
        assert_eq!(app.state.current_view, View::ProjectDetail);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_switch_while_creating_keeps_template_path() {
        let mut dispatcher = dispatcher_with_team();
        dispatcher
            .expect_create_project()
            .times(1)
            .returning(|p| Ok(project(8, &p.name)));
        let mut app = create_app(dispatcher, single_apply_picker());
        app.start(None);
        pump(&mut app).await;
        pump(&mut app).await;

        choose_template_mode(&mut app, "Traffic");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::BackTab)).unwrap();
        app.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(
            app.project_flow.as_ref().unwrap().active_menu(),
            ActiveMenu::Template
        );

        pump(&mut app).await;
        tokio::time::sleep(Duration::from_millis(2000)).await;
        pump(&mut app).await;

        assert_eq!(app.state.current_view, View::ProjectDetail);
        assert_eq!(app.state.project.as_ref().map(|p| p.id), Some(8));
        assert!(!app.state.has_errors());
    }
}
