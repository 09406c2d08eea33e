//! Project creation flow
//!
//! Collects a project name, lets the user choose between an empty project and
//! one generated from a template, and creates it through the injected
//! [`ActionDispatcher`]. On success the project is either handed straight to
//! the completion callback or retained for the template sub-flow, which
//! completes after a short delay.

use crate::api::{ActionDispatcher, NewProject, TemplatePicker};
use crate::error::{DispatchError, SubmitError, ValidationError};
use crate::state::{
    AsyncSubmitter, Dispatch, Form, Project, ProjectCreateForm, SubmissionStatus, Team, Template,
    TimerScope, Validate,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Delay before completing after a template was applied, leaving room for
/// the transition out of the template view
pub const TEMPLATE_COMPLETE_DELAY: Duration = Duration::from_millis(1000);

/// Shown when the API fails without saying why
const CREATE_FAILED_MESSAGE: &str = "The project could not be created, please try again.";

/// Completion callback: the created project and whether to redirect to it
pub type OnComplete = Arc<dyn Fn(Project, bool) + Send + Sync>;

/// Which creation mode is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveMenu {
    #[default]
    Empty,
    Template,
}

impl ActiveMenu {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Empty => Self::Template,
            Self::Template => Self::Empty,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "Empty project",
            Self::Template => "From template",
        }
    }
}

/// Templates offered to the team, with their loading flag
#[derive(Debug, Clone, Default)]
pub struct TemplateList {
    pub data: Vec<Template>,
    pub loading: bool,
}

impl TemplateList {
    pub fn loading() -> Self {
        Self {
            data: Vec::new(),
            loading: true,
        }
    }
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The completion callback has been invoked with the project
    Completed(Project),
    /// Returned to the caller only (no-redirect submissions)
    Retained(Project),
}

impl CreateOutcome {
    pub fn project(&self) -> &Project {
        match self {
            Self::Completed(project) | Self::Retained(project) => project,
        }
    }
}

pub struct ProjectCreationFlow {
    id: Uuid,
    pub form: ProjectCreateForm,
    submitter: AsyncSubmitter<Project>,
    template_submitter: AsyncSubmitter<()>,
    validation_error: Option<ValidationError>,
    active_menu: ActiveMenu,
    created: Option<Project>,
    team: Team,
    templates: TemplateList,
    selected_template: usize,
    no_redirect: bool,
    dispatcher: Arc<dyn ActionDispatcher>,
    picker: Arc<dyn TemplatePicker>,
    on_complete: OnComplete,
    timers: TimerScope,
}

impl ProjectCreationFlow {
    pub fn new(
        team: Team,
        templates: TemplateList,
        hide_type: bool,
        dispatcher: Arc<dyn ActionDispatcher>,
        picker: Arc<dyn TemplatePicker>,
        on_complete: OnComplete,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(flow = %id, team_id = team.id, "Opening project creation flow");
        Self {
            id,
            form: ProjectCreateForm::new(hide_type),
            submitter: AsyncSubmitter::new(),
            template_submitter: AsyncSubmitter::new(),
            validation_error: None,
            active_menu: ActiveMenu::Empty,
            created: None,
            team,
            templates,
            selected_template: 0,
            no_redirect: false,
            dispatcher,
            picker,
            on_complete,
            timers: TimerScope::new(),
        }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn status(&self) -> &SubmissionStatus<Project> {
        self.submitter.status()
    }

    pub fn template_status(&self) -> &SubmissionStatus<()> {
        self.template_submitter.status()
    }

    pub fn active_menu(&self) -> ActiveMenu {
        self.active_menu
    }

    /// Project returned by the last successful create
    pub fn created(&self) -> Option<&Project> {
        self.created.as_ref()
    }

    pub fn templates(&self) -> &TemplateList {
        &self.templates
    }

    pub fn selected_template_index(&self) -> usize {
        self.selected_template
    }

    pub fn selected_template(&self) -> Option<&Template> {
        self.templates.data.get(self.selected_template)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Message to show under the name field, if any
    pub fn error_message(&self) -> Option<String> {
        if let Some(err) = self.validation_error {
            return Some(err.to_string());
        }
        self.submitter
            .status()
            .error()
            .or_else(|| self.template_submitter.status().error())
            .map(str::to_string)
    }

    pub fn is_busy(&self) -> bool {
        self.submitter.is_loading() || self.template_submitter.is_loading()
    }

    /// Whether the create button is enabled
    pub fn can_submit(&self) -> bool {
        !self.form.name.is_blank() && !self.is_busy()
    }

    /// Whether the Empty/Template selector is enabled. The mode is fixed
    /// while a request runs and once a project exists.
    pub fn can_choose_menu(&self) -> bool {
        self.form.shows_mode()
            && !self.form.name.is_blank()
            && !self.is_busy()
            && self.created.is_none()
    }

    /// The name can no longer change once the template path created the
    /// project; a retry applies the template to that project.
    pub fn name_locked(&self) -> bool {
        self.created.is_some()
    }

    pub fn select_menu(&mut self, menu: ActiveMenu) -> bool {
        if !self.can_choose_menu() {
            return false;
        }
        self.active_menu = menu;
        true
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.select_menu(self.active_menu.toggle())
    }

    pub fn input_char(&mut self, c: char) {
        if self.name_locked() {
            return;
        }
        if let Some(field) = self.form.get_active_field_mut() {
            field.push_char(c);
            self.on_edit();
        }
    }

    pub fn backspace(&mut self) {
        if self.name_locked() {
            return;
        }
        if let Some(field) = self.form.get_active_field_mut() {
            field.pop_char();
            self.on_edit();
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.name_locked() {
            tracing::debug!(flow = %self.id, "Ignoring rename of a created project");
            return;
        }
        self.form.name.set_text(name);
        self.on_edit();
    }

    fn on_edit(&mut self) {
        self.validation_error = None;
        self.submitter.reset();
        self.template_submitter.reset();
    }

    /// Replace the template list once it has loaded
    pub fn set_templates(&mut self, templates: Vec<Template>) {
        self.templates = TemplateList {
            data: templates,
            loading: false,
        };
        if self.selected_template >= self.templates.data.len() {
            self.selected_template = 0;
        }
    }

    pub fn templates_failed(&mut self) {
        self.templates.loading = false;
    }

    pub fn next_template(&mut self) {
        let count = self.templates.data.len();
        if count > 0 {
            self.selected_template = (self.selected_template + 1) % count;
        }
    }

    pub fn prev_template(&mut self) {
        let count = self.templates.data.len();
        if count > 0 {
            self.selected_template = (self.selected_template + count - 1) % count;
        }
    }

    /// Validate and enter Loading, returning the request to run.
    ///
    /// With `no_redirect` the completion callback is not invoked on success;
    /// the created project is only returned.
    pub fn start_create(&mut self, no_redirect: bool) -> Result<Dispatch<Project>, SubmitError> {
        if self.submitter.is_loading() {
            return Err(SubmitError::InFlight);
        }
        if let Err(err) = self.form.validate() {
            self.validation_error = Some(err);
            return Err(err.into());
        }
        self.submitter.begin()?;
        self.validation_error = None;
        self.no_redirect = no_redirect;

        let payload = NewProject {
            name: self.form.name.as_text().to_string(),
            team_id: self.team.id,
        };
        tracing::info!(
            flow = %self.id,
            team_id = payload.team_id,
            attempt = self.submitter.dispatched(),
            "Creating project"
        );

        let dispatcher = Arc::clone(&self.dispatcher);
        Ok(Box::pin(
            async move { dispatcher.create_project(payload).await },
        ))
    }

    /// Apply the outcome of a request started with [`Self::start_create`]
    pub fn finish_create(
        &mut self,
        outcome: Result<Project, DispatchError>,
    ) -> Result<CreateOutcome, String> {
        let flow = self.id;
        let project = self.submitter.resolve(outcome, |err| {
            tracing::warn!(flow = %flow, "Project creation failed: {}", err);
            let message = err.to_string();
            if message.trim().is_empty() {
                CREATE_FAILED_MESSAGE.to_string()
            } else {
                message
            }
        })?;

        tracing::info!(flow = %self.id, project_id = project.id, "Project created");
        self.form.clear();
        self.created = Some(project.clone());

        if self.no_redirect {
            return Ok(CreateOutcome::Retained(project));
        }
        (self.on_complete)(project.clone(), true);
        Ok(CreateOutcome::Completed(project))
    }

    /// Create the project and wait for the result
    pub async fn create(&mut self, no_redirect: bool) -> Result<CreateOutcome, SubmitError> {
        let dispatch = self.start_create(no_redirect)?;
        let outcome = dispatch.await;
        self.finish_create(outcome).map_err(SubmitError::Failed)
    }

    /// Hand the created project and the selected template to the picker
    pub fn start_apply_template(&mut self) -> Result<Dispatch<()>, SubmitError> {
        let project_id = self
            .created
            .as_ref()
            .map(|p| p.id)
            .ok_or(SubmitError::Unavailable("No project has been created yet"))?;
        let template = self
            .selected_template()
            .cloned()
            .ok_or(SubmitError::Unavailable("Select a template first"))?;
        if self.template_submitter.status().is_succeeded() {
            return Err(SubmitError::Completed);
        }
        self.template_submitter.begin()?;

        tracing::info!(
            flow = %self.id,
            project_id,
            template_id = template.id,
            "Applying template"
        );
        let picker = Arc::clone(&self.picker);
        let team_id = self.team.id;
        Ok(Box::pin(async move {
            picker.apply(team_id, project_id, template).await
        }))
    }

    pub fn finish_apply_template(&mut self, outcome: Result<(), DispatchError>) -> Result<(), String> {
        let flow = self.id;
        self.template_submitter.resolve(outcome, |err| {
            tracing::warn!(flow = %flow, "Applying template failed: {}", err);
            err.to_string()
        })?;
        self.complete_template();
        Ok(())
    }

    /// Schedule the completion callback for the template path.
    ///
    /// Returns false when no project has been created yet.
    pub fn complete_template(&mut self) -> bool {
        let Some(project) = self.created.clone() else {
            tracing::warn!(flow = %self.id, "Template completed without a created project");
            return false;
        };
        let on_complete = Arc::clone(&self.on_complete);
        self.timers
            .schedule("template-complete", TEMPLATE_COMPLETE_DELAY, move || {
                on_complete(project, false);
            });
        true
    }

    /// Full template path: create without redirect (unless a project was
    /// already created by an earlier attempt), apply the template, then
    /// schedule completion.
    pub async fn create_from_template(&mut self) -> Result<Project, SubmitError> {
        if self.selected_template().is_none() {
            return Err(SubmitError::Unavailable("Select a template first"));
        }
        let project = match self.created.clone() {
            Some(project) => project,
            None => self.create(true).await?.project().clone(),
        };
        let dispatch = self.start_apply_template()?;
        let outcome = dispatch.await;
        self.finish_apply_template(outcome)
            .map_err(SubmitError::Failed)?;
        Ok(project)
    }
}

impl Drop for ProjectCreationFlow {
    fn drop(&mut self) {
        tracing::debug!(
            flow = %self.id,
            pending_timers = self.timers.pending(),
            "Closing project creation flow"
        );
        self.timers.cancel_all();
    }
}
