use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, InputMode, LoginForm};
use crate::state::messages::StorageRequest;
use chrono::{DateTime, Utc};
use cuptable_engine::{TournamentDocument, fixtures};
use cuptable_engine::auth::{Action, Role, User};
use cuptable_engine::results::{self, Side};
use log::{info, warn};
use rand::Rng;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    GroupStage,
    Standings,
    Rankings,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let session = match settings.credentials {
            Some(_) => None,
            None => Some(User::new(settings.user.clone(), Role::Admin)),
        };

        let app = Self {
            state: AppState::new(session),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Storage responses, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Install a loaded document. A user with no stored tournament gets a
    /// fresh one from setup, which is returned for saving.
    pub fn on_document_loaded(&mut self, document: Option<Box<TournamentDocument>>) -> Option<StorageRequest> {
        if self.state.pending_saves > 0 {
            // Local edits are newer than whatever the store returned.
            return None;
        }
        self.state.last_error = None;
        match document {
            Some(mut document) => {
                let needs_fixtures = document.matches.is_empty() && !document.tournament.groups.is_empty();
                if needs_fixtures {
                    document.matches = fixtures::generate(&document.tournament);
                    info!("generated {} fixtures for stored tournament", document.matches.len());
                }
                document.refresh_standings();
                self.state.group_stage.clamp(&document);
                let generated = needs_fixtures && !document.matches.is_empty();
                self.state.document = Some(*document);
                if generated {
                    self.save_request()
                } else {
                    None
                }
            }
            None => {
                info!("creating tournament for {} from setup", self.settings.user);
                self.install_fresh_document();
                self.save_request()
            }
        }
    }

    pub fn on_document_saved(&mut self, at: DateTime<Utc>) {
        self.state.pending_saves = self.state.pending_saves.saturating_sub(1);
        self.state.last_saved = Some(at);
    }

    pub fn on_error(&mut self, message: String, during_save: bool) {
        if during_save {
            self.state.pending_saves = self.state.pending_saves.saturating_sub(1);
        }
        self.state.last_error = Some(message);
    }

    /// Ask to leave. Returns true when nothing is left to save and the UI
    /// loop may stop now.
    pub fn request_quit(&mut self) -> bool {
        self.state.quit_requested = true;
        if self.state.pending_saves > 0 {
            self.state.status = Some(format!("saving {} change(s) before quitting", self.state.pending_saves));
        }
        self.ready_to_quit()
    }

    pub fn ready_to_quit(&self) -> bool {
        self.state.quit_requested && self.state.pending_saves == 0
    }

    pub fn load_request(&self) -> StorageRequest {
        StorageRequest::Load { user: self.settings.user.clone() }
    }

    /// Recompute standings, stamp the document and hand a copy to the store.
    fn save_request(&mut self) -> Option<StorageRequest> {
        let document = self.state.document.as_mut()?;
        document.refresh_standings();
        document.touch();
        self.state.pending_saves += 1;
        Some(StorageRequest::Save {
            user: self.settings.user.clone(),
            document: Box::new(document.clone()),
        })
    }

    fn install_fresh_document(&mut self) {
        let document = TournamentDocument::from_setup(&self.settings.setup);
        self.state.group_stage.clamp(&document);
        self.state.document = Some(document);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.standings_scroll = 0;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn scroll_down(&mut self) {
        self.state.standings_scroll = self.state.standings_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.state.standings_scroll = self.state.standings_scroll.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Group stage navigation
    // -----------------------------------------------------------------------

    pub fn cycle_group(&mut self) {
        let count = self.state.document.as_ref().map_or(0, |d| d.tournament.groups.len());
        self.state.group_stage.cycle_group(count);
    }

    pub fn match_down(&mut self) {
        let Some(document) = self.state.document.as_ref() else {
            return;
        };
        let count = self
            .state
            .group_stage
            .group_name(document)
            .map_or(0, |g| document.matches_in_group(g).count());
        self.state.group_stage.match_down(count);
    }

    pub fn match_up(&mut self) {
        self.state.group_stage.match_up();
    }

    pub fn select_side(&mut self, side: Side) {
        self.state.group_stage.side = side;
    }

    fn selected_match_id(&self) -> Option<String> {
        let document = self.state.document.as_ref()?;
        self.state.group_stage.selected(document).map(|m| m.id.clone())
    }

    // -----------------------------------------------------------------------
    // Permissions
    // -----------------------------------------------------------------------

    pub fn role(&self) -> Role {
        self.state.session.as_ref().map_or(Role::Viewer, |u| u.role)
    }

    /// True when the session may perform `action`; otherwise records why not.
    fn allow(&mut self, action: Action) -> bool {
        let role = self.role();
        if role.permits(action) {
            return true;
        }
        warn!("{action:?} refused for role {role}");
        self.state.last_error = Some(format!("{} is not allowed for a {role}", describe(action)));
        false
    }

    // -----------------------------------------------------------------------
    // Result entry
    // -----------------------------------------------------------------------

    pub fn begin_goal_input(&mut self, first: char) {
        if self.selected_match_id().is_none() || !self.allow(Action::EditResult) {
            return;
        }
        self.state.input = InputMode::Goals { buffer: first.to_string() };
    }

    pub fn commit_goals(&mut self) -> Option<StorageRequest> {
        let InputMode::Goals { buffer } = std::mem::take(&mut self.state.input) else {
            return None;
        };
        let goals = results::parse_goals(&buffer);
        self.set_selected_goals(goals)
    }

    /// Clear the selected side's score.
    pub fn clear_selected_goals(&mut self) -> Option<StorageRequest> {
        if !self.allow(Action::EditResult) {
            return None;
        }
        self.set_selected_goals(None)
    }

    fn set_selected_goals(&mut self, goals: Option<u32>) -> Option<StorageRequest> {
        let match_id = self.selected_match_id()?;
        let side = self.state.group_stage.side;
        let document = self.state.document.as_mut()?;
        if !results::record_goals(&mut document.matches, &match_id, side, goals) {
            return None;
        }
        self.state.status = Some(format!("{match_id}: {}", goals.map_or("-".into(), |g| g.to_string())));
        self.save_request()
    }

    pub fn randomize_results<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<StorageRequest> {
        if !self.allow(Action::RandomizeResults) {
            return None;
        }
        results::randomize_results(&mut self.state.document.as_mut()?.matches, rng);
        self.state.status = Some("results randomized".into());
        self.save_request()
    }

    pub fn reset_results(&mut self) -> Option<StorageRequest> {
        if !self.allow(Action::ResetResults) {
            return None;
        }
        results::reset_results(&mut self.state.document.as_mut()?.matches);
        self.state.status = Some("results cleared".into());
        self.save_request()
    }

    /// Open the yes/no prompt for [`App::reset_tournament`].
    pub fn begin_reset_tournament(&mut self) {
        if self.state.document.is_none() || !self.allow(Action::ResetTournament) {
            return;
        }
        self.state.input = InputMode::ConfirmReset;
    }

    /// Answer the reset prompt: `y` rebuilds, anything else keeps the
    /// tournament.
    pub fn answer_reset(&mut self, answer: char) -> Option<StorageRequest> {
        if self.state.input != InputMode::ConfirmReset {
            return None;
        }
        self.state.input = InputMode::Normal;
        if answer.eq_ignore_ascii_case(&'y') {
            self.reset_tournament()
        } else {
            self.state.status = Some("reset cancelled".into());
            None
        }
    }

    /// Throw the tournament away and rebuild it from setup.
    pub fn reset_tournament(&mut self) -> Option<StorageRequest> {
        if !self.allow(Action::ResetTournament) {
            return None;
        }
        self.install_fresh_document();
        self.state.group_stage = Default::default();
        self.state.status = Some("tournament rebuilt from setup".into());
        self.save_request()
    }

    pub fn begin_rename(&mut self) {
        if !self.allow(Action::RenameTeam) {
            return;
        }
        let Some(document) = self.state.document.as_ref() else {
            return;
        };
        let Some(m) = self.state.group_stage.selected(document) else {
            return;
        };
        let team = match self.state.group_stage.side {
            Side::A => &m.team_a,
            Side::B => &m.team_b,
        };
        self.state.input = InputMode::Rename {
            team_id: team.id.clone(),
            buffer: document.display_name(team).to_owned(),
        };
    }

    pub fn commit_rename(&mut self) -> Option<StorageRequest> {
        let InputMode::Rename { team_id, buffer } = std::mem::take(&mut self.state.input) else {
            return None;
        };
        if !self.state.document.as_mut()?.rename_team(&team_id, &buffer) {
            return None;
        }
        self.state.status = Some(format!("renamed {team_id}"));
        self.save_request()
    }

    // -----------------------------------------------------------------------
    // Text entry
    // -----------------------------------------------------------------------

    pub fn push_char(&mut self, c: char) {
        match &mut self.state.input {
            InputMode::Normal | InputMode::ConfirmReset => {}
            InputMode::Goals { buffer } => {
                if c.is_ascii_digit() && buffer.len() < 3 {
                    buffer.push(c);
                }
            }
            InputMode::Rename { buffer, .. } => buffer.push(c),
            InputMode::Login(form) => form.field_mut().push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match &mut self.state.input {
            InputMode::Normal | InputMode::ConfirmReset => {}
            InputMode::Goals { buffer } | InputMode::Rename { buffer, .. } => {
                buffer.pop();
            }
            InputMode::Login(form) => {
                form.field_mut().pop();
            }
        }
    }

    pub fn cancel_input(&mut self) {
        self.state.input = InputMode::Normal;
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    pub fn begin_login(&mut self) {
        if self.settings.credentials.is_none() {
            self.state.status = Some("no users configured; running as local admin".into());
            return;
        }
        self.state.input = InputMode::Login(LoginForm::default());
    }

    /// Enter on the username moves to the password; Enter on the password
    /// checks the credentials.
    pub fn submit_login(&mut self) {
        let InputMode::Login(form) = &mut self.state.input else {
            return;
        };
        if !form.on_password {
            form.on_password = true;
            return;
        }
        let form = std::mem::take(form);
        self.state.input = InputMode::Normal;

        let Some(table) = self.settings.credentials.as_ref() else {
            return;
        };
        match table.authenticate(&form.username, &form.password) {
            Some(user) => {
                info!("{} logged in as {}", user.username, user.role);
                self.state.status = Some(format!("logged in as {} ({})", user.username, user.role));
                self.state.last_error = None;
                self.state.session = Some(user);
            }
            None => {
                warn!("failed login for {:?}", form.username.trim());
                self.state.last_error = Some("Invalid username or password".into());
            }
        }
    }
}

fn describe(action: Action) -> &'static str {
    match action {
        Action::EditResult => "Editing results",
        Action::RandomizeResults => "Randomizing results",
        Action::ResetResults => "Clearing results",
        Action::RenameTeam => "Renaming teams",
        Action::ResetTournament => "Resetting the tournament",
    }
}
