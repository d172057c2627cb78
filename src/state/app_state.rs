use crate::app::MenuItem;
use chrono::{DateTime, Utc};
use cuptable_engine::auth::User;
use cuptable_engine::results::Side;
use cuptable_engine::{Match, TournamentDocument};

// ---------------------------------------------------------------------------
// Text entry
// ---------------------------------------------------------------------------

/// What typed characters go to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Goals { buffer: String },
    Rename { team_id: String, buffer: String },
    Login(LoginForm),
    /// Yes/no prompt before the tournament is rebuilt from setup.
    ConfirmReset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub on_password: bool,
}

impl LoginForm {
    pub fn field_mut(&mut self) -> &mut String {
        if self.on_password { &mut self.password } else { &mut self.username }
    }
}

// ---------------------------------------------------------------------------
// Group stage cursor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct GroupStageState {
    /// Index into the tournament's groups.
    pub group: usize,
    /// Index into the selected group's matches.
    pub selected_match: usize,
    pub side: Side,
}

impl Default for GroupStageState {
    fn default() -> Self {
        Self { group: 0, selected_match: 0, side: Side::A }
    }
}

impl GroupStageState {
    pub fn cycle_group(&mut self, group_count: usize) {
        if group_count == 0 {
            return;
        }
        self.group = (self.group + 1) % group_count;
        self.selected_match = 0;
    }

    pub fn match_down(&mut self, match_count: usize) {
        if self.selected_match + 1 < match_count {
            self.selected_match += 1;
        }
    }

    pub fn match_up(&mut self) {
        self.selected_match = self.selected_match.saturating_sub(1);
    }

    /// Keep the cursor inside a document that may have changed shape.
    pub fn clamp(&mut self, document: &TournamentDocument) {
        let groups = &document.tournament.groups;
        if self.group >= groups.len() {
            self.group = 0;
        }
        let matches = groups
            .get(self.group)
            .map_or(0, |g| document.matches_in_group(&g.name).count());
        self.selected_match = self.selected_match.min(matches.saturating_sub(1));
    }

    pub fn group_name<'a>(&self, document: &'a TournamentDocument) -> Option<&'a str> {
        document.tournament.groups.get(self.group).map(|g| g.name.as_str())
    }

    pub fn selected<'a>(&self, document: &'a TournamentDocument) -> Option<&'a Match> {
        let group = self.group_name(document)?;
        document.matches_in_group(group).nth(self.selected_match)
    }
}

// ---------------------------------------------------------------------------
// Top-level state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub status: Option<String>,
    pub document: Option<TournamentDocument>,
    pub group_stage: GroupStageState,
    pub input: InputMode,
    pub session: Option<User>,
    pub last_saved: Option<DateTime<Utc>>,
    /// Saves sent to the store worker and not yet acknowledged.
    pub pending_saves: usize,
    pub standings_scroll: u16,
    /// Set by `q`; the UI loop exits once `pending_saves` reaches zero.
    pub quit_requested: bool,
}

impl AppState {
    pub fn new(session: Option<User>) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }
}
