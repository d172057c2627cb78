//! Username/password login and the role capability check.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    GroupEditor,
    #[default]
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::GroupEditor => "group editor",
            Role::Viewer => "viewer",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    EditResult,
    RandomizeResults,
    ResetResults,
    RenameTeam,
    ResetTournament,
}

impl Role {
    pub fn permits(self, action: Action) -> bool {
        match self {
            Role::Admin => true,
            Role::GroupEditor => action == Action::EditResult,
            Role::Viewer => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn can(&self, action: Action) -> bool {
        self.role.permits(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub password: String,
    pub role: Role,
}

/// Known users, keyed by username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialTable {
    #[serde(default)]
    pub users: HashMap<String, Credential>,
}

impl CredentialTable {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Both inputs are trimmed before the lookup.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let username = username.trim();
        let credential = self.users.get(username)?;
        (credential.password == password.trim()).then(|| User::new(username, credential.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CredentialTable {
        CredentialTable::from_json(
            r#"{"users":{
                "marta":{"password":"admin123","role":"admin"},
                "pm":{"password":"group123","role":"groupEditor"},
                "guest":{"password":"guest","role":"viewer"}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn admin_may_do_everything() {
        for action in [
            Action::EditResult,
            Action::RandomizeResults,
            Action::ResetResults,
            Action::RenameTeam,
            Action::ResetTournament,
        ] {
            assert!(Role::Admin.permits(action));
            assert!(!Role::Viewer.permits(action));
        }
    }

    #[test]
    fn group_editor_only_edits_results() {
        assert!(Role::GroupEditor.permits(Action::EditResult));
        assert!(!Role::GroupEditor.permits(Action::RandomizeResults));
        assert!(!Role::GroupEditor.permits(Action::ResetResults));
        assert!(!Role::GroupEditor.permits(Action::RenameTeam));
        assert!(!Role::GroupEditor.permits(Action::ResetTournament));
    }

    #[test]
    fn authenticate_trims_and_checks_password() {
        let users = table();
        assert_eq!(
            users.authenticate(" pm ", "group123 "),
            Some(User::new("pm", Role::GroupEditor))
        );
        assert_eq!(users.authenticate("pm", "admin123"), None);
        assert_eq!(users.authenticate("nobody", "x"), None);
        assert!(users.authenticate("marta", "admin123").unwrap().can(Action::ResetTournament));
    }
}
