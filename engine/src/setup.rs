//! Group and roster setup.

use crate::{Group, Team, Tournament};
use serde::{Deserialize, Serialize};

pub const MAX_GROUPS: usize = 12;
pub const MIN_GROUP_SIZE: usize = 3;
pub const MAX_GROUP_SIZE: usize = 6;
pub const DEFAULT_GROUP_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub groups: Vec<GroupSetup>,
}

/// One group as entered at setup. Missing sizes default to four; names
/// beyond the size are ignored and missing ones get a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSetup {
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub teams: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self::uniform(4, DEFAULT_GROUP_SIZE)
    }
}

impl SetupConfig {
    /// `count` groups of `size` placeholder teams.
    pub fn uniform(count: usize, size: usize) -> Self {
        Self {
            groups: vec![
                GroupSetup {
                    size: Some(size),
                    teams: Vec::new(),
                };
                count
            ],
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build the tournament. Groups are lettered A, B, ... and at least one
    /// group is always produced.
    pub fn build(&self) -> Tournament {
        let count = self.groups.len().clamp(1, MAX_GROUPS);
        let groups = (0..count)
            .map(|i| {
                let letter = group_letter(i);
                let group_setup = self.groups.get(i).cloned().unwrap_or_default();
                let size = group_setup
                    .size
                    .unwrap_or(DEFAULT_GROUP_SIZE)
                    .clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);
                let teams = (0..size)
                    .map(|slot| {
                        let id = format!("{letter}{}", slot + 1);
                        let name = group_setup
                            .teams
                            .get(slot)
                            .map(|n| n.trim())
                            .filter(|n| !n.is_empty())
                            .map(str::to_owned)
                            .unwrap_or_else(|| format!("Team {id}"));
                        Team::new(id, name)
                    })
                    .collect();
                Group {
                    name: letter.to_string(),
                    teams,
                    standings: Vec::new(),
                }
            })
            .collect();

        Tournament { groups }
    }
}

pub fn group_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}
