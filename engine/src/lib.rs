pub mod auth;
pub mod fixtures;
pub mod ranking;
pub mod results;
pub mod seeding;
pub mod setup;
pub mod standings;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Team id -> display name. Always wins over the name stored on the team.
pub type NameOverrides = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Domain types. camelCase on the wire to match stored tournament documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String, // "<GroupLetter><index>", e.g. "B3"
    pub name: String,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn display_name<'a>(&'a self, overrides: &'a NameOverrides) -> &'a str {
        overrides.get(&self.id).map(String::as_str).unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String, // "<group>-<index>"
    pub group: String,
    pub team_a: Team,
    pub team_b: Team,
    #[serde(default, deserialize_with = "goals::deserialize")]
    pub goals_a: Option<u32>,
    #[serde(default, deserialize_with = "goals::deserialize")]
    pub goals_b: Option<u32>,
}

impl Match {
    /// Both sides' goals, or None while the match is unplayed.
    pub fn score(&self) -> Option<(u32, u32)> {
        self.goals_a.zip(self.goals_b)
    }

    pub fn is_played(&self) -> bool {
        self.score().is_some()
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team_a.id == team_id || self.team_b.id == team_id
    }
}

/// One line of a group table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub id: String,
    pub team: String, // display name
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub gf: u32,
    pub ga: u32,
    pub gd: i32,
    pub points: u32,
}

impl StandingRow {
    pub fn new(id: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            team: team.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String, // single letter
    pub teams: Vec<Team>,
    #[serde(default)]
    pub standings: Vec<StandingRow>,
}

impl Group {
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub groups: Vec<Group>,
}

impl Tournament {
    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn find_team(&self, team_id: &str) -> Option<&Team> {
        self.groups.iter().find_map(|g| g.team(team_id))
    }
}

/// Everything persisted for one user: setup, fixtures with results, and
/// display-name overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDocument {
    #[serde(default)]
    pub tournament: Tournament,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub team_names: NameOverrides,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TournamentDocument {
    /// Build a fresh document from setup: groups, generated fixtures and
    /// zeroed standings.
    pub fn from_setup(config: &setup::SetupConfig) -> Self {
        let tournament = config.build();
        let matches = fixtures::generate(&tournament);
        let mut document = Self {
            tournament,
            matches,
            ..Default::default()
        };
        document.refresh_standings();
        document
    }

    /// Recompute every group's standings from scratch. Rows are stored in
    /// roster order; ranking happens on read.
    pub fn refresh_standings(&mut self) {
        let mut totals = standings::aggregate(&self.tournament.groups, &self.matches, &self.team_names);
        for group in &mut self.tournament.groups {
            let mut rows = totals.remove(&group.name).unwrap_or_default();
            group.standings = group
                .teams
                .iter()
                .filter_map(|team| rows.remove(&team.id))
                .collect();
        }
    }

    /// Ranked table for every group, in group order.
    pub fn ranked_tables(&self) -> Vec<(String, Vec<StandingRow>)> {
        self.tournament
            .groups
            .iter()
            .map(|g| (g.name.clone(), ranking::rank(g, &self.matches)))
            .collect()
    }

    pub fn seeding(&self) -> seeding::SeedingDraw {
        seeding::compose_seeding(&seeding::placings(self))
    }

    pub fn matches_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Match> + 'a {
        self.matches.iter().filter(move |m| m.group == group)
    }

    pub fn display_name<'a>(&'a self, team: &'a Team) -> &'a str {
        team.display_name(&self.team_names)
    }

    /// Set or clear (blank name) a display-name override. Returns false for
    /// an unknown team id.
    pub fn rename_team(&mut self, team_id: &str, name: &str) -> bool {
        if self.tournament.find_team(team_id).is_none() {
            return false;
        }
        let name = name.trim();
        if name.is_empty() {
            self.team_names.remove(team_id);
        } else {
            self.team_names.insert(team_id.to_owned(), name.to_owned());
        }
        self.refresh_standings();
        true
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Lenient goal parsing for stored documents: numbers, numeric strings,
/// empty strings and null are all accepted.
mod goals {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(clamp),
            Some(Value::String(s)) => crate::results::parse_goals(&s),
            _ => None,
        })
    }

    fn clamp(n: i64) -> u32 {
        n.clamp(0, i64::from(crate::results::MAX_GOALS)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_goals_accept_strings_numbers_and_blanks() {
        let json = r#"[
            {"id":"A-0","group":"A","teamA":{"id":"A1","name":"x"},"teamB":{"id":"A2","name":"y"},"goalsA":"3","goalsB":1},
            {"id":"A-1","group":"A","teamA":{"id":"A3","name":"x"},"teamB":{"id":"A4","name":"y"},"goalsA":"","goalsB":null},
            {"id":"A-2","group":"A","teamA":{"id":"A1","name":"x"},"teamB":{"id":"A3","name":"y"},"goalsA":"abc","goalsB":"-2"},
            {"id":"A-3","group":"A","teamA":{"id":"A2","name":"x"},"teamB":{"id":"A4","name":"y"}}
        ]"#;
        let matches: Vec<Match> = serde_json::from_str(json).unwrap();
        assert_eq!(matches[0].score(), Some((3, 1)));
        assert!(!matches[1].is_played());
        assert_eq!(matches[2].goals_a, None);
        assert_eq!(matches[2].goals_b, Some(0));
        assert_eq!(matches[3].score(), None);
    }

    #[test]
    fn oversized_stored_goals_are_clamped() {
        let doc = TournamentDocument::from_setup(&setup::SetupConfig::uniform(1, 4));
        let mut value = serde_json::to_value(&doc).unwrap();
        value["matches"][0]["goalsA"] = "99999999999".into();
        value["matches"][0]["goalsB"] = "0".into();
        value["matches"][2]["goalsA"] = serde_json::json!(4294967295u64);
        value["matches"][2]["goalsB"] = "5".into();

        let mut doc: TournamentDocument = serde_json::from_value(value).unwrap();
        assert_eq!(doc.matches[0].score(), Some((results::MAX_GOALS, 0)));
        assert_eq!(doc.matches[2].score(), Some((results::MAX_GOALS, 5)));

        doc.refresh_standings();
        let rows = &doc.tournament.groups[0].standings;
        for row in rows {
            assert_eq!(i64::from(row.gd), i64::from(row.gf) - i64::from(row.ga), "{}", row.id);
        }
        let a1 = rows.iter().find(|r| r.id == "A1").unwrap();
        assert_eq!((a1.gf, a1.ga, a1.points), (2 * results::MAX_GOALS, 0, 6));
    }

    #[test]
    fn document_uses_camel_case_field_names() {
        let mut doc = TournamentDocument::default();
        doc.team_names.insert("A1".into(), "Lions".into());
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("teamNames").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn display_name_prefers_override() {
        let team = Team::new("A1", "Team A1");
        let mut overrides = NameOverrides::new();
        assert_eq!(team.display_name(&overrides), "Team A1");
        overrides.insert("A1".into(), "Lions".into());
        assert_eq!(team.display_name(&overrides), "Lions");
    }

    #[test]
    fn from_setup_builds_fixtures_and_zeroed_tables() {
        let doc = TournamentDocument::from_setup(&setup::SetupConfig::default());
        assert_eq!(doc.tournament.groups.len(), 4);
        assert_eq!(doc.matches.len(), 24);
        for group in &doc.tournament.groups {
            assert_eq!(group.standings.len(), 4);
            assert!(group.standings.iter().all(|r| r.played == 0 && r.points == 0));
        }
    }

    #[test]
    fn rename_team_updates_standings_and_can_be_cleared() {
        let mut doc = TournamentDocument::from_setup(&setup::SetupConfig::default());
        assert!(doc.rename_team("B2", "  Eagles "));
        let row = doc.tournament.groups[1].standings.iter().find(|r| r.id == "B2").unwrap();
        assert_eq!(row.team, "Eagles");

        assert!(doc.rename_team("B2", ""));
        assert!(!doc.team_names.contains_key("B2"));
        assert!(!doc.rename_team("Z9", "Nobody"));
    }
}
