//! Folds match results into per-team running totals.

use crate::{Group, Match, NameOverrides, StandingRow};
use log::debug;
use std::collections::BTreeMap;

/// Group name -> team id -> totals.
pub type GroupTotals = BTreeMap<String, BTreeMap<String, StandingRow>>;

/// Build a zeroed row for every team, then apply every played match once.
///
/// Matches naming an unknown group or a team outside the group's roster are
/// skipped. The reduction only adds, so match order does not matter.
pub fn aggregate(groups: &[Group], matches: &[Match], overrides: &NameOverrides) -> GroupTotals {
    let mut totals: GroupTotals = groups
        .iter()
        .map(|group| {
            let rows = group
                .teams
                .iter()
                .map(|team| {
                    (team.id.clone(), StandingRow::new(team.id.clone(), team.display_name(overrides)))
                })
                .collect();
            (group.name.clone(), rows)
        })
        .collect();

    for m in matches {
        let Some((goals_a, goals_b)) = m.score() else {
            continue;
        };
        let Some(rows) = totals.get_mut(&m.group) else {
            debug!("skipping match {}: unknown group {}", m.id, m.group);
            continue;
        };
        if !rows.contains_key(&m.team_a.id) || !rows.contains_key(&m.team_b.id) {
            debug!("skipping match {}: team not in group {}", m.id, m.group);
            continue;
        }
        if let Some(a) = rows.get_mut(&m.team_a.id) {
            apply(a, goals_a, goals_b);
        }
        if let Some(b) = rows.get_mut(&m.team_b.id) {
            apply(b, goals_b, goals_a);
        }
    }

    totals
}

/// Record one result from a single team's point of view.
fn apply(row: &mut StandingRow, scored: u32, conceded: u32) {
    row.played += 1;
    row.gf = row.gf.saturating_add(scored);
    row.ga = row.ga.saturating_add(conceded);
    let gd = i64::from(row.gf) - i64::from(row.ga);
    row.gd = gd.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => {
            row.won += 1;
            row.points += 3;
        }
        std::cmp::Ordering::Equal => {
            row.drawn += 1;
            row.points += 1;
        }
        std::cmp::Ordering::Less => row.lost += 1,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Team;

    pub(crate) fn group(name: &str, size: usize) -> Group {
        Group {
            name: name.to_string(),
            teams: (1..=size)
                .map(|i| Team::new(format!("{name}{i}"), format!("Team {name}{i}")))
                .collect(),
            standings: Vec::new(),
        }
    }

    pub(crate) fn result(id: &str, group: &str, a: &str, b: &str, score: Option<(u32, u32)>) -> Match {
        Match {
            id: id.to_string(),
            group: group.to_string(),
            team_a: Team::new(a, format!("Team {a}")),
            team_b: Team::new(b, format!("Team {b}")),
            goals_a: score.map(|s| s.0),
            goals_b: score.map(|s| s.1),
        }
    }

    /// The six-match Group A season used across the engine tests.
    pub(crate) fn group_a_season() -> Vec<Match> {
        vec![
            result("A-0", "A", "A1", "A2", Some((3, 0))),
            result("A-1", "A", "A1", "A3", Some((2, 1))),
            result("A-2", "A", "A1", "A4", Some((1, 0))),
            result("A-3", "A", "A2", "A3", Some((1, 1))),
            result("A-4", "A", "A2", "A4", Some((0, 2))),
            result("A-5", "A", "A3", "A4", Some((2, 0))),
        ]
    }

    fn assert_invariants(totals: &GroupTotals) {
        for row in totals.values().flat_map(|rows| rows.values()) {
            assert_eq!(row.gd, row.gf as i32 - row.ga as i32, "gd for {}", row.id);
            assert_eq!(row.played, row.won + row.drawn + row.lost, "played for {}", row.id);
            assert_eq!(row.points, 3 * row.won + row.drawn, "points for {}", row.id);
        }
    }

    #[test]
    fn group_a_totals() {
        let totals = aggregate(&[group("A", 4)], &group_a_season(), &NameOverrides::new());
        let a = &totals["A"];
        assert_eq!((a["A1"].points, a["A1"].gd, a["A1"].gf), (9, 5, 6));
        assert_eq!((a["A2"].points, a["A2"].gd), (1, -5));
        assert_eq!((a["A3"].points, a["A3"].gd), (4, 1));
        assert_eq!((a["A4"].points, a["A4"].gd), (3, -1));
        assert_eq!(a["A2"].drawn, 1);
        assert_invariants(&totals);
    }

    #[test]
    fn order_does_not_change_totals() {
        let groups = [group("A", 4)];
        let season = group_a_season();
        let forward = aggregate(&groups, &season, &NameOverrides::new());

        let mut reversed = season.clone();
        reversed.reverse();
        assert_eq!(aggregate(&groups, &reversed, &NameOverrides::new()), forward);

        let mut rotated = season;
        rotated.rotate_left(2);
        assert_eq!(aggregate(&groups, &rotated, &NameOverrides::new()), forward);
    }

    #[test]
    fn unplayed_match_contributes_nothing() {
        let mut half = result("A-0", "A", "A1", "A2", Some((2, 0)));
        half.goals_a = None;
        let totals = aggregate(&[group("A", 2)], &[half], &NameOverrides::new());
        assert_eq!(totals["A"]["A1"], StandingRow::new("A1", "Team A1"));
        assert_eq!(totals["A"]["A2"], StandingRow::new("A2", "Team A2"));
    }

    #[test]
    fn unknown_group_and_team_are_skipped() {
        let matches = [
            result("Z-0", "Z", "Z1", "Z2", Some((1, 0))),
            result("A-9", "A", "A1", "B1", Some((4, 0))),
            result("A-0", "A", "A1", "A2", Some((1, 1))),
        ];
        let totals = aggregate(&[group("A", 2)], &matches, &NameOverrides::new());
        assert!(!totals.contains_key("Z"));
        assert_eq!(totals["A"]["A1"].played, 1);
        assert_eq!(totals["A"]["A1"].gf, 1);
        assert_invariants(&totals);
    }

    #[test]
    fn display_name_comes_from_overrides() {
        let mut overrides = NameOverrides::new();
        overrides.insert("A2".into(), "Harbour Town".into());
        let totals = aggregate(&[group("A", 2)], &[], &overrides);
        assert_eq!(totals["A"]["A1"].team, "Team A1");
        assert_eq!(totals["A"]["A2"].team, "Harbour Town");
    }
}
