//! Round-robin fixture templates.

use crate::{Group, Match, Tournament};
use log::warn;

/// Pairings for four teams, as 1-based roster slots.
const FOUR: &[(usize, usize)] = &[(1, 2), (3, 4), (1, 3), (2, 4), (1, 4), (2, 3)];

const FIVE: &[(usize, usize)] = &[
    (1, 2),
    (3, 4),
    (1, 5),
    (2, 4),
    (3, 5),
    (1, 4),
    (2, 3),
    (4, 5),
    (1, 3),
    (2, 5),
];

const SIX: &[(usize, usize)] = &[
    (1, 2),
    (3, 4),
    (5, 6),
    (1, 4),
    (2, 6),
    (3, 5),
    (1, 6),
    (4, 5),
    (2, 3),
    (1, 5),
    (6, 3),
    (4, 2),
    (1, 3),
    (5, 2),
    (6, 4),
];

/// The pairing template for a group size, if one exists.
pub fn template(size: usize) -> Option<&'static [(usize, usize)]> {
    match size {
        4 => Some(FOUR),
        5 => Some(FIVE),
        6 => Some(SIX),
        _ => None,
    }
}

/// Generate the unplayed fixtures of every group, in group order.
pub fn generate(tournament: &Tournament) -> Vec<Match> {
    tournament.groups.iter().flat_map(group_fixtures).collect()
}

/// Fixtures for one group. Sizes without a template produce none.
pub fn group_fixtures(group: &Group) -> Vec<Match> {
    let Some(pairs) = template(group.teams.len()) else {
        warn!(
            "no fixture template for group {} with {} teams",
            group.name,
            group.teams.len()
        );
        return Vec::new();
    };

    pairs
        .iter()
        .enumerate()
        .filter_map(|(idx, &(a, b))| {
            let team_a = group.teams.get(a - 1)?;
            let team_b = group.teams.get(b - 1)?;
            Some(Match {
                id: format!("{}-{idx}", group.name),
                group: group.name.clone(),
                team_a: team_a.clone(),
                team_b: team_b.clone(),
                goals_a: None,
                goals_b: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::tests::group;
    use std::collections::BTreeSet;

    fn pairings(matches: &[Match]) -> BTreeSet<(String, String)> {
        matches
            .iter()
            .map(|m| {
                let (a, b) = (m.team_a.id.clone(), m.team_b.id.clone());
                if a < b { (a, b) } else { (b, a) }
            })
            .collect()
    }

    #[test]
    fn every_template_is_a_full_round_robin() {
        for size in 4..=6 {
            let g = group("C", size);
            let matches = group_fixtures(&g);
            let expected = size * (size - 1) / 2;
            assert_eq!(matches.len(), expected, "size {size}");
            assert_eq!(pairings(&matches).len(), expected, "size {size} repeats a pairing");
            assert!(matches.iter().all(|m| m.team_a.id != m.team_b.id));
        }
    }

    #[test]
    fn match_ids_follow_template_order() {
        let matches = group_fixtures(&group("B", 4));
        let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["B-0", "B-1", "B-2", "B-3", "B-4", "B-5"]);
        assert_eq!((matches[1].team_a.id.as_str(), matches[1].team_b.id.as_str()), ("B3", "B4"));
        assert!(matches.iter().all(|m| m.group == "B" && !m.is_played()));
    }

    #[test]
    fn six_team_template_keeps_home_side() {
        let matches = group_fixtures(&group("F", 6));
        assert_eq!(matches[10].team_a.id, "F6");
        assert_eq!(matches[10].team_b.id, "F3");
    }

    #[test]
    fn three_team_group_has_no_fixtures() {
        assert!(group_fixtures(&group("A", 3)).is_empty());
    }

    #[test]
    fn generate_covers_all_groups() {
        let tournament = Tournament {
            groups: vec![group("A", 4), group("B", 5), group("C", 3)],
        };
        let matches = generate(&tournament);
        assert_eq!(matches.len(), 6 + 10);
        assert_eq!(matches[6].id, "B-0");
    }
}
