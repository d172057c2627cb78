//! Orders a group table: points, goal difference and goals scored, with a
//! head-to-head mini-league for teams level on points.

use crate::{Group, Match, StandingRow};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Points, then goal difference, then goals scored, all descending.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.gd.cmp(&a.gd))
        .then_with(|| b.gf.cmp(&a.gf))
}

/// Rank a group's current standings.
///
/// Runs of teams on equal points are reordered by a mini-league over the
/// matches played among them; remaining ties inside a run fall back to the
/// season goal difference and goals scored. A run is resolved once and never
/// split into smaller runs. Sorting is stable, so rows that compare equal
/// keep roster order.
pub fn rank(group: &Group, matches: &[Match]) -> Vec<StandingRow> {
    let mut rows = group.standings.clone();
    rows.sort_by(compare_rows);

    let mut start = 0;
    while start < rows.len() {
        let points = rows[start].points;
        let end = rows[start..]
            .iter()
            .position(|r| r.points != points)
            .map_or(rows.len(), |len| start + len);
        if end - start > 1 {
            resolve_tie(&mut rows[start..end], matches);
        }
        start = end;
    }

    rows
}

fn resolve_tie(block: &mut [StandingRow], matches: &[Match]) {
    let mut mini: HashMap<String, u32> = block.iter().map(|r| (r.id.clone(), 0)).collect();

    for m in matches {
        let Some((goals_a, goals_b)) = m.score() else {
            continue;
        };
        if !mini.contains_key(&m.team_a.id) || !mini.contains_key(&m.team_b.id) {
            continue;
        }
        let (points_a, points_b) = match goals_a.cmp(&goals_b) {
            Ordering::Greater => (3, 0),
            Ordering::Equal => (1, 1),
            Ordering::Less => (0, 3),
        };
        if let Some(p) = mini.get_mut(&m.team_a.id) {
            *p += points_a;
        }
        if let Some(p) = mini.get_mut(&m.team_b.id) {
            *p += points_b;
        }
    }

    let head_to_head = |row: &StandingRow| mini.get(&row.id).copied().unwrap_or_default();
    block.sort_by(|a, b| {
        head_to_head(b)
            .cmp(&head_to_head(a))
            .then_with(|| b.gd.cmp(&a.gd))
            .then_with(|| b.gf.cmp(&a.gf))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::aggregate;
    use crate::standings::tests::{group, group_a_season, result};
    use crate::NameOverrides;

    fn with_standings(name: &str, size: usize, matches: &[Match]) -> Group {
        let mut g = group(name, size);
        let mut totals = aggregate(std::slice::from_ref(&g), matches, &NameOverrides::new());
        let mut rows = totals.remove(name).unwrap_or_default();
        g.standings = g.teams.iter().filter_map(|t| rows.remove(&t.id)).collect();
        g
    }

    fn order(rows: &[StandingRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn group_a_season_ranks_without_ties() {
        let season = group_a_season();
        let g = with_standings("A", 4, &season);
        let table = rank(&g, &season);
        assert_eq!(order(&table), vec!["A1", "A3", "A4", "A2"]);
        let summary: Vec<(u32, i32)> = table.iter().map(|r| (r.points, r.gd)).collect();
        assert_eq!(summary, vec![(9, 5), (4, 1), (3, -1), (1, -5)]);
    }

    #[test]
    fn head_to_head_beats_goal_difference() {
        let matches = vec![
            result("A-0", "A", "A1", "A2", Some((1, 0))),
            result("A-1", "A", "A2", "A3", Some((5, 0))),
            result("A-2", "A", "A2", "A4", Some((5, 0))),
            result("A-3", "A", "A1", "A3", Some((0, 1))),
            result("A-4", "A", "A1", "A4", Some((1, 0))),
            result("A-5", "A", "A3", "A4", None),
        ];
        let g = with_standings("A", 4, &matches);
        // A2 has the far better goal difference, A1 won the meeting.
        assert_eq!(order(&rank(&g, &matches)), vec!["A1", "A2", "A3", "A4"]);
    }

    #[test]
    fn three_way_cycle_falls_back_to_goal_difference() {
        let matches = vec![
            result("A-0", "A", "A1", "A2", Some((1, 0))),
            result("A-1", "A", "A2", "A3", Some((1, 0))),
            result("A-2", "A", "A3", "A1", Some((1, 0))),
            result("A-3", "A", "A3", "A4", Some((3, 0))),
            result("A-4", "A", "A2", "A4", Some((2, 0))),
            result("A-5", "A", "A1", "A4", Some((1, 0))),
        ];
        let g = with_standings("A", 4, &matches);
        let table = rank(&g, &matches);
        assert!(table[..3].iter().all(|r| r.points == 6));
        // Every mini-league total is 3, so season gd decides: A3 +3, A2 +2, A1 +1.
        assert_eq!(order(&table), vec!["A3", "A2", "A1", "A4"]);
    }

    #[test]
    fn cycle_with_equal_goal_difference_uses_goals_scored() {
        let matches = vec![
            result("A-0", "A", "A1", "A2", Some((2, 1))),
            result("A-1", "A", "A2", "A3", Some((2, 1))),
            result("A-2", "A", "A3", "A1", Some((2, 1))),
            result("A-3", "A", "A1", "A4", Some((3, 1))),
            result("A-4", "A", "A2", "A4", Some((2, 0))),
            result("A-5", "A", "A3", "A4", Some((4, 2))),
        ];
        let g = with_standings("A", 4, &matches);
        let table = rank(&g, &matches);
        assert!(table[..3].iter().all(|r| r.points == 6 && r.gd == 2));
        // gf: A3 7, A1 6, A2 5
        assert_eq!(order(&table), vec!["A3", "A1", "A2", "A4"]);
    }

    #[test]
    fn head_to_head_ignores_matches_outside_the_block() {
        // A1 and A2 finish on 6. Counting A1's wins over A3 and A4 would level
        // the mini-league; only the A1-A2 meeting may count.
        let matches = vec![
            result("A-0", "A", "A1", "A2", Some((0, 1))),
            result("A-1", "A", "A3", "A4", Some((0, 0))),
            result("A-2", "A", "A1", "A3", Some((5, 0))),
            result("A-3", "A", "A2", "A4", Some((1, 0))),
            result("A-4", "A", "A1", "A4", Some((5, 0))),
            result("A-5", "A", "A2", "A3", Some((0, 1))),
        ];
        let g = with_standings("A", 4, &matches);
        let table = rank(&g, &matches);
        let summary: Vec<(&str, u32)> = table.iter().map(|r| (r.id.as_str(), r.points)).collect();
        assert_eq!(summary, vec![("A2", 6), ("A1", 6), ("A3", 4), ("A4", 1)]);
    }

    #[test]
    fn fully_level_teams_keep_roster_order_and_rank_is_idempotent() {
        let matches = vec![result("A-0", "A", "A1", "A2", Some((1, 1)))];
        let g = with_standings("A", 3, &matches);
        let first = rank(&g, &matches);
        assert_eq!(order(&first), vec!["A1", "A2", "A3"]);
        assert_eq!(rank(&g, &matches), first);
    }

    #[test]
    fn empty_standings_rank_to_empty_table() {
        let g = group("A", 4);
        assert!(rank(&g, &group_a_season()).is_empty());
    }
}
