use cuptable_engine::StandingRow;
use cuptable_engine::ranking::compare_rows;
use cuptable_engine::seeding::{GroupPlacings, PLACES, finishers};

pub const PLACE_TITLES: [&str; PLACES] = ["1st place", "2nd place", "3rd place", "4th place"];

/// Every group's finishers at each position, best first.
pub fn placed_blocks(placings: &[GroupPlacings]) -> [Vec<StandingRow>; PLACES] {
    std::array::from_fn(|place| {
        let mut rows = finishers(placings, place);
        rows.sort_by(compare_rows);
        rows
    })
}

/// "Lions (A) 7 pts +5"
pub fn seed_line(row: &StandingRow) -> String {
    let group: String = row.id.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    format!(
        "{} ({group}) {} pts {}",
        row.team,
        row.points,
        crate::components::standings::format_gd(row.gd)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, points: u32, gd: i32) -> StandingRow {
        StandingRow { points, gd, ..StandingRow::new(id, format!("Team {id}")) }
    }

    #[test]
    fn blocks_sort_each_position_across_groups() {
        let placings = vec![
            GroupPlacings::from_table("A", &[row("A1", 7, 4), row("A2", 4, 0), row("A3", 3, -1)]),
            GroupPlacings::from_table("B", &[row("B1", 9, 6), row("B2", 4, 2), row("B3", 4, 1), row("B4", 0, -9)]),
        ];
        let blocks = placed_blocks(&placings);
        let ids = |i: usize| blocks[i].iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids(0), vec!["B1", "A1"]);
        assert_eq!(ids(1), vec!["B2", "A2"]);
        assert_eq!(ids(2), vec!["B3", "A3"]);
        assert_eq!(ids(3), vec!["B4"]);
    }

    #[test]
    fn seed_line_names_group() {
        assert_eq!(seed_line(&row("C2", 6, 3)), "Team C2 (C) 6 pts +3");
    }
}
