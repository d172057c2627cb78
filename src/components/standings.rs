use cuptable_engine::StandingRow;
use tui::layout::Constraint;
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, Cell, Row, Table};

pub const HEADER: [&str; 9] = ["Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"];

/// Name column takes the slack, numbers are fixed width.
pub const WIDTHS: [Constraint; 9] = [
    Constraint::Min(12),
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(4),
    Constraint::Length(4),
];

/// Table height for a group: header plus one line per team plus borders.
pub fn table_height(rows: usize) -> u16 {
    rows as u16 + 3
}

pub fn format_gd(gd: i32) -> String {
    if gd > 0 { format!("+{gd}") } else { gd.to_string() }
}

pub fn row_cells(row: &StandingRow) -> [String; 9] {
    [
        row.team.clone(),
        row.played.to_string(),
        row.won.to_string(),
        row.drawn.to_string(),
        row.lost.to_string(),
        row.gf.to_string(),
        row.ga.to_string(),
        format_gd(row.gd),
        row.points.to_string(),
    ]
}

/// Ranked standings as a table widget. `qualify` rows are tinted; the row
/// whose team id equals `highlight` is bold.
pub fn standings_table<'a>(
    rows: &[StandingRow],
    qualify: usize,
    highlight: Option<&str>,
    block: Block<'a>,
) -> Table<'a> {
    let header = Row::new(HEADER.map(Cell::from))
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut style = if i < qualify {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            if highlight == Some(row.id.as_str()) {
                style = style.add_modifier(Modifier::BOLD);
            }
            Row::new(row_cells(row).map(Cell::from)).style(style)
        })
        .collect();

    Table::new(body, WIDTHS).header(header).block(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_difference_is_signed() {
        assert_eq!(format_gd(5), "+5");
        assert_eq!(format_gd(0), "0");
        assert_eq!(format_gd(-3), "-3");
    }

    #[test]
    fn cells_follow_header_order() {
        let row = StandingRow {
            played: 3,
            won: 2,
            drawn: 1,
            lost: 0,
            gf: 7,
            ga: 2,
            gd: 5,
            points: 7,
            ..StandingRow::new("A1", "Lions")
        };
        assert_eq!(row_cells(&row), ["Lions", "3", "2", "1", "0", "7", "2", "+5", "7"]);
        assert_eq!(row_cells(&row).len(), HEADER.len());
    }

    #[test]
    fn height_includes_header_and_borders() {
        assert_eq!(table_height(4), 7);
    }
}
