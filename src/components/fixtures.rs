use cuptable_engine::results::Side;
use cuptable_engine::{Match, TournamentDocument};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

/// A score box: the goals, `-` while unset, or the text being typed.
pub fn score_text(goals: Option<u32>, editing: Option<&str>) -> String {
    match editing {
        Some(buffer) => format!("[{buffer:<2}]"),
        None => format!(" {:>2} ", goals.map_or("-".to_string(), |g| g.to_string())),
    }
}

/// Cursor position within the fixture list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    pub side: Side,
    pub editing: Option<&'a str>,
}

/// One fixture line: `A-0  Lions   2 :  1  Tigers`.
pub fn fixture_line<'a>(document: &TournamentDocument, m: &Match, cursor: Option<Cursor<'_>>, name_width: usize) -> Line<'a> {
    let name_a = document.display_name(&m.team_a);
    let name_b = document.display_name(&m.team_b);

    let base = if m.is_played() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let selected = Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD);

    let score = |side: Side, goals: Option<u32>| -> Span<'a> {
        match cursor {
            Some(c) if c.side == side => Span::styled(score_text(goals, c.editing), selected),
            Some(_) => Span::styled(score_text(goals, None), base.add_modifier(Modifier::BOLD)),
            None => Span::styled(score_text(goals, None), base),
        }
    };

    Line::from(vec![
        Span::styled(format!("{:<6}", m.id), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{name_a:>name_width$} "), base),
        score(Side::A, m.goals_a),
        Span::styled(":", base),
        score(Side::B, m.goals_b),
        Span::styled(format!(" {name_b:<name_width$}"), base),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuptable_engine::setup::SetupConfig;

    #[test]
    fn score_text_shows_unset_and_typed_values() {
        assert_eq!(score_text(None, None), "  - ");
        assert_eq!(score_text(Some(3), None), "  3 ");
        assert_eq!(score_text(Some(12), None), " 12 ");
        assert_eq!(score_text(Some(3), Some("1")), "[1 ]");
    }

    #[test]
    fn fixture_line_uses_display_names() {
        let mut doc = TournamentDocument::from_setup(&SetupConfig::uniform(1, 4));
        doc.rename_team("A2", "Tigers");
        let m = doc.matches[0].clone();
        let text: String = fixture_line(&doc, &m, None, 8)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "A-0    Team A1   - :  -  Tigers  ");
    }
}
