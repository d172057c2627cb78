use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::fixtures::{Cursor, fixture_line};
use crate::components::rankings::{PLACE_TITLES, placed_blocks, seed_line};
use crate::components::standings::{standings_table, table_height};
use crate::state::app_state::InputMode;
use crate::state::storage::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use cuptable_engine::TournamentDocument;
use cuptable_engine::seeding::placings;

static TABS: &[&str; 3] = &["Group Stage", "Standings", "Rankings"];

/// Places per group tinted as qualifying in the standings tables.
const QUALIFY: usize = 2;

const HELP: &str = "\
Tabs        1 Group Stage   2 Standings   3 Rankings   ? Help   Esc back
            (on Group Stage: Tab or F2 Standings, F3 Rankings)
Group Stage r next group    j/k match      h/l side     0-9 type goals, Enter save
            Backspace clear score          n rename team
            R randomize results            C clear all results
            D rebuild tournament from setup (asks y/n)
Session     L login         g reload       \" logs     f full screen   q quit
Standings   j/k scroll";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match (app.state.active_tab, app.state.document.as_ref()) {
            (MenuItem::Help, _) => draw_help(f, layout.main),
            (_, None) => draw_placeholder(f, layout.main, app),
            (MenuItem::GroupStage, Some(doc)) => draw_group_stage(f, layout.main, app, doc),
            (MenuItem::Standings, Some(doc)) => draw_standings(f, layout.main, app, doc),
            (MenuItem::Rankings, Some(doc)) => draw_rankings(f, layout.main, doc),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        draw_status(f, layout.status, app);
        draw_input_popup(f, layout.main, app);
        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::GroupStage => 0,
        MenuItem::Standings => 1,
        MenuItem::Rankings => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_placeholder(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let msg = match app.state.last_error.as_deref() {
        Some(err) => format!("Tournament load failed:\n{err}"),
        None => "Loading tournament...".to_string(),
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_group_stage(f: &mut Frame, area: Rect, app: &App, doc: &TournamentDocument) {
    let gs = &app.state.group_stage;
    let Some(group) = doc.tournament.groups.get(gs.group) else {
        draw_placeholder(f, area, app);
        return;
    };

    let [fixtures_area, table_area] = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area)
    } else {
        Layout::vertical([Constraint::Fill(1), Constraint::Length(table_height(group.teams.len()))])
            .areas(area)
    };

    let title = format!(" Group {} ({}/{}) ", group.name, gs.group + 1, doc.tournament.groups.len());
    let block = default_border(Color::White).title(title);
    let inner = block.inner(fixtures_area);
    f.render_widget(block, fixtures_area);

    let editing = match &app.state.input {
        InputMode::Goals { buffer } => Some(buffer.as_str()),
        _ => None,
    };
    let name_width = group
        .teams
        .iter()
        .map(|t| doc.display_name(t).chars().count())
        .max()
        .unwrap_or(8)
        .min(24);

    let lines: Vec<Line> = doc
        .matches_in_group(&group.name)
        .enumerate()
        .map(|(i, m)| {
            let cursor = (i == gs.selected_match).then_some(Cursor { side: gs.side, editing });
            fixture_line(doc, m, cursor, name_width)
        })
        .collect();

    if lines.is_empty() {
        f.render_widget(
            Paragraph::new(format!("No fixtures for a group of {} teams", group.teams.len()))
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    } else {
        let scroll = (gs.selected_match as u16).saturating_sub(inner.height.saturating_sub(1));
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    }

    let rows = cuptable_engine::ranking::rank(group, &doc.matches);
    let highlight = gs.selected(doc).map(|m| match gs.side {
        cuptable_engine::results::Side::A => m.team_a.id.as_str(),
        cuptable_engine::results::Side::B => m.team_b.id.as_str(),
    });
    f.render_widget(
        standings_table(&rows, QUALIFY, highlight, default_border(Color::DarkGray).title(" Table ")),
        table_area,
    );
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App, doc: &TournamentDocument) {
    let tables = doc.ranked_tables();
    let columns = if area.width >= 110 { 2 } else { 1 };
    let per_row = tables.chunks(columns);
    let skip = app.state.standings_scroll as usize;

    let mut y = area.y;
    for chunk in per_row.skip(skip) {
        let height = chunk.iter().map(|(_, rows)| table_height(rows.len())).max().unwrap_or(3);
        if y + height > area.y + area.height {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, height);
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(row_area);
        for ((name, rows), cell) in chunk.iter().zip(cells.iter()) {
            let block = default_border(Color::White).title(format!(" Group {name} "));
            f.render_widget(standings_table(rows, QUALIFY, None, block), *cell);
        }
        y += height;
    }
}

fn draw_rankings(f: &mut Frame, area: Rect, doc: &TournamentDocument) {
    let groups = placings(doc);
    let blocks = placed_blocks(&groups);
    let draw = doc.seeding();

    let [places_area, seeding_area] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let place_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(places_area);
    for ((title, rows), cell) in PLACE_TITLES.iter().zip(blocks.iter()).zip(place_areas.iter()) {
        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Line::from(format!("{:>2}. {}", i + 1, seed_line(row))))
            .collect();
        f.render_widget(
            Paragraph::new(lines).block(default_border(Color::White).title(format!(" {title} "))),
            *cell,
        );
    }

    let [seeded_area, pool_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(seeding_area);
    let list = |rows: &[cuptable_engine::StandingRow]| -> Vec<Line<'static>> {
        if rows.is_empty() {
            return vec![Line::from(Span::styled("none", Style::default().fg(Color::DarkGray)))];
        }
        rows.iter().map(|r| Line::from(seed_line(r))).collect()
    };
    f.render_widget(
        Paragraph::new(list(&draw.seeded))
            .block(default_border(Color::Green).title(format!(" Seeded ({}) ", draw.seeded.len()))),
        seeded_area,
    );
    f.render_widget(
        Paragraph::new(list(&draw.non_seeded)).block(
            default_border(Color::Yellow).title(format!(" Non-seeded ({}) ", draw.non_seeded.len())),
        ),
        pool_area,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan));
    f.render_widget(widget, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let session = match &app.state.session {
        Some(user) => format!("{} ({})", user.username, user.role),
        None => "viewer (L to log in)".to_string(),
    };
    let saved = app
        .state
        .last_saved
        .map(|t| format!("saved {}", t.with_timezone(&chrono::Local).format("%H:%M:%S")))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(format!(" {session} "), Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(format!(" {} ", app.settings.user)),
        Span::styled(saved, Style::default().fg(Color::DarkGray)),
    ];
    if let Some(err) = app.state.last_error.as_deref() {
        spans.push(Span::styled(format!("  {err}"), Style::default().fg(Color::Red)));
    } else if let Some(status) = app.state.status.as_deref() {
        spans.push(Span::styled(format!("  {status}"), Style::default().fg(Color::Green)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_input_popup(f: &mut Frame, area: Rect, app: &App) {
    let (title, lines) = match &app.state.input {
        InputMode::Normal | InputMode::Goals { .. } => return,
        InputMode::Rename { team_id, buffer } => {
            (format!(" Rename {team_id} "), vec![Line::from(format!("{buffer}_"))])
        }
        InputMode::ConfirmReset => (
            " Reset tournament ".to_string(),
            vec![
                Line::from("Discard all groups and results"),
                Line::from("and rebuild from setup? (y/n)"),
            ],
        ),
        InputMode::Login(form) => {
            let mark = |active: bool| if active { "> " } else { "  " };
            (
                " Login ".to_string(),
                vec![
                    Line::from(format!("{}Username: {}", mark(!form.on_password), form.username)),
                    Line::from(format!(
                        "{}Password: {}",
                        mark(form.on_password),
                        "*".repeat(form.password.chars().count())
                    )),
                ],
            )
        }
    };

    let width = 40.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(default_border(Color::Yellow).title(title)),
        popup,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
