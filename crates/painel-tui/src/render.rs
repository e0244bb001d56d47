// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use painel_app::{
    CoachField, CompetitionTotals, ControlledSelect, LoginField, MatchField, Record, RefereeBar,
    RefereeSummary, RemoteState, RemoteView, ReportKind, Role, SelectItem, ShellState, TableModel,
    Team, TeamProfile, UserField, ViewKind,
};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};

use crate::views::{Notice, NoticeKind, ViewData, role_items, team_items};

pub(crate) const SIDEBAR_WIDTH: u16 = 26;
pub(crate) const SIDEBAR_COLLAPSED_WIDTH: u16 = 7;
const APP_TITLE: &str = "Painel do Campeonato";
const LOADING: &str = "carregando...";
const CARD_PENDING: &str = "...";
const SELECT_PLACEHOLDER: &str = "Selecione...";
const TEAM_PLACEHOLDER: &str = "Selecione um clube";
const READ_ONLY_MATCHES: &str = "Somente administradores podem registrar partidas.";
const BAR_GLYPH: char = '█';
const MAX_COLUMN_WIDTH: usize = 40;

pub(crate) fn render(frame: &mut Frame<'_>, state: &ShellState, view_data: &ViewData) {
    let Some(view) = state.active_view() else {
        render_login(frame, view_data);
        return;
    };

    let sidebar_width = if state.navigation.collapsed() {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
        .split(frame.area());

    let sidebar = sidebar_entries(state)
        .into_iter()
        .map(|(text, active)| {
            if active {
                Line::styled(
                    text,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(text)
            }
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(sidebar).block(Block::default().title("painel").borders(Borders::ALL)),
        columns[0],
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    let header = Paragraph::new(header_text(state, view)).block(
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL),
    );
    frame.render_widget(header, layout[0]);

    let role = state.session.role().unwrap_or(Role::Analyst);
    match view {
        ViewKind::Dashboard => render_dashboard(frame, layout[1], view_data),
        ViewKind::Teams => render_teams(frame, layout[1], view_data),
        ViewKind::Matches => render_matches(frame, layout[1], view_data, role),
        ViewKind::Referees => render_referees(frame, layout[1], view_data),
        ViewKind::Reports => render_reports(frame, layout[1], view_data),
        ViewKind::Staff => render_staff(frame, layout[1], view_data),
        ViewKind::Users => render_users(frame, layout[1], view_data),
    }

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);
}

/// Sidebar rows with the active flag. Collapsed rows keep only the hotkey.
pub(crate) fn sidebar_entries(state: &ShellState) -> Vec<(String, bool)> {
    let active = state.active_view();
    let collapsed = state.navigation.collapsed();
    state
        .navigation
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let is_active = active == Some(item.id);
            let marker = if is_active { "▸" } else { " " };
            let text = if collapsed {
                format!("{marker}F{}", index + 1)
            } else {
                format!("{marker}F{} {}", index + 1, item.label)
            };
            (text, is_active)
        })
        .collect()
}

fn header_text(state: &ShellState, view: ViewKind) -> String {
    match state.session.user() {
        Some(user) => format!("{}  ·  {} ({})", view.title(), user.name, user.role.label()),
        None => view.title().to_owned(),
    }
}

pub(crate) fn status_text(state: &ShellState) -> String {
    if let Some(message) = &state.status_line {
        return message.clone();
    }
    "Tab/Shift+Tab navegar · F1-F7 ir para · Ctrl+b menu · Ctrl+r recarregar · Ctrl+x sair · Ctrl+q fechar"
        .to_owned()
}

fn render_login(frame: &mut Frame<'_>, view_data: &ViewData) {
    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);

    let login = &view_data.login;
    let focus_marker = |field: LoginField| {
        if login.form.focus == field { "▸ " } else { "  " }
    };
    let mut lines = vec![
        Line::from(format!(
            "{}Usuário: {}",
            focus_marker(LoginField::User),
            login.form.user
        )),
        Line::from(format!(
            "{}Senha:   {}",
            focus_marker(LoginField::Password),
            mask(&login.form.password)
        )),
        Line::from(""),
    ];
    if login.in_flight.is_some() {
        lines.push(Line::styled(
            "conectando...",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(error) = &login.error {
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Enter entrar · Tab alternar campo · Esc fechar",
        Style::default().fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!("{APP_TITLE} · Login"))
            .borders(Borders::ALL),
    );
    frame.render_widget(widget, area);
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

pub(crate) fn dashboard_cards(
    stats: &RemoteView<(), Vec<Record>>,
) -> [(&'static str, String); 3] {
    let totals = stats.data().map(|records| CompetitionTotals::from_records(records));
    [
        (
            "Total de Jogos",
            card_value(stats, totals.map(|totals| totals.total_matches.to_string())),
        ),
        (
            "Média de Escanteios",
            card_value(stats, totals.map(|totals| totals.mean_corners_label())),
        ),
        (
            "Competições",
            card_value(stats, totals.map(|totals| totals.competitions.to_string())),
        ),
    ]
}

pub(crate) fn referee_cards(
    referees: &RemoteView<(), Vec<Record>>,
) -> [(&'static str, String); 3] {
    let summary = referees
        .data()
        .map(|records| RefereeSummary::from_records(records));
    [
        (
            "Total de Cartões",
            card_value(
                referees,
                summary.as_ref().map(|summary| summary.total_cards.to_string()),
            ),
        ),
        (
            "Árbitro Mais Rigoroso",
            card_value(
                referees,
                summary.as_ref().map(|summary| {
                    summary
                        .strictest
                        .as_ref()
                        .map_or_else(|| "-".to_owned(), |bar| bar.name.clone())
                }),
            ),
        ),
        (
            "Árbitros",
            card_value(
                referees,
                summary.as_ref().map(|summary| summary.referees.to_string()),
            ),
        ),
    ]
}

fn card_value<K: Clone + PartialEq, T>(view: &RemoteView<K, T>, ready: Option<String>) -> String {
    match view.state() {
        RemoteState::Ready { .. } => ready.unwrap_or_default(),
        RemoteState::Error { .. } => "-".to_owned(),
        RemoteState::Idle | RemoteState::Loading { .. } => CARD_PENDING.to_owned(),
    }
}

/// Horizontal bars scaled so the largest value fills `width` glyphs.
pub(crate) fn bar_lines(bars: &[RefereeBar], width: usize) -> Vec<String> {
    let max = bars.iter().map(|bar| bar.cards).max().unwrap_or(0);
    let name_width = bars
        .iter()
        .map(|bar| bar.name.chars().count())
        .max()
        .unwrap_or(0);
    bars.iter()
        .map(|bar| {
            let filled = if max <= 0 {
                0
            } else {
                let cards = u128::from(bar.cards.max(0).unsigned_abs());
                let scaled = (cards * width as u128).div_ceil(u128::from(max.unsigned_abs()));
                usize::try_from(scaled).unwrap_or(width)
            };
            format!(
                "{:<name_width$} {} {}",
                bar.name,
                BAR_GLYPH.to_string().repeat(filled),
                bar.cards
            )
        })
        .collect()
}

pub(crate) fn team_profile_lines(profile: &TeamProfile) -> Vec<String> {
    vec![
        format!("{} ({}) · {}", profile.name, profile.acronym, profile.country),
        format!("Técnico: {}", profile.coach),
        format!(
            "Vitórias {} · Empates {} · Derrotas {} · Jogos {}",
            profile.wins,
            profile.draws,
            profile.losses,
            profile.games_played()
        ),
    ]
}

fn render_cards(frame: &mut Frame<'_>, area: Rect, cards: &[(&'static str, String)]) {
    let constraints = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect::<Vec<_>>();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for ((label, value), slot) in cards.iter().zip(slots.iter()) {
        let card = Paragraph::new(Line::styled(
            value.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().title(*label).borders(Borders::ALL));
        frame.render_widget(card, *slot);
    }
}

fn render_dashboard(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);
    render_cards(frame, layout[0], &dashboard_cards(&view_data.dashboard));
    render_remote(
        frame,
        layout[1],
        "Estatísticas por Competição",
        &view_data.dashboard,
        |frame, area, records| render_record_table(frame, area, "Estatísticas por Competição", records),
    );
}

fn render_teams(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .split(area);

    let teams = &view_data.teams;
    let selector = match teams.list.state() {
        RemoteState::Error { message, .. } => error_line(format!("Erro ao carregar clubes: {message}")),
        RemoteState::Loading { .. } | RemoteState::Idle => Line::from(LOADING),
        RemoteState::Ready { data, .. } => {
            let items = team_items(Some(data));
            let current = teams.selected.map(|team| team.to_string());
            Line::from(format!(
                "Clube: {} ▾   (Enter abrir)",
                ControlledSelect::display_label(current.as_deref(), &items, TEAM_PLACEHOLDER)
            ))
        }
    };
    frame.render_widget(
        Paragraph::new(selector).block(Block::default().title("Clube").borders(Borders::ALL)),
        layout[0],
    );

    if teams.selected.is_none() {
        frame.render_widget(
            Paragraph::new("Selecione um clube para ver o perfil.")
                .block(Block::default().title("Perfil").borders(Borders::ALL)),
            layout[1],
        );
    } else {
        render_remote(frame, layout[1], "Perfil", &teams.details, |frame, area, details| {
            let lines = team_profile_lines(&details.profile)
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>();
            frame.render_widget(
                Paragraph::new(lines).block(Block::default().title("Perfil").borders(Borders::ALL)),
                area,
            );
        });
        render_remote(
            frame,
            layout[2],
            "Histórico",
            &teams.details,
            |frame, area, details| render_record_table(frame, area, "Histórico", &details.history),
        );
    }

    if teams.select.is_open() {
        let items = team_items(teams.list.data());
        render_select_popup(frame, area, "Clubes", &items, &teams.select);
    }
}

fn render_matches(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData, role: Role) {
    let matches = &view_data.matches;
    let list_area = if role == Role::Admin {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let items = team_items(matches.teams.data());
        let fields = MatchField::ALL
            .iter()
            .map(|field| {
                let value = match matches.form.text(*field) {
                    Some(text) => text.to_owned(),
                    None => {
                        let current = matches.form.team(*field).map(|team| team.to_string());
                        ControlledSelect::display_label(
                            current.as_deref(),
                            &items,
                            SELECT_PLACEHOLDER,
                        )
                        .to_owned()
                    }
                };
                (field.label(), value)
            })
            .collect::<Vec<_>>();
        render_form(
            frame,
            columns[0],
            "Registrar Partida (Ctrl+s salvar)",
            &fields,
            matches.focus,
            matches.in_flight.is_some(),
            matches.notice.as_ref(),
        );
        if matches.select.is_open() {
            render_select_popup(frame, columns[0], "Times", &items, &matches.select);
        }
        columns[1]
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);
        frame.render_widget(
            Paragraph::new(Line::styled(
                READ_ONLY_MATCHES,
                Style::default().fg(Color::DarkGray),
            ))
            .block(Block::default().borders(Borders::ALL)),
            rows[0],
        );
        rows[1]
    };

    render_remote(frame, list_area, "Partidas", &matches.list, |frame, area, records| {
        render_record_table(frame, area, "Partidas", records)
    });
}

fn render_referees(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);
    render_cards(frame, layout[0], &referee_cards(&view_data.referees));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);
    render_remote(
        frame,
        columns[0],
        "Cartões por Árbitro",
        &view_data.referees,
        |frame, area, records| {
            let summary = RefereeSummary::from_records(records);
            let width = usize::from(area.width.saturating_sub(4)) / 2;
            let lines = bar_lines(&summary.bars, width.max(1))
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>();
            frame.render_widget(
                Paragraph::new(lines).block(
                    Block::default()
                        .title("Cartões por Árbitro")
                        .borders(Borders::ALL),
                ),
                area,
            );
        },
    );
    render_remote(
        frame,
        columns[1],
        "Árbitros",
        &view_data.referees,
        |frame, area, records| render_record_table(frame, area, "Árbitros", records),
    );
}

fn render_reports(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let selected = ReportKind::ALL
        .iter()
        .position(|kind| *kind == view_data.reports.selected)
        .unwrap_or(0);
    let tabs = Tabs::new(ReportKind::ALL.iter().map(|kind| kind.label()))
        .block(
            Block::default()
                .title("Relatório (←/→)")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    let title = view_data.reports.selected.label();
    render_remote(frame, layout[1], title, &view_data.reports.data, |frame, area, records| {
        render_record_table(frame, area, title, records)
    });
}

fn render_staff(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let staff = &view_data.staff;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items = team_items(staff.teams.data());
    let mut fields = CoachField::ALL
        .iter()
        .map(|field| {
            let value = match staff.form.text(*field) {
                Some(text) => text.to_owned(),
                None => {
                    let current = staff.form.team.map(|team| team.to_string());
                    ControlledSelect::display_label(current.as_deref(), &items, SELECT_PLACEHOLDER)
                        .to_owned()
                }
            };
            (field.label(), value)
        })
        .collect::<Vec<_>>();
    if let Some(team) = staff.selected_team() {
        fields.push(("Técnico atual", current_coach(team)));
    }
    render_form(
        frame,
        columns[0],
        "Atualizar Técnico (Ctrl+s salvar)",
        &fields,
        staff.focus,
        staff.in_flight.is_some(),
        staff.notice.as_ref(),
    );
    if staff.select.is_open() {
        render_select_popup(frame, columns[0], "Clubes", &items, &staff.select);
    }

    render_remote(frame, columns[1], "Comissões", &staff.teams, |frame, area, teams| {
        render_team_table(frame, area, teams)
    });
}

fn current_coach(team: &Team) -> String {
    match team.coach_age {
        Some(age) => format!("{} ({}, {age} anos)", team.coach, team.coach_nationality),
        None => format!("{} ({})", team.coach, team.coach_nationality),
    }
}

fn render_team_table(frame: &mut Frame<'_>, area: Rect, teams: &[Team]) {
    let header = Row::new(["Clube", "Técnico", "Nacionalidade", "Idade"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = teams.iter().map(|team| {
        Row::new(vec![
            Cell::from(team.name.clone()),
            Cell::from(team.coach.clone()),
            Cell::from(team.coach_nationality.clone()),
            Cell::from(team.coach_age.map(|age| age.to_string()).unwrap_or_default()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(Block::default().title("Comissões").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_users(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let users = &view_data.users;
    let items = role_items();
    let form_area = centered_rect(60, 70, area);
    let fields = UserField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                UserField::Username => users.form.username.clone(),
                UserField::Password => mask(&users.form.password),
                UserField::Role => ControlledSelect::display_label(
                    Some(users.form.role.as_str()),
                    &items,
                    SELECT_PLACEHOLDER,
                )
                .to_owned(),
            };
            (field.label(), value)
        })
        .collect::<Vec<_>>();
    render_form(
        frame,
        form_area,
        "Novo Usuário (Ctrl+s salvar)",
        &fields,
        users.focus,
        users.in_flight.is_some(),
        users.notice.as_ref(),
    );
    if users.select.is_open() {
        render_select_popup(frame, form_area, "Nível de Acesso", &items, &users.select);
    }
}

fn render_form(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    fields: &[(&'static str, String)],
    focus: usize,
    submitting: bool,
    notice: Option<&Notice>,
) {
    let mut lines = fields
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let text = format!("{label}: {value}");
            if index == focus {
                Line::styled(
                    format!("▸ {text}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!("  {text}"))
            }
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    if submitting {
        lines.push(Line::styled("enviando...", Style::default().fg(Color::Yellow)));
    } else if let Some(notice) = notice {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        lines.push(Line::styled(
            notice.message.clone(),
            Style::default().fg(color),
        ));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_owned()).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_select_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    items: &[SelectItem],
    select: &ControlledSelect,
) {
    let popup = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup);
    let highlighted = select.highlighted(items);
    let lines = if items.is_empty() {
        vec![Line::from("(nenhuma opção)")]
    } else {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if Some(index) == highlighted {
                    Line::styled(
                        format!("▸ {}", item.label),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan),
                    )
                } else {
                    Line::from(format!("  {}", item.label))
                }
            })
            .collect()
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(format!("{title} (Enter escolher · Esc fechar)"))
            .borders(Borders::ALL),
    );
    frame.render_widget(widget, popup);
}

/// Dispatches on the lifecycle of `remote`; `ready` draws the loaded data.
fn render_remote<K, T, F>(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    remote: &RemoteView<K, T>,
    ready: F,
) where
    K: Clone + PartialEq,
    F: FnOnce(&mut Frame<'_>, Rect, &T),
{
    let block = Block::default().title(title.to_owned()).borders(Borders::ALL);
    match remote.state() {
        RemoteState::Ready { data, .. } => ready(frame, area, data),
        RemoteState::Error { message, .. } => {
            frame.render_widget(
                Paragraph::new(error_line(format!("Erro ao carregar: {message}")))
                    .wrap(Wrap { trim: false })
                    .block(block),
                area,
            );
        }
        RemoteState::Loading { .. } => {
            frame.render_widget(Paragraph::new(LOADING).block(block), area);
        }
        RemoteState::Idle => frame.render_widget(block, area),
    }
}

fn error_line(message: String) -> Line<'static> {
    Line::styled(message, Style::default().fg(Color::Red))
}

fn render_record_table(frame: &mut Frame<'_>, area: Rect, title: &str, records: &[Record]) {
    let model = TableModel::from_records(records);
    let block = Block::default().title(title.to_owned()).borders(Borders::ALL);
    if let Some(placeholder) = model.placeholder() {
        frame.render_widget(Paragraph::new(placeholder).block(block), area);
        return;
    }

    let widths = model
        .column_widths()
        .into_iter()
        .map(|width| {
            let width = width.min(MAX_COLUMN_WIDTH) + 1;
            Constraint::Length(u16::try_from(width).unwrap_or(u16::MAX))
        })
        .collect::<Vec<_>>();
    let header = Row::new(
        model
            .columns
            .iter()
            .map(|column| Cell::from(column.label.clone()))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = model
        .rows
        .iter()
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone())).collect::<Vec<_>>()));
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
