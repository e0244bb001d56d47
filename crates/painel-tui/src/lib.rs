// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod render;
mod views;

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use painel_app::{
    AuthError, Authenticator, CoachField, CoachForm, CoachUpdate, CommitOutcome, ControlledSelect,
    Credentials, FetchTicket, LoadError, MatchField, NewMatch, NewUser, Record, ReportKind, Role,
    SelectEvent, SelectItem, ShellCommand, ShellEvent, ShellState, Team, TeamDetails, TeamId, User,
    UserField, UserForm, ViewKind, label_for,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::views::{FetchPlan, Notice, ViewData, role_items, team_items};

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const POLL_INTERVAL: Duration = Duration::from_millis(120);

/// Which view-owned lifecycle a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSlot {
    Dashboard,
    TeamList,
    TeamDetails,
    MatchList,
    MatchTeams,
    StaffTeams,
    Referees,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchRequest {
    Dashboard,
    Teams,
    TeamDetails(TeamId),
    Matches,
    Referees,
    Report(ReportKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchResponse {
    Records(Vec<Record>),
    Teams(Vec<Team>),
    TeamDetails(TeamDetails),
}

impl FetchResponse {
    pub fn into_records(self) -> Result<Vec<Record>, LoadError> {
        match self {
            Self::Records(records) => Ok(records),
            other => Err(other.mismatch("records")),
        }
    }

    pub fn into_teams(self) -> Result<Vec<Team>, LoadError> {
        match self {
            Self::Teams(teams) => Ok(teams),
            other => Err(other.mismatch("teams")),
        }
    }

    pub fn into_team_details(self) -> Result<TeamDetails, LoadError> {
        match self {
            Self::TeamDetails(details) => Ok(details),
            other => Err(other.mismatch("team details")),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Records(_) => "records",
            Self::Teams(_) => "teams",
            Self::TeamDetails(_) => "team details",
        }
    }

    fn mismatch(&self, expected: &str) -> LoadError {
        LoadError::shape(format!("expected {expected}, got {}", self.kind()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    Match,
    Coach,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    CreateMatch(NewMatch),
    UpdateCoach(CoachUpdate),
    CreateUser(NewUser),
}

impl Submission {
    pub const fn form(&self) -> FormSlot {
        match self {
            Self::CreateMatch(_) => FormSlot::Match,
            Self::UpdateCoach(_) => FormSlot::Coach,
            Self::CreateUser(_) => FormSlot::User,
        }
    }
}

/// Backend seam for the shell. Sign-in goes through [`Authenticator`]. The
/// `spawn_*` defaults run the call inline and post the result; a runtime that
/// owns a real client overrides them to run off the UI thread.
pub trait ShellRuntime: Authenticator {
    fn fetch(&mut self, request: FetchRequest) -> Result<FetchResponse, LoadError>;
    fn submit(&mut self, submission: &Submission) -> Result<String, LoadError>;

    fn spawn_login(
        &mut self,
        attempt: u64,
        credentials: Credentials,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self.authenticate(&credentials);
        tx.send(InternalEvent::LoginFinished { attempt, result })
            .map_err(|_| anyhow!("login event channel closed"))
    }

    fn spawn_fetch(
        &mut self,
        slot: FetchSlot,
        ticket: FetchTicket,
        request: FetchRequest,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self.fetch(request);
        tx.send(InternalEvent::Fetched {
            slot,
            ticket,
            result,
        })
        .map_err(|_| anyhow!("fetch event channel closed"))
    }

    fn spawn_submit(
        &mut self,
        attempt: u64,
        submission: Submission,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let form = submission.form();
        let result = self.submit(&submission);
        tx.send(InternalEvent::Submitted {
            form,
            attempt,
            result,
        })
            .map_err(|_| anyhow!("submit event channel closed"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    LoginFinished {
        attempt: u64,
        result: Result<User, AuthError>,
    },
    Fetched {
        slot: FetchSlot,
        ticket: FetchTicket,
        result: Result<FetchResponse, LoadError>,
    },
    Submitted {
        form: FormSlot,
        attempt: u64,
        result: Result<String, LoadError>,
    },
}

pub fn run_app<R: ShellRuntime>(
    state: &mut ShellState,
    runtime: &mut R,
    default_user: &str,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(default_user);
    let (internal_tx, internal_rx) = mpsc::channel();
    info!("shell started");

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render::render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(POLL_INTERVAL).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("shell stopped");
    result
}

fn process_internal_events<R: ShellRuntime>(
    state: &mut ShellState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(ShellCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::LoginFinished { attempt, result } => {
                handle_login_finished(state, runtime, view_data, tx, attempt, result);
            }
            InternalEvent::Fetched {
                slot,
                ticket,
                result,
            } => {
                if let Err(error) = &result {
                    warn!(?slot, kind = error.kind_label(), %error, "load failed");
                }
                match view_data.commit(slot, ticket, result) {
                    CommitOutcome::Applied => debug!(?slot, ticket = ticket.get(), "fetch committed"),
                    CommitOutcome::Stale => {
                        debug!(?slot, ticket = ticket.get(), "discarded stale response");
                    }
                }
            }
            InternalEvent::Submitted {
                form,
                attempt,
                result,
            } => {
                handle_submitted(runtime, view_data, tx, form, attempt, result);
            }
        }
    }
}

fn handle_login_finished<R: ShellRuntime>(
    state: &mut ShellState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    attempt: u64,
    result: Result<User, AuthError>,
) {
    if view_data.login.in_flight != Some(attempt) || state.session.is_authenticated() {
        debug!(attempt, "ignored stale login result");
        return;
    }
    view_data.login.in_flight = None;

    match result {
        Ok(user) => {
            info!(user = %user.name, role = user.role.as_str(), "signed in");
            view_data.login.form.password.clear();
            let events = state.dispatch(ShellCommand::SignedIn(user));
            apply_shell_events(state, runtime, view_data, tx, events);
        }
        Err(error) => {
            warn!(%error, "login rejected");
            view_data.login.error = Some(error.message);
        }
    }
}

fn handle_submitted<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    form: FormSlot,
    attempt: u64,
    result: Result<String, LoadError>,
) {
    if *view_data.in_flight(form) != Some(attempt) {
        debug!(?form, attempt, "ignored stale submission result");
        return;
    }
    *view_data.in_flight(form) = None;

    match result {
        Ok(message) => {
            info!(?form, %message, "submission accepted");
            let notice = match form {
                FormSlot::Match => Notice::success("✅ Jogo salvo com sucesso!"),
                FormSlot::Coach => {
                    view_data.staff.form = CoachForm::default();
                    Notice::success("Técnico atualizado com sucesso!")
                }
                FormSlot::User => {
                    view_data.users.form = UserForm::default();
                    Notice::success(message)
                }
            };
            *view_data.notice(form) = Some(notice);
            if let Some(plan) = view_data.refetch_after_submit(form) {
                start_fetches(runtime, view_data, tx, vec![plan]);
            }
        }
        Err(error) => {
            warn!(?form, kind = error.kind_label(), %error, "submission failed");
            let message = match form {
                FormSlot::Coach => format!("Falha ao atualizar técnico: {error}"),
                FormSlot::Match | FormSlot::User => format!("Erro: {error}"),
            };
            *view_data.notice(form) = Some(Notice::error(message));
        }
    }
}

fn apply_shell_events<R: ShellRuntime>(
    state: &ShellState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    events: Vec<ShellEvent>,
) {
    for event in events {
        match event {
            ShellEvent::ViewChanged(view) => {
                let role = state.session.role().unwrap_or(Role::Analyst);
                let plans = view_data.enter_view(view, role);
                start_fetches(runtime, view_data, tx, plans);
            }
            ShellEvent::SessionEnded => {
                info!("signed out");
                view_data.sign_out();
            }
            ShellEvent::StatusUpdated(_) => bump_status_token(view_data, tx),
            ShellEvent::SessionStarted(role) => debug!(role = role.as_str(), "session started"),
            ShellEvent::SidebarToggled(collapsed) => debug!(collapsed, "sidebar toggled"),
            ShellEvent::StatusCleared => {}
        }
    }
}

fn start_fetches<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    plans: Vec<FetchPlan>,
) {
    for plan in plans {
        debug!(slot = ?plan.slot, ticket = plan.ticket.get(), request = ?plan.request, "fetch started");
        if let Err(error) = runtime.spawn_fetch(plan.slot, plan.ticket, plan.request, tx.clone()) {
            view_data.commit(
                plan.slot,
                plan.ticket,
                Err(LoadError::network(error.to_string())),
            );
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn bump_status_token(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn emit_status(
    state: &mut ShellState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(ShellCommand::SetStatus(message.into()));
    bump_status_token(view_data, internal_tx);
}

fn handle_key_event<R: ShellRuntime>(
    state: &mut ShellState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return true;
    }

    if !state.session.is_authenticated() {
        return handle_login_key(runtime, view_data, internal_tx, key);
    }

    if !active_select_open(state, view_data) {
        let command = match key.code {
            KeyCode::Tab => Some(ShellCommand::NextView),
            KeyCode::BackTab => Some(ShellCommand::PrevView),
            KeyCode::F(number @ 1..=7) => Some(ShellCommand::ActivateIndex(usize::from(number - 1))),
            KeyCode::Char('b') if ctrl => Some(ShellCommand::ToggleSidebar),
            KeyCode::Char('x') if ctrl => Some(ShellCommand::SignOut),
            _ => None,
        };
        if let Some(command) = command {
            let events = state.dispatch(command);
            apply_shell_events(state, runtime, view_data, internal_tx, events);
            return false;
        }
        if ctrl && key.code == KeyCode::Char('r') {
            refresh_active_view(state, runtime, view_data, internal_tx);
            return false;
        }
    }

    let role = state.session.role().unwrap_or(Role::Analyst);
    match state.active_view() {
        Some(ViewKind::Teams) => handle_teams_key(runtime, view_data, internal_tx, key),
        Some(ViewKind::Reports) => handle_reports_key(runtime, view_data, internal_tx, key),
        Some(ViewKind::Matches) if role == Role::Admin => {
            handle_match_form_key(runtime, view_data, internal_tx, key);
        }
        Some(ViewKind::Staff) => handle_coach_form_key(runtime, view_data, internal_tx, key),
        Some(ViewKind::Users) => handle_user_form_key(runtime, view_data, internal_tx, key),
        _ => {}
    }
    false
}

fn refresh_active_view<R: ShellRuntime>(
    state: &mut ShellState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let (Some(view), Some(role)) = (state.active_view(), state.session.role()) else {
        return;
    };
    let plans = view_data.enter_view(view, role);
    start_fetches(runtime, view_data, internal_tx, plans);
    emit_status(
        state,
        view_data,
        internal_tx,
        format!("recarregando {}", label_for(view)),
    );
}

fn active_select_open(state: &ShellState, view_data: &ViewData) -> bool {
    match state.active_view() {
        Some(ViewKind::Teams) => view_data.teams.select.is_open(),
        Some(ViewKind::Matches) => view_data.matches.select.is_open(),
        Some(ViewKind::Staff) => view_data.staff.select.is_open(),
        Some(ViewKind::Users) => view_data.users.select.is_open(),
        _ => false,
    }
}

fn handle_login_key<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Enter {
        submit_login(runtime, view_data, internal_tx);
        return false;
    }

    let login = &mut view_data.login;
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            login.form.toggle_focus();
        }
        KeyCode::Backspace if login.in_flight.is_none() => {
            login.form.focused_mut().pop();
        }
        KeyCode::Char(ch) if login.in_flight.is_none() && !has_command_modifier(key) => {
            login.form.focused_mut().push(ch);
        }
        _ => {}
    }
    false
}

fn submit_login<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let login = &mut view_data.login;
    if login.in_flight.is_some() {
        return;
    }
    let credentials = match login.form.credentials() {
        Ok(credentials) => credentials,
        Err(error) => {
            login.error = Some(error.to_string());
            return;
        }
    };

    login.attempt = login.attempt.saturating_add(1);
    login.in_flight = Some(login.attempt);
    login.error = None;
    debug!(user = %credentials.user, attempt = login.attempt, "login started");
    if let Err(error) = runtime.spawn_login(login.attempt, credentials, internal_tx.clone()) {
        login.in_flight = None;
        login.error = Some(error.to_string());
    }
}

fn handle_teams_key<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let items = team_items(view_data.teams.list.data());
    let teams = &mut view_data.teams;
    let event = match key.code {
        KeyCode::Enter if teams.select.is_open() => teams.select.choose_highlighted(&items),
        KeyCode::Enter => {
            let current = teams.selected.map(|team| team.to_string());
            Some(teams.select.toggle(current.as_deref(), &items))
        }
        KeyCode::Up => {
            teams.select.move_highlight(-1, &items);
            None
        }
        KeyCode::Down => {
            teams.select.move_highlight(1, &items);
            None
        }
        KeyCode::Esc => teams.select.dismiss(),
        _ => None,
    };

    if let Some(SelectEvent::Chosen(value)) = event
        && let Some(team) = TeamId::parse(&value)
        && let Some(plan) = view_data.choose_team(team)
    {
        start_fetches(runtime, view_data, internal_tx, vec![plan]);
    }
}

fn handle_reports_key<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let delta = match key.code {
        KeyCode::Left => -1,
        KeyCode::Right => 1,
        _ => return,
    };
    let kind = view_data.reports.selected.rotate(delta);
    let plan = view_data.switch_report(kind);
    start_fetches(runtime, view_data, internal_tx, vec![plan]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKey {
    Focus(isize),
    Edit(char),
    Erase,
    Activate,
    Submit,
    Ignore,
}

fn form_key(key: KeyEvent) -> FormKey {
    match key.code {
        KeyCode::Up => FormKey::Focus(-1),
        KeyCode::Down => FormKey::Focus(1),
        KeyCode::Backspace => FormKey::Erase,
        KeyCode::Enter => FormKey::Activate,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => FormKey::Submit,
        KeyCode::Char(ch) if !has_command_modifier(key) => FormKey::Edit(ch),
        _ => FormKey::Ignore,
    }
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn step_focus(focus: usize, delta: isize, len: usize) -> usize {
    (focus as isize + delta).rem_euclid(len as isize) as usize
}

/// Keys for an open select: move, choose or dismiss. Returns the chosen value.
fn drive_open_select(
    select: &mut ControlledSelect,
    items: &[SelectItem],
    key: KeyEvent,
) -> Option<String> {
    match key.code {
        KeyCode::Up => select.move_highlight(-1, items),
        KeyCode::Down => select.move_highlight(1, items),
        KeyCode::Esc => {
            select.dismiss();
        }
        KeyCode::Enter => {
            if let Some(SelectEvent::Chosen(value)) = select.choose_highlighted(items) {
                return Some(value);
            }
        }
        _ => {}
    }
    None
}

fn handle_match_form_key<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let items = team_items(view_data.matches.teams.data());
    let view = &mut view_data.matches;
    let field = MatchField::ALL[view.focus % MatchField::ALL.len()];

    if view.select.is_open() {
        if let Some(value) = drive_open_select(&mut view.select, &items, key)
            && let Some(team) = TeamId::parse(&value)
        {
            view.form.set_team(field, team);
        }
        return;
    }

    match form_key(key) {
        FormKey::Focus(delta) => view.focus = step_focus(view.focus, delta, MatchField::ALL.len()),
        FormKey::Edit(ch) => {
            if let Some(text) = view.form.text_mut(field) {
                text.push(ch);
            }
        }
        FormKey::Erase => {
            if let Some(text) = view.form.text_mut(field) {
                text.pop();
            }
        }
        FormKey::Activate if field.is_team_select() => {
            let current = view.form.team(field).map(|team| team.to_string());
            view.select.toggle(current.as_deref(), &items);
        }
        FormKey::Activate | FormKey::Submit => {
            submit_form(runtime, view_data, internal_tx, FormSlot::Match);
        }
        FormKey::Ignore => {}
    }
}

fn handle_coach_form_key<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let items = team_items(view_data.staff.teams.data());
    let view = &mut view_data.staff;
    let field = CoachField::ALL[view.focus % CoachField::ALL.len()];

    if view.select.is_open() {
        if let Some(value) = drive_open_select(&mut view.select, &items, key) {
            view.form.team = TeamId::parse(&value);
        }
        return;
    }

    match form_key(key) {
        FormKey::Focus(delta) => view.focus = step_focus(view.focus, delta, CoachField::ALL.len()),
        FormKey::Edit(ch) => {
            if let Some(text) = view.form.text_mut(field) {
                text.push(ch);
            }
        }
        FormKey::Erase => {
            if let Some(text) = view.form.text_mut(field) {
                text.pop();
            }
        }
        FormKey::Activate if field == CoachField::Team => {
            let current = view.form.team.map(|team| team.to_string());
            view.select.toggle(current.as_deref(), &items);
        }
        FormKey::Activate | FormKey::Submit => {
            submit_form(runtime, view_data, internal_tx, FormSlot::Coach);
        }
        FormKey::Ignore => {}
    }
}

fn handle_user_form_key<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let items = role_items();
    let view = &mut view_data.users;
    let field = UserField::ALL[view.focus % UserField::ALL.len()];

    if view.select.is_open() {
        if let Some(value) = drive_open_select(&mut view.select, &items, key)
            && let Some(role) = Role::parse(&value)
        {
            view.form.role = role;
        }
        return;
    }

    match form_key(key) {
        FormKey::Focus(delta) => view.focus = step_focus(view.focus, delta, UserField::ALL.len()),
        FormKey::Edit(ch) => {
            if let Some(text) = view.form.text_mut(field) {
                text.push(ch);
            }
        }
        FormKey::Erase => {
            if let Some(text) = view.form.text_mut(field) {
                text.pop();
            }
        }
        FormKey::Activate if field == UserField::Role => {
            view.select.toggle(Some(view.form.role.as_str()), &items);
        }
        FormKey::Activate | FormKey::Submit => {
            submit_form(runtime, view_data, internal_tx, FormSlot::User);
        }
        FormKey::Ignore => {}
    }
}

fn submit_form<R: ShellRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    form: FormSlot,
) {
    if view_data.in_flight(form).is_some() {
        return;
    }
    let submission = match form {
        FormSlot::Match => view_data
            .matches
            .form
            .to_payload()
            .map(Submission::CreateMatch),
        FormSlot::Coach => view_data
            .staff
            .form
            .to_payload()
            .map(Submission::UpdateCoach),
        FormSlot::User => view_data
            .users
            .form
            .to_payload()
            .map(Submission::CreateUser),
    };
    let submission = match submission {
        Ok(submission) => submission,
        Err(error) => {
            *view_data.notice(form) = Some(Notice::error(error.to_string()));
            return;
        }
    };

    let attempt = view_data.begin_submit(form);
    *view_data.notice(form) = None;
    debug!(?form, attempt, "submission started");
    if let Err(error) = runtime.spawn_submit(attempt, submission, internal_tx.clone()) {
        *view_data.in_flight(form) = None;
        *view_data.notice(form) = Some(Notice::error(format!("Erro: {error}")));
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FetchRequest, FetchResponse, FetchSlot, FormSlot, InternalEvent, ShellRuntime,
        Submission, handle_key_event, process_internal_events,
    };
    use crate::views::{NoticeKind, ViewData};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use painel_app::{
        AuthError, Authenticator, Credentials, FetchTicket, LoadError, MatchForm, Record, ReportKind, Role,
        ShellCommand, ShellState, Team, TeamDetails, TeamId, TeamProfile, User, ViewKind,
    };
    use painel_testkit::{FootballFaker, records};
    use std::sync::mpsc;

    struct TestRuntime {
        role: Role,
        reject_login: Option<String>,
        responses: Vec<(FetchRequest, Result<FetchResponse, LoadError>)>,
        submit_result: Result<String, LoadError>,
        fetches: Vec<FetchRequest>,
        submissions: Vec<Submission>,
        deferred: Option<Vec<(FetchSlot, FetchTicket, FetchRequest)>>,
    }

    impl Default for TestRuntime {
        fn default() -> Self {
            Self {
                role: Role::Admin,
                reject_login: None,
                responses: Vec::new(),
                submit_result: Ok("ok".to_owned()),
                fetches: Vec::new(),
                submissions: Vec::new(),
                deferred: None,
            }
        }
    }

    impl TestRuntime {
        fn with_role(role: Role) -> Self {
            Self {
                role,
                ..Self::default()
            }
        }

        fn respond(mut self, request: FetchRequest, result: Result<FetchResponse, LoadError>) -> Self {
            self.responses.push((request, result));
            self
        }

        fn deferring(mut self) -> Self {
            self.deferred = Some(Vec::new());
            self
        }

        fn fetch_count(&self, request: FetchRequest) -> usize {
            self.fetches.iter().filter(|seen| **seen == request).count()
        }
    }

    impl Authenticator for TestRuntime {
        fn authenticate(&mut self, credentials: &Credentials) -> Result<User, AuthError> {
            if let Some(message) = &self.reject_login {
                return Err(AuthError::new(message.clone()));
            }
            Ok(User {
                name: credentials.user.clone(),
                role: self.role,
            })
        }
    }

    impl ShellRuntime for TestRuntime {
        fn fetch(&mut self, request: FetchRequest) -> Result<FetchResponse, LoadError> {
            self.fetches.push(request);
            self.responses
                .iter()
                .find(|(candidate, _)| *candidate == request)
                .map(|(_, result)| result.clone())
                .unwrap_or_else(|| match request {
                    FetchRequest::Teams => Ok(FetchResponse::Teams(Vec::new())),
                    FetchRequest::TeamDetails(_) => Ok(FetchResponse::TeamDetails(TeamDetails {
                        profile: TeamProfile::default(),
                        history: Vec::new(),
                    })),
                    _ => Ok(FetchResponse::Records(Vec::new())),
                })
        }

        fn submit(&mut self, submission: &Submission) -> Result<String, LoadError> {
            self.submissions.push(submission.clone());
            self.submit_result.clone()
        }

        fn spawn_fetch(
            &mut self,
            slot: FetchSlot,
            ticket: FetchTicket,
            request: FetchRequest,
            tx: mpsc::Sender<InternalEvent>,
        ) -> anyhow::Result<()> {
            if let Some(deferred) = &mut self.deferred {
                self.fetches.push(request);
                deferred.push((slot, ticket, request));
                return Ok(());
            }
            let result = self.fetch(request);
            tx.send(InternalEvent::Fetched {
                slot,
                ticket,
                result,
            })?;
            Ok(())
        }
    }

    struct Harness {
        state: ShellState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: mpsc::Sender<InternalEvent>,
        rx: mpsc::Receiver<InternalEvent>,
    }

    impl Harness {
        fn new(runtime: TestRuntime) -> Self {
            let (tx, rx) = mpsc::channel();
            Self {
                state: ShellState::default(),
                runtime,
                view_data: ViewData::new("postgres"),
                tx,
                rx,
            }
        }

        fn signed_in(runtime: TestRuntime) -> Self {
            let mut harness = Self::new(runtime);
            harness.view_data.login.form.password = "s3nha".to_owned();
            harness.press(KeyCode::Enter);
            harness
        }

        fn pump(&mut self) {
            process_internal_events(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                &self.rx,
            );
        }

        fn key(&mut self, key: KeyEvent) -> bool {
            let quit = handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                key,
            );
            self.pump();
            quit
        }

        fn press(&mut self, code: KeyCode) -> bool {
            self.key(KeyEvent::new(code, KeyModifiers::NONE))
        }

        fn ctrl(&mut self, ch: char) -> bool {
            self.key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        fn go_to(&mut self, view: ViewKind) {
            let events = self
                .state
                .dispatch(ShellCommand::Activate(view.id().to_owned()));
            super::apply_shell_events(
                &self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                events,
            );
            self.pump();
        }
    }

    fn team_fixture(count: usize) -> anyhow::Result<Vec<Team>> {
        let mut faker = FootballFaker::new(11);
        Ok(Team::list_from_records(&records(faker.teams(count))?)?)
    }

    fn rows(value: serde_json::Value) -> anyhow::Result<Vec<Record>> {
        records(value)
    }

    #[test]
    fn login_prefills_user_and_lands_on_dashboard() {
        let mut harness = Harness::new(TestRuntime::default());
        harness.type_text("s3nha");
        assert_eq!(harness.view_data.login.form.password, "s3nha");

        harness.press(KeyCode::Enter);
        assert!(harness.state.session.is_authenticated());
        assert_eq!(harness.state.active_view(), Some(ViewKind::Dashboard));
        assert_eq!(harness.runtime.fetch_count(FetchRequest::Dashboard), 1);
        assert!(harness.view_data.dashboard.data().is_some());
        assert!(harness.view_data.login.form.password.is_empty());
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("conectado como postgres (admin)")
        );
    }

    #[test]
    fn rejected_login_shows_message_and_stays_on_login() {
        let mut harness = Harness::new(TestRuntime {
            reject_login: Some("Usuário ou senha incorretos.".to_owned()),
            ..TestRuntime::default()
        });
        harness.type_text("errada");
        harness.press(KeyCode::Enter);

        assert!(!harness.state.session.is_authenticated());
        assert_eq!(harness.state.active_view(), None);
        assert_eq!(
            harness.view_data.login.error.as_deref(),
            Some("Usuário ou senha incorretos.")
        );
        assert!(harness.runtime.fetches.is_empty());
    }

    #[test]
    fn empty_user_is_rejected_before_any_request() {
        let mut harness = Harness::new(TestRuntime::default());
        harness.view_data.login.form.user.clear();
        harness.press(KeyCode::Enter);
        assert!(harness.view_data.login.error.is_some());
        assert_eq!(harness.view_data.login.in_flight, None);
        assert!(!harness.state.session.is_authenticated());
    }

    #[test]
    fn escape_and_ctrl_q_quit() {
        let mut login = Harness::new(TestRuntime::default());
        assert!(login.press(KeyCode::Esc));

        let mut harness = Harness::signed_in(TestRuntime::default());
        assert!(!harness.press(KeyCode::Esc));
        assert!(harness.ctrl('q'));
    }

    #[test]
    fn analyst_cannot_reach_admin_views() {
        let mut harness = Harness::signed_in(TestRuntime::with_role(Role::Analyst));
        harness.press(KeyCode::F(6));
        harness.press(KeyCode::F(7));
        assert_eq!(harness.state.active_view(), Some(ViewKind::Dashboard));

        for _ in 0..5 {
            harness.press(KeyCode::Tab);
            assert!(!matches!(
                harness.state.active_view(),
                Some(ViewKind::Staff | ViewKind::Users)
            ));
        }
    }

    #[test]
    fn admin_reaches_user_management_with_f7() {
        let mut harness = Harness::signed_in(TestRuntime::default());
        harness.press(KeyCode::F(7));
        assert_eq!(harness.state.active_view(), Some(ViewKind::Users));
    }

    #[test]
    fn every_activation_refetches() {
        let mut harness = Harness::signed_in(TestRuntime::default());
        harness.press(KeyCode::F(4));
        harness.press(KeyCode::F(1));
        harness.press(KeyCode::F(4));
        assert_eq!(harness.runtime.fetch_count(FetchRequest::Referees), 2);
        assert_eq!(harness.runtime.fetch_count(FetchRequest::Dashboard), 2);
    }

    #[test]
    fn only_the_latest_report_response_commits() -> anyhow::Result<()> {
        let mut harness = Harness::signed_in(TestRuntime::default().deferring());
        harness.go_to(ViewKind::Reports);
        harness.press(KeyCode::Right);

        let deferred = harness.runtime.deferred.take().unwrap_or_default();
        let reports = deferred
            .into_iter()
            .filter(|(slot, _, _)| *slot == FetchSlot::Report)
            .collect::<Vec<_>>();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].2, FetchRequest::Report(ReportKind::Violencia));

        let newest = rows(serde_json::json!([{"Competicao": "Copa", "Vermelhos": 3}]))?;
        let oldest = rows(serde_json::json!([{"Nome": "Ana", "Time": "Flamengo"}]))?;
        harness.tx.send(InternalEvent::Fetched {
            slot: FetchSlot::Report,
            ticket: reports[1].1,
            result: Ok(FetchResponse::Records(newest.clone())),
        })?;
        harness.tx.send(InternalEvent::Fetched {
            slot: FetchSlot::Report,
            ticket: reports[0].1,
            result: Ok(FetchResponse::Records(oldest)),
        })?;
        harness.pump();

        assert_eq!(
            harness.view_data.reports.data.key(),
            Some(&ReportKind::Violencia)
        );
        assert_eq!(harness.view_data.reports.data.data(), Some(&newest));
        Ok(())
    }

    #[test]
    fn team_list_failure_stays_inside_the_teams_view() {
        let runtime = TestRuntime::default().respond(
            FetchRequest::Teams,
            Err(LoadError::shape("expected a list of records, got object")),
        );
        let mut harness = Harness::signed_in(runtime);
        harness.press(KeyCode::F(2));

        assert_eq!(harness.state.active_view(), Some(ViewKind::Teams));
        assert!(harness.view_data.teams.list.error().is_some());
        assert!(harness.view_data.dashboard.error().is_none());
        assert!(harness.view_data.dashboard.data().is_some());

        harness.press(KeyCode::Tab);
        assert_eq!(harness.state.active_view(), Some(ViewKind::Matches));
        assert!(harness.view_data.matches.list.data().is_some());
    }

    #[test]
    fn choosing_a_team_loads_its_details() -> anyhow::Result<()> {
        let teams = team_fixture(3)?;
        let runtime = TestRuntime::default().respond(FetchRequest::Teams, Ok(FetchResponse::Teams(teams)));
        let mut harness = Harness::signed_in(runtime);
        harness.press(KeyCode::F(2));

        harness.press(KeyCode::Enter);
        assert!(harness.view_data.teams.select.is_open());
        harness.press(KeyCode::Tab);
        assert_eq!(harness.state.active_view(), Some(ViewKind::Teams));

        harness.press(KeyCode::Down);
        harness.press(KeyCode::Enter);
        assert!(!harness.view_data.teams.select.is_open());
        assert_eq!(harness.view_data.teams.selected, Some(TeamId::new(2)));
        assert_eq!(
            harness
                .runtime
                .fetch_count(FetchRequest::TeamDetails(TeamId::new(2))),
            1
        );
        assert!(harness.view_data.teams.details.data().is_some());
        Ok(())
    }

    #[test]
    fn analyst_sees_matches_without_the_form() {
        let mut harness = Harness::signed_in(TestRuntime::with_role(Role::Analyst));
        harness.press(KeyCode::F(3));
        harness.type_text("12");
        harness.ctrl('s');
        assert_eq!(harness.runtime.fetch_count(FetchRequest::Teams), 0);
        assert_eq!(harness.view_data.matches.form, MatchForm::default());
        assert!(harness.runtime.submissions.is_empty());
    }

    #[test]
    fn match_form_requires_both_teams() {
        let mut harness = Harness::signed_in(TestRuntime::default());
        harness.press(KeyCode::F(3));
        harness.type_text("7");
        harness.ctrl('s');

        let notice = harness.view_data.matches.notice.clone().expect("validation notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Selecione os dois times!");
        assert!(harness.runtime.submissions.is_empty());
    }

    #[test]
    fn saved_match_refreshes_the_list() -> anyhow::Result<()> {
        let teams = team_fixture(4)?;
        let runtime =
            TestRuntime::default().respond(FetchRequest::Teams, Ok(FetchResponse::Teams(teams)));
        let mut harness = Harness::signed_in(runtime);
        harness.press(KeyCode::F(3));
        harness.view_data.matches.form = MatchForm {
            number: "7".to_owned(),
            date: "2024-05-01".to_owned(),
            competition: "1".to_owned(),
            referee: "2".to_owned(),
            home_team: None,
            home_goals: "2".to_owned(),
            away_team: Some(TeamId::new(4)),
            away_goals: "0".to_owned(),
            corners: "5".to_owned(),
            red_cards: "0".to_owned(),
            yellow_cards: "3".to_owned(),
            offsides: "1".to_owned(),
        };

        for _ in 0..4 {
            harness.press(KeyCode::Down);
        }
        harness.press(KeyCode::Enter);
        assert!(harness.view_data.matches.select.is_open());
        harness.press(KeyCode::Enter);
        assert_eq!(harness.view_data.matches.form.home_team, Some(TeamId::new(1)));

        harness.ctrl('s');
        let Some(Submission::CreateMatch(payload)) = harness.runtime.submissions.first() else {
            panic!("expected a match submission");
        };
        assert_eq!(payload.data_par, "01/05/2024");
        assert_eq!(payload.id_time_mandante, 1);

        let notice = harness.view_data.matches.notice.clone().expect("success notice");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "✅ Jogo salvo com sucesso!");
        assert_eq!(harness.runtime.fetch_count(FetchRequest::Matches), 2);
        Ok(())
    }

    #[test]
    fn coach_update_clears_form_and_reloads_teams() -> anyhow::Result<()> {
        let teams = team_fixture(2)?;
        let runtime =
            TestRuntime::default().respond(FetchRequest::Teams, Ok(FetchResponse::Teams(teams)));
        let mut harness = Harness::signed_in(runtime);
        harness.press(KeyCode::F(6));

        harness.press(KeyCode::Enter);
        harness.press(KeyCode::Down);
        harness.press(KeyCode::Enter);
        assert_eq!(harness.view_data.staff.form.team, Some(TeamId::new(2)));
        assert_eq!(
            harness
                .view_data
                .staff
                .selected_team()
                .map(|team| team.name.as_str()),
            Some("Palmeiras")
        );

        harness.press(KeyCode::Down);
        harness.type_text("Abel Ferreira");
        harness.press(KeyCode::Down);
        harness.type_text("Portugal");
        harness.press(KeyCode::Down);
        harness.type_text("46");
        harness.press(KeyCode::Enter);

        let Some(Submission::UpdateCoach(update)) = harness.runtime.submissions.first() else {
            panic!("expected a coach submission");
        };
        assert_eq!(update.id_time, 2);
        assert_eq!(update.novo_tecnico, "Abel Ferreira");
        assert_eq!(update.idade, 46);
        assert_eq!(harness.view_data.staff.form.team, None);
        assert!(harness.view_data.staff.form.name.is_empty());
        assert_eq!(harness.runtime.fetch_count(FetchRequest::Teams), 2);
        Ok(())
    }

    #[test]
    fn failed_coach_update_keeps_form_and_reports_failure() -> anyhow::Result<()> {
        let runtime = TestRuntime {
            submit_result: Err(LoadError::business("Erro de Permissão: permission denied")),
            ..TestRuntime::default()
        }
        .respond(FetchRequest::Teams, Ok(FetchResponse::Teams(team_fixture(2)?)));
        let mut harness = Harness::signed_in(runtime);
        harness.press(KeyCode::F(6));
        harness.view_data.staff.form.team = Some(TeamId::new(1));
        harness.view_data.staff.form.name = "Tite".to_owned();
        harness.view_data.staff.form.age = "63".to_owned();
        harness.ctrl('s');

        let notice = harness.view_data.staff.notice.clone().expect("failure notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(
            notice.message,
            "Falha ao atualizar técnico: Erro de Permissão: permission denied"
        );
        assert_eq!(harness.view_data.staff.form.name, "Tite");
        Ok(())
    }

    #[test]
    fn created_user_resets_form_to_analyst() {
        let runtime = TestRuntime {
            submit_result: Ok("Usuário novo criado com sucesso!".to_owned()),
            ..TestRuntime::default()
        };
        let mut harness = Harness::signed_in(runtime);
        harness.press(KeyCode::F(7));
        harness.type_text("novo");
        harness.press(KeyCode::Down);
        harness.type_text("x");
        harness.press(KeyCode::Down);
        harness.press(KeyCode::Enter);
        harness.press(KeyCode::Down);
        harness.press(KeyCode::Enter);
        assert_eq!(harness.view_data.users.form.role, Role::Admin);

        harness.ctrl('s');
        let Some(Submission::CreateUser(user)) = harness.runtime.submissions.first() else {
            panic!("expected a user submission");
        };
        assert_eq!(user.role, "admin");
        assert_eq!(harness.view_data.users.form.role, Role::Analyst);
        assert!(harness.view_data.users.form.username.is_empty());
        assert_eq!(
            harness.view_data.users.notice.as_ref().map(|notice| notice.message.as_str()),
            Some("Usuário novo criado com sucesso!")
        );
    }

    #[test]
    fn sign_out_returns_to_login_and_drops_in_flight_loads() -> anyhow::Result<()> {
        let mut harness = Harness::signed_in(TestRuntime::default().deferring());
        harness.ctrl('b');
        assert!(harness.state.navigation.collapsed());

        harness.ctrl('x');
        assert!(!harness.state.session.is_authenticated());
        assert_eq!(harness.state.active_view(), None);
        assert!(!harness.state.navigation.collapsed());

        let deferred = harness.runtime.deferred.take().unwrap_or_default();
        let (slot, ticket, _) = deferred[0];
        harness.tx.send(InternalEvent::Fetched {
            slot,
            ticket,
            result: Ok(FetchResponse::Records(Vec::new())),
        })?;
        harness.pump();
        assert!(harness.view_data.dashboard.data().is_none());
        assert_eq!(harness.view_data.login.form.user, "postgres");
        Ok(())
    }

    #[test]
    fn late_submission_after_sign_out_is_ignored() {
        let mut harness = Harness::signed_in(TestRuntime::default());
        let attempt = harness.view_data.begin_submit(FormSlot::Match);
        harness.ctrl('x');
        assert_eq!(harness.view_data.matches.in_flight, None);
        harness
            .tx
            .send(InternalEvent::Submitted {
                form: FormSlot::Match,
                attempt,
                result: Ok("Partida criada".to_owned()),
            })
            .expect("channel open");
        harness.pump();
        assert_eq!(harness.view_data.matches.notice, None);
    }

    #[test]
    fn previous_session_submission_does_not_settle_the_new_one() {
        let mut harness = Harness::signed_in(TestRuntime::default());
        let old = harness.view_data.begin_submit(FormSlot::User);
        harness.ctrl('x');

        harness.view_data.login.form.password = "s3nha".to_owned();
        harness.press(KeyCode::Enter);
        assert!(harness.state.session.is_authenticated());
        harness.press(KeyCode::F(7));
        harness.type_text("novo");
        let current = harness.view_data.begin_submit(FormSlot::User);
        assert_ne!(old, current);

        harness
            .tx
            .send(InternalEvent::Submitted {
                form: FormSlot::User,
                attempt: old,
                result: Ok("Usuário velho criado".to_owned()),
            })
            .expect("channel open");
        harness.pump();
        assert_eq!(harness.view_data.users.notice, None);
        assert_eq!(harness.view_data.users.form.username, "novo");
        assert_eq!(harness.view_data.users.in_flight, Some(current));

        harness
            .tx
            .send(InternalEvent::Submitted {
                form: FormSlot::User,
                attempt: current,
                result: Ok("Usuário novo criado".to_owned()),
            })
            .expect("channel open");
        harness.pump();
        assert_eq!(harness.view_data.users.in_flight, None);
        assert!(harness.view_data.users.form.username.is_empty());
        assert_eq!(
            harness.view_data.users.notice.as_ref().map(|notice| notice.message.as_str()),
            Some("Usuário novo criado")
        );
    }

    #[test]
    fn stale_status_clear_is_ignored() {
        let mut harness = Harness::signed_in(TestRuntime::default());
        let first = harness.view_data.status_token;
        super::emit_status(
            &mut harness.state,
            &mut harness.view_data,
            &harness.tx,
            "recarregando",
        );
        harness
            .tx
            .send(InternalEvent::ClearStatus { token: first })
            .expect("channel open");
        harness.pump();
        assert_eq!(harness.state.status_line.as_deref(), Some("recarregando"));

        let current = harness.view_data.status_token;
        harness
            .tx
            .send(InternalEvent::ClearStatus { token: current })
            .expect("channel open");
        harness.pump();
        assert_eq!(harness.state.status_line, None);
    }

    #[test]
    fn refresh_refetches_the_active_view() {
        let mut harness = Harness::signed_in(TestRuntime::default());
        harness.ctrl('r');
        assert_eq!(harness.runtime.fetch_count(FetchRequest::Dashboard), 2);
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("recarregando Painel Geral")
        );
    }

    #[test]
    fn fetch_response_kind_mismatch_is_shape_error() {
        let error = FetchResponse::Teams(Vec::new())
            .into_records()
            .expect_err("teams are not records");
        assert!(matches!(error, LoadError::Shape(_)));
    }
}
