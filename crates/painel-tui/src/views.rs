// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Per-view state. Every view owns its own load lifecycles so a failure or a
//! late response in one view never touches another.

use painel_app::{
    CoachForm, CommitOutcome, ControlledSelect, FetchTicket, LoadError, LoginForm, MatchForm,
    Record, RemoteView, ReportKind, Role, SelectItem, Team, TeamDetails, TeamId, UserForm,
    ViewKind,
};

use crate::{FetchRequest, FetchResponse, FetchSlot, FormSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchPlan {
    pub slot: FetchSlot,
    pub ticket: FetchTicket,
    pub request: FetchRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoginUi {
    pub form: LoginForm,
    pub error: Option<String>,
    pub attempt: u64,
    pub in_flight: Option<u64>,
}

impl LoginUi {
    fn new(default_user: &str) -> Self {
        Self {
            form: LoginForm::new(default_user),
            error: None,
            attempt: 0,
            in_flight: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct TeamsView {
    pub list: RemoteView<(), Vec<Team>>,
    pub select: ControlledSelect,
    pub selected: Option<TeamId>,
    pub details: RemoteView<TeamId, TeamDetails>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct MatchesView {
    pub list: RemoteView<(), Vec<Record>>,
    pub teams: RemoteView<(), Vec<Team>>,
    pub form: MatchForm,
    pub focus: usize,
    pub select: ControlledSelect,
    pub in_flight: Option<u64>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct StaffView {
    pub teams: RemoteView<(), Vec<Team>>,
    pub form: CoachForm,
    pub focus: usize,
    pub select: ControlledSelect,
    pub in_flight: Option<u64>,
    pub notice: Option<Notice>,
}

impl StaffView {
    pub fn selected_team(&self) -> Option<&Team> {
        let id = self.form.team?;
        self.teams.data()?.iter().find(|team| team.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct UsersView {
    pub form: UserForm,
    pub focus: usize,
    pub select: ControlledSelect,
    pub in_flight: Option<u64>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReportsView {
    pub selected: ReportKind,
    pub data: RemoteView<ReportKind, Vec<Record>>,
}

impl Default for ReportsView {
    fn default() -> Self {
        Self {
            selected: ReportKind::Torcedores,
            data: RemoteView::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ViewData {
    pub login: LoginUi,
    pub dashboard: RemoteView<(), Vec<Record>>,
    pub teams: TeamsView,
    pub matches: MatchesView,
    pub staff: StaffView,
    pub referees: RemoteView<(), Vec<Record>>,
    pub reports: ReportsView,
    pub users: UsersView,
    pub status_token: u64,
    pub submit_attempt: u64,
    default_user: String,
}

impl ViewData {
    pub fn new(default_user: &str) -> Self {
        Self {
            login: LoginUi::new(default_user),
            dashboard: RemoteView::new(),
            teams: TeamsView::default(),
            matches: MatchesView::default(),
            staff: StaffView::default(),
            referees: RemoteView::new(),
            reports: ReportsView::default(),
            users: UsersView::default(),
            status_token: 0,
            submit_attempt: 0,
            default_user: default_user.to_owned(),
        }
    }

    /// Starts the loads a view needs each time it becomes visible.
    pub fn enter_view(&mut self, view: ViewKind, role: Role) -> Vec<FetchPlan> {
        match view {
            ViewKind::Dashboard => vec![plan(
                &mut self.dashboard,
                (),
                FetchSlot::Dashboard,
                FetchRequest::Dashboard,
            )],
            ViewKind::Teams => {
                let mut plans = vec![plan(
                    &mut self.teams.list,
                    (),
                    FetchSlot::TeamList,
                    FetchRequest::Teams,
                )];
                if let Some(team) = self.teams.selected {
                    plans.push(plan(
                        &mut self.teams.details,
                        team,
                        FetchSlot::TeamDetails,
                        FetchRequest::TeamDetails(team),
                    ));
                }
                plans
            }
            ViewKind::Matches => {
                let mut plans = vec![plan(
                    &mut self.matches.list,
                    (),
                    FetchSlot::MatchList,
                    FetchRequest::Matches,
                )];
                if role == Role::Admin {
                    plans.push(plan(
                        &mut self.matches.teams,
                        (),
                        FetchSlot::MatchTeams,
                        FetchRequest::Teams,
                    ));
                }
                plans
            }
            ViewKind::Staff => vec![plan(
                &mut self.staff.teams,
                (),
                FetchSlot::StaffTeams,
                FetchRequest::Teams,
            )],
            ViewKind::Referees => vec![plan(
                &mut self.referees,
                (),
                FetchSlot::Referees,
                FetchRequest::Referees,
            )],
            ViewKind::Reports => {
                let kind = self.reports.selected;
                vec![plan(
                    &mut self.reports.data,
                    kind,
                    FetchSlot::Report,
                    FetchRequest::Report(kind),
                )]
            }
            ViewKind::Users => Vec::new(),
        }
    }

    /// New dependency key for the team explorer. Re-choosing the loaded team
    /// does not refetch unless the last load failed.
    pub fn choose_team(&mut self, team: TeamId) -> Option<FetchPlan> {
        self.teams.selected = Some(team);
        let unchanged = !self.teams.details.needs_fetch(&team);
        if unchanged && self.teams.details.error().is_none() {
            return None;
        }
        Some(plan(
            &mut self.teams.details,
            team,
            FetchSlot::TeamDetails,
            FetchRequest::TeamDetails(team),
        ))
    }

    pub fn switch_report(&mut self, kind: ReportKind) -> FetchPlan {
        self.reports.selected = kind;
        plan(
            &mut self.reports.data,
            kind,
            FetchSlot::Report,
            FetchRequest::Report(kind),
        )
    }

    pub fn refetch_after_submit(&mut self, form: FormSlot) -> Option<FetchPlan> {
        match form {
            FormSlot::Match => Some(plan(
                &mut self.matches.list,
                (),
                FetchSlot::MatchList,
                FetchRequest::Matches,
            )),
            FormSlot::Coach => Some(plan(
                &mut self.staff.teams,
                (),
                FetchSlot::StaffTeams,
                FetchRequest::Teams,
            )),
            FormSlot::User => None,
        }
    }

    pub fn commit(
        &mut self,
        slot: FetchSlot,
        ticket: FetchTicket,
        result: Result<FetchResponse, LoadError>,
    ) -> CommitOutcome {
        match slot {
            FetchSlot::Dashboard => self
                .dashboard
                .commit(ticket, result.and_then(FetchResponse::into_records)),
            FetchSlot::TeamList => self
                .teams
                .list
                .commit(ticket, result.and_then(FetchResponse::into_teams)),
            FetchSlot::TeamDetails => self
                .teams
                .details
                .commit(ticket, result.and_then(FetchResponse::into_team_details)),
            FetchSlot::MatchList => self
                .matches
                .list
                .commit(ticket, result.and_then(FetchResponse::into_records)),
            FetchSlot::MatchTeams => self
                .matches
                .teams
                .commit(ticket, result.and_then(FetchResponse::into_teams)),
            FetchSlot::StaffTeams => self
                .staff
                .teams
                .commit(ticket, result.and_then(FetchResponse::into_teams)),
            FetchSlot::Referees => self
                .referees
                .commit(ticket, result.and_then(FetchResponse::into_records)),
            FetchSlot::Report => self
                .reports
                .data
                .commit(ticket, result.and_then(FetchResponse::into_records)),
        }
    }

    /// Attempt number of the submission still pending on `form`, if any.
    pub fn in_flight(&mut self, form: FormSlot) -> &mut Option<u64> {
        match form {
            FormSlot::Match => &mut self.matches.in_flight,
            FormSlot::Coach => &mut self.staff.in_flight,
            FormSlot::User => &mut self.users.in_flight,
        }
    }

    /// Issues the next submission attempt for `form`. The counter survives
    /// sign-out so a result from an earlier session never matches.
    pub fn begin_submit(&mut self, form: FormSlot) -> u64 {
        self.submit_attempt = self.submit_attempt.saturating_add(1);
        *self.in_flight(form) = Some(self.submit_attempt);
        self.submit_attempt
    }

    pub fn notice(&mut self, form: FormSlot) -> &mut Option<Notice> {
        match form {
            FormSlot::Match => &mut self.matches.notice,
            FormSlot::Coach => &mut self.staff.notice,
            FormSlot::User => &mut self.users.notice,
        }
    }

    /// Drops everything tied to the previous session. Remote views are reset
    /// in place so responses still in flight arrive stale.
    pub fn sign_out(&mut self) {
        self.login = LoginUi {
            attempt: self.login.attempt,
            ..LoginUi::new(&self.default_user)
        };
        self.dashboard.reset();
        self.teams.list.reset();
        self.teams.details.reset();
        self.teams.select = ControlledSelect::new();
        self.teams.selected = None;
        self.matches.list.reset();
        self.matches.teams.reset();
        self.matches.form = MatchForm::default();
        self.matches.focus = 0;
        self.matches.select = ControlledSelect::new();
        self.staff.teams.reset();
        self.staff.form = CoachForm::default();
        self.staff.focus = 0;
        self.staff.select = ControlledSelect::new();
        self.referees.reset();
        self.reports.selected = ReportKind::Torcedores;
        self.reports.data.reset();
        self.users.form = UserForm::default();
        self.users.focus = 0;
        self.users.select = ControlledSelect::new();
        for form in [FormSlot::Match, FormSlot::Coach, FormSlot::User] {
            *self.in_flight(form) = None;
            *self.notice(form) = None;
        }
    }
}

fn plan<K: Clone + PartialEq, T>(
    view: &mut RemoteView<K, T>,
    key: K,
    slot: FetchSlot,
    request: FetchRequest,
) -> FetchPlan {
    FetchPlan {
        slot,
        ticket: view.begin(key),
        request,
    }
}

pub(crate) fn team_items(teams: Option<&Vec<Team>>) -> Vec<SelectItem> {
    teams
        .map(|teams| {
            teams
                .iter()
                .map(|team| SelectItem::new(team.id.to_string(), team.name.clone()))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn role_items() -> Vec<SelectItem> {
    [Role::Analyst, Role::Admin]
        .into_iter()
        .map(|role| SelectItem::new(role.as_str(), role.label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ViewData, team_items};
    use crate::{FetchRequest, FetchResponse, FetchSlot};
    use painel_app::{
        CommitOutcome, LoadError, ReportKind, Role, TeamDetails, TeamId, TeamProfile, ViewKind,
    };
    use painel_testkit::{FootballFaker, records};

    #[test]
    fn entering_matches_as_analyst_skips_team_options() {
        let mut views = ViewData::new("postgres");
        let analyst = views.enter_view(ViewKind::Matches, Role::Analyst);
        assert_eq!(analyst.len(), 1);
        assert_eq!(analyst[0].request, FetchRequest::Matches);

        let admin = views.enter_view(ViewKind::Matches, Role::Admin);
        assert_eq!(admin.len(), 2);
        assert_eq!(admin[1].slot, FetchSlot::MatchTeams);
    }

    #[test]
    fn reentering_a_view_refetches() {
        let mut views = ViewData::new("postgres");
        let first = views.enter_view(ViewKind::Referees, Role::Analyst).remove(0);
        views.commit(first.slot, first.ticket, Ok(FetchResponse::Records(Vec::new())));

        let second = views.enter_view(ViewKind::Referees, Role::Analyst).remove(0);
        assert!(views.referees.is_loading());
        assert_ne!(first.ticket, second.ticket);
    }

    #[test]
    fn report_switch_discards_previous_report_response() -> anyhow::Result<()> {
        let mut views = ViewData::new("postgres");
        let torcedores = views.enter_view(ViewKind::Reports, Role::Analyst).remove(0);
        let violencia = views.switch_report(ReportKind::Violencia);

        let late = records(serde_json::json!([{"Nome": "Ana"}]))?;
        let current = records(serde_json::json!([{"Competicao": "Copa"}]))?;
        assert_eq!(
            views.commit(violencia.slot, violencia.ticket, Ok(FetchResponse::Records(current))),
            CommitOutcome::Applied
        );
        assert_eq!(
            views.commit(torcedores.slot, torcedores.ticket, Ok(FetchResponse::Records(late))),
            CommitOutcome::Stale
        );
        assert_eq!(views.reports.data.key(), Some(&ReportKind::Violencia));
        Ok(())
    }

    #[test]
    fn wrong_response_kind_is_a_shape_error() {
        let mut views = ViewData::new("postgres");
        let plan = views.enter_view(ViewKind::Dashboard, Role::Admin).remove(0);
        views.commit(plan.slot, plan.ticket, Ok(FetchResponse::Teams(Vec::new())));
        assert!(
            views
                .dashboard
                .error()
                .is_some_and(|message| message.starts_with("unexpected response"))
        );
    }

    #[test]
    fn choosing_the_loaded_team_again_does_not_refetch() {
        let mut views = ViewData::new("postgres");
        let plan = views.choose_team(TeamId::new(3)).expect("first choice fetches");
        views.commit(
            plan.slot,
            plan.ticket,
            Ok(FetchResponse::TeamDetails(TeamDetails {
                profile: TeamProfile::default(),
                history: Vec::new(),
            })),
        );
        assert!(views.choose_team(TeamId::new(3)).is_none());

        let other = views.choose_team(TeamId::new(4)).expect("new key fetches");
        views.commit(
            other.slot,
            other.ticket,
            Err(LoadError::business("Time não encontrado")),
        );
        assert!(views.choose_team(TeamId::new(4)).is_some());
    }

    #[test]
    fn sign_out_makes_in_flight_fetches_stale() {
        let mut views = ViewData::new("postgres");
        let plan = views.enter_view(ViewKind::Dashboard, Role::Admin).remove(0);
        views.sign_out();
        assert_eq!(
            views.commit(plan.slot, plan.ticket, Ok(FetchResponse::Records(Vec::new()))),
            CommitOutcome::Stale
        );
        assert_eq!(views.login.form.user, "postgres");
    }

    #[test]
    fn team_items_use_ids_as_values() -> anyhow::Result<()> {
        let mut faker = FootballFaker::new(1);
        let teams = painel_app::Team::list_from_records(&records(faker.teams(2))?)?;
        let items = team_items(Some(&teams));
        assert_eq!(items[0].value, "1");
        assert_eq!(items[1].label, "Palmeiras");
        assert!(team_items(None).is_empty());
        Ok(())
    }
}
