// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Role, ViewKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationItem {
    pub id: ViewKind,
    pub label: &'static str,
    pub required_role: Option<Role>,
}

pub const NAVIGATION_ITEMS: [NavigationItem; 7] = [
    NavigationItem {
        id: ViewKind::Dashboard,
        label: "Painel Geral",
        required_role: None,
    },
    NavigationItem {
        id: ViewKind::Teams,
        label: "Clubes",
        required_role: None,
    },
    NavigationItem {
        id: ViewKind::Matches,
        label: "Partidas",
        required_role: None,
    },
    NavigationItem {
        id: ViewKind::Referees,
        label: "Árbitros",
        required_role: None,
    },
    NavigationItem {
        id: ViewKind::Reports,
        label: "Relatórios SQL",
        required_role: None,
    },
    NavigationItem {
        id: ViewKind::Staff,
        label: "Equipe Técnica",
        required_role: Some(Role::Admin),
    },
    NavigationItem {
        id: ViewKind::Users,
        label: "Usuários",
        required_role: Some(Role::Admin),
    },
];

pub const DEFAULT_VIEW: ViewKind = ViewKind::Dashboard;

/// Base items in declared order, then the items gated to `role`.
pub fn visible_items(role: Role) -> Vec<NavigationItem> {
    let base = NAVIGATION_ITEMS
        .iter()
        .filter(|item| item.required_role.is_none());
    let gated = NAVIGATION_ITEMS
        .iter()
        .filter(|item| item.required_role == Some(role));
    base.chain(gated).copied().collect()
}

pub fn label_for(view: ViewKind) -> &'static str {
    NAVIGATION_ITEMS
        .iter()
        .find(|item| item.id == view)
        .map_or(view.id(), |item| item.label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Unauthenticated,
    Authenticated(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub active: ViewKind,
    pub collapsed: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            active: DEFAULT_VIEW,
            collapsed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    phase: NavigationPhase,
    state: NavigationState,
    start_collapsed: bool,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self {
            phase: NavigationPhase::Unauthenticated,
            state: NavigationState::default(),
            start_collapsed: false,
        }
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the sidebar `collapsed`; sign-out returns to this.
    pub fn with_collapsed(collapsed: bool) -> Self {
        Self {
            state: NavigationState {
                collapsed,
                ..NavigationState::default()
            },
            start_collapsed: collapsed,
            ..Self::default()
        }
    }

    pub const fn phase(&self) -> NavigationPhase {
        self.phase
    }

    pub const fn state(&self) -> NavigationState {
        self.state
    }

    pub const fn collapsed(&self) -> bool {
        self.state.collapsed
    }

    /// Active view, or `None` while nobody is logged in.
    pub fn active(&self) -> Option<ViewKind> {
        match self.phase {
            NavigationPhase::Unauthenticated => None,
            NavigationPhase::Authenticated(_) => Some(self.state.active),
        }
    }

    pub fn items(&self) -> Vec<NavigationItem> {
        match self.phase {
            NavigationPhase::Unauthenticated => Vec::new(),
            NavigationPhase::Authenticated(role) => visible_items(role),
        }
    }

    pub fn is_visible(&self, view: ViewKind) -> bool {
        self.items().iter().any(|item| item.id == view)
    }

    /// Enters the authenticated phase for `role`. Keeps the active view when
    /// the role can still see it.
    pub fn authenticate(&mut self, role: Role) {
        self.phase = NavigationPhase::Authenticated(role);
        if !self.is_visible(self.state.active) {
            self.state.active = DEFAULT_VIEW;
        }
    }

    pub fn sign_out(&mut self) {
        self.phase = NavigationPhase::Unauthenticated;
        self.state = NavigationState {
            collapsed: self.start_collapsed,
            ..NavigationState::default()
        };
    }

    /// Activates the view with `id`. Unknown or hidden ids are ignored.
    pub fn set_active(&mut self, id: &str) -> Option<ViewKind> {
        let view = ViewKind::parse(id)?;
        self.activate(view)
    }

    pub fn activate(&mut self, view: ViewKind) -> Option<ViewKind> {
        if !self.is_visible(view) {
            return None;
        }
        self.state.active = view;
        Some(view)
    }

    pub fn activate_index(&mut self, index: usize) -> Option<ViewKind> {
        let item = self.items().get(index).copied()?;
        self.activate(item.id)
    }

    pub fn next(&mut self) -> Option<ViewKind> {
        self.rotate(1)
    }

    pub fn previous(&mut self) -> Option<ViewKind> {
        self.rotate(-1)
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        self.state.collapsed = !self.state.collapsed;
        self.state.collapsed
    }

    fn rotate(&mut self, delta: isize) -> Option<ViewKind> {
        let items = self.items();
        if items.is_empty() {
            return None;
        }
        let current = items
            .iter()
            .position(|item| item.id == self.state.active)
            .unwrap_or(0) as isize;
        let len = items.len() as isize;
        let next = items[(current + delta).rem_euclid(len) as usize].id;
        self.activate(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{NAVIGATION_ITEMS, NavigationController, NavigationPhase, visible_items};
    use crate::{Role, ViewKind};

    fn ids(role: Role) -> Vec<&'static str> {
        visible_items(role).iter().map(|item| item.id.id()).collect()
    }

    #[test]
    fn visible_items_are_base_then_role_gated() {
        assert_eq!(
            ids(Role::Admin),
            vec![
                "dashboard", "teams", "matches", "referees", "reports", "staff", "users"
            ]
        );
        assert_eq!(
            ids(Role::Analyst),
            vec!["dashboard", "teams", "matches", "referees", "reports"]
        );
    }

    #[test]
    fn no_role_sees_items_gated_to_another_role() {
        for role in [Role::Admin, Role::Analyst] {
            for item in visible_items(role) {
                assert!(item.required_role.is_none_or(|required| required == role));
            }
        }
        assert_eq!(NAVIGATION_ITEMS.len(), 7);
    }

    #[test]
    fn unauthenticated_controller_reaches_nothing() {
        let mut nav = NavigationController::new();
        assert_eq!(nav.phase(), NavigationPhase::Unauthenticated);
        assert_eq!(nav.active(), None);
        assert_eq!(nav.set_active("teams"), None);
        assert_eq!(nav.next(), None);
        assert!(nav.items().is_empty());
    }

    #[test]
    fn logout_resets_active_view_and_sidebar() {
        let mut nav = NavigationController::new();
        nav.authenticate(Role::Admin);
        nav.set_active("users");
        nav.toggle_collapsed();

        nav.sign_out();
        nav.authenticate(Role::Admin);
        assert_eq!(nav.active(), Some(ViewKind::Dashboard));
        assert!(!nav.collapsed());
    }

    #[test]
    fn logout_restores_the_configured_sidebar() {
        let mut nav = NavigationController::with_collapsed(true);
        nav.authenticate(Role::Analyst);
        nav.toggle_collapsed();
        assert!(!nav.collapsed());

        nav.sign_out();
        assert!(nav.collapsed());
    }

    #[test]
    fn analyst_cannot_activate_staff() {
        let mut nav = NavigationController::new();
        nav.authenticate(Role::Analyst);
        nav.set_active("reports");

        assert_eq!(nav.set_active("staff"), None);
        assert_eq!(nav.set_active("nope"), None);
        assert_eq!(nav.active(), Some(ViewKind::Reports));
    }

    #[test]
    fn role_change_resets_hidden_active_view() {
        let mut nav = NavigationController::new();
        nav.authenticate(Role::Admin);
        nav.set_active("staff");
        nav.authenticate(Role::Analyst);
        assert_eq!(nav.active(), Some(ViewKind::Dashboard));
    }

    #[test]
    fn cycling_wraps_over_visible_items() {
        let mut nav = NavigationController::new();
        nav.authenticate(Role::Analyst);
        assert_eq!(nav.previous(), Some(ViewKind::Reports));
        assert_eq!(nav.next(), Some(ViewKind::Dashboard));
        assert_eq!(nav.activate_index(2), Some(ViewKind::Matches));
        assert_eq!(nav.activate_index(6), None);
        assert_eq!(nav.active(), Some(ViewKind::Matches));
    }

    #[test]
    fn collapse_is_a_pure_flip() {
        let mut nav = NavigationController::with_collapsed(true);
        assert!(nav.collapsed());
        assert!(!nav.toggle_collapsed());
        assert!(nav.toggle_collapsed());
    }
}
