// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    AuthError, AuthSession, Authenticator, Credentials, NavigationController, Role, User,
    ViewKind,
};

/// Root state of the shell: who is logged in, which view is active and the
/// transient status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellState {
    pub session: AuthSession,
    pub navigation: NavigationController,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    SignedIn(User),
    SignOut,
    NextView,
    PrevView,
    Activate(String),
    ActivateIndex(usize),
    ToggleSidebar,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    SessionStarted(Role),
    SessionEnded,
    ViewChanged(ViewKind),
    SidebarToggled(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl ShellState {
    pub fn new(start_collapsed: bool) -> Self {
        Self {
            navigation: NavigationController::with_collapsed(start_collapsed),
            ..Self::default()
        }
    }

    pub fn active_view(&self) -> Option<ViewKind> {
        self.navigation.active()
    }

    /// Blocking sign-in for callers that can wait on the authenticator. The
    /// shell signs in on a worker and replays the result as `SignedIn`.
    pub fn login<A: Authenticator>(
        &mut self,
        authenticator: &mut A,
        credentials: &Credentials,
    ) -> Result<Vec<ShellEvent>, AuthError> {
        let user = self.session.login(authenticator, credentials)?;
        Ok(self.dispatch(ShellCommand::SignedIn(user)))
    }

    pub fn dispatch(&mut self, command: ShellCommand) -> Vec<ShellEvent> {
        match command {
            ShellCommand::SignedIn(user) => {
                let role = user.role;
                let greeting = format!("conectado como {} ({})", user.name, role.as_str());
                self.session.establish(user);
                self.navigation.authenticate(role);
                let mut events = vec![ShellEvent::SessionStarted(role)];
                events.extend(self.active_view().map(ShellEvent::ViewChanged));
                events.push(self.set_status(&greeting));
                events
            }
            ShellCommand::SignOut => {
                if self.session.logout().is_none() {
                    return Vec::new();
                }
                self.navigation.sign_out();
                self.status_line = None;
                vec![ShellEvent::SessionEnded]
            }
            ShellCommand::NextView => {
                let before = self.active_view();
                let after = self.navigation.next();
                view_change(before, after)
            }
            ShellCommand::PrevView => {
                let before = self.active_view();
                let after = self.navigation.previous();
                view_change(before, after)
            }
            ShellCommand::Activate(id) => {
                let before = self.active_view();
                let after = self.navigation.set_active(&id);
                view_change(before, after)
            }
            ShellCommand::ActivateIndex(index) => {
                let before = self.active_view();
                let after = self.navigation.activate_index(index);
                view_change(before, after)
            }
            ShellCommand::ToggleSidebar => {
                let collapsed = self.navigation.toggle_collapsed();
                vec![ShellEvent::SidebarToggled(collapsed)]
            }
            ShellCommand::SetStatus(message) => vec![self.set_status(&message)],
            ShellCommand::ClearStatus => {
                self.status_line = None;
                vec![ShellEvent::StatusCleared]
            }
        }
    }

    fn set_status(&mut self, message: &str) -> ShellEvent {
        self.status_line = Some(message.to_owned());
        ShellEvent::StatusUpdated(message.to_owned())
    }
}

/// Re-selecting the active view is silent.
fn view_change(before: Option<ViewKind>, after: Option<ViewKind>) -> Vec<ShellEvent> {
    match after {
        Some(view) if after != before => vec![ShellEvent::ViewChanged(view)],
        _ => Vec::new(),
    }
}
