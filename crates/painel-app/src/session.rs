// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AuthError, Credentials, Role, User};

/// Verifies credentials against whatever holds the user accounts.
pub trait Authenticator {
    fn authenticate(&mut self, credentials: &Credentials) -> Result<User, AuthError>;
}

/// Identity of the logged-in user. Lives only for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthSession {
    user: Option<User>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// One attempt, no retry. A failure leaves the session unauthenticated.
    pub fn login<A: Authenticator>(
        &mut self,
        authenticator: &mut A,
        credentials: &Credentials,
    ) -> Result<User, AuthError> {
        match authenticator.authenticate(credentials) {
            Ok(user) => {
                self.user = Some(user.clone());
                Ok(user)
            }
            Err(error) => {
                self.user = None;
                Err(error)
            }
        }
    }

    /// Installs a user already verified elsewhere (e.g. on a worker thread).
    pub fn establish(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn logout(&mut self) -> Option<User> {
        self.user.take()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}
