// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Load lifecycle shared by every view that reads from the backend.
//!
//! `begin` hands out a [`FetchTicket`]; only the response that carries the
//! most recent ticket is committed. Responses from superseded fetches are
//! dropped on arrival.

use crate::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteState<K, T> {
    Idle,
    Loading {
        key: K,
    },
    Ready {
        key: K,
        data: T,
    },
    Error {
        key: K,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteView<K, T> {
    state: RemoteState<K, T>,
    generation: u64,
}

impl<K, T> Default for RemoteView<K, T> {
    fn default() -> Self {
        Self {
            state: RemoteState::Idle,
            generation: 0,
        }
    }
}

impl<K: Clone + PartialEq, T> RemoteView<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RemoteState<K, T> {
        &self.state
    }

    /// Enters `Loading` for `key`. Any fetch still in flight is superseded.
    pub fn begin(&mut self, key: K) -> FetchTicket {
        self.generation += 1;
        self.state = RemoteState::Loading { key };
        FetchTicket(self.generation)
    }

    pub fn commit(&mut self, ticket: FetchTicket, result: Result<T, LoadError>) -> CommitOutcome {
        if !self.is_current(ticket) {
            return CommitOutcome::Stale;
        }
        let key = match std::mem::replace(&mut self.state, RemoteState::Idle) {
            RemoteState::Loading { key }
            | RemoteState::Ready { key, .. }
            | RemoteState::Error { key, .. } => key,
            RemoteState::Idle => return CommitOutcome::Stale,
        };
        self.state = match result {
            Ok(data) => RemoteState::Ready { key, data },
            Err(error) => RemoteState::Error {
                key,
                message: error.to_string(),
            },
        };
        CommitOutcome::Applied
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation && matches!(self.state, RemoteState::Loading { .. })
    }

    /// True when nothing for `key` is loaded or loading.
    pub fn needs_fetch(&self, key: &K) -> bool {
        self.key() != Some(key)
    }

    /// Back to `Idle`. In-flight responses become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RemoteState::Idle;
    }

    pub fn key(&self) -> Option<&K> {
        match &self.state {
            RemoteState::Idle => None,
            RemoteState::Loading { key }
            | RemoteState::Ready { key, .. }
            | RemoteState::Error { key, .. } => Some(key),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            RemoteState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RemoteState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RemoteState::Loading { .. })
    }
}
