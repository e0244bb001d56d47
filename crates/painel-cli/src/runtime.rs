// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use painel_api::Client;
use painel_app::{AuthError, Authenticator, Credentials, FetchTicket, LoadError, User};
use painel_tui::{FetchRequest, FetchResponse, FetchSlot, InternalEvent, ShellRuntime, Submission};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

/// Backs the shell with the HTTP client. Every spawn_* call runs on its own
/// worker thread so the event loop never waits on the network.
#[derive(Debug, Clone)]
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn fetch_with(client: &Client, request: FetchRequest) -> Result<FetchResponse, LoadError> {
    debug!(?request, "fetching");
    let response = match request {
        FetchRequest::Dashboard => FetchResponse::Records(client.competition_stats()?),
        FetchRequest::Teams => FetchResponse::Teams(client.teams()?),
        FetchRequest::TeamDetails(team) => FetchResponse::TeamDetails(client.team_details(team)?),
        FetchRequest::Matches => FetchResponse::Records(client.matches()?),
        FetchRequest::Referees => FetchResponse::Records(client.referees()?),
        FetchRequest::Report(kind) => FetchResponse::Records(client.report(kind)?),
    };
    Ok(response)
}

fn submit_with(client: &Client, submission: &Submission) -> Result<String, LoadError> {
    match submission {
        Submission::CreateMatch(payload) => client.create_match(payload),
        Submission::UpdateCoach(payload) => client.update_coach(payload),
        Submission::CreateUser(payload) => client.create_user(payload),
    }
}

impl Authenticator for ApiRuntime {
    fn authenticate(&mut self, credentials: &Credentials) -> Result<User, AuthError> {
        self.client.authenticate(credentials)
    }
}

impl ShellRuntime for ApiRuntime {
    fn fetch(&mut self, request: FetchRequest) -> Result<FetchResponse, LoadError> {
        fetch_with(&self.client, request)
    }

    fn submit(&mut self, submission: &Submission) -> Result<String, LoadError> {
        submit_with(&self.client, submission)
    }

    fn spawn_login(
        &mut self,
        attempt: u64,
        credentials: Credentials,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let mut client = self.client.clone();
        thread::Builder::new()
            .name("painel-login".to_owned())
            .spawn(move || {
                let result = client.authenticate(&credentials);
                let _ = tx.send(InternalEvent::LoginFinished { attempt, result });
            })
            .context("spawn login worker")?;
        Ok(())
    }

    fn spawn_fetch(
        &mut self,
        slot: FetchSlot,
        ticket: FetchTicket,
        request: FetchRequest,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name("painel-fetch".to_owned())
            .spawn(move || {
                let result = fetch_with(&client, request);
                let _ = tx.send(InternalEvent::Fetched {
                    slot,
                    ticket,
                    result,
                });
            })
            .context("spawn fetch worker")?;
        Ok(())
    }

    fn spawn_submit(
        &mut self,
        attempt: u64,
        submission: Submission,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name("painel-submit".to_owned())
            .spawn(move || {
                let form = submission.form();
                let result = submit_with(&client, &submission);
                let _ = tx.send(InternalEvent::Submitted {
                    form,
                    attempt,
                    result,
                });
            })
            .context("spawn submit worker")?;
        Ok(())
    }
}
