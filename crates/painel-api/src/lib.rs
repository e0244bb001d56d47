// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Blocking client for the football dataset backend.
//!
//! Every call maps failures onto [`LoadError`]: a request that never got an
//! answer is `Network`, a structured rejection (`{detail}`, `{erro}` or a
//! non-2xx status) is `Business`, and a body with the wrong shape is `Shape`.

use anyhow::{Context, Result, bail};
use painel_app::{
    AuthError, Authenticator, CoachUpdate, Credentials, LoadError, NewMatch, NewUser, Record,
    ReportKind, Role, Team, TeamDetails, TeamId, TeamProfile, User, json_kind, records_from_json,
};
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        if timeout.is_zero() {
            bail!("api.timeout must be positive");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reachability check used by `painel --check`.
    pub fn ping(&self) -> Result<(), LoadError> {
        self.get("/api/times").map(|_| ())
    }

    pub fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let body = self.send(Method::POST, "/api/login", Some(credentials))?;
        let parsed: LoginResponse = serde_json::from_value(body)
            .map_err(|error| LoadError::shape(format!("decode login response: {error}")))?;
        let role = Role::parse(&parsed.role).ok_or_else(|| {
            AuthError::new(format!("papel desconhecido {:?} na resposta do login", parsed.role))
        })?;
        info!(user = %parsed.user, role = role.as_str(), "login accepted");
        Ok(User {
            name: parsed.user,
            role,
        })
    }

    pub fn competition_stats(&self) -> Result<Vec<Record>, LoadError> {
        self.get_records("/api/estatisticas")
    }

    pub fn teams(&self) -> Result<Vec<Team>, LoadError> {
        let records = self.get_records("/api/times")?;
        Team::list_from_records(&records)
    }

    pub fn team_details(&self, team: TeamId) -> Result<TeamDetails, LoadError> {
        let body = self.get(&format!("/api/times/{team}/detalhes"))?;
        let Value::Object(mut map) = body else {
            return Err(LoadError::shape(format!(
                "expected team details object, got {}",
                json_kind(&body)
            )));
        };
        let info = map
            .remove("info")
            .ok_or_else(|| LoadError::shape("team details without \"info\""))?;
        let history = map
            .remove("historico")
            .ok_or_else(|| LoadError::shape("team details without \"historico\""))?;
        Ok(TeamDetails {
            profile: TeamProfile::from_record(&Record::from_json(info)?)?,
            history: records_from_json(history)?,
        })
    }

    pub fn matches(&self) -> Result<Vec<Record>, LoadError> {
        self.get_records("/api/partidas")
    }

    pub fn create_match(&self, payload: &NewMatch) -> Result<String, LoadError> {
        let body = self.send(Method::POST, "/api/partidas", Some(payload))?;
        Ok(message_of(&body, "Partida criada"))
    }

    pub fn update_coach(&self, payload: &CoachUpdate) -> Result<String, LoadError> {
        let body = self.send(Method::PUT, "/api/tecnicos", Some(payload))?;
        Ok(message_of(&body, "Técnico atualizado"))
    }

    pub fn referees(&self) -> Result<Vec<Record>, LoadError> {
        self.get_records("/api/arbitros")
    }

    pub fn report(&self, kind: ReportKind) -> Result<Vec<Record>, LoadError> {
        self.get_records(&format!("/api/relatorios/{}", kind.slug()))
    }

    pub fn create_user(&self, payload: &NewUser) -> Result<String, LoadError> {
        let body = self.send(Method::POST, "/api/admin/create_user", Some(payload))?;
        Ok(message_of(&body, "Usuário criado"))
    }

    fn get(&self, path: &str) -> Result<Value, LoadError> {
        self.send::<()>(Method::GET, path, None)
    }

    fn get_records(&self, path: &str) -> Result<Vec<Record>, LoadError> {
        let body = self.get(path)?;
        if let Some(message) = failed_query(&body) {
            warn!(path, error = %message, "backend query failed");
            return Err(LoadError::business(message));
        }
        records_from_json(body)
    }

    fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, LoadError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "request");
        let mut request: RequestBuilder = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|error| connection_error(&self.base_url, self.timeout, &error))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|error| connection_error(&self.base_url, self.timeout, &error))?;

        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "backend rejected request");
            return Err(clean_error_response(status, &text));
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|error| LoadError::shape(format!("{path} did not return JSON: {error}")))?;
        if let Some(message) = error_field(&value) {
            warn!(%method, path, error = %message, "backend reported failure");
            return Err(LoadError::business(message));
        }
        Ok(value)
    }
}

impl Authenticator for Client {
    fn authenticate(&mut self, credentials: &Credentials) -> Result<User, AuthError> {
        self.login(credentials)
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: String,
    role: String,
}

/// Trims trailing slashes and requires an http or https URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("api.base_url must not be empty");
    }
    let parsed = Url::parse(trimmed).with_context(|| format!("api.base_url {trimmed:?}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "api.base_url must use http or https, got {:?}",
            parsed.scheme()
        );
    }
    Ok(trimmed.to_owned())
}

fn connection_error(base_url: &str, timeout: Duration, error: &reqwest::Error) -> LoadError {
    if error.is_timeout() {
        return LoadError::network(format!(
            "tempo esgotado após {}s aguardando {base_url}",
            timeout.as_secs_f64()
        ));
    }
    LoadError::network(format!(
        "não foi possível conectar a {base_url} -- verifique se o backend está rodando ({error})"
    ))
}

fn clean_error_response(status: StatusCode, body: &str) -> LoadError {
    if let Ok(value) = serde_json::from_str::<Value>(body)
        && let Some(message) = detail_field(&value).or_else(|| error_field(&value))
    {
        return LoadError::business(message);
    }

    if !body.is_empty() && body.len() < 100 && !body.contains('{') {
        return LoadError::business(format!("servidor respondeu {}: {}", status.as_u16(), body));
    }

    LoadError::business(format!("servidor respondeu {}", status.as_u16()))
}

/// `{detail}` as FastAPI sends it: a string, or a list of validation entries.
fn detail_field(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Array(entries) => entries
            .first()
            .and_then(|entry| entry.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

fn error_field(value: &Value) -> Option<String> {
    match value.get("erro")? {
        Value::String(message) => Some(message.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// `[{"erro": ...}]`: a list whose only record carries just an `erro` field.
fn failed_query(value: &Value) -> Option<String> {
    let [only] = value.as_array()?.as_slice() else {
        return None;
    };
    let fields = only.as_object()?;
    if fields.len() != 1 {
        return None;
    }
    error_field(only)
}

fn message_of(value: &Value, fallback: &str) -> String {
    value
        .get("msg")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::{clean_error_response, failed_query, normalize_base_url};
    use painel_app::LoadError;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn base_url_trims_trailing_slashes_and_requires_http() {
        assert_eq!(
            normalize_base_url("http://localhost:8000///").expect("valid url"),
            "http://localhost:8000"
        );
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn detail_string_becomes_business_error() {
        let error = clean_error_response(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":"Usuário ou senha incorretos."}"#,
        );
        assert_eq!(
            error,
            LoadError::business("Usuário ou senha incorretos.")
        );
    }

    #[test]
    fn validation_detail_uses_first_message() {
        let error = clean_error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","idade"],"msg":"value is not a valid integer"}]}"#,
        );
        assert_eq!(error.to_string(), "value is not a valid integer");
    }

    #[test]
    fn opaque_bodies_fall_back_to_status() {
        assert_eq!(
            clean_error_response(StatusCode::BAD_GATEWAY, "").to_string(),
            "servidor respondeu 502"
        );
        assert_eq!(
            clean_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .to_string(),
            "servidor respondeu 500: Internal Server Error"
        );
    }

    #[test]
    fn single_erro_record_is_a_failed_query() {
        assert_eq!(
            failed_query(&json!([{"erro": "relation does not exist"}])),
            Some("relation does not exist".to_owned())
        );
        assert_eq!(failed_query(&json!([{"erro": "x", "nome": "y"}])), None);
        assert_eq!(failed_query(&json!([{"nome": "y"}])), None);
        assert_eq!(failed_query(&json!([])), None);
    }
}
