// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use painel_app::{Record, records_from_json};
use serde_json::{Value, json};
use std::io::Read;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Response, Server};

const CLUBS: [(&str, &str, &str); 12] = [
    ("Flamengo", "FLA", "Brasil"),
    ("Palmeiras", "PAL", "Brasil"),
    ("Santos", "SAN", "Brasil"),
    ("Corinthians", "COR", "Brasil"),
    ("Boca Juniors", "BOC", "Argentina"),
    ("River Plate", "RIV", "Argentina"),
    ("Peñarol", "PEN", "Uruguai"),
    ("Nacional", "NAC", "Uruguai"),
    ("Benfica", "BEN", "Portugal"),
    ("Porto", "POR", "Portugal"),
    ("Bayern", "BAY", "Alemanha"),
    ("Dortmund", "BVB", "Alemanha"),
];

const FIRST_NAMES: [&str; 14] = [
    "Abel", "Tite", "Renato", "Jorge", "Marcelo", "Diego", "Luis", "Carlos", "Anderson",
    "Wilton", "Raphael", "Daniel", "Bruno", "Felipe",
];

const LAST_NAMES: [&str; 14] = [
    "Ferreira", "Sampaio", "Gaúcho", "Jesus", "Gallardo", "Aguirre", "Zubeldía", "Daronco",
    "Claus", "Pereira", "Souza", "Lima", "Costa", "Ribeiro",
];

const NATIONALITIES: [&str; 5] = ["Brasil", "Argentina", "Uruguai", "Portugal", "Alemanha"];

const COMPETITIONS: [&str; 5] = [
    "Brasileirão",
    "Copa do Brasil",
    "Libertadores",
    "Sul-Americana",
    "Champions League",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for backend-shaped payloads.
#[derive(Debug, Clone)]
pub struct FootballFaker {
    rng: DeterministicRng,
}

impl FootballFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    /// `/api/times` rows. Ids are strings, as the backend sends them.
    pub fn teams(&mut self, count: usize) -> Value {
        let rows = CLUBS
            .iter()
            .take(count)
            .enumerate()
            .map(|(index, (name, _, _))| {
                json!({
                    "id": (index + 1).to_string(),
                    "name": name,
                    "coach": self.person(),
                    "coachNationality": self.pick(&NATIONALITIES),
                    "coachAge": self.int_range(35, 70),
                })
            })
            .collect();
        Value::Array(rows)
    }

    /// `/api/arbitros` rows.
    pub fn referees(&mut self, count: usize) -> Value {
        let rows = (0..count)
            .map(|_| {
                json!({
                    "nome": self.person(),
                    "nacionalidade": self.pick(&NATIONALITIES),
                    "jogos": self.int_range(1, 40),
                    "total_cartoes": self.int_range(0, 120),
                })
            })
            .collect();
        Value::Array(rows)
    }

    /// `/api/estatisticas` rows.
    pub fn competition_stats(&mut self, count: usize) -> Value {
        let rows = COMPETITIONS
            .iter()
            .take(count)
            .map(|name| {
                let corners = self.int_range(60, 120) as f64 / 10.0;
                json!({
                    "competicao": name,
                    "total_partidas": self.int_range(4, 380),
                    "total_amarelos": self.int_range(10, 900),
                    "total_vermelhos": self.int_range(0, 60),
                    "media_escanteios": corners,
                })
            })
            .collect();
        Value::Array(rows)
    }

    /// `/api/partidas` rows, newest first.
    pub fn matches(&mut self, count: usize) -> Value {
        let rows = (0..count)
            .rev()
            .map(|index| {
                json!({
                    "id": index + 1,
                    "data": format!("2024-{:02}-{:02}", self.int_range(1, 12), self.int_range(1, 28)),
                    "competicao": self.pick(&COMPETITIONS),
                    "arbitro": self.person(),
                    "escanteios": self.int_range(0, 18),
                    "amarelos": self.int_range(0, 9),
                    "vermelhos": self.int_range(0, 3),
                })
            })
            .collect();
        Value::Array(rows)
    }

    /// `/api/times/{id}/detalhes` body for the club at `index`.
    pub fn team_details(&mut self, index: usize, games: usize) -> Value {
        let (name, acronym, country) = CLUBS[index % CLUBS.len()];
        let history = (0..games)
            .map(|game| {
                json!({
                    "data": format!("2024-{:02}-{:02}", self.int_range(1, 12), self.int_range(1, 28)),
                    "competicao": self.pick(&COMPETITIONS),
                    "gols_marcados": self.int_range(0, 5),
                    "id_jogo": games - game,
                })
            })
            .collect::<Vec<_>>();
        json!({
            "info": {
                "nome": name,
                "pais": country,
                "sigla": acronym,
                "tecnico": self.person(),
                "vitorias": self.int_range(0, 30),
                "derrotas": self.int_range(0, 30),
                "empates": self.int_range(0, 30),
            },
            "historico": history,
        })
    }

    fn person(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

/// Parses a fixture payload the way the client parses a response body.
pub fn records(value: Value) -> Result<Vec<Record>> {
    Ok(records_from_json(value)?)
}

/// Body the backend sends when a report query fails.
pub fn failed_query(message: &str) -> Value {
    json!([{ "erro": message }])
}

pub fn login_ok(user: &str, role: &str) -> Value {
    json!({ "msg": "Login ok", "role": role, "user": user })
}

pub fn detail(message: &str) -> Value {
    json!({ "detail": message })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|error| anyhow!("decode request body: {error}"))
    }
}

/// One scripted answer. Several routes for the same method and path are
/// served in order; the last one keeps answering.
#[derive(Debug, Clone)]
pub struct Route {
    method: String,
    path: String,
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl Route {
    pub fn json(method: &str, path: &str, status: u16, body: &Value) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_owned(),
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn get(path: &str, body: &Value) -> Self {
        Self::json("GET", path, 200, body)
    }

    pub fn raw(method: &str, path: &str, status: u16, body: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_owned(),
            status,
            body: body.to_owned(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Scripted HTTP backend on a loopback port, served from its own thread.
pub struct MockBackend {
    base_url: String,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl MockBackend {
    pub fn start(routes: Vec<Route>) -> Result<Self> {
        let server = Server::http("127.0.0.1:0")
            .map_err(|error| anyhow!("start mock server: {error}"))?;
        let server = Arc::new(server);
        let base_url = format!("http://{}", server.server_addr());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || serve(&server, routes, &requests))
        };

        Ok(Self {
            base_url,
            server,
            requests,
            handle: Some(handle),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(server: &Server, mut routes: Vec<Route>, requests: &Mutex<Vec<RecordedRequest>>) {
    for mut request in server.incoming_requests() {
        let method = request.method().as_str().to_ascii_uppercase();
        let path = request.url().to_owned();
        let mut body = String::new();
        let _ = request.as_reader().read_to_string(&mut body);
        requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: method.clone(),
                path: path.clone(),
                body,
            });

        let route = take_route(&mut routes, &method, &path).unwrap_or_else(|| {
            Route::json(&method, &path, 404, &detail("Not Found"))
        });
        if let Some(delay) = route.delay {
            thread::sleep(delay);
        }

        let mut response = Response::from_string(route.body).with_status_code(route.status);
        if let Ok(header) = Header::from_bytes("Content-Type", "application/json") {
            response = response.with_header(header);
        }
        let _ = request.respond(response);
    }
}

fn take_route(routes: &mut Vec<Route>, method: &str, path: &str) -> Option<Route> {
    let matching = routes
        .iter()
        .enumerate()
        .filter(|(_, route)| route.method == method && route.path == path)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    match matching.as_slice() {
        [] => None,
        [only] => Some(routes[*only].clone()),
        [first, ..] => Some(routes.remove(*first)),
    }
}
