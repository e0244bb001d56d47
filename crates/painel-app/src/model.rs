// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{LoadError, Record, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Analyst,
}

impl Role {
    /// Spelling the backend sends and expects.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Analyst => "analista",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Analyst => "Analista",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "analista" | "analyst" => Some(Self::Analyst),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Dashboard,
    Teams,
    Matches,
    Referees,
    Reports,
    Staff,
    Users,
}

impl ViewKind {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Teams => "teams",
            Self::Matches => "matches",
            Self::Referees => "referees",
            Self::Reports => "reports",
            Self::Staff => "staff",
            Self::Users => "users",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "dashboard" => Some(Self::Dashboard),
            "teams" => Some(Self::Teams),
            "matches" => Some(Self::Matches),
            "referees" => Some(Self::Referees),
            "reports" => Some(Self::Reports),
            "staff" => Some(Self::Staff),
            "users" => Some(Self::Users),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Visão Geral do Campeonato",
            Self::Teams => "Explorador de Clubes",
            Self::Matches => "Gestão de Partidas",
            Self::Referees => "Análise de Arbitragem",
            Self::Reports => "Relatórios Avançados",
            Self::Staff => "Gestão de Comissão Técnica",
            Self::Users => "Gerenciar Usuários",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Torcedores,
    Violencia,
    Indecisos,
    Pacificos,
}

impl ReportKind {
    pub const ALL: [Self; 4] = [
        Self::Torcedores,
        Self::Violencia,
        Self::Indecisos,
        Self::Pacificos,
    ];

    /// Path segment under `/api/relatorios/`.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Torcedores => "torcedores",
            Self::Violencia => "violencia",
            Self::Indecisos => "indecisos",
            Self::Pacificos => "pacificos",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Torcedores => "Torcedores e Clubes",
            Self::Violencia => "Jogos Violentos",
            Self::Indecisos => "Torcedores Indecisos",
            Self::Pacificos => "Árbitros Pacíficos",
        }
    }

    pub fn parse(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn rotate(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let current = Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(0) as isize;
        Self::ALL[(current + delta).rem_euclid(len) as usize]
    }
}

/// Row of `/api/times`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub coach: String,
    pub coach_nationality: String,
    pub coach_age: Option<i64>,
}

impl Team {
    pub fn from_record(record: &Record) -> Result<Self, LoadError> {
        let raw_id = record.require_text("id")?;
        let id = TeamId::parse(&raw_id)
            .ok_or_else(|| LoadError::shape(format!("team id {raw_id:?} is not a number")))?;
        Ok(Self {
            id,
            name: record.require_text("name")?,
            coach: record.text("coach").unwrap_or_default(),
            coach_nationality: record.text("coachNationality").unwrap_or_default(),
            coach_age: record.integer("coachAge"),
        })
    }

    pub fn list_from_records(records: &[Record]) -> Result<Vec<Self>, LoadError> {
        records.iter().map(Self::from_record).collect()
    }
}

/// `info` block of `/api/times/{id}/detalhes`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamProfile {
    pub name: String,
    pub acronym: String,
    pub country: String,
    pub coach: String,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
}

impl TeamProfile {
    pub fn from_record(record: &Record) -> Result<Self, LoadError> {
        Ok(Self {
            name: record.require_text("nome")?,
            acronym: record.text("sigla").unwrap_or_default(),
            country: record.text("pais").unwrap_or_default(),
            coach: record.text("tecnico").unwrap_or_default(),
            wins: record.integer("vitorias").unwrap_or(0),
            draws: record.integer("empates").unwrap_or(0),
            losses: record.integer("derrotas").unwrap_or(0),
        })
    }

    pub fn games_played(&self) -> i64 {
        self.wins
            .saturating_add(self.draws)
            .saturating_add(self.losses)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamDetails {
    pub profile: TeamProfile,
    pub history: Vec<Record>,
}

/// Totals cards on the dashboard, derived from `/api/estatisticas`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetitionTotals {
    pub total_matches: i64,
    pub mean_corners: f64,
    pub competitions: usize,
}

impl CompetitionTotals {
    pub fn from_records(records: &[Record]) -> Self {
        let total_matches = records
            .iter()
            .filter_map(|record| record.integer("total_partidas"))
            .fold(0_i64, i64::saturating_add);
        let corners = records
            .iter()
            .map(|record| record.number("media_escanteios").unwrap_or(0.0))
            .sum::<f64>();
        let mean_corners = if records.is_empty() {
            0.0
        } else {
            corners / records.len() as f64
        };
        Self {
            total_matches,
            mean_corners,
            competitions: records.len(),
        }
    }

    pub fn mean_corners_label(&self) -> String {
        format!("{:.2}", self.mean_corners)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefereeBar {
    pub name: String,
    pub cards: i64,
}

/// Header cards and chart data for the referee view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RefereeSummary {
    pub total_cards: i64,
    pub strictest: Option<RefereeBar>,
    pub referees: usize,
    pub bars: Vec<RefereeBar>,
}

impl RefereeSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let bars = records
            .iter()
            .map(|record| RefereeBar {
                name: record.text("nome").unwrap_or_default(),
                cards: record.integer("total_cartoes").unwrap_or(0),
            })
            .collect::<Vec<_>>();

        let mut strictest: Option<&RefereeBar> = None;
        for bar in &bars {
            if strictest.is_none_or(|best| bar.cards > best.cards) {
                strictest = Some(bar);
            }
        }

        Self {
            total_cards: bars
                .iter()
                .map(|bar| bar.cards)
                .fold(0_i64, i64::saturating_add),
            strictest: strictest.cloned(),
            referees: bars.len(),
            bars,
        }
    }
}
