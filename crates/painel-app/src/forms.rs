// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::Serialize;
use time::Date;
use time::macros::format_description;

use crate::{CompetitionId, MatchNumber, RefereeId, Role, TeamId};

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    User,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub user: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn new(default_user: &str) -> Self {
        Self {
            user: default_user.to_owned(),
            password: String::new(),
            focus: if default_user.is_empty() {
                LoginField::User
            } else {
                LoginField::Password
            },
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::User => &mut self.user,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::User => LoginField::Password,
            LoginField::Password => LoginField::User,
        };
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let user = self.user.trim();
        if user.is_empty() {
            bail!("usuário é obrigatório -- informe o usuário do banco e tente novamente");
        }
        Ok(Credentials::new(user, self.password.clone()))
    }
}

/// Body of `POST /api/partidas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMatch {
    pub num_par: i64,
    /// `DD/MM/YYYY`.
    pub data_par: String,
    pub id_comp: i64,
    pub id_arb: i64,
    pub escanteios: i64,
    pub cartoes_vermelhos: i64,
    pub cartoes_amarelos: i64,
    pub impedimentos: i64,
    pub id_time_mandante: i64,
    pub gols_mandante: i64,
    pub id_time_visitante: i64,
    pub gols_visitante: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Number,
    Date,
    Competition,
    Referee,
    HomeTeam,
    HomeGoals,
    AwayTeam,
    AwayGoals,
    Corners,
    RedCards,
    YellowCards,
    Offsides,
}

impl MatchField {
    pub const ALL: [Self; 12] = [
        Self::Number,
        Self::Date,
        Self::Competition,
        Self::Referee,
        Self::HomeTeam,
        Self::HomeGoals,
        Self::AwayTeam,
        Self::AwayGoals,
        Self::Corners,
        Self::RedCards,
        Self::YellowCards,
        Self::Offsides,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Number => "Nº Partida",
            Self::Date => "Data (AAAA-MM-DD)",
            Self::Competition => "ID Competição",
            Self::Referee => "ID Árbitro",
            Self::HomeTeam => "Mandante",
            Self::HomeGoals => "Gols Mandante",
            Self::AwayTeam => "Visitante",
            Self::AwayGoals => "Gols Visitante",
            Self::Corners => "Escanteios",
            Self::RedCards => "Vermelhos",
            Self::YellowCards => "Amarelos",
            Self::Offsides => "Impedimentos",
        }
    }

    pub const fn is_team_select(self) -> bool {
        matches!(self, Self::HomeTeam | Self::AwayTeam)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchForm {
    pub number: String,
    pub date: String,
    pub competition: String,
    pub referee: String,
    pub home_team: Option<TeamId>,
    pub home_goals: String,
    pub away_team: Option<TeamId>,
    pub away_goals: String,
    pub corners: String,
    pub red_cards: String,
    pub yellow_cards: String,
    pub offsides: String,
}

impl MatchForm {
    /// Editable text behind `field`; `None` for the team selects.
    pub fn text_mut(&mut self, field: MatchField) -> Option<&mut String> {
        match field {
            MatchField::Number => Some(&mut self.number),
            MatchField::Date => Some(&mut self.date),
            MatchField::Competition => Some(&mut self.competition),
            MatchField::Referee => Some(&mut self.referee),
            MatchField::HomeGoals => Some(&mut self.home_goals),
            MatchField::AwayGoals => Some(&mut self.away_goals),
            MatchField::Corners => Some(&mut self.corners),
            MatchField::RedCards => Some(&mut self.red_cards),
            MatchField::YellowCards => Some(&mut self.yellow_cards),
            MatchField::Offsides => Some(&mut self.offsides),
            MatchField::HomeTeam | MatchField::AwayTeam => None,
        }
    }

    pub fn text(&self, field: MatchField) -> Option<&str> {
        match field {
            MatchField::Number => Some(&self.number),
            MatchField::Date => Some(&self.date),
            MatchField::Competition => Some(&self.competition),
            MatchField::Referee => Some(&self.referee),
            MatchField::HomeGoals => Some(&self.home_goals),
            MatchField::AwayGoals => Some(&self.away_goals),
            MatchField::Corners => Some(&self.corners),
            MatchField::RedCards => Some(&self.red_cards),
            MatchField::YellowCards => Some(&self.yellow_cards),
            MatchField::Offsides => Some(&self.offsides),
            MatchField::HomeTeam | MatchField::AwayTeam => None,
        }
    }

    pub fn team(&self, field: MatchField) -> Option<TeamId> {
        match field {
            MatchField::HomeTeam => self.home_team,
            MatchField::AwayTeam => self.away_team,
            _ => None,
        }
    }

    pub fn set_team(&mut self, field: MatchField, team: TeamId) {
        match field {
            MatchField::HomeTeam => self.home_team = Some(team),
            MatchField::AwayTeam => self.away_team = Some(team),
            _ => {}
        }
    }

    pub fn to_payload(&self) -> Result<NewMatch> {
        let (Some(home), Some(away)) = (self.home_team, self.away_team) else {
            bail!("Selecione os dois times!");
        };
        if home == away {
            bail!("mandante e visitante devem ser times diferentes -- escolha outro time e tente novamente");
        }

        let number = MatchNumber::new(count(MatchField::Number, &self.number)?);
        let competition = CompetitionId::new(count(MatchField::Competition, &self.competition)?);
        let referee = RefereeId::new(count(MatchField::Referee, &self.referee)?);

        Ok(NewMatch {
            num_par: number.get(),
            data_par: match_date(&self.date)?,
            id_comp: competition.get(),
            id_arb: referee.get(),
            escanteios: count(MatchField::Corners, &self.corners)?,
            cartoes_vermelhos: count(MatchField::RedCards, &self.red_cards)?,
            cartoes_amarelos: count(MatchField::YellowCards, &self.yellow_cards)?,
            impedimentos: count(MatchField::Offsides, &self.offsides)?,
            id_time_mandante: home.get(),
            gols_mandante: count(MatchField::HomeGoals, &self.home_goals)?,
            id_time_visitante: away.get(),
            gols_visitante: count(MatchField::AwayGoals, &self.away_goals)?,
        })
    }
}

/// Converts a typed `YYYY-MM-DD` into the backend's `DD/MM/YYYY`.
pub fn match_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("data é obrigatória -- informe a data como AAAA-MM-DD e tente novamente");
    }
    let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) else {
        bail!("data inválida {raw:?} -- use o formato AAAA-MM-DD");
    };
    Ok(date.format(format_description!("[day]/[month]/[year]"))?)
}

fn count(field: MatchField, raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!(
            "{} é obrigatório -- informe um número e tente novamente",
            field.label()
        );
    }
    match raw.parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value),
        _ => bail!(
            "{} deve ser um inteiro não negativo, recebido {raw:?}",
            field.label()
        ),
    }
}

/// Body of `PUT /api/tecnicos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachUpdate {
    pub id_time: i64,
    pub novo_tecnico: String,
    pub nacionalidade: String,
    pub idade: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachField {
    Team,
    Name,
    Nationality,
    Age,
}

impl CoachField {
    pub const ALL: [Self; 4] = [Self::Team, Self::Name, Self::Nationality, Self::Age];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Team => "Clube",
            Self::Name => "Novo Técnico",
            Self::Nationality => "Nacionalidade",
            Self::Age => "Idade",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoachForm {
    pub team: Option<TeamId>,
    pub name: String,
    pub nationality: String,
    pub age: String,
}

impl CoachForm {
    pub fn text_mut(&mut self, field: CoachField) -> Option<&mut String> {
        match field {
            CoachField::Name => Some(&mut self.name),
            CoachField::Nationality => Some(&mut self.nationality),
            CoachField::Age => Some(&mut self.age),
            CoachField::Team => None,
        }
    }

    pub fn text(&self, field: CoachField) -> Option<&str> {
        match field {
            CoachField::Name => Some(&self.name),
            CoachField::Nationality => Some(&self.nationality),
            CoachField::Age => Some(&self.age),
            CoachField::Team => None,
        }
    }

    pub fn to_payload(&self) -> Result<CoachUpdate> {
        let Some(team) = self.team else {
            bail!("clube é obrigatório -- selecione um clube e tente novamente");
        };
        let name = self.name.trim();
        if name.is_empty() {
            bail!("nome do técnico é obrigatório -- informe o nome e tente novamente");
        }
        let age = match self.age.trim().parse::<i64>() {
            Ok(age) if age > 0 => age,
            _ => bail!("idade deve ser um inteiro positivo, recebido {:?}", self.age),
        };
        Ok(CoachUpdate {
            id_time: team.get(),
            novo_tecnico: name.to_owned(),
            nacionalidade: self.nationality.trim().to_owned(),
            idade: age,
        })
    }
}

/// Body of `POST /api/admin/create_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Username,
    Password,
    Role,
}

impl UserField {
    pub const ALL: [Self; 3] = [Self::Username, Self::Password, Self::Role];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Username => "Usuário",
            Self::Password => "Senha",
            Self::Role => "Nível de Acesso",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: Role::Analyst,
        }
    }
}

impl UserForm {
    pub fn text_mut(&mut self, field: UserField) -> Option<&mut String> {
        match field {
            UserField::Username => Some(&mut self.username),
            UserField::Password => Some(&mut self.password),
            UserField::Role => None,
        }
    }

    pub fn to_payload(&self) -> Result<NewUser> {
        let username = self.username.trim();
        if username.is_empty() {
            bail!("usuário é obrigatório -- informe um nome de usuário e tente novamente");
        }
        if self.password.is_empty() {
            bail!("senha é obrigatória -- informe uma senha e tente novamente");
        }
        Ok(NewUser {
            username: username.to_owned(),
            password: self.password.clone(),
            role: self.role.as_str().to_owned(),
        })
    }
}
