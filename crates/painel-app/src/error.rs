// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Failure of a single call against the backend.
///
/// Every variant carries a message that is already fit for the inline error
/// area of the view that issued the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The request never produced a response (refused, timed out, reset).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a structured failure (`{erro}`, `{detail}`,
    /// or a non-2xx status).
    #[error("{0}")]
    Business(String),

    /// The response decoded but did not have the expected shape.
    #[error("unexpected response: {0}")]
    Shape(String),
}

impl LoadError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn business(message: impl Into<String>) -> Self {
        Self::Business(message.into())
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Business(_) => "business",
            Self::Shape(_) => "shape",
        }
    }
}

/// Login failure. Network problems and rejected credentials collapse into this
/// one kind; the session stays unauthenticated either way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<LoadError> for AuthError {
    fn from(error: LoadError) -> Self {
        Self::new(error.to_string())
    }
}
