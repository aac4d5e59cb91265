use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Language used for the reminder emails sent to a `User`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Mk,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mk => "mk",
            Self::En => "en",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::Mk
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidLanguageError {
    #[error("Language: {0} is not supported")]
    Unsupported(String),
}

impl FromStr for Language {
    type Err = InvalidLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mk" => Ok(Self::Mk),
            "en" => Ok(Self::En),
            _ => Err(InvalidLanguageError::Unsupported(s.to_string())),
        }
    }
}

/// A `User` owns `Vehicle`s and receives the expiry reminders for them
/// at `email`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub language: Language,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            language: Default::default(),
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
