//! Question template bank and generation

pub mod bank;
pub mod generator;

pub use bank::{QuestionTemplate, TemplateBank, KEYWORD_SLOT};
pub use generator::{GeneratedQuestion, GenerationRequest, QuestionGenerator};

use crate::error::{CoachError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strsim::jaro_winkler;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Role {
    General,
    SoftwareEngineer,
    ProductManager,
    Sales,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum QuestionType {
    Behavioral,
    Situational,
    Technical,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::General,
        Role::SoftwareEngineer,
        Role::ProductManager,
        Role::Sales,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Role::General => "general",
            Role::SoftwareEngineer => "software_engineer",
            Role::ProductManager => "product_manager",
            Role::Sales => "sales",
        }
    }

    /// Human-facing label for report output.
    pub fn label(self) -> &'static str {
        match self {
            Role::General => "General",
            Role::SoftwareEngineer => "Software Engineer",
            Role::ProductManager => "Product Manager",
            Role::Sales => "Sales",
        }
    }
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Behavioral,
        QuestionType::Situational,
        QuestionType::Technical,
    ];

    fn as_str(self) -> &'static str {
        match self {
            QuestionType::Behavioral => "behavioral",
            QuestionType::Situational => "situational",
            QuestionType::Technical => "technical",
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] =
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an enum value from loosely formatted input (custom bank files),
/// suggesting the nearest valid value on a miss.
fn parse_loose<T: Copy>(
    input: &str,
    kind: &str,
    variants: &[(T, &'static str)],
) -> Result<T> {
    let needle = input.trim().to_lowercase().replace([' ', '-'], "_");
    if let Some((value, _)) = variants.iter().find(|(_, name)| *name == needle) {
        return Ok(*value);
    }

    let suggestion = variants
        .iter()
        .map(|(_, name)| (*name, jaro_winkler(name, &needle)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name);

    Err(match suggestion {
        Some(name) => CoachError::InvalidInput(format!(
            "unknown {} '{}', did you mean '{}'?",
            kind, input, name
        )),
        None => CoachError::InvalidInput(format!("unknown {} '{}'", kind, input)),
    })
}

impl Role {
    pub fn parse(input: &str) -> Result<Self> {
        let variants: Vec<(Role, &'static str)> =
            Self::ALL.iter().map(|r| (*r, r.as_str())).collect();
        parse_loose(input, "role", &variants)
    }
}

impl QuestionType {
    pub fn parse(input: &str) -> Result<Self> {
        let variants: Vec<(QuestionType, &'static str)> =
            Self::ALL.iter().map(|q| (*q, q.as_str())).collect();
        parse_loose(input, "question type", &variants)
    }
}

impl Difficulty {
    pub fn parse(input: &str) -> Result<Self> {
        let variants: Vec<(Difficulty, &'static str)> =
            Self::ALL.iter().map(|d| (*d, d.as_str())).collect();
        parse_loose(input, "difficulty", &variants)
    }
}
