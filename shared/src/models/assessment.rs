//! Signal and classification result models

use serde::{Deserialize, Serialize};

/// Derived hazard flags for one leg's window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signals {
    pub gusty: bool,
    pub reduced_visibility: bool,
    pub offshore_wind_event: bool,
}

/// Go/no-go status, ordered from benign to severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Green,
    Yellow,
    Red,
}

impl Status {
    /// One level more severe; red stays red
    pub fn escalate(self) -> Self {
        match self {
            Status::Green => Status::Yellow,
            Status::Yellow | Status::Red => Status::Red,
        }
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            Status::Green => RiskLevel::Low,
            Status::Yellow => RiskLevel::Elevated,
            Status::Red => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Green => write!(f, "green"),
            Status::Yellow => write!(f, "yellow"),
            Status::Red => write!(f, "red"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Elevated,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Elevated => write!(f, "ELEVATED"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Outcome of one classification call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: Status,
    pub risk: RiskLevel,
    pub rationale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    Info,
    Warning,
    Statement,
}

/// Short heads-up line shown alongside a leg's status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub title: String,
    pub subtitle: Option<String>,
}
