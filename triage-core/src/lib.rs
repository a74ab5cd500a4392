//! Core logic for hospital triage: patient model, risk scoring and registry.

mod model;
mod registry;
mod risk;

use serde::{Deserialize, Serialize};

pub use model::{Clock, FixedClock, Patient, SystemClock, VitalSigns};
pub use registry::PatientRegistry;
pub use risk::{RiskAnalyzer, RiskAssessment, RiskLevel, ScoreBreakdown};

/// Tunable defaults used around the scoring core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageConfig {
    /// Vitals applied when a stored record omits them.
    pub fallback_vitals: VitalSigns,
    /// Values suggested by the intake prompts.
    pub intake: IntakeDefaults,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            fallback_vitals: VitalSigns::default(),
            intake: IntakeDefaults::default(),
        }
    }
}

impl TriageConfig {
    /// Overlay a partial JSON document on top of the defaults.
    ///
    /// Every field is optional; anything absent keeps its default value.
    pub fn from_json_str(input: &str) -> Result<Self, TriageError> {
        let partial: PartialConfig =
            serde_json::from_str(input).map_err(|err| TriageError::Parse(err.to_string()))?;
        Ok(Self::from(partial))
    }
}

/// Prompt defaults for interactive patient intake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntakeDefaults {
    pub age: u32,
    pub temperature_c: f64,
    pub systolic_bp: i32,
    pub heart_rate: i32,
}

impl Default for IntakeDefaults {
    fn default() -> Self {
        Self {
            age: 30,
            temperature_c: 36.8,
            systolic_bp: 120,
            heart_rate: 80,
        }
    }
}

#[derive(Deserialize, Default)]
struct PartialConfig {
    #[serde(default)]
    fallback_vitals: PartialVitals,
    #[serde(default)]
    intake: PartialIntake,
}

#[derive(Deserialize, Default)]
struct PartialVitals {
    temperature_c: Option<f64>,
    systolic_bp: Option<i32>,
    heart_rate: Option<i32>,
}

#[derive(Deserialize, Default)]
struct PartialIntake {
    age: Option<u32>,
    temperature_c: Option<f64>,
    systolic_bp: Option<i32>,
    heart_rate: Option<i32>,
}

impl From<PartialConfig> for TriageConfig {
    fn from(cfg: PartialConfig) -> Self {
        let mut base = TriageConfig::default();

        if let Some(temperature) = cfg.fallback_vitals.temperature_c {
            base.fallback_vitals.temperature_c = temperature;
        }
        if let Some(systolic) = cfg.fallback_vitals.systolic_bp {
            base.fallback_vitals.systolic_bp = systolic;
        }
        if let Some(rate) = cfg.fallback_vitals.heart_rate {
            base.fallback_vitals.heart_rate = rate;
        }

        if let Some(age) = cfg.intake.age {
            base.intake.age = age;
        }
        if let Some(temperature) = cfg.intake.temperature_c {
            base.intake.temperature_c = temperature;
        }
        if let Some(systolic) = cfg.intake.systolic_bp {
            base.intake.systolic_bp = systolic;
        }
        if let Some(rate) = cfg.intake.heart_rate {
            base.intake.heart_rate = rate;
        }

        base
    }
}

/// Errors raised by the layers around the scoring core.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Registro {index} sem o campo obrigatório `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("Não foi possível ler os dados: {0}")]
    Parse(String),
    #[error("Falha de E/S: {0}")]
    Io(#[from] std::io::Error),
}
