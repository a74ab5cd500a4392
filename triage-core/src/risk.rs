//! Rule-based clinical risk scoring.

use serde::{Deserialize, Serialize};

use crate::model::Patient;

/// Risk bucket derived from the total score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    #[serde(rename = "Baixo")]
    Low,
    #[serde(rename = "Moderado")]
    Moderate,
    #[serde(rename = "Alto")]
    High,
}

impl RiskLevel {
    /// Map a total score onto its level.
    pub fn from_score(score: u32) -> Self {
        if score >= 6 {
            RiskLevel::High
        } else if score >= 3 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Display name used in reports and snapshots.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Baixo",
            RiskLevel::Moderate => "Moderado",
            RiskLevel::High => "Alto",
        }
    }

    /// Fixed recommendations for this level.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => HIGH_RECOMMENDATIONS,
            RiskLevel::Moderate => MODERATE_RECOMMENDATIONS,
            RiskLevel::Low => LOW_RECOMMENDATIONS,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "Encaminhar imediatamente para emergência",
    "Monitorar sinais vitais continuamente",
];

const MODERATE_RECOMMENDATIONS: &[&str] = &[
    "Encaminhar para avaliação médica prioritária",
    "Reavaliar sinais vitais a cada 30 minutos",
];

const LOW_RECOMMENDATIONS: &[&str] = &[
    "Aguardar na triagem com monitoramento periódico",
    "Fornecer orientações básicas de cuidados",
];

// Portuguese source terms followed by their English glosses.
const HIGH_RISK_SYMPTOMS: [&str; 8] = [
    "dor no peito",
    "falta de ar",
    "confusao",
    "desmaio",
    "chest pain",
    "shortness of breath",
    "confusion",
    "fainting",
];

const SECONDARY_SYMPTOMS: [&str; 6] = [
    "febre",
    "vomito",
    "intensa dor",
    "fever",
    "vomiting",
    "intense pain",
];

/// Outcome of a single evaluation. Recomputed on demand, never stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
    pub recommendations: &'static [&'static str],
}

/// Per-criterion contributions to the total score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub age: u32,
    pub temperature: u32,
    pub blood_pressure: u32,
    pub heart_rate: u32,
    pub symptoms: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.age + self.temperature + self.blood_pressure + self.heart_rate + self.symptoms
    }
}

/// Stateless scorer over age, vitals and reported symptoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAnalyzer;

impl RiskAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score a patient and attach the recommendations for the resulting level.
    pub fn evaluate(&self, patient: &Patient) -> RiskAssessment {
        let score = self.breakdown(patient).total();
        let level = RiskLevel::from_score(score);

        RiskAssessment {
            score,
            level,
            recommendations: level.recommendations(),
        }
    }

    pub fn breakdown(&self, patient: &Patient) -> ScoreBreakdown {
        let vitals = &patient.vital_signs;
        ScoreBreakdown {
            age: score_age(patient.age),
            temperature: score_temperature(vitals.temperature_c),
            blood_pressure: score_blood_pressure(vitals.systolic_bp),
            heart_rate: score_heart_rate(vitals.heart_rate),
            symptoms: score_symptoms(&patient.symptoms),
        }
    }
}

fn score_age(age: u32) -> u32 {
    if age >= 75 {
        3
    } else if age >= 65 {
        2
    } else if age >= 45 {
        1
    } else {
        0
    }
}

// Hypothermia is only checked once both fever bands have failed.
fn score_temperature(temperature: f64) -> u32 {
    if temperature >= 39.0 {
        2
    } else if temperature >= 37.5 {
        1
    } else if temperature < 35.0 {
        2
    } else {
        0
    }
}

fn score_blood_pressure(systolic_bp: i32) -> u32 {
    if systolic_bp < 90 {
        3
    } else if systolic_bp < 100 {
        2
    } else if systolic_bp < 110 {
        1
    } else {
        0
    }
}

fn score_heart_rate(heart_rate: i32) -> u32 {
    if heart_rate >= 130 {
        3
    } else if heart_rate >= 120 {
        2
    } else if heart_rate >= 100 {
        1
    } else if heart_rate < 50 {
        2
    } else {
        0
    }
}

fn score_symptoms(symptoms: &[String]) -> u32 {
    symptoms
        .iter()
        .map(|symptom| {
            let normalized = symptom.trim().to_lowercase();
            if HIGH_RISK_SYMPTOMS.contains(&normalized.as_str()) {
                2
            } else if SECONDARY_SYMPTOMS.contains(&normalized.as_str()) {
                1
            } else {
                0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VitalSigns;
    use chrono::{TimeZone, Utc};

    fn patient(age: u32, vitals: VitalSigns, symptoms: &[&str]) -> Patient {
        Patient::new(
            "Paciente Teste",
            age,
            symptoms.iter().map(|s| s.to_string()).collect(),
            vitals,
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn age_bands() {
        assert_eq!(score_age(80), 3);
        assert_eq!(score_age(75), 3);
        assert_eq!(score_age(74), 2);
        assert_eq!(score_age(65), 2);
        assert_eq!(score_age(45), 1);
        assert_eq!(score_age(44), 0);
        assert_eq!(score_age(0), 0);
    }

    #[test]
    fn temperature_bands() {
        assert_eq!(score_temperature(39.0), 2);
        assert_eq!(score_temperature(41.2), 2);
        assert_eq!(score_temperature(37.5), 1);
        assert_eq!(score_temperature(38.9), 1);
        assert_eq!(score_temperature(36.0), 0);
        assert_eq!(score_temperature(35.0), 0);
        assert_eq!(score_temperature(34.9), 2);
    }

    #[test]
    fn blood_pressure_bands() {
        assert_eq!(score_blood_pressure(89), 3);
        assert_eq!(score_blood_pressure(99), 2);
        assert_eq!(score_blood_pressure(109), 1);
        assert_eq!(score_blood_pressure(110), 0);
        assert_eq!(score_blood_pressure(-5), 3);
    }

    #[test]
    fn heart_rate_bands() {
        assert_eq!(score_heart_rate(130), 3);
        assert_eq!(score_heart_rate(120), 2);
        assert_eq!(score_heart_rate(100), 1);
        assert_eq!(score_heart_rate(49), 2);
        assert_eq!(score_heart_rate(50), 0);
        assert_eq!(score_heart_rate(80), 0);
    }

    #[test]
    fn symptoms_are_normalized_and_summed() {
        let symptoms = vec![
            "  Dor no Peito ".to_string(),
            "FEBRE".to_string(),
            "tosse".to_string(),
        ];
        assert_eq!(score_symptoms(&symptoms), 3);

        let english = vec!["chest pain".to_string(), "fever".to_string()];
        assert_eq!(score_symptoms(&english), 3);

        let severe = vec![
            "falta de ar".to_string(),
            "confusao".to_string(),
            "desmaio".to_string(),
        ];
        assert_eq!(score_symptoms(&severe), 6);
    }

    #[test]
    fn symptom_match_is_exact_not_substring() {
        let symptoms = vec!["dor no peito forte".to_string(), "dor".to_string()];
        assert_eq!(score_symptoms(&symptoms), 0);
    }

    #[test]
    fn critical_patient_scores_high() {
        let p = patient(80, VitalSigns::new(39.5, 85, 135), &["dor no peito"]);
        let assessment = RiskAnalyzer::new().evaluate(&p);

        assert_eq!(assessment.score, 13);
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(
            assessment.recommendations,
            &[
                "Encaminhar imediatamente para emergência",
                "Monitorar sinais vitais continuamente",
            ]
        );
    }

    #[test]
    fn healthy_patient_scores_low() {
        let p = patient(30, VitalSigns::new(36.5, 120, 80), &[]);
        let assessment = RiskAnalyzer::new().evaluate(&p);

        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert_eq!(assessment.recommendations.len(), 2);
    }

    #[test]
    fn moderate_band_starts_at_three() {
        let p = patient(50, VitalSigns::new(37.8, 105, 80), &[]);
        let assessment = RiskAnalyzer::new().evaluate(&p);

        assert_eq!(assessment.score, 3);
        assert_eq!(assessment.level, RiskLevel::Moderate);
        assert_eq!(
            assessment.recommendations[0],
            "Encaminhar para avaliação médica prioritária"
        );
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(2), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::High);
    }

    #[test]
    fn breakdown_sums_to_score() {
        let p = patient(70, VitalSigns::new(34.0, 95, 45), &["vomito"]);
        let analyzer = RiskAnalyzer::new();
        let parts = analyzer.breakdown(&p);

        assert_eq!(
            parts,
            ScoreBreakdown {
                age: 2,
                temperature: 2,
                blood_pressure: 2,
                heart_rate: 2,
                symptoms: 1,
            }
        );
        assert_eq!(parts.total(), analyzer.evaluate(&p).score);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let p = patient(66, VitalSigns::new(38.0, 100, 101), &["febre"]);
        let analyzer = RiskAnalyzer::new();
        assert_eq!(analyzer.evaluate(&p), analyzer.evaluate(&p));
        assert_eq!(analyzer.evaluate(&p), RiskAnalyzer::default().evaluate(&p));
    }

    #[test]
    fn level_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Moderate).unwrap(),
            "\"Moderado\""
        );
        assert_eq!(RiskLevel::High.to_string(), "Alto");
    }
}
