use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vital signs measured at triage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VitalSigns {
    pub temperature_c: f64,
    pub systolic_bp: i32,
    pub heart_rate: i32,
}

impl VitalSigns {
    pub fn new(temperature_c: f64, systolic_bp: i32, heart_rate: i32) -> Self {
        Self {
            temperature_c,
            systolic_bp,
            heart_rate,
        }
    }
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            temperature_c: 36.5,
            systolic_bp: 120,
            heart_rate: 80,
        }
    }
}

/// A patient as registered on arrival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub name: String,
    pub age: u32,
    pub symptoms: Vec<String>,
    pub vital_signs: VitalSigns,
    pub arrival_time: DateTime<Utc>,
}

impl Patient {
    /// Build a patient from already collected data.
    ///
    /// Symptoms are stored as given; use [`Patient::add_symptom`] to get
    /// trimming and duplicate suppression.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        symptoms: Vec<String>,
        vital_signs: VitalSigns,
        arrival_time: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            symptoms,
            vital_signs,
            arrival_time,
        }
    }

    /// Append a symptom unless it is blank or already present (ignoring case).
    ///
    /// Returns whether the symptom was added.
    pub fn add_symptom(&mut self, symptom: &str) -> bool {
        let sanitized = symptom.trim();
        if sanitized.is_empty() {
            return false;
        }

        let needle = sanitized.to_lowercase();
        if self
            .symptoms
            .iter()
            .any(|existing| existing.trim().to_lowercase() == needle)
        {
            return false;
        }

        self.symptoms.push(sanitized.to_string());
        true
    }
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant, for reproducible data.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn arrival() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 22, 33).unwrap()
    }

    fn patient(symptoms: &[&str]) -> Patient {
        Patient::new(
            "Maria Souza",
            52,
            symptoms.iter().map(|s| s.to_string()).collect(),
            VitalSigns::default(),
            arrival(),
        )
    }

    #[test]
    fn default_vitals_match_triage_baseline() {
        assert_eq!(VitalSigns::default(), VitalSigns::new(36.5, 120, 80));
    }

    #[test]
    fn add_symptom_trims_and_ignores_blank_input() {
        let mut p = patient(&[]);
        assert!(p.add_symptom("  febre  "));
        assert!(!p.add_symptom("   "));
        assert!(!p.add_symptom(""));
        assert_eq!(p.symptoms, vec!["febre".to_string()]);
    }

    #[test]
    fn add_symptom_suppresses_case_insensitive_duplicates() {
        let mut p = patient(&["Dor no peito"]);
        assert!(!p.add_symptom("dor no PEITO"));
        assert!(p.add_symptom("Falta de ar"));
        assert_eq!(p.symptoms, vec!["Dor no peito", "Falta de ar"]);
    }

    #[test]
    fn bulk_construction_keeps_duplicates() {
        let p = patient(&["febre", "Febre"]);
        assert_eq!(p.symptoms.len(), 2);
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(arrival());
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), arrival());
    }
}
