use crate::model::Patient;
use crate::risk::{RiskAnalyzer, RiskAssessment};

/// Insertion-ordered, in-memory list of registered patients.
///
/// Not synchronized; callers serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistry {
    patients: Vec<Patient>,
    analyzer: RiskAnalyzer,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analyzer(analyzer: RiskAnalyzer) -> Self {
        Self {
            patients: Vec::new(),
            analyzer,
        }
    }

    /// Append a patient and return the assessment computed on insertion.
    pub fn add_patient(&mut self, patient: Patient) -> RiskAssessment {
        let assessment = self.analyzer.evaluate(&patient);
        tracing::debug!(
            name = %patient.name,
            score = assessment.score,
            level = %assessment.level,
            "patient registered"
        );
        self.patients.push(patient);
        assessment
    }

    /// Registered patients in arrival order.
    pub fn list_patients(&self) -> &[Patient] {
        &self.patients
    }

    /// First patient whose name equals `name`, ignoring case and surrounding blanks.
    pub fn find_by_name(&self, name: &str) -> Option<&Patient> {
        let needle = name.trim().to_lowercase();
        self.patients
            .iter()
            .find(|patient| patient.name.trim().to_lowercase() == needle)
    }

    /// Recompute an assessment with a fresh analyzer.
    pub fn assess(&self, patient: &Patient) -> RiskAssessment {
        RiskAnalyzer::new().evaluate(patient)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

impl Extend<Patient> for PatientRegistry {
    fn extend<I: IntoIterator<Item = Patient>>(&mut self, iter: I) {
        for patient in iter {
            self.add_patient(patient);
        }
    }
}

impl FromIterator<Patient> for PatientRegistry {
    fn from_iter<I: IntoIterator<Item = Patient>>(iter: I) -> Self {
        let mut registry = PatientRegistry::new();
        registry.extend(iter);
        registry
    }
}
