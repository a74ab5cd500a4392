//! Plain-text rendering of patients and assessments.

use triage_core::{Patient, PatientRegistry, RiskAnalyzer, RiskAssessment, VitalSigns};

pub fn format_vitals(vitals: &VitalSigns) -> String {
    format!(
        "T={:.1}°C, PAS={}mmHg, FC={}bpm",
        vitals.temperature_c, vitals.systolic_bp, vitals.heart_rate
    )
}

pub fn format_risk_line(assessment: &RiskAssessment) -> String {
    format!(
        "Risco: {} (pontuação {})",
        assessment.level, assessment.score
    )
}

/// Risk line followed by the recommendation bullets.
pub fn format_assessment(assessment: &RiskAssessment) -> String {
    let bullets: Vec<String> = assessment
        .recommendations
        .iter()
        .map(|item| format!(" - {item}"))
        .collect();
    format!(
        "{}\nRecomendações:\n{}",
        format_risk_line(assessment),
        bullets.join("\n")
    )
}

pub fn format_breakdown(analyzer: &RiskAnalyzer, patient: &Patient) -> String {
    let parts = analyzer.breakdown(patient);
    format!(
        "Pontuação: idade={} temperatura={} PAS={} FC={} sintomas={}",
        parts.age, parts.temperature, parts.blood_pressure, parts.heart_rate, parts.symptoms
    )
}

/// Numbered listing with a freshly computed assessment per patient.
pub fn format_listing(registry: &PatientRegistry) -> String {
    let mut lines = vec!["=== Pacientes cadastrados ===".to_string()];
    for (idx, patient) in registry.list_patients().iter().enumerate() {
        let assessment = RiskAnalyzer::new().evaluate(patient);
        lines.push(format!("{}. {} - {} anos", idx + 1, patient.name, patient.age));
        lines.push(format!("   {}", format_risk_line(&assessment)));
        if !patient.symptoms.is_empty() {
            lines.push(format!("   Sintomas: {}", patient.symptoms.join(", ")));
        }
        lines.push(format!(
            "   Sinais Vitais: {}",
            format_vitals(&patient.vital_signs)
        ));
    }
    lines.join("\n")
}

/// Full record of one patient, as shown by a name search.
pub fn format_detail(patient: &Patient, assessment: &RiskAssessment) -> String {
    let symptoms = if patient.symptoms.is_empty() {
        "Nenhum informado".to_string()
    } else {
        patient.symptoms.join(", ")
    };

    format!(
        "Paciente: {}\nIdade: {}\nChegada: {}\nSintomas: {}\nSinais vitais: {}\n{}",
        patient.name,
        patient.age,
        patient.arrival_time.format("%d/%m/%Y %H:%M"),
        symptoms,
        format_vitals(&patient.vital_signs),
        format_assessment(assessment)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn patient(name: &str, symptoms: &[&str]) -> Patient {
        Patient::new(
            name,
            80,
            symptoms.iter().map(|s| s.to_string()).collect(),
            VitalSigns::new(39.5, 85, 135),
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 15, 0).unwrap(),
        )
    }

    #[test]
    fn vitals_use_one_decimal_for_temperature() {
        assert_eq!(
            format_vitals(&VitalSigns::new(38.2, 120, 80)),
            "T=38.2°C, PAS=120mmHg, FC=80bpm"
        );
    }

    #[test]
    fn assessment_lists_recommendations() {
        let assessment = RiskAnalyzer::new().evaluate(&patient("Ana", &["dor no peito"]));
        assert_eq!(
            format_assessment(&assessment),
            "Risco: Alto (pontuação 13)\nRecomendações:\n - Encaminhar imediatamente para emergência\n - Monitorar sinais vitais continuamente"
        );
    }

    #[test]
    fn detail_marks_missing_symptoms() {
        let p = patient("Ana", &[]);
        let text = format_detail(&p, &RiskAnalyzer::new().evaluate(&p));
        assert!(text.contains("Sintomas: Nenhum informado"));
        assert!(text.contains("Chegada: 01/05/2024 08:15"));
    }

    #[test]
    fn listing_is_numbered_in_order() {
        let mut registry = PatientRegistry::new();
        registry.add_patient(patient("Ana", &["febre"]));
        registry.add_patient(patient("Bruno", &[]));

        let text = format_listing(&registry);
        assert!(text.contains("1. Ana - 80 anos"));
        assert!(text.contains("   Sintomas: febre"));
        assert!(text.contains("2. Bruno - 80 anos"));
        assert!(text.find("Ana").unwrap() < text.find("Bruno").unwrap());
    }

    #[test]
    fn breakdown_names_each_criterion() {
        let p = patient("Ana", &["febre"]);
        assert_eq!(
            format_breakdown(&RiskAnalyzer::new(), &p),
            "Pontuação: idade=3 temperatura=2 PAS=3 FC=3 sintomas=1"
        );
    }
}
