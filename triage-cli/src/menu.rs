//! Interactive triage menu.

use std::io::{BufRead, Write};

use triage_core::{Clock, Patient, PatientRegistry, RiskAnalyzer, TriageConfig, VitalSigns};

use crate::prompt::Prompter;
use crate::report;

const MENU: [(&str, &str); 4] = [
    ("1", "Cadastrar novo paciente"),
    ("2", "Listar pacientes"),
    ("3", "Buscar paciente por nome"),
    ("4", "Salvar e sair"),
];

/// Run the menu until the user picks "save and exit" or input ends.
///
/// Saving is left to the caller.
pub fn run_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    registry: &mut PatientRegistry,
    config: &TriageConfig,
    clock: &dyn Clock,
) -> std::io::Result<()> {
    loop {
        prompter.say("\n=== Sistema de Triagem Hospitalar ===")?;
        for (option, label) in MENU {
            prompter.say(&format!("{option}. {label}"))?;
        }

        let Some(choice) = prompter.ask("Selecione uma opção: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => register_patient(prompter, registry, config, clock)?,
            "2" => {
                prompter.say("")?;
                prompter.say(&report::format_listing(registry))?;
            }
            "3" => search_patient(prompter, registry)?,
            "4" => return Ok(()),
            _ => prompter.say("Opção inválida. Tente novamente.")?,
        }
    }
}

fn register_patient<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    registry: &mut PatientRegistry,
    config: &TriageConfig,
    clock: &dyn Clock,
) -> std::io::Result<()> {
    let defaults = &config.intake;

    prompter.say("\n=== Cadastro de Paciente ===")?;
    let name = prompter.ask("Nome completo: ")?.unwrap_or_default();
    let age = prompter.ask_int("Idade", defaults.age)?;
    let temperature = prompter.ask_float("Temperatura (°C)", defaults.temperature_c)?;
    let systolic = prompter.ask_int("Pressão sistólica (mmHg)", defaults.systolic_bp)?;
    let heart_rate = prompter.ask_int("Frequência cardíaca (bpm)", defaults.heart_rate)?;

    let mut patient = Patient::new(
        name,
        age,
        Vec::new(),
        VitalSigns::new(temperature, systolic, heart_rate),
        clock.now(),
    );
    for symptom in prompter.ask_list("Informe os sintomas (vazio para finalizar):")? {
        patient.add_symptom(&symptom);
    }

    let assessment = registry.add_patient(patient);
    prompter.say("\nPaciente cadastrado com sucesso!")?;
    prompter.say(&report::format_assessment(&assessment))
}

fn search_patient<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    registry: &PatientRegistry,
) -> std::io::Result<()> {
    let name = prompter
        .ask("Nome do paciente para buscar: ")?
        .unwrap_or_default();

    match registry.find_by_name(&name) {
        Some(patient) => {
            let assessment = RiskAnalyzer::new().evaluate(patient);
            prompter.say("")?;
            prompter.say(&report::format_detail(patient, &assessment))
        }
        None => prompter.say("Paciente não encontrado."),
    }
}
