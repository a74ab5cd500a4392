mod menu;
mod prompt;
mod report;

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use triage_core::{Clock, Patient, RiskAnalyzer, SystemClock, TriageConfig, VitalSigns};
use triage_store::{load_registry, save_registry};

use crate::prompt::Prompter;

#[derive(Parser, Debug)]
#[command(
    name = "triage",
    about = "Cadastro de pacientes e análise de risco na triagem."
)]
struct Args {
    /// Arquivo JSON com os pacientes cadastrados.
    #[arg(long, default_value = "dados_pacientes.json")]
    data: PathBuf,

    /// Arquivo JSON opcional com valores padrão.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Menu interativo (padrão).
    Menu,
    /// Cadastra um paciente e salva o arquivo.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long, value_parser = parse_temperature)]
        temperature: Option<f64>,
        #[arg(long)]
        systolic: Option<i32>,
        #[arg(long)]
        heart_rate: Option<i32>,
        /// Pode ser repetido.
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
    },
    /// Lista os pacientes com o risco recalculado.
    List {
        /// Mostra a pontuação por critério.
        #[arg(long)]
        explain: bool,
    },
    /// Busca um paciente pelo nome.
    Search {
        name: String,
        #[arg(long)]
        explain: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triage=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let clock = SystemClock;

    let mut registry = load_registry(&args.data, &config, &clock)
        .with_context(|| format!("Não foi possível carregar {:?}", args.data))?;
    tracing::info!(patients = registry.len(), "registry loaded");

    match args.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), BufWriter::new(io::stdout()));
            menu::run_menu(&mut prompter, &mut registry, &config, &clock)?;
            save(&args.data, &registry)?;
            prompter.say("Dados salvos. Até logo!")?;
        }
        Command::Add {
            name,
            age,
            temperature,
            systolic,
            heart_rate,
            symptoms,
        } => {
            let fallback = config.fallback_vitals;
            let vitals = VitalSigns::new(
                temperature.unwrap_or(fallback.temperature_c),
                systolic.unwrap_or(fallback.systolic_bp),
                heart_rate.unwrap_or(fallback.heart_rate),
            );
            let mut patient = Patient::new(name, age, Vec::new(), vitals, clock.now());
            for symptom in &symptoms {
                patient.add_symptom(symptom);
            }

            let assessment = registry.add_patient(patient);
            save(&args.data, &registry)?;
            println!("Paciente cadastrado com sucesso!");
            println!("{}", report::format_assessment(&assessment));
        }
        Command::List { explain } => {
            println!("{}", report::format_listing(&registry));
            if explain {
                let analyzer = RiskAnalyzer::new();
                for patient in registry.list_patients() {
                    println!(
                        "{}: {}",
                        patient.name,
                        report::format_breakdown(&analyzer, patient)
                    );
                }
            }
        }
        Command::Search { name, explain } => match registry.find_by_name(&name) {
            Some(patient) => {
                let analyzer = RiskAnalyzer::new();
                println!(
                    "{}",
                    report::format_detail(patient, &analyzer.evaluate(patient))
                );
                if explain {
                    println!("{}", report::format_breakdown(&analyzer, patient));
                }
            }
            None => println!("Paciente não encontrado."),
        },
    }

    Ok(())
}

fn parse_temperature(raw: &str) -> Result<f64, String> {
    prompt::parse_decimal(raw).ok_or_else(|| format!("temperatura inválida: {raw}"))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<TriageConfig> {
    let Some(path) = path else {
        return Ok(TriageConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Não foi possível ler o arquivo de configuração {path:?}"))?;
    TriageConfig::from_json_str(&raw).with_context(|| format!("Configuração inválida em {path:?}"))
}

fn save(path: &Path, registry: &triage_core::PatientRegistry) -> anyhow::Result<()> {
    save_registry(path, registry).with_context(|| format!("Não foi possível salvar {path:?}"))?;
    tracing::info!(patients = registry.len(), path = %path.display(), "registry saved");
    Ok(())
}
