//! Flat JSON snapshot of the patient registry.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use triage_core::{Clock, Patient, PatientRegistry, TriageConfig, TriageError, VitalSigns};

/// Parse patients from a JSON snapshot string.
pub fn parse_snapshot_str(
    snapshot_json: &str,
    config: &TriageConfig,
    clock: &dyn Clock,
) -> Result<Vec<Patient>, TriageError> {
    let value: Value =
        serde_json::from_str(snapshot_json).map_err(|err| TriageError::Parse(err.to_string()))?;
    parse_snapshot_value(&value, config, clock)
}

/// Parse patients from an already decoded `serde_json::Value`.
///
/// `name` and `age` are required; everything else falls back to the
/// configured defaults or to `clock` for the arrival time.
pub fn parse_snapshot_value(
    snapshot: &Value,
    config: &TriageConfig,
    clock: &dyn Clock,
) -> Result<Vec<Patient>, TriageError> {
    let entries = snapshot.as_array().ok_or_else(|| {
        TriageError::Parse("Expected a JSON array of patient records".to_string())
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_record(index, entry, config, clock))
        .collect()
}

/// Render patients as a pretty-printed JSON array, in the order given.
///
/// JSON has no representation for infinite or NaN temperatures, so those
/// records are rejected rather than written as `null`.
pub fn render_snapshot(patients: &[Patient]) -> Result<String, TriageError> {
    if let Some((index, patient)) = patients
        .iter()
        .enumerate()
        .find(|(_, p)| !p.vital_signs.temperature_c.is_finite())
    {
        return Err(TriageError::Parse(format!(
            "Record {index} ({}): temperature_c {} cannot be stored",
            patient.name, patient.vital_signs.temperature_c
        )));
    }

    serde_json::to_string_pretty(patients).map_err(|err| TriageError::Parse(err.to_string()))
}

/// Load a registry from `path`. A missing file yields an empty registry.
pub fn load_registry(
    path: &Path,
    config: &TriageConfig,
    clock: &dyn Clock,
) -> Result<PatientRegistry, TriageError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no snapshot found, starting empty");
        return Ok(PatientRegistry::new());
    }

    let data = std::fs::read_to_string(path)?;
    let patients = parse_snapshot_str(&data, config, clock)?;
    tracing::debug!(path = %path.display(), count = patients.len(), "snapshot loaded");

    Ok(patients.into_iter().collect())
}

/// Overwrite `path` with the registry contents.
pub fn save_registry(path: &Path, registry: &PatientRegistry) -> Result<(), TriageError> {
    let rendered = render_snapshot(registry.list_patients())?;
    std::fs::write(path, rendered)?;
    tracing::debug!(path = %path.display(), count = registry.len(), "snapshot saved");
    Ok(())
}

fn parse_record(
    index: usize,
    entry: &Value,
    config: &TriageConfig,
    clock: &dyn Clock,
) -> Result<Patient, TriageError> {
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .ok_or(TriageError::MissingField {
            index,
            field: "name",
        })?;

    let age = match entry.get("age") {
        None | Some(Value::Null) => {
            return Err(TriageError::MissingField {
                index,
                field: "age",
            })
        }
        Some(value) => value
            .as_u64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
                    .map(|v| v as u64)
            })
            .and_then(|age| u32::try_from(age).ok())
            .ok_or_else(|| {
                TriageError::Parse(format!("Record {index}: invalid age {value}"))
            })?,
    };

    let symptoms = entry
        .get("symptoms")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let vital_signs = extract_vitals(index, entry.get("vital_signs"), &config.fallback_vitals)?;
    let arrival_time = extract_arrival(index, entry.get("arrival_time"), clock);

    Ok(Patient::new(name, age, symptoms, vital_signs, arrival_time))
}

fn extract_vitals(
    index: usize,
    value: Option<&Value>,
    fallback: &VitalSigns,
) -> Result<VitalSigns, TriageError> {
    let Some(vitals) = value.filter(|v| v.is_object()) else {
        return Ok(*fallback);
    };

    let temperature_c = match vitals.get("temperature_c") {
        None | Some(Value::Null) => fallback.temperature_c,
        Some(raw) => raw.as_f64().ok_or_else(|| {
            TriageError::Parse(format!("Record {index}: invalid temperature_c {raw}"))
        })?,
    };

    Ok(VitalSigns {
        temperature_c,
        systolic_bp: extract_int(index, vitals, "systolic_bp", fallback.systolic_bp)?,
        heart_rate: extract_int(index, vitals, "heart_rate", fallback.heart_rate)?,
    })
}

fn extract_int(
    index: usize,
    vitals: &Value,
    field: &str,
    fallback: i32,
) -> Result<i32, TriageError> {
    match vitals.get(field) {
        None | Some(Value::Null) => Ok(fallback),
        Some(raw) => raw
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| TriageError::Parse(format!("Record {index}: invalid {field} {raw}"))),
    }
}

fn extract_arrival(index: usize, value: Option<&Value>, clock: &dyn Clock) -> DateTime<Utc> {
    let Some(raw) = value.and_then(Value::as_str) else {
        return clock.now();
    };

    match parse_datetime(raw) {
        Some(dt) => dt,
        None => {
            tracing::warn!(record = index, value = raw, "unparseable arrival_time, using now");
            clock.now()
        }
    }
}

// Older snapshots carry naive local timestamps; those are read as UTC.
fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
