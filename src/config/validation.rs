//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausibility checks on the default parameter record.
//!
//! Two-pass parse approach: first parse raw TOML into `toml::Value`, walk
//! the key tree, compare against known field names and emit warnings with
//! "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break a config.

use std::collections::HashSet;

use crate::types::SimulationParameters;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `FieldConfig`.
///
/// Maintained by hand to match the struct hierarchy in `field_config.rs`;
/// a new field there needs an entry here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [field]
        "field",
        "field.name",
        // [parameters]
        "parameters",
        "parameters.gasPrice",
        "parameters.exchangeRate",
        "parameters.costToDrill",
        "parameters.costToFrac",
        "parameters.costToTieIn",
        "parameters.aveFlow",
        "parameters.aveDecline",
        "parameters.drillTime",
        "parameters.fracWaitTime",
        "parameters.fracTime",
        "parameters.pipeWaitTime",
        "parameters.numRigs",
        "parameters.tgtFlow",
        "parameters.simTime",
        // [engine]
        "engine",
        "engine.parallel_well_threshold",
        // [server]
        "server",
        "server.addr",
        "server.run_timeout_secs",
        "server.max_body_bytes",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Collect every dotted key path in a parsed TOML document.
///
/// `{ server = { addr = "..", run_timeout_secs = 5 } }` yields
/// `["server", "server.addr", "server.run_timeout_secs"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };

    let mut keys = Vec::with_capacity(table.len());
    for (name, child) in table {
        let path = match prefix {
            "" => name.clone(),
            p => format!("{p}.{name}"),
        };
        let nested = walk_toml_keys(child, &path);
        keys.push(path);
        keys.extend(nested);
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance between two strings, counted in chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Closest known key within edit distance 3. Ties go to the
/// alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warn about every key in `raw_toml` that `FieldConfig` does not know.
///
/// Never fails: a document that does not parse yields no warnings here
/// and is reported by the serde pass instead.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            message: format!("Unknown config key '{key}'"),
            suggestion: suggest_correction(&key, &known),
            field: key,
        })
        .collect()
}

// ============================================================================
// Plausibility Checks
// ============================================================================

/// Flag values that are legal but unlikely for an onshore gas development.
///
/// Hard rules live in [`SimulationParameters::violations`]; this only
/// produces warnings.
pub fn validate_physical_ranges(params: &SimulationParameters) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut flag = |field: &str, message: String| {
        warnings.push(ValidationWarning {
            field: format!("parameters.{field}"),
            message,
            suggestion: None,
        });
    };

    // Exchange rate: AUD per USD has stayed within 0.9-2.1 historically
    if params.exchange_rate > 0.0 && !(0.5..=3.0).contains(&params.exchange_rate) {
        flag(
            "exchangeRate",
            format!(
                "exchangeRate = {:.2} is outside typical range (0.5-3.0 AUD/USD)",
                params.exchange_rate
            ),
        );
    }

    if params.gas_price > 100.0 {
        flag(
            "gasPrice",
            format!("gasPrice = {:.1} USD/GJ is outside typical range (0-100)", params.gas_price),
        );
    }

    // Peak rate per well in MMscf/day
    if params.ave_flow > 100.0 {
        flag(
            "aveFlow",
            format!("aveFlow = {:.1} MMscf/day is outside typical range (0-100)", params.ave_flow),
        );
    }

    for (name, days) in [
        ("drillTime", params.drill_time),
        ("fracWaitTime", params.frac_wait_time),
        ("fracTime", params.frac_time),
        ("pipeWaitTime", params.pipe_wait_time),
    ] {
        if days > 3_650 {
            flag(name, format!("{name} = {days} days is longer than ten years"));
        }
    }

    if params.num_rigs > 100 {
        flag(
            "numRigs",
            format!("numRigs = {} wells per batch is unusually large", params.num_rigs),
        );
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================
