//! Config Validation Tests
//!
//! Typo detection, plausibility warnings and hard validation of
//! `FieldConfig`, plus file loading through a temp directory.

use std::io::Write;

use gasfield_sim::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use gasfield_sim::config::{ConfigError, FieldConfig};
use gasfield_sim::SimulationParameters;

const FULL_PARAMETERS: &str = r#"
[parameters]
gasPrice = 8.5
exchangeRate = 1.45
costToDrill = 4.0
costToFrac = 2.5
costToTieIn = 0.75
aveFlow = 1.8
aveDecline = 3.0
drillTime = 25
fracWaitTime = 45
fracTime = 12
pipeWaitTime = 120
numRigs = 3
tgtFlow = 40.0
simTime = 8.0
"#;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_parameter_warns_with_suggestion() {
    let toml_str = r#"
[parameters]
pipeWaitTme = 160
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert_eq!(warnings[0].field, "parameters.pipeWaitTme");
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("parameters.pipeWaitTime")
    );
}

#[test]
fn snake_case_server_typo_warns() {
    let toml_str = r#"
[server]
run_timout_secs = 10
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("server.run_timeout_secs")
    );
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = format!(
        r#"
[field]
name = "Moomba North"

[engine]
parallel_well_threshold = 1024

[server]
addr = "127.0.0.1:9000"
run_timeout_secs = 10
max_body_bytes = 4096
{FULL_PARAMETERS}"#
    );
    let warnings = validate_unknown_keys(&toml_str);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn unknown_section_warns() {
    let toml_str = r#"
[reservoir]
porosity = 0.12
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| w.field == "reservoir"));
    assert!(warnings.iter().any(|w| w.field == "reservoir.porosity"));
}

#[test]
fn empty_toml_produces_zero_warnings() {
    assert!(validate_unknown_keys("").is_empty());
}

#[test]
fn known_keys_include_every_section() {
    let known = known_config_keys();
    for key in ["field", "parameters", "engine", "server", "server.addr"] {
        assert!(known.contains(key), "missing {key}");
    }
}

#[test]
fn suggest_correction_returns_none_for_garbage() {
    let known = known_config_keys();
    assert!(suggest_correction("zzzzzzzzzzzzzzzzzzzz", &known).is_none());
}

// ============================================================================
// Plausibility Warnings
// ============================================================================

#[test]
fn extreme_gas_price_is_warning_not_error() {
    let params = SimulationParameters {
        gas_price: 450.0,
        ..Default::default()
    };
    assert!(params.violations().is_empty());
    let warnings = validate_physical_ranges(&params);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "parameters.gasPrice");
}

#[test]
fn huge_batch_is_warning() {
    let params = SimulationParameters {
        num_rigs: 500,
        ..Default::default()
    };
    let warnings = validate_physical_ranges(&params);
    assert!(warnings.iter().any(|w| w.field == "parameters.numRigs"));
}

// ============================================================================
// Hard Validation
// ============================================================================

#[test]
fn all_defaults_pass_validation() {
    let config = FieldConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.parameters, SimulationParameters::default());
}

#[test]
fn full_parameters_section_parses() {
    let config = FieldConfig::from_toml_str(FULL_PARAMETERS).unwrap();
    assert_eq!(config.parameters.num_rigs, 3);
    assert_eq!(config.parameters.pipe_wait_time, 120);
    assert!((config.parameters.exchange_rate - 1.45).abs() < 1e-12);
}

#[test]
fn invalid_default_parameters_rejected() {
    let toml_str = FULL_PARAMETERS
        .replace("drillTime = 25", "drillTime = 0")
        .replace("aveDecline = 3.0", "aveDecline = -1.0");
    match FieldConfig::from_toml_str(&toml_str) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 2, "got {errors:?}");
            assert!(errors.iter().all(|e| e.starts_with("parameters: ")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn blank_field_name_rejected() {
    let toml_str = r#"
[field]
name = "   "
"#;
    assert!(matches!(
        FieldConfig::from_toml_str(toml_str),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn wrong_type_is_parse_error() {
    let toml_str = r#"
[server]
run_timeout_secs = "thirty"
"#;
    assert!(matches!(
        FieldConfig::from_toml_str(toml_str),
        Err(ConfigError::Parse(..))
    ));
}

// ============================================================================
// File Round Trip
// ============================================================================

#[test]
fn config_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field_config.toml");

    let mut config = FieldConfig::default();
    config.field.name = "Cooper Basin East".to_string();
    config.parameters.sim_time = 12.0;
    config.server.run_timeout_secs = 5;
    config.save_to_file(&path).unwrap();

    let loaded = FieldConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn load_from_file_reports_path_on_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server\naddr = ").unwrap();

    let err = FieldConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FieldConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}
