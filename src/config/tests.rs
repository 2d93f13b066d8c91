//! Configuration tests
//!
//! The template written by `to_toml` must parse back into the same values, and
//! the environment must win over the file.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env).unwrap();
    assert_eq!(resolved.algorithm, None);
    assert_eq!(resolved.sample, config.sample);
    assert_eq!(resolved.animation, config.animation);
    assert_eq!(resolved.limits, config.limits);
    assert_eq!(resolved.logging, config.logging);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.algorithm = Some(Algorithm::Cocktail);
    config.sample.size = 32;
    config.animation.base_duration_ms = 1200;
    config.limits.bogo_max_len = 6;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let resolved = Config::resolve(parse(&config.to_toml()), no_env).unwrap();

    assert_eq!(resolved.algorithm, Some(Algorithm::Cocktail));
    assert_eq!(resolved.sample.size, 32);
    assert_eq!(resolved.animation.base_duration_ms, 1200);
    assert_eq!(resolved.limits.bogo_max_len, 6);
    assert_eq!(resolved.logging, config.logging);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::resolve(parse(""), no_env).unwrap();

    assert!(config.enable_tui);
    assert_eq!(config.sample.size, 10);
    assert_eq!(config.animation.base_duration_ms, 500);
    assert_eq!(config.limits.bogo_max_len, 8);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
algorithm = "bubble"
[sample]
size = 20
[animation]
base_duration_ms = 100
"#,
    );
    let env = env_from(&[
        ("SORTSCOPE_ALGORITHM", "merge"),
        ("SORTSCOPE_SAMPLE_SIZE", "40"),
        ("SORTSCOPE_BASE_DURATION_MS", "0"),
        ("SORTSCOPE_NO_TUI", "1"),
    ]);

    let config = Config::resolve(file, env).unwrap();

    assert_eq!(config.algorithm, Some(Algorithm::Merge));
    assert_eq!(config.sample.size, 40);
    assert_eq!(config.animation.base_duration_ms, 0);
    assert!(!config.enable_tui);
}

#[test]
fn test_unparseable_env_number_falls_back_to_file() {
    let file = parse("[sample]\nsize = 12\n");
    let env = env_from(&[("SORTSCOPE_SAMPLE_SIZE", "lots")]);

    let config = Config::resolve(file, env).unwrap();
    assert_eq!(config.sample.size, 12);
}

#[test]
fn test_unknown_algorithm_is_an_error() {
    let env = env_from(&[("SORTSCOPE_ALGORITHM", "sleep")]);
    assert!(Config::resolve(parse(""), env).is_err());
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    let file = parse("[logging]\nfile_rotation = \"weekly\"\n");
    let config = Config::resolve(file, no_env).unwrap();
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

// ─────────────────────────────────────────────────────────────────────────────
// Clamping
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_size_clamped_into_bounds() {
    let big = Config::resolve(parse(""), env_from(&[("SORTSCOPE_SAMPLE_SIZE", "5000")])).unwrap();
    assert_eq!(big.sample.size, 100);

    let small = Config::resolve(parse(""), env_from(&[("SORTSCOPE_SAMPLE_SIZE", "0")])).unwrap();
    assert_eq!(small.sample.size, 2);
}

#[test]
fn test_inverted_bounds_are_repaired() {
    let file = parse("[sample]\nsize = 50\nmin_size = 0\nmax_size = 0\n");
    let config = Config::resolve(file, no_env).unwrap();

    assert_eq!(config.sample.min_size, 1);
    assert_eq!(config.sample.max_size, 1);
    assert_eq!(config.sample.size, 1);
}

#[test]
fn test_scheduler_config_carries_pacing_and_limits() {
    let mut config = Config::default();
    config.animation.base_duration_ms = 250;
    config.limits.bogo_max_len = 5;

    let scheduler = config.scheduler_config();
    assert_eq!(scheduler.base_duration, Duration::from_millis(250));
    assert_eq!(scheduler.limits.bogo_max_len, 5);
}

#[test]
fn test_bogo_bound_is_capped() {
    let high = Config::resolve(parse("[limits]\nbogo_max_len = 20\n"), no_env).unwrap();
    assert_eq!(high.limits.bogo_max_len, BOGO_MAX_LEN_CEILING);

    let zero = Config::resolve(parse("[limits]\nbogo_max_len = 0\n"), no_env).unwrap();
    assert_eq!(zero.limits.bogo_max_len, 1);

    let within = Config::resolve(parse("[limits]\nbogo_max_len = 9\n"), no_env).unwrap();
    assert_eq!(within.limits.bogo_max_len, 9);
}
