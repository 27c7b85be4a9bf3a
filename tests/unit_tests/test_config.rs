use anyhow::{Context, Result};
use scsi_render_rs::{
    cfg::{
        config::{Config, resolve_config_path},
        enums::{LogOutput, RotationFrequency, YesNo},
        logger::parse_logger_config,
    },
    output::OutputContext,
};

#[test]
fn test_load_config_from_file() -> Result<()> {
    let cfg = resolve_config_path("tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    assert_eq!(cfg.output.verbose, YesNo::Yes);
    assert_eq!(cfg.output.raw, YesNo::No);
    assert!(cfg.output.hex.as_bool());
    assert!(!cfg.output.json.as_bool());

    let _ctx = OutputContext::from_config(&cfg.output, Vec::new());
    Ok(())
}

#[test]
fn test_missing_flags_default_to_no() -> Result<()> {
    let cfg = Config::from_yaml("output:\n  Json: Yes\n")?;
    assert!(cfg.output.json.as_bool());
    assert_eq!(cfg.output.verbose, YesNo::No);
    assert_eq!(cfg.output.raw, YesNo::No);

    let empty = Config::from_yaml("{}")?;
    assert_eq!(empty.output.hex, YesNo::No);
    Ok(())
}

#[test]
fn test_raw_and_hex_compose() -> Result<()> {
    let cfg = Config::from_yaml("output:\n  Raw: yes\n  Hex: yes\n")?;
    assert!(cfg.output.raw.as_bool() && cfg.output.hex.as_bool());
    Ok(())
}

#[test]
fn test_json_excludes_raw_and_hex() {
    assert!(Config::from_yaml("output:\n  Raw: yes\n  Json: yes\n").is_err());
    assert!(Config::from_yaml("output:\n  Hex: \"1\"\n  Json: \"1\"\n").is_err());
}

#[test]
fn test_missing_config_file() {
    assert!(resolve_config_path("tests/does_not_exist.yaml").is_err());
}

#[test]
fn test_logger_config() -> Result<()> {
    let content = std::fs::read_to_string("tests/config_logger.yaml")?;
    let cfg = parse_logger_config(&content)?;
    assert_eq!(cfg.level, "debug");
    assert_eq!(cfg.output, LogOutput::Stderr);
    assert!(cfg.is_show_line);
    let file = cfg.file.context("file section")?;
    assert_eq!(file.rotation_frequency, RotationFrequency::Daily);
    Ok(())
}
