// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::cfg::enums::YesNo;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Config {
    /// How results (and, in verbose mode, commands) are emitted.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rendering mode flags. Raw and Hex compose (bytes first, then the dump of
/// the same bytes); Json replaces the per-command text renderer.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default, rename = "Verbose")]
    /// Echo the outgoing command before its result.
    pub verbose: YesNo,

    #[serde(default, rename = "Raw")]
    /// Emit the exact response bytes.
    pub raw: YesNo,

    #[serde(default, rename = "Hex")]
    /// Emit a hex dump of the response bytes.
    pub hex: YesNo,

    #[serde(default, rename = "Json")]
    /// Emit the normalized response as sorted JSON.
    pub json: YesNo,
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {path:?}"))?;
        Self::from_yaml(&s)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml(s: &str) -> Result<Self> {
        let mut cfg: Config =
            serde_yaml::from_str(s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants and normalizes derived fields.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        let o = &self.output;
        ensure!(
            !(o.json.as_bool() && (o.raw.as_bool() || o.hex.as_bool())),
            "Json cannot be combined with Raw or Hex"
        );
        Ok(())
    }
}

/// Absolute, canonical form of a (possibly relative) config path.
pub fn resolve_config_path(rel: &str) -> Result<PathBuf> {
    let p = Path::new(rel);

    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot get current working dir")?
            .join(p)
    };

    abs.canonicalize()
        .with_context(|| format!("failed to canonicalize path {abs:?}"))
}
