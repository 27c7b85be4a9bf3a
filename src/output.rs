// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::io::{self, Write};

use tracing::debug;

use crate::{
    cfg::config::OutputConfig,
    error::FormatError,
    formatters::{
        DefaultFormatter, ErrorFormatter, Formatter, HexFormatter, JsonFormatter,
        OutputFormatter, RawFormatter, Rendered,
    },
    models::{response::StructuredResponse, sense_data::SenseData},
};

/// Sequences what gets written for one command: the echoed command in
/// verbose mode, then the result in the active mode.
///
/// Raw bytes are written as-is; every text emission ends with a newline.
#[derive(Debug)]
pub struct OutputContext<W: Write> {
    verbose: bool,
    raw: bool,
    hex: bool,
    json: bool,
    formatter: Formatter,
    out: W,
}

impl OutputContext<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputContext<W> {
    pub fn new(out: W) -> Self {
        Self {
            verbose: false,
            raw: false,
            hex: false,
            json: false,
            formatter: Formatter::default(),
            out,
        }
    }

    pub fn from_config(cfg: &OutputConfig, out: W) -> Self {
        let mut ctx = Self::new(out);
        ctx.verbose = cfg.verbose.as_bool();
        ctx.raw = cfg.raw.as_bool();
        ctx.hex = cfg.hex.as_bool();
        ctx.json = cfg.json.as_bool();
        ctx
    }

    pub fn enable_verbose(&mut self) {
        self.verbose = true;
    }

    pub fn enable_raw(&mut self) {
        self.raw = true;
    }

    pub fn enable_hex(&mut self) {
        self.hex = true;
    }

    pub fn enable_json(&mut self) {
        self.json = true;
    }

    /// Select the renderer for the next results.
    pub fn set_formatter(&mut self, formatter: impl Into<Formatter>) {
        self.formatter = formatter.into();
    }

    pub fn formatter(&self) -> Formatter {
        self.formatter
    }

    /// In verbose mode, echo the outgoing command through the default
    /// renderer; otherwise a no-op.
    pub fn output_command(&mut self, cmd: &dyn StructuredResponse) -> Result<(), FormatError> {
        if !self.verbose {
            return Ok(());
        }
        let rendered = DefaultFormatter.format(cmd)?;
        self.emit(rendered)
    }

    pub fn output_result(&mut self, result: &dyn StructuredResponse) -> Result<(), FormatError> {
        debug!(
            raw = self.raw,
            hex = self.hex,
            json = self.json,
            formatter = ?self.formatter,
            "output result"
        );
        if self.raw || self.hex {
            if self.raw {
                let rendered = RawFormatter.format(result)?;
                self.emit(rendered)?;
            }
            if self.hex {
                let rendered = HexFormatter.format(result)?;
                self.emit(rendered)?;
            }
            return Ok(());
        }

        let rendered = if self.json {
            JsonFormatter.format(result)?
        } else {
            self.formatter.format(result)?
        };
        self.emit(rendered)
    }

    /// Render sense data returned instead of a result.
    pub fn output_error(&mut self, sense: &SenseData) -> Result<(), FormatError> {
        let rendered = ErrorFormatter.format(sense)?;
        self.emit(rendered)
    }

    fn emit(&mut self, rendered: Rendered) -> Result<(), FormatError> {
        match rendered {
            Rendered::Text(text) => writeln!(self.out, "{text}")?,
            Rendered::Bytes(bytes) => self.out.write_all(&bytes)?,
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
