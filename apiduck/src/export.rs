//! JSON export of documentation sets.

use std::io::Write;

use crate::document::ApiDocumentation;
use crate::error::Result;

/// Configuration for JSON export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Whether to pretty-print with a two-space indent.
    pub pretty: bool,

    /// Whether to end the output with a newline.
    pub trailing_newline: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            trailing_newline: false,
        }
    }
}

impl ExportConfig {
    /// Create a new export configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact single-line output.
    pub fn compact() -> Self {
        Self::default().with_pretty(false)
    }

    /// Set whether to pretty-print.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set whether to append a trailing newline.
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }
}

impl ApiDocumentation {
    /// Encode the documentation as pretty-printed JSON.
    pub fn export(&self) -> Result<String> {
        self.export_with(&ExportConfig::default())
    }

    /// Encode the documentation as JSON using `config`.
    pub fn export_with(&self, config: &ExportConfig) -> Result<String> {
        let mut output = if config.pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        if config.trailing_newline {
            output.push('\n');
        }

        tracing::debug!(
            title = %self.info.title,
            tags = self.tags.len(),
            bytes = output.len(),
            "exported documentation"
        );
        Ok(output)
    }

    /// Encode the documentation as JSON into `writer`.
    pub fn write_json<W: Write>(&self, mut writer: W, config: &ExportConfig) -> Result<()> {
        if config.pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        if config.trailing_newline {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        tracing::debug!(title = %self.info.title, "wrote documentation");
        Ok(())
    }
}
