use serde::{Deserialize, Serialize};

/// One data point as stored in a model archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawModelEntry {
    #[serde(alias = "command")]
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A suggested command ready for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictiveCommand {
    command: String,
    name: String,
    description: Option<String>,
}

impl PredictiveCommand {
    /// Full command line, e.g. `Get-AzContext -ListAvailable`.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Command name, the first token of the command line.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl RawModelEntry {
    pub fn new(suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert into the runtime representation.
    ///
    /// Fails with a reason string when the suggestion carries no command.
    pub fn transform(&self) -> Result<PredictiveCommand, String> {
        let command = self.suggestion.trim();
        let name = command
            .split_whitespace()
            .next()
            .ok_or_else(|| "suggestion is empty".to_string())?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(PredictiveCommand {
            command: command.to_string(),
            name: name.to_string(),
            description,
        })
    }
}
