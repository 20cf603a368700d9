// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::protocol::EngineCommand;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse analysis settings: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Search depth must be at least 1")]
    ZeroDepth,
}

/// How the analysis engine is asked to search.
///
/// ```toml
/// depth = 18
///
/// [options]
/// Threads = 2
/// "Skill Level" = 20
/// UCI_ShowWDL = false
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Plies to search for each position. Defaults to 15.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Engine options sent with `setoption` during the handshake.
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

fn default_depth() -> u32 {
    15
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            options: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(flag) => write!(f, "{flag}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl AnalysisSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        if settings.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(settings)
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_option(mut self, name: &str, value: OptionValue) -> Self {
        self.options.insert(name.to_string(), value);
        self
    }

    /// One `setoption` per configured option, in name order.
    pub fn set_options(&self) -> impl Iterator<Item = EngineCommand> + '_ {
        self.options
            .iter()
            .map(|(name, value)| EngineCommand::SetOption {
                name: name.clone(),
                value: value.to_string(),
            })
    }

    /// Opening sequence for a freshly started engine.
    pub fn handshake(&self) -> Vec<EngineCommand> {
        let mut commands = vec![EngineCommand::Uci];
        commands.extend(self.set_options());
        commands.push(EngineCommand::IsReady);
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.depth, 15);
        assert!(settings.options.is_empty());
        assert_eq!(AnalysisSettings::from_toml_str("").unwrap(), settings);
    }
    #[test]
    fn test_from_toml() {
        let settings = AnalysisSettings::from_toml_str(
            r#"
            depth = 18

            [options]
            Threads = 2
            "Skill Level" = 20
            UCI_ShowWDL = false
            Style = "Aggressive"
            "#,
        )
        .unwrap();
        assert_eq!(settings.depth, 18);
        assert_eq!(settings.options["Threads"], OptionValue::Number(2));
        assert_eq!(settings.options["UCI_ShowWDL"], OptionValue::Flag(false));
        assert_eq!(
            settings.options["Style"],
            OptionValue::Text("Aggressive".to_string())
        );
    }
    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            AnalysisSettings::from_toml_str("depth = \"deep\""),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            AnalysisSettings::from_toml_str("depth = 0"),
            Err(ConfigError::ZeroDepth)
        ));
    }
    #[test]
    fn test_handshake() {
        let settings = AnalysisSettings::default()
            .with_option("Threads", OptionValue::Number(4))
            .with_option("Ponder", OptionValue::Flag(false));
        let lines: Vec<String> = settings
            .handshake()
            .iter()
            .map(|command| command.to_string())
            .collect();
        assert_eq!(
            lines,
            [
                "uci",
                "setoption name Ponder value false",
                "setoption name Threads value 4",
                "isready",
            ]
        );
    }
}
