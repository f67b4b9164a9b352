// Copyright 2026 The Synapze Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::srs::policy::Policy;

pub const CONFIG_FILE_NAME: &str = "synapze.toml";

/// The contents of a collection's `synapze.toml`. The file is optional, as
/// is every key in it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scheduler: Policy,
}

impl Config {
    /// Load the configuration of the collection in `directory`, falling back
    /// to defaults if there is no configuration file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No configuration file, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.scheduler.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_config() -> Fallible<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_override() -> Fallible<()> {
        let config = Config::parse("[scheduler]\nmastered_interval = 30\nlapse_ceiling = 5\n")?;
        assert_eq!(config.scheduler.mastered_interval, 30);
        assert_eq!(config.scheduler.lapse_ceiling, 5);
        assert_eq!(config.scheduler.graduating_interval, 10);
        Ok(())
    }

    #[test]
    fn test_unknown_key() {
        assert!(Config::parse("[scheduler]\nlearning_steps = 3\n").is_err());
        assert!(Config::parse("[display]\ntheme = \"dark\"\n").is_err());
    }

    #[test]
    fn test_invalid_policy() {
        let err = Config::parse("[scheduler]\ngraduating_interval = 50\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error: graduating_interval must not exceed mastered_interval."
        );
    }

    #[test]
    fn test_missing_file() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_test_directory() -> Fallible<()> {
        let config = Config::load(&PathBuf::from("./test"))?;
        assert_eq!(config.scheduler.graduating_interval, 10);
        Ok(())
    }
}
