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

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::parser::parse_deck;

/// Check that the deck files and configuration parse. Does not touch the
/// database.
pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let directory = match directory {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let _ = Config::load(&directory)?;
    let _ = parse_deck(&directory)?;
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;
    use std::path::PathBuf;

    use super::check_collection;
    use crate::error::Fallible;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_non_existent_directory() {
        assert!(check_collection(Some("./derpherp".to_string())).is_err());
    }

    #[test]
    fn test_directory() {
        assert!(check_collection(Some("./test".to_string())).is_ok());
    }

    #[test]
    fn test_broken_deck() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        write(
            PathBuf::from(&directory).join("Broken.md"),
            "no separator\n",
        )?;
        assert!(check_collection(Some(directory)).is_err());
        Ok(())
    }

    #[test]
    fn test_broken_config() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        write(
            PathBuf::from(&directory).join("synapze.toml"),
            "[scheduler]\nlapse_ceiling = 0\n",
        )?;
        assert!(check_collection(Some(directory)).is_err());
        Ok(())
    }
}
