//! Persisted reading position
//!
//! The `begin` and `next` commands keep track of the last paragraph the reader
//! was shown in a small TOML file, by default `~/.catechism/position.toml`.

use crate::catechism::CatechismIndex;
use crate::config::PositionConfig;
use crate::PositionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const POSITION_DIR: &str = ".catechism";
const POSITION_FILE: &str = "position.toml";

/// The paragraph the reader is currently at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPosition {
    pub paragraph: u32,

    #[serde(rename = "updated-at")]
    pub updated_at: DateTime<Utc>,
}

impl ReadingPosition {
    pub fn new(paragraph: u32) -> Self {
        Self {
            paragraph,
            updated_at: Utc::now(),
        }
    }

    /// Default location of the position file
    pub fn default_path() -> Result<PathBuf, PositionError> {
        let home = dirs::home_dir().ok_or(PositionError::NoHome)?;
        Ok(home.join(POSITION_DIR).join(POSITION_FILE))
    }

    /// Position file from configuration, falling back to the default location
    pub fn resolve_path(config: &PositionConfig) -> Result<PathBuf, PositionError> {
        match &config.file {
            Some(file) => Ok(PathBuf::from(file)),
            None => Self::default_path(),
        }
    }

    /// Loads the saved position; a missing file means nothing has been read yet
    pub fn load(path: &Path) -> Result<Option<Self>, PositionError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PositionError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(Some(toml::from_str(&content)?))
    }

    /// Saves the position, creating the parent directory if needed
    ///
    /// The file is replaced atomically.
    pub fn save(&self, path: &Path) -> Result<(), PositionError> {
        let io_error = |source| PositionError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = toml::to_string(self)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).map_err(io_error)?;
        std::fs::rename(&tmp, path).map_err(io_error)?;

        Ok(())
    }

    /// Position at the first paragraph of the index
    pub fn begin(index: &CatechismIndex) -> Option<Self> {
        index.first_number().map(Self::new)
    }

    /// Position at the next paragraph after this one
    ///
    /// Numbers missing from the index are skipped. Returns `None` once the
    /// last paragraph has been reached.
    pub fn advance(&self, index: &CatechismIndex) -> Option<Self> {
        index.next_number_after(self.paragraph).map(Self::new)
    }
}
