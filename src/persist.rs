//! Character save files.
//!
//! One pretty-printed JSON document per character. Saves carry a format
//! version and quick-access metadata so the shell can list a saves
//! directory without deserializing every full character. Loading
//! revalidates the rule invariants; a bad file fails its own load and
//! nothing else.

use crate::character::{Character, CreationStage};
use crate::rules::AgeBracket;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed save data: {0}")]
    Malformed(String),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current save file version.
const SAVE_VERSION: u32 = 1;

/// A saved character that can be reloaded across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCharacter {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the save was created (seconds since the Unix epoch).
    pub saved_at: String,

    /// The complete character data.
    pub character: Character,

    /// Quick-access metadata about the character.
    pub metadata: CharacterMetadata,
}

/// Metadata about a saved character for quick display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterMetadata {
    pub name: String,
    pub age: u8,
    pub bracket: String,
    pub level: u8,
    pub dollars: u16,
    pub location: String,
}

impl SavedCharacter {
    /// Wrap a character for saving.
    pub fn new(character: Character) -> Self {
        let metadata = CharacterMetadata {
            name: character.name.clone(),
            age: character.age,
            bracket: character
                .bracket
                .map(|b| b.label().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            level: character.level,
            dollars: character.dollars,
            location: character.location.clone(),
        };

        Self {
            version: SAVE_VERSION,
            saved_at: timestamp_now(),
            character,
            metadata,
        }
    }

    /// Save to a JSON file. Overwrites any existing file at `path`.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        log::info!(
            "saved character {:?} to {}",
            self.metadata.name,
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load from a JSON file.
    ///
    /// The character is revalidated against the game rules and comes back
    /// in the `Finalized` stage.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(&path)?;
        let mut saved: Self = serde_json::from_str(&content)?;

        if saved.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }

        validate_character(&saved.character)?;
        saved.character.stage = CreationStage::Finalized;
        log::info!(
            "loaded character {:?} from {}",
            saved.metadata.name,
            path.as_ref().display()
        );
        Ok(saved)
    }

    /// Get metadata without loading the full character.
    pub fn peek_metadata(path: impl AsRef<Path>) -> Result<CharacterMetadata, PersistError> {
        let content = fs::read_to_string(path)?;

        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: CharacterMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;

        if partial.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.metadata)
    }
}

/// Check the rule invariants a save file must satisfy.
fn validate_character(character: &Character) -> Result<(), PersistError> {
    if !character.attributes.in_valid_range() {
        return Err(PersistError::Malformed(format!(
            "attribute scores out of range: {:?}",
            character.attributes
        )));
    }

    let bracket = character
        .bracket
        .ok_or_else(|| PersistError::Malformed("missing age bracket".to_string()))?;

    match AgeBracket::resolve(character.age) {
        Ok(resolved) if resolved == bracket => {}
        Ok(resolved) => {
            return Err(PersistError::Malformed(format!(
                "age {} belongs to the {} bracket, file says {}",
                character.age, resolved, bracket
            )));
        }
        Err(err) => return Err(PersistError::Malformed(err.to_string())),
    }

    if character.skills.values().any(|&level| level == 0) {
        return Err(PersistError::Malformed(
            "skill map contains untrained entries".to_string(),
        ));
    }

    if character.trained_skill_count() > bracket.skill_cap() {
        return Err(PersistError::Malformed(format!(
            "{} skills trained, {} bracket allows {}",
            character.trained_skill_count(),
            bracket,
            bracket.skill_cap()
        )));
    }

    let budget = bracket.skill_points();
    let spent = character.spent_skill_points();
    if spent + character.skill_points != budget {
        return Err(PersistError::Malformed(format!(
            "skill points do not balance: {} spent + {} remaining != budget {}",
            spent, character.skill_points, budget
        )));
    }

    Ok(())
}

/// Information about a character save file.
#[derive(Debug, Clone)]
pub struct SaveInfo {
    /// Path to the save file.
    pub path: PathBuf,

    /// Character metadata.
    pub metadata: CharacterMetadata,
}

/// List all character save files in a directory, sorted by name.
///
/// Files that fail to parse are skipped, not fatal.
pub fn list_character_saves(dir: impl AsRef<Path>) -> Result<Vec<SaveInfo>, PersistError> {
    let dir = dir.as_ref();
    let mut saves = Vec::new();

    if !dir.exists() {
        fs::create_dir_all(dir)?;
        return Ok(saves);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            match SavedCharacter::peek_metadata(&path) {
                Ok(metadata) => saves.push(SaveInfo { path, metadata }),
                Err(err) => {
                    log::warn!("skipping unreadable save {}: {err}", path.display());
                }
            }
        }
    }

    saves.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
    Ok(saves)
}

/// Generate a save path for a character name.
pub fn character_save_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    let sanitized = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    dir.as_ref().join(format!("{sanitized}.json"))
}

/// Delete a save file.
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), PersistError> {
    fs::remove_file(&path)?;
    log::info!("deleted save file {}", path.as_ref().display());
    Ok(())
}

/// Current timestamp as seconds since the Unix epoch.
fn timestamp_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", now.as_secs())
}
