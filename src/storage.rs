use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::Result;

/// Key the best score is stored under.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Where the best score lives between runs.
pub trait HighScoreStore {
    /// The stored score, or 0 when nothing usable is stored.
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Key-value store backed by a JSON object on disk. Other keys in the file
/// are left as they are.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// Accepts a number or a numeric string; anything else reads as absent.
fn score_from(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        match self.read_map() {
            Ok(map) => map.get(HIGH_SCORE_KEY).and_then(score_from).unwrap_or(0),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable save file, high score starts at 0"
                );
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<()> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(HIGH_SCORE_KEY.to_owned(), Value::from(score));
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        Ok(())
    }
}

/// Volatile store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub score: Option<u32>,
    pub writes: usize,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 { self.score.unwrap_or(0) }

    fn save(&mut self, score: u32) -> Result<()> {
        self.score = Some(score);
        self.writes += 1;
        Ok(())
    }
}
