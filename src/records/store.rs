use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;

/// File holding the best score as a decimal integer
pub const BEST_SCORE_FILE: &str = "highscore.txt";
/// File holding the best survival time in seconds
pub const BEST_TIME_FILE: &str = "record.txt";

/// Load/save access to the process-wide records
pub trait RecordStore {
    /// Best score ever achieved, 0 if absent or unreadable
    fn load_best_score(&self) -> u32;

    fn save_best_score(&mut self, score: u32) -> Result<()>;

    /// Best survival time in seconds, 0.0 if absent or unreadable
    fn load_best_time(&self) -> f64;

    fn save_best_time(&mut self, seconds: f64) -> Result<()>;
}

/// Records kept as two small text files in a directory
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_value<T: FromStr>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No record at {:?}", path);
                return None;
            }
            Err(err) => {
                log::warn!("Failed to read record {:?}: {}", path, err);
                return None;
            }
        };

        let value = text.trim().parse().ok();
        if value.is_none() {
            log::warn!("Ignoring corrupt record {:?}: {:?}", path, text.trim());
        }
        value
    }

    fn write_value(&self, file: &str, value: String) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create record directory {:?}", self.dir))?;
        let path = self.dir.join(file);
        fs::write(&path, value).with_context(|| format!("Failed to write record {:?}", path))?;
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn load_best_score(&self) -> u32 {
        self.read_value(BEST_SCORE_FILE).unwrap_or(0)
    }

    fn save_best_score(&mut self, score: u32) -> Result<()> {
        self.write_value(BEST_SCORE_FILE, score.to_string())
    }

    fn load_best_time(&self) -> f64 {
        self.read_value::<f64>(BEST_TIME_FILE)
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
            .unwrap_or(0.0)
    }

    fn save_best_time(&mut self, seconds: f64) -> Result<()> {
        self.write_value(BEST_TIME_FILE, format!("{:.6}", seconds))
    }
}

/// Records held in memory for the lifetime of the process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRecordStore {
    pub best_score: Option<u32>,
    pub best_time: Option<f64>,
    /// Number of successful saves, both records combined
    pub saves: usize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load_best_score(&self) -> u32 {
        self.best_score.unwrap_or(0)
    }

    fn save_best_score(&mut self, score: u32) -> Result<()> {
        self.best_score = Some(score);
        self.saves += 1;
        Ok(())
    }

    fn load_best_time(&self) -> f64 {
        self.best_time.unwrap_or(0.0)
    }

    fn save_best_time(&mut self, seconds: f64) -> Result<()> {
        self.best_time = Some(seconds);
        self.saves += 1;
        Ok(())
    }
}
