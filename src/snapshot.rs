//! Optional end-of-day world dumps for inspecting a session after the fact.
//! Nothing reads these back; they are observability output only.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::world::{World, WorldSnapshot};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SnapshotFile {
    recorded_at: String,
    #[serde(flatten)]
    world: WorldSnapshot,
}

pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write one `day_NNN.json` dump under `<output_dir>/<scenario>/`.
    pub fn write(
        &self,
        world: &World,
        scenario_name: &str,
        day: u32,
    ) -> Result<PathBuf, SnapshotError> {
        let dir = self.output_dir.join(scenario_name);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("day_{day:03}.json"));
        let file = SnapshotFile {
            recorded_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            world: world.snapshot(scenario_name, day),
        };
        fs::write(&path, serde_json::to_string_pretty(&file)?)?;
        Ok(path)
    }
}
