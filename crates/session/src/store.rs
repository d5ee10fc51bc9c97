use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::warn;

/// File-backed best-score scalar, the only state that outlives a game.
///
/// The file holds one decimal integer. A missing file or unparseable
/// content degrades to 0; it is rewritten only when a new score beats
/// the stored best. Write failures are logged and never surfaced to
/// the game loop.
pub struct BestScoreStore {
    path: PathBuf,
    best: u64,
}

impl BestScoreStore {
    /// Open the store at `path`, reading the current best (0 when the
    /// file is absent or malformed).
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let best = read_best(&path);
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record `score` if it beats the stored best. Returns true when
    /// the best improved.
    pub fn observe(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(err) = self.persist() {
            warn!("best score {} not persisted: {err:#}", self.best);
        }
        true
    }

    fn persist(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }
        fs::write(&self.path, self.best.to_string())
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

fn read_best(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}
