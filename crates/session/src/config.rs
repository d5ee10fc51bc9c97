use std::io::Read;
use std::path::Path;

/// Session configuration. Every knob has a serde default so a partial
/// (or empty) TOML table yields a playable game.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct GameConfig {
    /// Accumulate merge points into a session score and feed the
    /// best-score store. The "win-threshold only" variant turns this
    /// off and plays for the target tile alone.
    #[serde(default = "defaults::track_score")]
    pub track_score: bool,

    /// Face value (e.g. 128 or 2048) that flips the game to `Won`.
    /// `None` plays endless with no win condition.
    #[serde(default)]
    pub win_threshold: Option<u32>,

    /// Compare the threshold with `==` instead of `>=`. Only matters
    /// for views that want the banner exactly once at the target.
    #[serde(default)]
    pub win_exact: bool,

    /// Undo snapshots retained; 0 disables undo entirely.
    #[serde(default = "defaults::undo_depth")]
    pub undo_depth: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            track_score: defaults::track_score(),
            win_threshold: None,
            win_exact: false,
            undo_depth: defaults::undo_depth(),
        }
    }
}

impl GameConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn track_score() -> bool {
        true
    }
    pub fn undo_depth() -> usize {
        9
    }
}
