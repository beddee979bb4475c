use std::path::PathBuf;

pub const SAVE_FILE_VAR: &str = "RUN_WITH_MIND_SAVE_FILE";
pub const SEED_VAR: &str = "RUN_WITH_MIND_SEED";
pub const LOG_DIR_VAR: &str = "RUN_WITH_MIND_LOG_DIR";

const DEFAULT_SAVE_FILE: &str = "savegame.txt";
const DEFAULT_LOG_SUBDIR: &str = "run-with-mind";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub save_path: PathBuf,
    /// Fixed seed for level generation; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let save_path = non_empty(SAVE_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE));
        let seed = non_empty(SEED_VAR).and_then(|v| v.trim().parse::<u64>().ok());
        let log_dir = non_empty(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_SUBDIR));

        Self {
            save_path,
            seed,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.save_path, PathBuf::from("savegame.txt"));
        assert_eq!(cfg.seed, None);
        assert!(cfg.log_dir.ends_with("run-with-mind"));
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            (SAVE_FILE_VAR, "/tmp/slot1.txt"),
            (SEED_VAR, " 1234 "),
            (LOG_DIR_VAR, "/var/log/rwm"),
        ]);
        assert_eq!(cfg.save_path, PathBuf::from("/tmp/slot1.txt"));
        assert_eq!(cfg.seed, Some(1234));
        assert_eq!(cfg.log_dir, PathBuf::from("/var/log/rwm"));
    }

    #[test]
    fn bad_seed_and_blank_values_fall_back() {
        let cfg = config(&[(SEED_VAR, "-3"), (SAVE_FILE_VAR, "  ")]);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.save_path, PathBuf::from("savegame.txt"));
    }
}
