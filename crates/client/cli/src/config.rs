//! CLI configuration from the environment.
use std::env;
use std::path::PathBuf;

/// Settings the CLI reads before parsing flags. Flags win over these.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub seed: Option<u64>,
    pub content_dir: Option<PathBuf>,
    pub auto: bool,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DREAD_SEED` - Fixed RNG seed (default: random)
    /// - `DREAD_CONTENT_DIR` - Directory with content overrides (default: built-in data)
    /// - `DREAD_AUTO` - Let the auto policy play (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("DREAD_SEED");
        config.content_dir = env::var("DREAD_CONTENT_DIR").ok().map(PathBuf::from);

        if let Some(auto) = read_env::<bool>("DREAD_AUTO") {
            config.auto = auto;
        } else if env::var("DREAD_AUTO").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.auto = true;
        }

        config
    }

    /// Overlays command line flags.
    pub fn with_flags(mut self, seed: Option<u64>, content_dir: Option<PathBuf>, auto: bool) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if content_dir.is_some() {
            self.content_dir = content_dir;
        }
        self.auto |= auto;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
