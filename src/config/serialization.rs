//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML document
    pub fn to_toml(&self) -> String {
        // Unset algorithm is written commented out so the file still parses
        let algorithm = match self.algorithm {
            Some(alg) => format!("algorithm = \"{}\"", alg.id()),
            None => "# algorithm = \"quick\"".to_string(),
        };

        format!(
            r#"# sortscope configuration
#
# Environment variables override these values:
#   SORTSCOPE_ALGORITHM, SORTSCOPE_SAMPLE_SIZE, SORTSCOPE_BASE_DURATION_MS,
#   SORTSCOPE_NO_TUI=1 (headless), RUST_LOG (log filter)

# Algorithm selected on startup (see `sortscope list`)
{algorithm}

# Sample array (values are always drawn from 5..=100)
[sample]
size = {size}
min_size = {min_size}
max_size = {max_size}

# Animation pacing: each frame waits base_duration_ms / size
[animation]
base_duration_ms = {base_duration_ms}

# Bogo sort enumerates up to N! candidates; larger arrays are rejected (max 10)
[limits]
bogo_max_len = {bogo_max_len}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            algorithm = algorithm,
            size = self.sample.size,
            min_size = self.sample.min_size,
            max_size = self.sample.max_size,
            base_duration_ms = self.animation.base_duration_ms,
            bogo_max_len = self.limits.bogo_max_len,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string().replace('\\', "/"),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
