//! Storage locations inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which Zellij points at the cwd of
//! the last focused terminal (usually the user's home directory).

use std::path::PathBuf;

/// File name of the trend store inside the data directory.
pub const TREND_STORE_FILE: &str = "trending.json";

/// File name of the OTLP span export inside the data directory.
pub const TRACE_FILE: &str = "popcornpilot-otlp.json";

/// Returns `/host/.local/share/zellij/popcornpilot`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("popcornpilot")
}

/// Default location of the JSON trend store.
#[must_use]
pub fn trend_store_path() -> PathBuf {
    get_data_dir().join(TREND_STORE_FILE)
}

/// Default location of the span export file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE)
}

/// Maps `~` and `~/...` to the sandbox's `/host` mount; other paths pass through.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_in_the_data_dir() {
        assert_eq!(
            trend_store_path(),
            PathBuf::from("/host/.local/share/zellij/popcornpilot/trending.json")
        );
        assert!(trace_file_path().starts_with(get_data_dir()));
    }

    #[test]
    fn tilde_expands_to_host_mount() {
        assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
    }
}
