// cocoadiag platform paths
//
// Linux:   $XDG_CONFIG_HOME/cocoadiag, $XDG_DATA_HOME/cocoadiag
// macOS:   ~/Library/Application Support/cocoadiag (config and data)
// Windows: %APPDATA%/cocoadiag (config and data)
//
// COCOADIAG_DATA_DIR overrides the data directory on every platform.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "cocoadiag";

/// Environment variable that overrides [`get_data_dir`].
pub const DATA_DIR_ENV: &str = "COCOADIAG_DATA_DIR";

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join(APP_DIR),
            Err(_) => home_dir().join(".config").join(APP_DIR),
        }
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join(APP_DIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".config").join(APP_DIR)
    }
}

/// Returns the directory holding the durable storage database.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    #[cfg(target_os = "linux")]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join(APP_DIR),
            Err(_) => home_dir().join(".local").join("share").join(APP_DIR),
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}
