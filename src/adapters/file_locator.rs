// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locating and reading configuration files on a search path.

use crate::domain::{ConfigError, Result};
use directories::{BaseDirs, ProjectDirs};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File name, without extension, searched for when no name is configured.
pub const DEFAULT_CONFIG_NAME: &str = "config";

/// Finds the configuration file to load.
///
/// Either an explicit file is set, or the locator probes each search path, in the
/// order the paths were added, for `<name>.<ext>` with every supported extension.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::ConfigFileLocator;
///
/// let mut locator = ConfigFileLocator::new();
/// locator.set_config_name("app");
/// locator.add_config_path("/etc/app");
/// locator.add_config_path("/etc/app");
/// assert_eq!(locator.config_paths().len(), 1);
/// assert_eq!(locator.config_name(), "app");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigFileLocator {
    config_name: String,
    config_file: Option<PathBuf>,
    config_type: Option<String>,
    config_paths: Vec<PathBuf>,
}

impl ConfigFileLocator {
    /// Creates a locator with the default name and no search paths.
    pub fn new() -> Self {
        Self {
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            config_file: None,
            config_type: None,
            config_paths: Vec::new(),
        }
    }

    /// Uses `path` directly instead of searching. Empty paths are ignored.
    pub fn set_config_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() {
            self.config_file = Some(path.to_path_buf());
        }
    }

    /// Sets the file name, without extension, to search for. Empty names are ignored.
    pub fn set_config_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.config_name = name.to_string();
        }
    }

    /// Forces the file format instead of inferring it from the extension.
    /// Empty types are ignored.
    pub fn set_config_type(&mut self, config_type: &str) {
        if !config_type.is_empty() {
            self.config_type = Some(config_type.to_lowercase());
        }
    }

    /// Appends a directory to the search path.
    ///
    /// The path is made absolute (a leading `~` or `$HOME` expands to the home
    /// directory). Duplicates and empty paths are ignored. The directory does not
    /// need to exist yet.
    pub fn add_config_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return;
        }
        let absolute = abs_pathify(path);
        tracing::info!(path = %absolute.display(), "Adding to config search paths");
        if !self.config_paths.contains(&absolute) {
            self.config_paths.push(absolute);
        }
    }

    /// Appends the OS-appropriate configuration directory for an application.
    ///
    /// This method uses the `directories` crate to determine the appropriate
    /// configuration directory for the current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn add_default_location(&mut self, app_name: &str, qualifier: &str) -> Result<()> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "config-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;
        self.add_config_path(proj_dirs.config_dir());
        Ok(())
    }

    /// The file name searched for.
    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    /// The explicitly configured file, if any.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// The search paths, in probing order.
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// The format of `path`: the explicit type if one is set, else its extension.
    ///
    /// Returns an empty string when neither is available.
    pub fn config_type_for(&self, path: &Path) -> String {
        if let Some(config_type) = &self.config_type {
            return config_type.clone();
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// Returns the explicit file if one is set, else searches for one.
    pub fn resolve(&self, extensions: &[&str]) -> Result<PathBuf> {
        match &self.config_file {
            Some(file) => Ok(file.clone()),
            None => self.locate(extensions),
        }
    }

    /// Searches every path for `<name>.<ext>` and returns the first that exists.
    pub fn locate(&self, extensions: &[&str]) -> Result<PathBuf> {
        tracing::info!(paths = ?self.config_paths, "Searching for config");
        for dir in &self.config_paths {
            tracing::debug!(dir = %dir.display(), "Searching for config in");
            for ext in extensions {
                let candidate = dir.join(format!("{}.{}", self.config_name, ext));
                tracing::debug!(candidate = %candidate.display(), "Checking for");
                if candidate.is_file() {
                    tracing::debug!(found = %candidate.display(), "Found config file");
                    return Ok(candidate);
                }
            }
        }
        Err(ConfigError::ConfigFileNotFound {
            name: self.config_name.clone(),
            locations: self
                .config_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        })
    }
}

impl Default for ConfigFileLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Expands a leading `~` or `$HOME` and makes `path` absolute.
pub fn abs_pathify(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    let expanded = match (&home, raw.as_ref()) {
        (Some(home), "~") | (Some(home), "$HOME") => home.clone(),
        (Some(home), raw) => match raw
            .strip_prefix("~/")
            .or_else(|| raw.strip_prefix("$HOME/"))
        {
            Some(rest) => home.join(rest),
            None => path.to_path_buf(),
        },
        (None, _) => path.to_path_buf(),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };
    absolute.components().collect()
}

/// Reads a configuration file, refusing files over the size limit.
pub fn read_config_file(path: &Path) -> Result<String> {
    let display_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string();

    // Check file size before reading to prevent DoS via large files
    let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
        source_name: display_name.clone(),
        message: "Failed to read file metadata".to_string(),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: display_name,
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            ),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: display_name,
        message: "Failed to read configuration file".to_string(),
        source: Some(Box::new(e)),
    })
}
