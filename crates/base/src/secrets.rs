use {
    anyhow::{Context, Result},
    std::{collections::HashMap, path::Path},
};

/// Credentials read from a `KEY=VALUE` file.
///
/// Blank lines and lines starting with `#` are skipped, whitespace around keys and values is
/// trimmed, and everything after the first `=` belongs to the value. Environment variables of the
/// same name take precedence over the file in [`Secrets::get`].
#[derive(Clone, Debug, Default)]
pub struct Secrets {
    values: HashMap<String, String>,
}

impl Secrets {
    pub fn parse(content: &str) -> Self {
        let values = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { values }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading secrets from {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    /// Like [`Secrets::load`], but a missing or unreadable file yields an empty set.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(secrets) => secrets,
            Err(error) => {
                log::warn!("{:#}, relying on environment variables only", error);
                Self::default()
            }
        }
    }

    /// Value from the file only.
    pub fn file_value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Value from the environment, falling back to the file.
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.file_value(key).map(str::to_string))
    }
}
