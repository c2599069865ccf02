use colored::*;
use ::config::{Config, Environment, File, FileFormat};
use dialoguer::{Input, Password};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{FieldsError, Result};

/// Environment variables with this prefix override credentials file values,
/// e.g. `JIRA_FIELDS_PASSWORD`.
pub const ENV_PREFIX: &str = "JIRA_FIELDS";

/// Login and site details used for the single metadata request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub site_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    site_url: String,
}

impl Credentials {
    /// Trims the username and site URL and rejects the set if any value is
    /// empty. The password is kept exactly as given.
    pub fn new(username: &str, password: &str, site_url: &str) -> Result<Self> {
        let credentials = Self {
            username: username.trim().to_string(),
            password: password.to_string(),
            site_url: site_url.trim().to_string(),
        };

        let missing: Vec<&'static str> = [
            ("username", &credentials.username),
            ("password", &credentials.password),
            ("site_url", &credentials.site_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect();

        if !missing.is_empty() {
            return Err(FieldsError::CredentialsIncomplete(missing));
        }

        Ok(credentials)
    }

    /// Loads `username`, `password` and `site_url` from a JSON, YAML or TOML
    /// file, with `JIRA_FIELDS_*` environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::load(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load(path: &Path, env: Environment) -> Result<Self> {
        if !path.exists() {
            return Err(FieldsError::CredentialsNotFound(path.to_path_buf()));
        }

        let mut source = File::from(path.to_path_buf()).required(true);
        if !has_known_extension(path) {
            source = source.format(FileFormat::Json);
        }

        let file: CredentialsFile = Config::builder()
            .add_source(source)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        info!(path = %path.display(), "Loaded credentials file");

        Self::new(&file.username, &file.password, &file.site_url)
    }

    /// Asks for username, password (hidden) and site URL on the terminal.
    pub fn prompt() -> Result<Self> {
        println!("{}", "Jira credentials".cyan().bold());

        let username: String = Input::new()
            .with_prompt("Enter JIRA username")
            .interact_text()?;
        let password = Password::new()
            .with_prompt("Enter JIRA password")
            .interact()?;
        let site_url: String = Input::new()
            .with_prompt("Enter JIRA base URL")
            .interact_text()?;

        debug!("Read credentials interactively");

        Self::new(&username, &password, &site_url)
    }

    /// Site URL with one trailing `/` removed.
    pub fn base_url(&self) -> &str {
        self.site_url.strip_suffix('/').unwrap_or(&self.site_url)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .field("site_url", &self.site_url)
            .finish()
    }
}

fn has_known_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml" | "toml")
    )
}
