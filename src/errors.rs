use colored::*;
use std::fmt;
use std::path::PathBuf;

/// Broad category of a [`FieldsError`], used to pick the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidFieldId,
    Transport,
    MalformedResponse,
    FieldNotFound,
    Output,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Configuration | ErrorKind::InvalidFieldId => 2,
            ErrorKind::Transport => 3,
            ErrorKind::MalformedResponse => 4,
            ErrorKind::FieldNotFound => 5,
            ErrorKind::Output => 6,
        }
    }
}

#[derive(Debug)]
pub enum FieldsError {
    // Configuration errors
    InvalidSelection,
    CredentialsNotFound(PathBuf),
    CredentialsInvalid(String),
    CredentialsIncomplete(Vec<&'static str>),
    Prompt(String),

    // Selection errors
    InvalidFieldId(String),
    FieldNameNotFound(String),
    FieldIdNotFound(String),

    // Jira errors
    Network(String),
    AuthenticationFailed(u16),
    ApiError(u16, String),
    MalformedResponse(String),

    // Output errors
    Output(String),
}

impl FieldsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldsError::InvalidSelection
            | FieldsError::CredentialsNotFound(_)
            | FieldsError::CredentialsInvalid(_)
            | FieldsError::CredentialsIncomplete(_)
            | FieldsError::Prompt(_) => ErrorKind::Configuration,
            FieldsError::InvalidFieldId(_) => ErrorKind::InvalidFieldId,
            FieldsError::FieldNameNotFound(_) | FieldsError::FieldIdNotFound(_) => {
                ErrorKind::FieldNotFound
            }
            FieldsError::Network(_)
            | FieldsError::AuthenticationFailed(_)
            | FieldsError::ApiError(_, _) => ErrorKind::Transport,
            FieldsError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            FieldsError::Output(_) => ErrorKind::Output,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

impl fmt::Display for FieldsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration errors
            FieldsError::InvalidSelection => {
                write!(f, "{}\n", "Please specify either name or ID (not both)".red().bold())?;
                write!(f, "   {}", "Use -n <name> or -i <id>, one at a time".dimmed())
            }
            FieldsError::CredentialsNotFound(path) => {
                write!(f, "{}\n", "Credentials file does not exist".red().bold())?;
                write!(f, "   {}\n\n", path.display().to_string().dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Check the path passed to -c\n")?;
                write!(f, "   2. Or omit -c to be prompted for credentials")
            }
            FieldsError::CredentialsInvalid(msg) => {
                write!(f, "{}\n", "Could not read credentials file".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   Expected a document like:\n")?;
                write!(
                    f,
                    "   {}",
                    r#"{"username": "...", "password": "...", "site_url": "https://jira.example.com"}"#
                        .green()
                )
            }
            FieldsError::CredentialsIncomplete(missing) => {
                write!(f, "{}\n", "Credentials are incomplete".red().bold())?;
                write!(f, "   {}\n\n", format!("Missing: {}", missing.join(", ")).dimmed())?;
                write!(f, "   username, password and site_url are all required")
            }
            FieldsError::Prompt(msg) => {
                write!(f, "{}\n", "Failed to read credentials from the terminal".red().bold())?;
                write!(f, "   {}", msg.dimmed())
            }

            // Selection errors
            FieldsError::InvalidFieldId(id) => {
                write!(f, "{}\n", format!("Specified ID value '{}' is invalid", id).red().bold())?;
                write!(
                    f,
                    "   {}",
                    "Use a number (e.g. 10100) or a full ID (e.g. customfield_10100)".dimmed()
                )
            }
            FieldsError::FieldNameNotFound(name) => {
                write!(f, "{}\n", format!("Specified field '{}' not found", name).red().bold())?;
                write!(f, "   {}", "Field names are matched exactly, including case".dimmed())
            }
            FieldsError::FieldIdNotFound(id) => {
                write!(f, "{}\n", format!("Specified ID value '{}' not found", id).red().bold())?;
                write!(f, "   {}", "Run without -i to list every custom field".dimmed())
            }

            // Jira errors
            FieldsError::Network(msg) => {
                write!(f, "{}\n", "Network error".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Check your internet connection\n")?;
                write!(f, "   2. Verify the Jira base URL is reachable")
            }
            FieldsError::AuthenticationFailed(status) => {
                write!(f, "{}\n", format!("Jira authentication failed ({})", status).red().bold())?;
                write!(f, "   {}\n\n", "The username or password was rejected".dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Check your username and password (or API token)\n")?;
                write!(f, "   2. Verify you can browse projects in Jira with this account")
            }
            FieldsError::ApiError(status, msg) => {
                write!(f, "{}\n", format!("Jira API error ({})", status).red().bold())?;
                write!(f, "   {}", msg.dimmed())
            }
            FieldsError::MalformedResponse(msg) => {
                write!(f, "{}\n", "Unexpected response from Jira".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   Check that the base URL points at a Jira site")
            }

            // Output errors
            FieldsError::Output(msg) => {
                write!(f, "{}\n", "Failed to write output".red().bold())?;
                write!(f, "   {}", msg.dimmed())
            }
        }
    }
}

impl std::error::Error for FieldsError {}

impl From<std::io::Error> for FieldsError {
    fn from(err: std::io::Error) -> Self {
        FieldsError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for FieldsError {
    fn from(err: serde_json::Error) -> Self {
        FieldsError::MalformedResponse(err.to_string())
    }
}

impl From<::config::ConfigError> for FieldsError {
    fn from(err: ::config::ConfigError) -> Self {
        FieldsError::CredentialsInvalid(err.to_string())
    }
}

impl From<dialoguer::Error> for FieldsError {
    fn from(err: dialoguer::Error) -> Self {
        FieldsError::Prompt(err.to_string())
    }
}

// Status codes are checked in the client, so anything reaching here is transport.
impl From<reqwest::Error> for FieldsError {
    fn from(err: reqwest::Error) -> Self {
        FieldsError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FieldsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_share_exit_code() {
        let errors = [
            FieldsError::InvalidSelection,
            FieldsError::CredentialsNotFound(PathBuf::from("creds.json")),
            FieldsError::CredentialsInvalid("bad".to_string()),
            FieldsError::CredentialsIncomplete(vec!["password"]),
            FieldsError::Prompt("eof".to_string()),
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(FieldsError::InvalidFieldId("x".into()).kind(), ErrorKind::InvalidFieldId);
        assert_eq!(FieldsError::FieldNameNotFound("x".into()).kind(), ErrorKind::FieldNotFound);
        assert_eq!(FieldsError::FieldIdNotFound("x".into()).kind(), ErrorKind::FieldNotFound);
        assert_eq!(FieldsError::Network("x".into()).kind(), ErrorKind::Transport);
        assert_eq!(FieldsError::AuthenticationFailed(401).kind(), ErrorKind::Transport);
        assert_eq!(FieldsError::ApiError(500, "x".into()).kind(), ErrorKind::Transport);
        assert_eq!(
            FieldsError::MalformedResponse("x".into()).kind(),
            ErrorKind::MalformedResponse
        );
        assert_eq!(FieldsError::Output("x".into()).kind(), ErrorKind::Output);
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        for kind in [
            ErrorKind::Configuration,
            ErrorKind::InvalidFieldId,
            ErrorKind::Transport,
            ErrorKind::MalformedResponse,
            ErrorKind::FieldNotFound,
            ErrorKind::Output,
        ] {
            assert_ne!(kind.exit_code(), 0);
        }
    }

    #[test]
    fn test_display_names_the_missing_field() {
        let rendered = FieldsError::FieldNameNotFound("Nonexistent".to_string()).to_string();
        assert!(rendered.contains("Specified field 'Nonexistent' not found"));

        let rendered = FieldsError::FieldIdNotFound("customfield_9".to_string()).to_string();
        assert!(rendered.contains("customfield_9"));
    }

    #[test]
    fn test_json_error_is_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(FieldsError::from(err).kind(), ErrorKind::MalformedResponse);
    }
}
