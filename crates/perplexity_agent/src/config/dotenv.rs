//! `.env` loading

use std::path::Path;

use tracing::debug;

use crate::error::{AgentError, Result};

/// Load `.env` from the working directory into the process environment.
///
/// A missing file is not an error, a malformed one is. Variables already set
/// are left alone.
pub fn load_dotenv() -> Result<bool> {
    load_dotenv_from(Path::new(".env"))
}

/// Load a specific dotenv file. Returns whether a file was loaded.
pub fn load_dotenv_from(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!("loaded environment from {}", path.display());
            Ok(true)
        }
        Err(dotenvy::Error::Io(_)) => Ok(false),
        Err(e) => Err(AgentError::Configuration(format!(
            "Malformed env file {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_dotenv_from(&dir.path().join(".env")).unwrap();
        assert!(!loaded);
    }

    #[test]
    fn test_loads_variables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PERPLEXITY_AGENT_DOTENV_TEST=loaded").unwrap();

        let loaded = load_dotenv_from(file.path()).unwrap();
        assert!(loaded);
        assert_eq!(
            std::env::var("PERPLEXITY_AGENT_DOTENV_TEST").unwrap(),
            "loaded"
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NOT VALID LINE 'unterminated").unwrap();

        let err = load_dotenv_from(file.path()).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }
}
