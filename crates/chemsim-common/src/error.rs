use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChemsimError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Compound not found: {0}")]
    CompoundNotFound(String),

    #[error("Compound CID {0} has no SMILES")]
    MissingSmiles(u64),

    #[error("Unexpected response from {service}: {message}")]
    BadResponse { service: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error("Table error: {0}")]
    Table(String),

    #[error("Plot error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, ChemsimError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/chemsim.toml")?)
    }

    #[test]
    fn io_errors_convert() {
        assert!(matches!(read_missing(), Err(ChemsimError::Io(_))));
    }

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(ChemsimError::MissingSmiles(2244).to_string(), "Compound CID 2244 has no SMILES");
        let err = ChemsimError::BadResponse { service: "PubChem".into(), message: "empty body".into() };
        assert_eq!(err.to_string(), "Unexpected response from PubChem: empty body");
    }
}
