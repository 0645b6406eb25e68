use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::ChemsimError;

/// An HTTP client that only allows requests to approved hosts.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default PubChem allowlist and a 30 s timeout.
    pub fn new() -> Result<Self, ChemsimError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a new SandboxClient with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ChemsimError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "pubchem.ncbi.nlm.nih.gov", // PUG REST
            "localhost",
            "127.0.0.1",
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("chemsim/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChemsimError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn check(&self, url: &str) -> Result<(), ChemsimError> {
        if !self.is_allowed(url) {
            return Err(ChemsimError::SecurityError(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }
        Ok(())
    }

    /// Exposes the inner `reqwest::Client` builder for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, ChemsimError> {
        self.check(url)?;
        Ok(self.client.get(url))
    }

    /// Exposes the inner `reqwest::Client` builder for POST requests.
    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, ChemsimError> {
        self.check(url)?;
        Ok(self.client.post(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlist() {
        let client = SandboxClient::new().unwrap();
        assert!(client.is_allowed("https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/cid/2244/JSON"));
        assert!(client.is_allowed("http://127.0.0.1:8080/rest/pug"));
        assert!(!client.is_allowed("https://example.com/"));
        assert!(!client.is_allowed("not a url"));
    }

    #[test]
    fn test_blocked_request_errors() {
        let client = SandboxClient::new().unwrap();
        let err = client.get("https://evil.example.org/").unwrap_err();
        assert!(matches!(err, ChemsimError::SecurityError(_)));
    }

    #[test]
    fn test_allow_domain() {
        let mut client = SandboxClient::new().unwrap();
        client.allow_domain("mirror.example.org");
        assert!(client.is_allowed("https://mirror.example.org/rest/pug"));
        assert!(client.post("https://api.mirror.example.org/x").is_ok());
    }
}
