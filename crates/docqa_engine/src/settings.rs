use url::Url;

use crate::{FailureKind, ServiceError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

pub const HISTORY_PATH: &str = "chat_history/";
pub const PROCESS_PATH: &str = "process_pdfs";
pub const ASK_PATH: &str = "ask_question/";

/// Where the question-answering service lives. No request timeout is set:
/// a hung call stays pending until the service answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub base_url: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServiceSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolves an endpoint path against the base URL, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be a base url", self.base_url),
            ));
        }
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}
