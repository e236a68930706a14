//! Waitlist signup clients.
//!
//! Forms only see [`WaitlistClient`]; the page decides at startup whether
//! signups go to a real endpoint or to the simulated one.

use serde::Serialize;

use crate::error::SubmitError;

/// A syntactically plausible, trimmed email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, SubmitError> {
        let trimmed = raw.trim();
        let (local, domain) = trimmed.split_once('@').ok_or(SubmitError::InvalidEmail)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(SubmitError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize)]
pub struct JoinRequest<'a> {
    pub email: &'a EmailAddress,
}

#[allow(async_fn_in_trait)]
pub trait WaitlistClient {
    async fn join(&self, email: &EmailAddress) -> Result<(), SubmitError>;
}

#[cfg(target_arch = "wasm32")]
pub use self::browser::{HttpClient, SimulatedClient, WaitlistBackend};

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_net::http::Request;
    use gloo_timers::future::TimeoutFuture;

    use super::{EmailAddress, JoinRequest, WaitlistClient};
    use crate::config::WaitlistConfig;
    use crate::error::SubmitError;

    /// Stand-in for a real signup call: waits, then always succeeds.
    #[derive(Debug, Clone)]
    pub struct SimulatedClient {
        delay_ms: u32,
    }

    impl SimulatedClient {
        pub fn new(delay_ms: u32) -> Self {
            Self { delay_ms }
        }
    }

    impl WaitlistClient for SimulatedClient {
        async fn join(&self, email: &EmailAddress) -> Result<(), SubmitError> {
            log::debug!("Simulating waitlist signup for {}", email.as_str());
            TimeoutFuture::new(self.delay_ms).await;
            Ok(())
        }
    }

    /// POSTs `{"email": ...}` as JSON to the waitlist endpoint.
    #[derive(Debug, Clone)]
    pub struct HttpClient {
        endpoint: String,
    }

    impl HttpClient {
        pub fn new(endpoint: impl Into<String>) -> Self {
            Self {
                endpoint: endpoint.into(),
            }
        }
    }

    impl WaitlistClient for HttpClient {
        async fn join(&self, email: &EmailAddress) -> Result<(), SubmitError> {
            let request = Request::post(&self.endpoint)
                .json(&JoinRequest { email })
                .map_err(|e| SubmitError::Network(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| SubmitError::Network(e.to_string()))?;
            if response.ok() {
                Ok(())
            } else {
                Err(SubmitError::Rejected {
                    status: response.status(),
                })
            }
        }
    }

    /// The client the page actually uses, picked from config.
    #[derive(Debug, Clone)]
    pub enum WaitlistBackend {
        Simulated(SimulatedClient),
        Http(HttpClient),
    }

    impl WaitlistBackend {
        pub fn from_config(config: &WaitlistConfig) -> Self {
            match &config.endpoint {
                Some(endpoint) => {
                    log::info!("Waitlist signups go to {endpoint}");
                    Self::Http(HttpClient::new(endpoint.clone()))
                }
                None => Self::Simulated(SimulatedClient::new(config.simulated_delay_ms)),
            }
        }
    }

    impl WaitlistClient for WaitlistBackend {
        async fn join(&self, email: &EmailAddress) -> Result<(), SubmitError> {
            match self {
                Self::Simulated(client) => client.join(email).await,
                Self::Http(client) => client.join(email).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_and_trims_email() {
        let email = EmailAddress::parse("  ana@finnvest.io ").unwrap();
        assert_eq!(email.as_str(), "ana@finnvest.io");
    }

    #[test]
    fn rejects_malformed_email() {
        for raw in ["", "ana", "@finnvest.io", "ana@", "a@b@c", "an a@b.io"] {
            assert!(
                matches!(EmailAddress::parse(raw), Err(SubmitError::InvalidEmail)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn join_request_serializes_email_field() {
        let email = EmailAddress::parse("ana@finnvest.io").unwrap();
        let body = serde_json::to_string(&JoinRequest { email: &email }).unwrap();
        assert_eq!(body, r#"{"email":"ana@finnvest.io"}"#);
    }
}
