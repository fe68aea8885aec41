//! Client layer: orchestrates validation, transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::domain::{
    Balance, Credentials, DeliveryResult, DeliveryStatus, MaxSplit, OutgoingMessage,
    ValidationError,
};
use crate::transport::{GatewayReply, ProtocolError};

/// Advanced API endpoint; serves both sends and `action=balance` queries.
pub const DEFAULT_ENDPOINT: &str = "https://api.smsbroadcast.com.au/api-adv.php";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type a transport may return; surfaced as [`SmsBroadcastError::Transport`].
pub type TransportFailure = Box<dyn StdError + Send + Sync>;

/// HTTP collaborator: POST an encoded form body and return the raw response text.
///
/// Implementations own timeouts, retries and TLS. A non-2xx HTTP status should be
/// reported as an error rather than returned as a body, since the client only
/// understands the gateway's text protocol.
pub trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<String, TransportFailure>>;
}

#[derive(Debug, Clone)]
/// [`HttpTransport`] backed by a `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<String, TransportFailure>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body)
                .send()
                .await?
                .error_for_status()?;
            Ok(response.text().await?)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Whether the split count is forwarded to the gateway as `maxsplit`.
///
/// The count is validated in both modes.
pub enum SplitMode {
    #[default]
    Forward,
    /// For gateway API variants that do not understand `maxsplit`.
    Omit,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsBroadcastClient`].
///
/// Per-recipient `BAD` results are not errors; they are returned as ordinary
/// [`DeliveryResult`] entries.
pub enum SmsBroadcastError {
    /// A credential is empty at request time.
    #[error("configuration error: {field} must not be empty")]
    Configuration { field: &'static str },

    /// The draft failed a pre-send check; nothing was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, non-2xx status, etc).
    #[error("transport error: {0}")]
    Transport(#[source] TransportFailure),

    /// The gateway answered with `ERROR:<reason>`.
    #[error("gateway error: {reason}")]
    Gateway { reason: String },

    /// Response body did not match the gateway's text protocol.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

#[derive(Clone)]
/// Builder for [`SmsBroadcastClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent, split
/// forwarding, or to inject your own [`HttpTransport`].
pub struct SmsBroadcastClientBuilder {
    credentials: Credentials,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    split_mode: SplitMode,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SmsBroadcastClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            split_mode: SplitMode::default(),
            transport: None,
        }
    }

    /// Override the gateway endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is injected.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is injected.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn split_mode(mut self, split_mode: SplitMode) -> Self {
        self.split_mode = split_mode;
        self
    }

    /// Use a custom HTTP collaborator instead of the built-in `reqwest` one.
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build a [`SmsBroadcastClient`].
    pub fn build(self) -> Result<SmsBroadcastClient, SmsBroadcastError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }

                let client = builder
                    .build()
                    .map_err(|err| SmsBroadcastError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport::new(client)) as Arc<dyn HttpTransport>
            }
        };

        Ok(SmsBroadcastClient {
            credentials: self.credentials,
            endpoint: self.endpoint,
            split_mode: self.split_mode,
            draft: OutgoingMessage::default(),
            http,
        })
    }
}

#[derive(Clone)]
/// High-level SMS Broadcast client.
///
/// Holds credentials and one outgoing draft. Edit the draft with
/// [`add_recipient`](Self::add_recipient) and friends, then call [`send`](Self::send);
/// or build an [`OutgoingMessage`] yourself and pass it to
/// [`send_message`](Self::send_message).
///
/// Each call performs at most one HTTP exchange. The client never retries; the
/// transport owns timeouts and retry policy.
pub struct SmsBroadcastClient {
    credentials: Credentials,
    endpoint: String,
    split_mode: SplitMode,
    draft: OutgoingMessage,
    http: Arc<dyn HttpTransport>,
}

impl SmsBroadcastClient {
    /// Create a client using the default endpoint.
    ///
    /// Credentials are checked when a request is made, not here.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            split_mode: SplitMode::default(),
            draft: OutgoingMessage::default(),
            http: Arc::new(ReqwestTransport::new(reqwest::Client::new())),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsBroadcastClientBuilder {
        SmsBroadcastClientBuilder::new(credentials)
    }

    /// Replace the stored credentials.
    pub fn set_authentication(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials = Credentials::new(username, password);
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Append a recipient to the draft. No format validation is performed.
    pub fn add_recipient(&mut self, number: impl Into<String>) {
        self.draft.add_recipient(number);
    }

    pub fn set_sender(&mut self, sender: impl Into<String>) {
        self.draft.set_sender(sender);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.draft.set_message(message);
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.draft.set_reference(Some(reference.into()));
    }

    pub fn set_max_split(&mut self, max_split: MaxSplit) {
        self.draft.set_max_split(Some(max_split));
    }

    pub fn draft(&self) -> &OutgoingMessage {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut OutgoingMessage {
        &mut self.draft
    }

    /// Send the client's draft.
    ///
    /// The draft is consumed once it passes validation, so a rejected draft stays
    /// in place for the caller to fix, while a transmitted one is never resent.
    ///
    /// Errors:
    /// - [`SmsBroadcastError::Configuration`] for empty credentials,
    /// - [`SmsBroadcastError::Validation`] when the draft fails a pre-send check,
    /// - [`SmsBroadcastError::Transport`] for HTTP failures,
    /// - [`SmsBroadcastError::Gateway`] when the gateway answers `ERROR:`,
    /// - [`SmsBroadcastError::Protocol`] for unparseable responses.
    pub async fn send(&mut self) -> Result<Vec<DeliveryResult>, SmsBroadcastError> {
        let prepared = self.prepare_send(&self.draft)?;
        self.draft = OutgoingMessage::default();
        self.dispatch_send(prepared).await
    }

    /// Send an independent draft. Same contract as [`send`](Self::send).
    pub async fn send_message(
        &self,
        message: OutgoingMessage,
    ) -> Result<Vec<DeliveryResult>, SmsBroadcastError> {
        let prepared = self.prepare_send(&message)?;
        self.dispatch_send(prepared).await
    }

    /// Query the remaining SMS credits on the account.
    pub async fn check_balance(&self) -> Result<Balance, SmsBroadcastError> {
        let mut params = self.credential_params()?;
        params.extend(crate::transport::encode_balance_form());

        debug!(endpoint = %self.endpoint, "querying SMS Broadcast balance");
        let body = self.post(params).await?;

        match crate::transport::decode_balance_response(&body)? {
            GatewayReply::Accepted(balance) => {
                debug!(credits = balance.credits(), "received balance");
                Ok(balance)
            }
            GatewayReply::Rejected { reason } => Err(rejected(reason)),
        }
    }

    fn credential_params(&self) -> Result<Vec<(String, String)>, SmsBroadcastError> {
        if let Some(field) = self.credentials.missing_field() {
            return Err(SmsBroadcastError::Configuration { field });
        }
        Ok(vec![
            (
                Credentials::USERNAME_FIELD.to_owned(),
                self.credentials.username().to_owned(),
            ),
            (
                Credentials::PASSWORD_FIELD.to_owned(),
                self.credentials.password().to_owned(),
            ),
        ])
    }

    fn prepare_send(&self, message: &OutgoingMessage) -> Result<PreparedSend, SmsBroadcastError> {
        let mut params = self.credential_params()?;
        let max_split = message.validate()?;
        let forwarded = match self.split_mode {
            SplitMode::Forward => Some(max_split),
            SplitMode::Omit => None,
        };
        params.extend(crate::transport::encode_send_sms_form(message, forwarded));
        Ok(PreparedSend {
            params,
            recipients: message.unique_recipients().len(),
            max_split,
        })
    }

    async fn dispatch_send(
        &self,
        prepared: PreparedSend,
    ) -> Result<Vec<DeliveryResult>, SmsBroadcastError> {
        debug!(
            endpoint = %self.endpoint,
            recipients = prepared.recipients,
            max_split = prepared.max_split.value(),
            split_mode = ?self.split_mode,
            "sending SMS"
        );
        let body = self.post(prepared.params).await?;

        match crate::transport::decode_send_sms_response(&body)? {
            GatewayReply::Accepted(results) => {
                for result in &results {
                    if let DeliveryStatus::Unknown(status) = &result.status {
                        warn!(%status, recipient = %result.recipient, "unrecognized delivery status");
                    }
                }
                let failed = results.iter().filter(|result| !result.is_ok()).count();
                debug!(results = results.len(), failed, "gateway accepted send request");
                Ok(results)
            }
            GatewayReply::Rejected { reason } => Err(rejected(reason)),
        }
    }

    async fn post(&self, params: Vec<(String, String)>) -> Result<String, SmsBroadcastError> {
        let body = crate::transport::encode_form_body(&params);
        self.http
            .post_form(&self.endpoint, body)
            .await
            .map_err(|err| {
                warn!(endpoint = %self.endpoint, error = %err, "gateway request failed");
                SmsBroadcastError::Transport(err)
            })
    }
}

/// Validated send request, ready for the wire.
struct PreparedSend {
    params: Vec<(String, String)>,
    recipients: usize,
    max_split: MaxSplit,
}

fn rejected(reason: String) -> SmsBroadcastError {
    warn!(%reason, "gateway rejected request");
    SmsBroadcastError::Gateway { reason }
}
