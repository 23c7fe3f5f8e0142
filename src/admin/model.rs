//! Transport records mirrored from Hydra and request bodies sent to it.
//!
//! Records are deliberately lenient: optional fields decode as `None` or empty so that one type
//! can absorb the slightly different shapes Hydra returns across versions.

// crates.io
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Login record returned by Hydra, and by [`HydraAdmin::authenticate_with_google`].
///
/// A login *info* reply fills `request_url`, `subject`, and `skip`; an *accept* reply only
/// carries `redirect_to`.
///
/// [`HydraAdmin::authenticate_with_google`]: crate::admin::HydraAdmin::authenticate_with_google
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
	/// Where to send the user agent next.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_to: Option<String>,
	/// Original OAuth2 authorization URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub request_url: Option<String>,
	/// Subject already authenticated for this session, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject: Option<String>,
	/// Whether Hydra already knows the user and the login UI can be skipped.
	#[serde(default)]
	pub skip: bool,
}

/// Reply to accepting or rejecting a consent request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentResponse {
	/// Where to send the user agent next.
	pub redirect_to: String,
}

/// Reply to accepting or rejecting a login or logout request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedRequest {
	/// Where to send the user agent next.
	pub redirect_to: String,
}

/// OAuth2 client summary embedded in request records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
	/// Client identifier.
	#[serde(default)]
	pub client_id: String,
	/// Human-readable client name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_name: Option<String>,
	/// Space-delimited scopes the client may request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
}

/// Pending login request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
	/// Challenge identifying this request.
	#[serde(default)]
	pub challenge: String,
	/// Whether the login UI can be skipped.
	#[serde(default)]
	pub skip: bool,
	/// Remembered subject (empty unless `skip`).
	#[serde(default)]
	pub subject: String,
	/// Original OAuth2 authorization URL.
	#[serde(default)]
	pub request_url: String,
	/// Scopes requested by the client.
	#[serde(default)]
	pub requested_scope: Vec<String>,
	/// Audiences requested for the access token.
	#[serde(default)]
	pub requested_access_token_audience: Vec<String>,
	/// Requesting client.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client: Option<ClientSummary>,
	/// Login session identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session_id: Option<String>,
}

/// Pending consent request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRequest {
	/// Challenge identifying this request.
	#[serde(default)]
	pub challenge: String,
	/// Whether consent was already granted and can be skipped.
	#[serde(default)]
	pub skip: bool,
	/// Authenticated subject.
	#[serde(default)]
	pub subject: String,
	/// Original OAuth2 authorization URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub request_url: Option<String>,
	/// Scopes requested by the client.
	#[serde(default)]
	pub requested_scope: Vec<String>,
	/// Audiences requested for the access token.
	#[serde(default)]
	pub requested_access_token_audience: Vec<String>,
	/// Requesting client.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client: Option<ClientSummary>,
	/// Login challenge that preceded this consent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub login_challenge: Option<String>,
	/// Login session identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub login_session_id: Option<String>,
}

/// Pending logout request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutRequest {
	/// Challenge identifying this request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub challenge: Option<String>,
	/// Subject being logged out.
	#[serde(default)]
	pub subject: String,
	/// Session identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sid: Option<String>,
	/// Original logout URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub request_url: Option<String>,
	/// Whether a relying party initiated the logout.
	#[serde(default)]
	pub rp_initiated: bool,
	/// Relying party, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client: Option<ClientSummary>,
}

/// Token introspection result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
	/// Whether the token is currently active.
	#[serde(default)]
	pub active: bool,
	/// Subject the token was issued for.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,
	/// Client the token was issued to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// Space-delimited granted scopes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Expiry as a Unix timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exp: Option<i64>,
	/// Issue time as a Unix timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub iat: Option<i64>,
	/// Issuer URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub iss: Option<String>,
	/// Token type (e.g. `Bearer`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Token use (`access_token` or `refresh_token`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_use: Option<String>,
	/// Human-readable subject name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Intended audiences.
	#[serde(default)]
	pub aud: Vec<String>,
	/// Extra session data attached at consent time.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ext: Option<Value>,
}
impl Subject {
	/// Granted scopes.
	pub fn scopes(&self) -> impl Iterator<Item = &str> {
		self.scope.as_deref().unwrap_or_default().split_whitespace()
	}

	/// Expiry, when present and representable.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.exp?).ok()
	}
}

/// Body for accepting a login request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptLogin {
	/// Authenticated subject.
	pub subject: String,
	/// Whether Hydra should remember the login.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub remember: Option<bool>,
	/// Seconds to remember the login for.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub remember_for: Option<i64>,
	/// Authentication context class reference.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub acr: Option<String>,
	/// Arbitrary context passed on to the consent step.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<Value>,
}
impl AcceptLogin {
	/// Creates a body for `subject` with every optional field unset.
	pub fn new(subject: impl Into<String>) -> Self {
		Self { subject: subject.into(), remember: None, remember_for: None, acr: None, context: None }
	}

	/// Sets `remember`.
	pub fn with_remember(mut self, remember: bool) -> Self {
		self.remember = Some(remember);

		self
	}

	/// Sets `remember_for`, truncated to whole seconds.
	pub fn with_remember_for(mut self, remember_for: Duration) -> Self {
		self.remember_for = Some(remember_for.whole_seconds());

		self
	}

	/// Sets `acr`.
	pub fn with_acr(mut self, acr: impl Into<String>) -> Self {
		self.acr = Some(acr.into());

		self
	}

	/// Sets `context`.
	pub fn with_context(mut self, context: Value) -> Self {
		self.context = Some(context);

		self
	}
}

/// Session claims injected into issued tokens on consent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentSession {
	/// Extra claims for the access token.
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub access_token: Map<String, Value>,
	/// Extra claims for the ID token.
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub id_token: Map<String, Value>,
}

/// Body for accepting a consent request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptConsent {
	/// Scopes granted to the client.
	#[serde(default)]
	pub grant_scope: Vec<String>,
	/// Audiences granted for the access token.
	#[serde(default)]
	pub grant_access_token_audience: Vec<String>,
	/// Whether Hydra should remember this consent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub remember: Option<bool>,
	/// Seconds to remember the consent for.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub remember_for: Option<i64>,
	/// Extra token claims.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session: Option<ConsentSession>,
}
impl AcceptConsent {
	/// Grants exactly what `request` asked for.
	pub fn from_request(request: &ConsentRequest) -> Self {
		Self {
			grant_scope: request.requested_scope.clone(),
			grant_access_token_audience: request.requested_access_token_audience.clone(),
			..Default::default()
		}
	}

	/// Sets `remember` and `remember_for`.
	pub fn remembered_for(mut self, remember_for: Duration) -> Self {
		self.remember = Some(true);
		self.remember_for = Some(remember_for.whole_seconds());

		self
	}

	/// Attaches session claims.
	pub fn with_session(mut self, session: ConsentSession) -> Self {
		self.session = Some(session);

		self
	}
}

/// Body for rejecting a login or consent request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectRequest {
	/// OAuth2 error code.
	pub error: String,
	/// Human-readable description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
	/// Hint to help resolve the error.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_hint: Option<String>,
	/// Debug detail; not shown to end users in production.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_debug: Option<String>,
	/// HTTP status code to report.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status_code: Option<u16>,
}
impl RejectRequest {
	/// Creates a body carrying only `error`.
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			error_description: None,
			error_hint: None,
			error_debug: None,
			status_code: None,
		}
	}

	/// `access_denied` with a description, the usual answer when a user declines.
	pub fn access_denied(description: impl Into<String>) -> Self {
		Self { error_description: Some(description.into()), ..Self::new("access_denied") }
	}

	/// Sets `error_hint`.
	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.error_hint = Some(hint.into());

		self
	}

	/// Sets `status_code`.
	pub fn with_status_code(mut self, status_code: u16) -> Self {
		self.status_code = Some(status_code);

		self
	}
}
