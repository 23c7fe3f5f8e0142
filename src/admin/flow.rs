//! Flow kinds, actions, and admin URL construction.

// self
use crate::{_prelude::*, auth::Challenge, error::ConfigError, obs::Operation};

/// User-facing transaction kinds handled by Hydra's login/consent app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
	/// Login request.
	Login,
	/// Consent request.
	Consent,
	/// Logout request.
	Logout,
}
impl Flow {
	/// All flows, in admin API order.
	pub const ALL: [Flow; 3] = [Flow::Login, Flow::Consent, Flow::Logout];

	/// Path segment used by the admin API.
	pub const fn as_str(self) -> &'static str {
		match self {
			Flow::Login => "login",
			Flow::Consent => "consent",
			Flow::Logout => "logout",
		}
	}

	/// Query parameter carrying the challenge for this flow.
	pub const fn challenge_param(self) -> &'static str {
		match self {
			Flow::Login => "login_challenge",
			Flow::Consent => "consent_challenge",
			Flow::Logout => "logout_challenge",
		}
	}
}
impl Display for Flow {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Flow {
	type Err = UnknownFlow;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Flow::ALL.into_iter().find(|flow| flow.as_str() == s).ok_or_else(|| UnknownFlow(s.into()))
	}
}

/// Error returned when parsing an unknown flow name.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Invalid flow `{0}`.")]
pub struct UnknownFlow(pub String);

/// Decision applied to a pending request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowAction {
	/// Accept the request.
	Accept,
	/// Reject the request.
	Reject,
}
impl FlowAction {
	/// Path segment used by the admin API.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowAction::Accept => "accept",
			FlowAction::Reject => "reject",
		}
	}

	/// Operation label recorded for this action.
	pub const fn operation(self) -> Operation {
		match self {
			FlowAction::Accept => Operation::AcceptRequest,
			FlowAction::Reject => Operation::RejectRequest,
		}
	}
}
impl Display for FlowAction {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Builds `{base}/oauth2/auth/requests/{flow}[/{action}]?{flow}_challenge={challenge}`.
pub fn request_url(
	base: &Url,
	flow: Flow,
	action: Option<FlowAction>,
	challenge: &Challenge,
) -> Result<Url, ConfigError> {
	let mut url = match action {
		Some(action) =>
			admin_endpoint(base, &["oauth2", "auth", "requests", flow.as_str(), action.as_str()])?,
		None => admin_endpoint(base, &["oauth2", "auth", "requests", flow.as_str()])?,
	};

	url.query_pairs_mut().append_pair(flow.challenge_param(), challenge);

	Ok(url)
}

/// Appends `segments` to the path of `base`, dropping any query or fragment.
pub fn admin_endpoint(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
	let mut url = base.clone();

	url.set_query(None);
	url.set_fragment(None);
	url.path_segments_mut()
		.map_err(|_| ConfigError::UnsupportedUrl { url: base.to_string() })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}
