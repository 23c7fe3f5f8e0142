//! Optional observability helpers for admin calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `hydra_admin.call` with the `operation` and
//!   `flow` fields, plus `debug!` events for every outbound request.
//! - Enable `metrics` to increment `hydra_admin_call_total` for every attempt/success/failure
//!   (labeled by `operation`, `flow`, `outcome` and the failing error layer) and to record
//!   `hydra_admin_call_duration_seconds` for every finished call.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outbound calls issued by [`HydraAdmin`](crate::admin::HydraAdmin).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Fetch information about a login/consent/logout request.
	FetchRequest,
	/// Accept a login/consent/logout request.
	AcceptRequest,
	/// Reject a login/consent/logout request.
	RejectRequest,
	/// Token introspection.
	Introspect,
	/// Google token-info lookup.
	GoogleTokenInfo,
	/// Full Google login bridge (token-info + claim checks + login accept).
	GoogleLogin,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::FetchRequest => "fetch_request",
			Operation::AcceptRequest => "accept_request",
			Operation::RejectRequest => "reject_request",
			Operation::Introspect => "introspect",
			Operation::GoogleTokenInfo => "google_tokeninfo",
			Operation::GoogleLogin => "google_login",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to an admin helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
