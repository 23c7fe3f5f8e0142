//! Unverified identity token claim checks.
//!
//! These helpers inspect claims that were already decoded by someone else (Google's token-info
//! endpoint, in the bridge flow). Nothing here verifies a signature: any caller able to fabricate
//! a [`ClaimsMap`] passes as long as the issuer and expiry checks hold.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::ClaimError};

/// Issuers accepted for Google ID tokens.
pub const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];

/// Decoded (but unverified) key/value fields from a third-party identity token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimsMap(pub BTreeMap<String, Value>);
impl ClaimsMap {
	/// Returns the raw JSON value for `claim`.
	pub fn get(&self, claim: &str) -> Option<&Value> {
		self.0.get(claim)
	}

	/// Inserts or replaces a claim.
	pub fn insert(&mut self, claim: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(claim.into(), value.into());
	}

	/// Returns the claim rendered as text when it is a string or a number.
	pub fn text(&self, claim: &str) -> Option<String> {
		match self.0.get(claim)? {
			Value::String(value) => Some(value.clone()),
			Value::Number(value) => Some(value.to_string()),
			_ => None,
		}
	}

	/// `iss` claim.
	pub fn issuer(&self) -> Result<String, ClaimError> {
		self.text("iss").ok_or(ClaimError::Missing { claim: "iss" })
	}

	/// `email` claim.
	pub fn email(&self) -> Result<String, ClaimError> {
		self.text("email").ok_or(ClaimError::Missing { claim: "email" })
	}

	/// `exp` claim as a Unix timestamp; token-info returns it as a string, JWT payloads as a
	/// number, and both are accepted.
	pub fn expires_at(&self) -> Result<i64, ClaimError> {
		match self.0.get("exp") {
			Some(Value::Number(value)) =>
				value.as_i64().ok_or_else(|| ClaimError::MalformedExpiry { value: value.to_string() }),
			Some(Value::String(value)) => value
				.trim()
				.parse()
				.map_err(|_| ClaimError::MalformedExpiry { value: value.clone() }),
			_ => Err(ClaimError::Missing { claim: "exp" }),
		}
	}
}
impl<K, V> FromIterator<(K, V)> for ClaimsMap
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

/// Checks the issuer and expiry of a Google ID token's claims against `now`.
///
/// Rejects issuers other than [`GOOGLE_ISSUERS`] and any `exp` at or before `now`.
pub fn validate_google_claims(claims: &ClaimsMap, now: OffsetDateTime) -> Result<(), ClaimError> {
	let issuer = claims.issuer()?;

	if !GOOGLE_ISSUERS.contains(&issuer.as_str()) {
		return Err(ClaimError::InvalidIssuer { issuer });
	}

	let expires_at = claims.expires_at()?;
	let now = now.unix_timestamp();

	if expires_at <= now {
		return Err(ClaimError::Expired { expires_at, now });
	}

	Ok(())
}
