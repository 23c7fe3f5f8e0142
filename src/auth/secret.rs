//! Bearer material handed to the admin client.
//!
//! Google ID tokens travel to the token-info bridge and Hydra access tokens travel to
//! introspection. Neither value may reach logs, so formatting only ever shows the token kind.

// self
use crate::_prelude::*;

/// Kind of bearer token wrapped by [`TokenSecret`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// OpenID Connect ID token issued by Google.
	IdToken,
	/// OAuth 2.0 access token issued by Hydra.
	AccessToken,
}
impl TokenKind {
	/// Parameter name the token travels under.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::IdToken => "id_token",
			TokenKind::AccessToken => "access_token",
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// ID token or access token whose value is redacted from `Debug` and `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret {
	kind: TokenKind,
	value: String,
}
impl TokenSecret {
	/// Wraps a Google ID token, as posted by the Android client on sign-in.
	pub fn id_token(value: impl Into<String>) -> Self {
		Self { kind: TokenKind::IdToken, value: value.into() }
	}

	/// Wraps a Hydra access token, as presented by the Android client on each API call.
	///
	/// A leading `Bearer ` scheme copied from an `Authorization` header is stripped.
	pub fn access_token(value: impl Into<String>) -> Self {
		let value = value.into();
		let value = match value.strip_prefix("Bearer ") {
			Some(stripped) => stripped.trim().to_owned(),
			None => value,
		};

		Self { kind: TokenKind::AccessToken, value }
	}

	/// Kind of the wrapped token.
	pub fn kind(&self) -> TokenKind {
		self.kind
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.value
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSecret")
			.field("kind", &self.kind)
			.field("value", &"<redacted>")
			.finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "<redacted {}>", self.kind)
	}
}
