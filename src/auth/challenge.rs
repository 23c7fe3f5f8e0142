//! Opaque challenge identifiers issued by the identity provider.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Error returned when challenge validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ChallengeError {
	/// The challenge was empty.
	#[error("Challenge cannot be empty.")]
	Empty,
	/// The challenge contains whitespace or control characters.
	#[error("Challenge contains whitespace or control characters.")]
	InvalidCharacter,
}

/// Identifier of one in-flight login, consent, or logout transaction.
///
/// Hydra hands these out as opaque strings; the only shape enforced here is that the value is
/// non-empty and free of whitespace and control characters, so it can be embedded in a query
/// string unambiguously.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Challenge(String);
impl Challenge {
	/// Creates a new challenge after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, ChallengeError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for Challenge {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Challenge {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<Challenge> for String {
	fn from(value: Challenge) -> Self {
		value.0
	}
}
impl TryFrom<String> for Challenge {
	type Error = ChallengeError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for Challenge {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for Challenge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Challenge({})", self.0)
	}
}
impl Display for Challenge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Challenge {
	type Err = ChallengeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), ChallengeError> {
	if view.is_empty() {
		return Err(ChallengeError::Empty);
	}
	if view.chars().any(|c| c.is_whitespace() || c.is_control()) {
		return Err(ChallengeError::InvalidCharacter);
	}

	Ok(())
}
