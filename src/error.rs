//! Crate-level error types shared by the admin client, the claim checker, and configuration.

// self
use crate::{_prelude::*, obs::Operation};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream answered, but not with a usable body.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Identity token claims were rejected.
	#[error(transparent)]
	Claims(#[from] ClaimError),
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required environment variable is not set.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Name of the variable.
		name: &'static str,
	},
	/// A configured URL cannot be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The URL parses but cannot carry a request path.
	#[error("URL `{url}` must be an absolute http(s) base URL.")]
	UnsupportedUrl {
		/// Offending URL.
		url: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	SerializeBody(#[source] serde_json::Error),
	/// Challenge identifier failed validation.
	#[error(transparent)]
	InvalidChallenge(#[from] crate::auth::ChallengeError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{operation}`.")]
	Network {
		/// Call that failed.
		operation: Operation,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request timed out while calling `{operation}`.")]
	Timeout {
		/// Call that timed out.
		operation: Operation,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Transport failure that carries only a message.
	#[error("Transport failed while calling `{operation}`: {message}.")]
	Other {
		/// Call that failed.
		operation: Operation,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		operation: Operation,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { operation, source: Box::new(src) }
	}
}

/// Failures raised after the upstream produced an HTTP response.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Upstream replied with a non-success status.
	#[error("`{operation}` returned HTTP {status}{}.", describe(.error, .description))]
	Status {
		/// Call that failed.
		operation: Operation,
		/// HTTP status code.
		status: u16,
		/// Provider error code (`error` field), when the body carried one.
		error: Option<String>,
		/// Provider error description, when the body carried one.
		description: Option<String>,
	},
	/// Response body could not be decoded into the requested type.
	#[error("`{operation}` returned a body that does not match the expected shape.")]
	Decode {
		/// Call whose body failed to decode.
		operation: Operation,
		/// HTTP status code of the decoded response.
		status: u16,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ResponseError {
	/// HTTP status code carried by either variant.
	pub fn status(&self) -> u16 {
		match self {
			Self::Status { status, .. } | Self::Decode { status, .. } => *status,
		}
	}
}

/// Identity token claim rejections.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClaimError {
	/// A required claim is absent or not a string/number.
	#[error("Could not find the `{claim}` claim in the id_token.")]
	Missing {
		/// Claim name.
		claim: &'static str,
	},
	/// The issuer is not one of the accepted literals.
	#[error("Invalid issuer `{issuer}`.")]
	InvalidIssuer {
		/// Issuer found in the claims.
		issuer: String,
	},
	/// The `exp` claim is not a Unix timestamp.
	#[error("The exp claim `{value}` is not a Unix timestamp.")]
	MalformedExpiry {
		/// Raw claim value.
		value: String,
	},
	/// The token expired at or before the reference clock.
	#[error("Token expired at {expires_at} (now {now}).")]
	Expired {
		/// Expiry as a Unix timestamp.
		expires_at: i64,
		/// Reference clock as a Unix timestamp.
		now: i64,
	},
}

fn describe(error: &Option<String>, description: &Option<String>) -> String {
	match (error, description) {
		(_, Some(description)) => format!(": {description}"),
		(Some(error), None) => format!(": {error}"),
		(None, None) => String::new(),
	}
}
