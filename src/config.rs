//! Admin client configuration.
//!
//! The only environment input is `HYDRA_ADMIN_URL`; everything else has a default and a `with_*`
//! setter.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable holding the Hydra admin base URL.
pub const ADMIN_URL_ENV: &str = "HYDRA_ADMIN_URL";
/// Google's token-info endpoint.
pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
/// How long Hydra should remember a Google-bridged login.
pub const DEFAULT_REMEMBER_FOR: Duration = Duration::days(90);

/// TLS verification policy for the admin transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TlsPolicy {
	/// Verify certificates and hostnames.
	#[default]
	Strict,
	/// Accept self-signed certificates and skip hostname verification.
	///
	/// Only meant for an admin endpoint on a trusted network with a self-signed certificate.
	/// Building a transport with this policy logs a warning.
	AcceptInvalidCerts,
}

/// Settings consumed by [`HydraAdmin`](crate::admin::HydraAdmin).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminConfig {
	/// Base URL of the Hydra admin API.
	pub admin_url: Url,
	/// TLS policy for the admin transport; the Google transport is always strict.
	pub tls: TlsPolicy,
	/// Per-request timeout; `None` keeps the transport default.
	pub timeout: Option<StdDuration>,
	/// Token-info endpoint used by the Google bridge.
	pub google_tokeninfo_url: Url,
	/// `remember_for` sent when the Google bridge accepts a login.
	pub remember_for: Duration,
}
impl AdminConfig {
	/// Creates a configuration for `admin_url` with default settings.
	pub fn new(admin_url: Url) -> Result<Self, ConfigError> {
		ensure_base_url(&admin_url)?;

		let google_tokeninfo_url = parse_url(GOOGLE_TOKENINFO_URL)?;

		Ok(Self {
			admin_url,
			tls: TlsPolicy::default(),
			timeout: None,
			google_tokeninfo_url,
			remember_for: DEFAULT_REMEMBER_FOR,
		})
	}

	/// Parses `admin_url` and creates a configuration with default settings.
	pub fn parse(admin_url: &str) -> Result<Self, ConfigError> {
		Self::new(parse_url(admin_url)?)
	}

	/// Reads [`ADMIN_URL_ENV`] from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads [`ADMIN_URL_ENV`] through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let raw = lookup(ADMIN_URL_ENV)
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingEnv { name: ADMIN_URL_ENV })?;

		Self::parse(raw.trim())
	}

	/// Overrides the admin TLS policy.
	pub fn with_tls_policy(mut self, tls: TlsPolicy) -> Self {
		self.tls = tls;

		self
	}

	/// Sets a per-request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Points the Google bridge at another token-info endpoint.
	pub fn with_google_tokeninfo_url(mut self, url: Url) -> Result<Self, ConfigError> {
		ensure_base_url(&url)?;

		self.google_tokeninfo_url = url;

		Ok(self)
	}

	/// Overrides the `remember_for` window used by the Google bridge.
	pub fn with_remember_for(mut self, remember_for: Duration) -> Self {
		self.remember_for = remember_for;

		self
	}
}

fn parse_url(url: &str) -> Result<Url, ConfigError> {
	Url::parse(url).map_err(|source| ConfigError::InvalidUrl { url: url.to_owned(), source })
}

fn ensure_base_url(url: &Url) -> Result<(), ConfigError> {
	if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
		Err(ConfigError::UnsupportedUrl { url: url.to_string() })
	} else {
		Ok(())
	}
}
