//! Transport primitives for admin and token-info calls.
//!
//! [`AdminHttpClient`] is the crate's only dependency on an HTTP stack. Requests and responses
//! use the `http` types re-exported by `oauth2`, so any client able to execute an
//! [`HttpRequest`] can back [`HydraAdmin`](crate::admin::HydraAdmin). Transport failures are
//! reported as [`HttpClientError`] and classified by a
//! [`TransportErrorMapper`](crate::admin::TransportErrorMapper).

// crates.io
use oauth2::{HttpClientError, HttpRequest, HttpResponse};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")]
use crate::{
	config::{AdminConfig, TlsPolicy},
	error::ConfigError,
	obs,
};

/// Boxed future returned by [`AdminHttpClient::execute`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute admin API requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared behind an
/// [`Arc`] across cloned clients, and the returned future must be `Send` so callers can spawn
/// admin calls on multi-threaded executors.
pub trait AdminHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes `request` and returns the raw response, whatever its status.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Admin endpoints answer directly, so clients built by [`ReqwestHttpClient::for_admin`] and
/// [`ReqwestHttpClient::strict`] never follow redirects.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the admin transport, honoring [`AdminConfig::tls`] and [`AdminConfig::timeout`].
	pub fn for_admin(config: &AdminConfig) -> Result<Self, ConfigError> {
		let mut builder = base_builder(config);

		if config.tls == TlsPolicy::AcceptInvalidCerts {
			obs::warn_insecure_tls(&config.admin_url);

			builder = builder.danger_accept_invalid_certs(true);
		}

		Ok(Self(builder.build()?))
	}

	/// Builds a transport that always verifies certificates, for third-party endpoints.
	pub fn strict(config: &AdminConfig) -> Result<Self, ConfigError> {
		Ok(Self(base_builder(config).build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl AdminHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let response =
				self.0.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(feature = "reqwest")]
fn base_builder(config: &AdminConfig) -> reqwest::ClientBuilder {
	let builder = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none());

	match config.timeout {
		Some(timeout) => builder.timeout(timeout),
		None => builder,
	}
}
