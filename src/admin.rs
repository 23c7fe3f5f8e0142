//! Typed client for the Hydra admin API.
//!
//! [`HydraAdmin`] owns the transports, the error mapper, and the [`AdminConfig`] so each call
//! only builds its URL and body. Login, consent, and logout requests share one URL template
//! (see [`flow`]); introspection and the Google bridge live in their own submodules.

pub mod flow;
pub mod model;

mod google;
mod introspect;
mod requests;

pub use flow::*;
pub use model::*;

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	config::AdminConfig,
	error::{ConfigError, ResponseError, TransportError},
	http::AdminHttpClient,
	obs::{self, CallRecorder, CallSpan, Operation},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(&self, operation: Operation, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		operation: Operation,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(operation, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { operation, message }.into(),
			other => TransportError::Other {
				operation,
				message: format!("Unhandled HTTP client error variant: {other:?}"),
			}
			.into(),
		}
	}
}

#[cfg(feature = "reqwest")]
/// Admin client specialized for the crate's default reqwest transport stack.
pub type ReqwestHydraAdmin = HydraAdmin<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Client for the Hydra admin API and the Google token-info bridge.
///
/// Admin calls go through `admin_http`; third-party calls (Google token-info) go through
/// `external_http`. The two are separate so a relaxed TLS policy on the admin endpoint never
/// leaks to public endpoints.
#[derive(Clone)]
pub struct HydraAdmin<C, M>
where
	C: ?Sized + AdminHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Transport used for every Hydra admin request.
	pub admin_http: Arc<C>,
	/// Transport used for third-party endpoints.
	pub external_http: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Endpoint and bridge settings.
	pub config: AdminConfig,
}
impl<C, M> HydraAdmin<C, M>
where
	C: ?Sized + AdminHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that uses `http_client` for both admin and third-party calls.
	pub fn with_http_client(
		config: AdminConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let http_client = http_client.into();

		Self {
			admin_http: http_client.clone(),
			external_http: http_client,
			transport_mapper: mapper.into(),
			config,
		}
	}

	/// Replaces the transport used for third-party endpoints.
	pub fn with_external_http_client(mut self, http_client: impl Into<Arc<C>>) -> Self {
		self.external_http = http_client.into();

		self
	}

	async fn send<T>(&self, transport: &C, operation: Operation, request: HttpRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = transport
			.execute(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(operation, err))?;

		decode_response(operation, &response)
	}
}
#[cfg(feature = "reqwest")]
impl HydraAdmin<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client with reqwest transports built from `config`.
	///
	/// The admin transport follows [`AdminConfig::tls`]; the third-party transport always
	/// verifies certificates.
	pub fn new(config: AdminConfig) -> Result<Self> {
		let admin_http = ReqwestHttpClient::for_admin(&config)?;
		let external_http = ReqwestHttpClient::strict(&config)?;

		Ok(Self::with_http_client(config, admin_http, ReqwestTransportErrorMapper)
			.with_external_http_client(external_http))
	}

	/// Creates a client from `HYDRA_ADMIN_URL`.
	pub fn from_env() -> Result<Self> {
		Self::new(AdminConfig::from_env()?)
	}
}
impl<C, M> Debug for HydraAdmin<C, M>
where
	C: ?Sized + AdminHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HydraAdmin")
			.field("admin_url", &self.config.admin_url.as_str())
			.field("tls", &self.config.tls)
			.finish()
	}
}

/// Wraps `fut` in a call span and records its outcome and duration.
async fn observe<T, Fut>(operation: Operation, flow: Option<Flow>, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = CallSpan::new(operation, flow);
	let recorder = CallRecorder::start(operation, flow);
	let result = span.instrument(fut).await;

	recorder.finish(&result);

	result
}

fn build_request(
	method: Method,
	url: &Url,
	content_type: Option<&'static str>,
	body: Vec<u8>,
) -> Result<HttpRequest> {
	obs::trace_request(method.as_str(), url);

	let mut builder = Request::builder().method(method).uri(url.as_str()).header(ACCEPT, JSON);

	if let Some(content_type) = content_type {
		builder = builder.header(CONTENT_TYPE, content_type);
	}

	builder.body(body).map_err(|e| ConfigError::from(e).into())
}

fn json_body<B>(body: &B) -> Result<Vec<u8>>
where
	B: ?Sized + Serialize,
{
	serde_json::to_vec(body).map_err(|e| ConfigError::SerializeBody(e).into())
}

/// Error envelope Hydra and Google use for non-success replies.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
	#[serde(default)]
	error: Option<String>,
	#[serde(default)]
	error_description: Option<String>,
}

fn decode_response<T>(operation: Operation, response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();

	if !status.is_success() {
		let envelope =
			serde_json::from_slice::<ProviderErrorBody>(response.body()).unwrap_or_default();

		return Err(ResponseError::Status {
			operation,
			status: status.as_u16(),
			error: envelope.error,
			description: envelope.error_description,
		}
		.into());
	}

	// Empty bodies (204, or a bare 200) decode as JSON `null`.
	let body = response.body();
	let body = if body.iter().all(u8::is_ascii_whitespace) { b"null".as_slice() } else { body };
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ResponseError::Decode { operation, status: status.as_u16(), source }.into())
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(operation: Operation, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { operation }.into();
	}

	TransportError::network(operation, err).into()
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be a valid code.");

		response
	}

	#[test]
	fn decode_response_maps_status_errors() {
		let body = r#"{"error":"Not Found","error_description":"Unable to locate the resource","status_code":404}"#;
		let err = decode_response::<CompletedRequest>(Operation::FetchRequest, &response(404, body))
			.expect_err("A 404 reply must surface as an error.");

		match err {
			Error::Response(ResponseError::Status { status, error, description, .. }) => {
				assert_eq!(status, 404);
				assert_eq!(error.as_deref(), Some("Not Found"));
				assert_eq!(description.as_deref(), Some("Unable to locate the resource"));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		let err = decode_response::<CompletedRequest>(
			Operation::AcceptRequest,
			&response(502, "<html>bad gateway</html>"),
		)
		.expect_err("A 502 reply must surface as an error.");

		assert!(matches!(
			err,
			Error::Response(ResponseError::Status { status: 502, error: None, .. })
		));
	}

	#[test]
	fn decode_response_reports_json_path() {
		let err = decode_response::<LoginResponse>(
			Operation::FetchRequest,
			&response(200, r#"{"skip":"yes"}"#),
		)
		.expect_err("A string `skip` must not decode into a bool.");

		match err {
			Error::Response(ResponseError::Decode { status, source, .. }) => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "skip");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn decode_response_treats_empty_body_as_null() {
		decode_response::<()>(Operation::RejectRequest, &response(204, ""))
			.expect("An empty 204 should decode into unit.");

		let missing = decode_response::<Option<CompletedRequest>>(
			Operation::RejectRequest,
			&response(200, " \n"),
		)
		.expect("A blank body should decode into None.");

		assert_eq!(missing, None);
	}

	#[test]
	fn build_request_sets_headers() {
		let url = Url::parse("http://hydra:4445/oauth2/introspect")
			.expect("Introspection URL fixture should parse.");
		let request = build_request(Method::POST, &url, Some(FORM), b"token=t".to_vec())
			.expect("Request fixture should build.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri().to_string(), "http://hydra:4445/oauth2/introspect");
		assert_eq!(request.headers()[ACCEPT], JSON);
		assert_eq!(request.headers()[CONTENT_TYPE], FORM);
		assert_eq!(request.body().as_slice(), b"token=t");

		let get = build_request(Method::GET, &url, None, Vec::new())
			.expect("GET request fixture should build.");

		assert!(get.headers().get(CONTENT_TYPE).is_none());
	}
}
