// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use warehouse_gate::{
	admin::{Flow, HydraAdmin, LoginResponse, TransportErrorMapper},
	auth::{Challenge, TokenSecret},
	config::AdminConfig,
	error::{ConfigError, Error, TransportError},
	http::{AdminHttpClient, HttpFuture},
	oauth2::{
		HttpClientError, HttpRequest, HttpResponse,
		http::{StatusCode, header::CONTENT_TYPE},
	},
	obs::Operation,
};

#[derive(Debug)]
enum FakeTransportError {
	Unreachable,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable => write!(f, "Admin endpoint unreachable."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SentRequest {
	method: String,
	uri: String,
	content_type: Option<String>,
	body: String,
}

/// Replays one canned reply (or failure) and records every request it sees.
#[derive(Default)]
struct FakeHttpClient {
	reply: Option<(u16, &'static str)>,
	sent: Mutex<Vec<SentRequest>>,
}
impl FakeHttpClient {
	fn replying(status: u16, body: &'static str) -> Self {
		Self { reply: Some((status, body)), sent: Default::default() }
	}

	fn unreachable() -> Self {
		Self::default()
	}

	fn sent(&self) -> Vec<SentRequest> {
		self.sent.lock().clone()
	}
}
impl AdminHttpClient for FakeHttpClient {
	type TransportError = FakeTransportError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		self.sent.lock().push(SentRequest {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			content_type: request
				.headers()
				.get(CONTENT_TYPE)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned),
			body: String::from_utf8_lossy(request.body()).into_owned(),
		});

		let reply = self.reply;

		Box::pin(async move {
			let (status, body) =
				reply.ok_or(HttpClientError::Reqwest(Box::new(FakeTransportError::Unreachable)))?;
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() =
				StatusCode::from_u16(status).expect("Fake status should be a valid code.");

			Ok(response)
		})
	}
}

#[derive(Default)]
struct RecordingMapper {
	operations: Mutex<Vec<Operation>>,
}
impl TransportErrorMapper<FakeTransportError> for RecordingMapper {
	fn map_transport_error(
		&self,
		operation: Operation,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.operations.lock().push(operation);

		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(operation, *inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransportError::Other { operation, message: format!("{other:?}") }.into(),
		}
	}
}

fn config() -> AdminConfig {
	AdminConfig::parse("https://hydra-admin.internal:4445/admin")
		.expect("Admin URL fixture should parse.")
}

fn challenge() -> Challenge {
	Challenge::new("c0ffee").expect("Challenge fixture should be valid.")
}

#[tokio::test]
async fn custom_transport_receives_built_requests() {
	let http_client = Arc::new(FakeHttpClient::replying(200, r#"{"redirect_to":"https://next"}"#));
	let mapper = Arc::new(RecordingMapper::default());
	let admin: HydraAdmin<FakeHttpClient, RecordingMapper> =
		HydraAdmin::with_http_client(config(), http_client.clone(), mapper.clone());
	let body = serde_json::json!({ "error": "login_required" });
	let response: LoginResponse = admin
		.reject_request(Flow::Login, &challenge(), &body)
		.await
		.expect("Canned reply should decode.");
	let subject = admin
		.introspect_oauth_token(&TokenSecret::access_token("tok en"))
		.await
		.expect("Unknown fields are ignored, so the canned reply decodes as an inactive token.");

	assert_eq!(response.redirect_to.as_deref(), Some("https://next"));
	assert!(!subject.active);
	assert_eq!(
		http_client.sent(),
		[
			SentRequest {
				method: "PUT".into(),
				uri: "https://hydra-admin.internal:4445/admin/oauth2/auth/requests/login/reject?login_challenge=c0ffee".into(),
				content_type: Some("application/json".into()),
				body: r#"{"error":"login_required"}"#.into(),
			},
			SentRequest {
				method: "POST".into(),
				uri: "https://hydra-admin.internal:4445/admin/oauth2/introspect".into(),
				content_type: Some("application/x-www-form-urlencoded".into()),
				body: "token=tok+en".into(),
			},
		]
	);
	assert!(mapper.operations.lock().is_empty());
}

#[tokio::test]
async fn transport_failures_go_through_the_mapper() {
	let mapper = Arc::new(RecordingMapper::default());
	let admin: HydraAdmin<FakeHttpClient, RecordingMapper> = HydraAdmin::with_http_client(
		config(),
		FakeHttpClient::unreachable(),
		mapper.clone(),
	);
	let err = admin
		.logout_request::<serde_json::Value>(&challenge())
		.await
		.expect_err("Unreachable transport must fail.");

	match err {
		Error::Transport(TransportError::Network { operation, source }) => {
			assert_eq!(operation, Operation::FetchRequest);
			assert_eq!(source.to_string(), "Admin endpoint unreachable.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let err = admin
		.authenticate_with_google(&TokenSecret::id_token("id"), &challenge())
		.await
		.expect_err("Unreachable transport must fail.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::Network { operation: Operation::GoogleTokenInfo, .. })
	));
	assert_eq!(*mapper.operations.lock(), [Operation::FetchRequest, Operation::GoogleTokenInfo]);
}
