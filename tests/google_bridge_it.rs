// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::OffsetDateTime;
// self
use warehouse_gate::{
	admin::{HydraAdmin, ReqwestHydraAdmin},
	auth::{Challenge, GOOGLE_ISSUERS, TokenSecret},
	config::{AdminConfig, TlsPolicy},
	error::{ClaimError, Error, ResponseError},
	http::ReqwestHttpClient,
	url::Url,
};

const CHALLENGE: &str = "9a8b7c6d5e4f";
const ID_TOKEN: &str = "eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiIxIn0.c2ln";
const EMAIL: &str = "picker@warehouse.test";

fn build_admin(server: &MockServer) -> ReqwestHydraAdmin {
	let tokeninfo =
		Url::parse(&server.url("/tokeninfo")).expect("Mock token-info URL should parse.");
	// The mock server presents a self-signed certificate for both the admin API and token-info.
	let config = AdminConfig::parse(&server.base_url())
		.expect("Mock admin URL should be accepted.")
		.with_google_tokeninfo_url(tokeninfo)
		.expect("Mock token-info URL should be accepted.")
		.with_tls_policy(TlsPolicy::AcceptInvalidCerts);
	let relaxed = ReqwestHttpClient::for_admin(&config)
		.expect("Relaxed token-info transport should build.");

	HydraAdmin::new(config)
		.expect("Admin client should build against the mock server.")
		.with_external_http_client(relaxed)
}

fn challenge() -> Challenge {
	Challenge::new(CHALLENGE).expect("Challenge fixture should be valid.")
}

fn expires_in(seconds: i64) -> String {
	(OffsetDateTime::now_utc().unix_timestamp() + seconds).to_string()
}

#[tokio::test]
async fn google_login_accepts_with_email_subject() {
	let server = MockServer::start_async().await;
	let admin = build_admin(&server);
	let tokeninfo = server
		.mock_async(|when, then| {
			when.method(GET).path("/tokeninfo").query_param("id_token", ID_TOKEN);
			then.status(200).json_body(json!({
				"iss": GOOGLE_ISSUERS[0],
				"exp": expires_in(3_600),
				"email": EMAIL,
				"email_verified": "true",
				"aud": "warehouse-android.apps.googleusercontent.com"
			}));
		})
		.await;
	let accept = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/oauth2/auth/requests/login/accept")
				.query_param("login_challenge", CHALLENGE)
				.json_body(json!({ "subject": EMAIL, "remember_for": 7_776_000 }));
			then.status(200).json_body(json!({ "redirect_to": "https://auth/google-ok" }));
		})
		.await;
	let response = admin
		.authenticate_with_google(&TokenSecret::id_token(ID_TOKEN), &challenge())
		.await
		.expect("Google login bridge should succeed.");

	assert_eq!(response.redirect_to.as_deref(), Some("https://auth/google-ok"));

	tokeninfo.assert_async().await;
	accept.assert_async().await;
}

#[tokio::test]
async fn google_login_rejects_foreign_issuer() {
	let server = MockServer::start_async().await;
	let admin = build_admin(&server);
	let tokeninfo = server
		.mock_async(|when, then| {
			when.method(GET).path("/tokeninfo");
			then.status(200).json_body(json!({
				"iss": "https://login.example.com",
				"exp": expires_in(3_600),
				"email": EMAIL
			}));
		})
		.await;
	let accept = server
		.mock_async(|when, then| {
			when.method(PUT).path("/oauth2/auth/requests/login/accept");
			then.status(200).json_body(json!({ "redirect_to": "https://auth/never" }));
		})
		.await;
	let err = admin
		.authenticate_with_google(&TokenSecret::id_token(ID_TOKEN), &challenge())
		.await
		.expect_err("Foreign issuers must be rejected.");

	assert!(matches!(
		err,
		Error::Claims(ClaimError::InvalidIssuer { ref issuer }) if issuer == "https://login.example.com"
	));

	tokeninfo.assert_async().await;
	accept.assert_calls_async(0).await;
}

#[tokio::test]
async fn google_login_rejects_expired_token() {
	let server = MockServer::start_async().await;
	let admin = build_admin(&server);
	let tokeninfo = server
		.mock_async(|when, then| {
			when.method(GET).path("/tokeninfo");
			then.status(200).json_body(json!({
				"iss": GOOGLE_ISSUERS[1],
				"exp": expires_in(-60),
				"email": EMAIL
			}));
		})
		.await;
	let accept = server
		.mock_async(|when, then| {
			when.method(PUT).path("/oauth2/auth/requests/login/accept");
			then.status(200).json_body(json!({ "redirect_to": "https://auth/never" }));
		})
		.await;
	let err = admin
		.authenticate_with_google(&TokenSecret::id_token(ID_TOKEN), &challenge())
		.await
		.expect_err("Expired tokens must be rejected.");

	assert!(matches!(err, Error::Claims(ClaimError::Expired { .. })));

	tokeninfo.assert_async().await;
	accept.assert_calls_async(0).await;
}

#[tokio::test]
async fn google_login_requires_email() {
	let server = MockServer::start_async().await;
	let admin = build_admin(&server);
	let tokeninfo = server
		.mock_async(|when, then| {
			when.method(GET).path("/tokeninfo");
			then.status(200)
				.json_body(json!({ "iss": GOOGLE_ISSUERS[0], "exp": expires_in(600) }));
		})
		.await;
	let err = admin
		.authenticate_with_google(&TokenSecret::id_token(ID_TOKEN), &challenge())
		.await
		.expect_err("Claims without an email cannot name a subject.");

	assert!(matches!(err, Error::Claims(ClaimError::Missing { claim: "email" })));

	tokeninfo.assert_async().await;
}

#[tokio::test]
async fn google_tokeninfo_errors_surface_as_status() {
	let server = MockServer::start_async().await;
	let admin = build_admin(&server);
	let tokeninfo = server
		.mock_async(|when, then| {
			when.method(GET).path("/tokeninfo");
			then.status(400)
				.json_body(json!({ "error": "invalid_token", "error_description": "Invalid Value" }));
		})
		.await;
	let err = admin
		.google_token_info(&TokenSecret::id_token("garbage"))
		.await
		.expect_err("Google rejects malformed tokens with HTTP 400.");

	match err {
		Error::Response(ResponseError::Status { status, error, .. }) => {
			assert_eq!(status, 400);
			assert_eq!(error.as_deref(), Some("invalid_token"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	tokeninfo.assert_async().await;
}
