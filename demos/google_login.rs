//! Walks a login through the Google bridge and a consent through the typed helpers, against a
//! mock Hydra admin API and a mock token-info endpoint.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use time::OffsetDateTime;
use url::Url;
// self
use warehouse_gate::{
	admin::{AcceptConsent, ConsentRequest, HydraAdmin},
	auth::{Challenge, TokenSecret},
	config::{AdminConfig, TlsPolicy},
	http::ReqwestHttpClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let exp = (OffsetDateTime::now_utc().unix_timestamp() + 600).to_string();
	let tokeninfo_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/tokeninfo");
			then.status(200).json_body(json!({
				"iss": "accounts.google.com",
				"exp": exp,
				"email": "picker@warehouse.test"
			}));
		})
		.await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/oauth2/auth/requests/login/accept");
			then.status(200).json_body(json!({ "redirect_to": "https://auth.demo/consent" }));
		})
		.await;
	let consent_info_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/auth/requests/consent");
			then.status(200).json_body(json!({
				"challenge": "consent-demo",
				"subject": "picker@warehouse.test",
				"requested_scope": ["openid", "inventory.read"]
			}));
		})
		.await;
	let consent_accept_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/oauth2/auth/requests/consent/accept");
			then.status(200).json_body(json!({ "redirect_to": "https://warehouse.demo/callback" }));
		})
		.await;

	// Both mocks share one self-signed certificate, so the token-info transport is relaxed too.
	let config = AdminConfig::parse(&server.base_url())?
		.with_google_tokeninfo_url(Url::parse(&server.url("/tokeninfo"))?)?
		.with_tls_policy(TlsPolicy::AcceptInvalidCerts);
	let relaxed = ReqwestHttpClient::for_admin(&config)?;
	let admin = HydraAdmin::new(config)?.with_external_http_client(relaxed);
	let id_token = TokenSecret::id_token("demo-id-token");
	let login = admin.authenticate_with_google(&id_token, &Challenge::new("login-demo")?).await?;

	println!("Login accepted, continue at {}.", login.redirect_to.unwrap_or_default());

	let consent_challenge = Challenge::new("consent-demo")?;
	let request: ConsentRequest = admin.consent_request(&consent_challenge).await?;
	let consent = admin
		.accept_consent_request(&consent_challenge, &AcceptConsent::from_request(&request))
		.await?;

	println!(
		"Consent granted for {:?}, continue at {}.",
		request.requested_scope, consent.redirect_to
	);

	tokeninfo_mock.assert_async().await;
	login_mock.assert_async().await;
	consent_info_mock.assert_async().await;
	consent_accept_mock.assert_async().await;

	Ok(())
}
