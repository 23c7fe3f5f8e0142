//! Bridge that turns a Google ID token into an accepted Hydra login.

// crates.io
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	admin::{self, AcceptLogin, Flow, HydraAdmin, LoginResponse, TransportErrorMapper},
	auth::{self, Challenge, ClaimsMap, TokenKind, TokenSecret},
	http::AdminHttpClient,
	obs::Operation,
};

impl<C, M> HydraAdmin<C, M>
where
	C: ?Sized + AdminHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Looks up `id_token` on Google's token-info endpoint and returns the decoded claims.
	///
	/// The claims are returned as Google reports them; nothing is validated here.
	pub async fn google_token_info(&self, id_token: &TokenSecret) -> Result<ClaimsMap> {
		const OPERATION: Operation = Operation::GoogleTokenInfo;

		admin::observe(OPERATION, None, async move {
			let mut url = self.config.google_tokeninfo_url.clone();

			url.query_pairs_mut().append_pair(TokenKind::IdToken.as_str(), id_token.expose());

			let request = admin::build_request(Method::GET, &url, None, Vec::new())?;

			self.send(self.external_http.as_ref(), OPERATION, request).await
		})
		.await
	}

	/// Accepts the login request `challenge` on behalf of the Google account behind `id_token`.
	///
	/// Steps: fetch the token-info claims, check issuer and expiry against the current clock,
	/// then accept the login with `subject = email` and `remember_for` taken from
	/// [`AdminConfig::remember_for`](crate::config::AdminConfig::remember_for). The admin API is
	/// not called when the claims are rejected.
	pub async fn authenticate_with_google(
		&self,
		id_token: &TokenSecret,
		challenge: &Challenge,
	) -> Result<LoginResponse> {
		admin::observe(Operation::GoogleLogin, Some(Flow::Login), async move {
			let claims = self.google_token_info(id_token).await?;

			auth::validate_google_claims(&claims, OffsetDateTime::now_utc())?;

			let body = AcceptLogin::new(claims.email()?).with_remember_for(self.config.remember_for);

			self.accept_login_request(challenge, &body).await
		})
		.await
	}
}
