//! OAuth2 token introspection through the admin API.

// crates.io
use oauth2::http::Method;
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	admin::{self, FORM, HydraAdmin, Subject, TransportErrorMapper},
	auth::TokenSecret,
	http::AdminHttpClient,
	obs::Operation,
};

impl<C, M> HydraAdmin<C, M>
where
	C: ?Sized + AdminHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Introspects an access or refresh token via `POST {admin}/oauth2/introspect`.
	///
	/// Inactive tokens are not an error: Hydra answers `{"active": false}` and the returned
	/// [`Subject`] says so.
	pub async fn introspect_oauth_token(&self, token: &TokenSecret) -> Result<Subject> {
		const OPERATION: Operation = Operation::Introspect;

		admin::observe(OPERATION, None, async move {
			let url = admin::admin_endpoint(&self.config.admin_url, &["oauth2", "introspect"])?;
			let body = form_urlencoded::Serializer::new(String::new())
				.append_pair("token", token.expose())
				.finish();
			let request = admin::build_request(Method::POST, &url, Some(FORM), body.into_bytes())?;

			self.send(self.admin_http.as_ref(), OPERATION, request).await
		})
		.await
	}
}
