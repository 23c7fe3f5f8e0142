//! Login, consent, and logout request calls.
//!
//! All three flows share `GET /oauth2/auth/requests/{flow}` for request info and
//! `PUT /oauth2/auth/requests/{flow}/{accept|reject}` for decisions. The generic
//! [`HydraAdmin::get_request`], [`HydraAdmin::accept_request`], and
//! [`HydraAdmin::reject_request`] decode into any caller-chosen type; the named helpers below
//! fix the flow and, for consent, the reply type.

// crates.io
use oauth2::http::Method;
use serde_json::Map;
// self
use crate::{
	_prelude::*,
	admin::{self, ConsentResponse, Flow, FlowAction, HydraAdmin, JSON, TransportErrorMapper},
	auth::Challenge,
	http::AdminHttpClient,
	obs::Operation,
};

impl<C, M> HydraAdmin<C, M>
where
	C: ?Sized + AdminHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches information on a pending `flow` request.
	pub async fn get_request<T>(&self, flow: Flow, challenge: &Challenge) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const OPERATION: Operation = Operation::FetchRequest;

		admin::observe(OPERATION, Some(flow), async move {
			let url = admin::request_url(&self.config.admin_url, flow, None, challenge)?;
			let request = admin::build_request(Method::GET, &url, None, Vec::new())?;

			self.send(self.admin_http.as_ref(), OPERATION, request).await
		})
		.await
	}

	/// Accepts a pending `flow` request with a JSON `body`.
	pub async fn accept_request<T, B>(
		&self,
		flow: Flow,
		challenge: &Challenge,
		body: &B,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize + Sync,
	{
		self.decide(flow, FlowAction::Accept, challenge, body).await
	}

	/// Rejects a pending `flow` request with a JSON `body`.
	pub async fn reject_request<T, B>(
		&self,
		flow: Flow,
		challenge: &Challenge,
		body: &B,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize + Sync,
	{
		self.decide(flow, FlowAction::Reject, challenge, body).await
	}

	/// Fetches information on a login request.
	pub async fn login_request<T>(&self, challenge: &Challenge) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.get_request(Flow::Login, challenge).await
	}

	/// Accepts a login request.
	pub async fn accept_login_request<T, B>(&self, challenge: &Challenge, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize + Sync,
	{
		self.accept_request(Flow::Login, challenge, body).await
	}

	/// Rejects a login request.
	pub async fn reject_login_request<T, B>(&self, challenge: &Challenge, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize + Sync,
	{
		self.reject_request(Flow::Login, challenge, body).await
	}

	/// Fetches information on a consent request.
	pub async fn consent_request<T>(&self, challenge: &Challenge) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.get_request(Flow::Consent, challenge).await
	}

	/// Accepts a consent request.
	pub async fn accept_consent_request<B>(
		&self,
		challenge: &Challenge,
		body: &B,
	) -> Result<ConsentResponse>
	where
		B: ?Sized + Serialize + Sync,
	{
		self.accept_request(Flow::Consent, challenge, body).await
	}

	/// Rejects a consent request.
	pub async fn reject_consent_request<B>(
		&self,
		challenge: &Challenge,
		body: &B,
	) -> Result<ConsentResponse>
	where
		B: ?Sized + Serialize + Sync,
	{
		self.reject_request(Flow::Consent, challenge, body).await
	}

	/// Fetches information on a logout request.
	pub async fn logout_request<T>(&self, challenge: &Challenge) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.get_request(Flow::Logout, challenge).await
	}

	/// Accepts a logout request with an empty JSON object body.
	pub async fn accept_logout_request<T>(&self, challenge: &Challenge) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.accept_request(Flow::Logout, challenge, &Map::new()).await
	}

	/// Rejects a logout request with an empty JSON object body.
	///
	/// Hydra answers with `204 No Content`, so `T = ()` is the usual choice.
	pub async fn reject_logout_request<T>(&self, challenge: &Challenge) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.reject_request(Flow::Logout, challenge, &Map::new()).await
	}

	async fn decide<T, B>(
		&self,
		flow: Flow,
		action: FlowAction,
		challenge: &Challenge,
		body: &B,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize + Sync,
	{
		let operation = action.operation();

		admin::observe(operation, Some(flow), async move {
			let url = admin::request_url(&self.config.admin_url, flow, Some(action), challenge)?;
			let body = admin::json_body(body)?;
			let request = admin::build_request(Method::PUT, &url, Some(JSON), body)?;

			self.send(self.admin_http.as_ref(), operation, request).await
		})
		.await
	}
}
