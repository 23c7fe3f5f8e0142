// self
use crate::{_prelude::*, admin::Flow, obs::Operation};

/// Query parameters whose values never reach log output.
const REDACTED_QUERY_KEYS: &[&str] = &["id_token", "token"];

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by admin calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided operation and optional flow.
	pub fn new(operation: Operation, flow: Option<Flow>) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"hydra_admin.call",
				operation = operation.as_str(),
				flow = flow.map_or("none", Flow::as_str)
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, flow);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for an outbound request with secrets stripped from the query.
pub fn trace_request(method: &str, url: &Url) {
	#[cfg(feature = "tracing")]
	{
		let url = redact_query(url);

		tracing::debug!(method, url = url.as_str(), "Sending admin request.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, url);
	}
}

/// Warns that certificate and hostname verification are disabled for `url`.
pub fn warn_insecure_tls(url: &Url) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			url = url.as_str(),
			"TLS certificate and hostname verification are disabled for the admin transport."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = url;
	}
}

/// Returns a copy of `url` whose sensitive query values are replaced with `<redacted>`.
pub fn redact_query(url: &Url) -> Url {
	if !url.query_pairs().any(|(key, _)| REDACTED_QUERY_KEYS.contains(&key.as_ref())) {
		return url.clone();
	}

	let pairs = url
		.query_pairs()
		.map(|(key, value)| {
			if REDACTED_QUERY_KEYS.contains(&key.as_ref()) {
				(key.into_owned(), "<redacted>".to_owned())
			} else {
				(key.into_owned(), value.into_owned())
			}
		})
		.collect::<Vec<_>>();
	let mut redacted = url.clone();

	redacted.query_pairs_mut().clear().extend_pairs(pairs);

	redacted
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn redact_query_hides_tokens_only() {
		let url = Url::parse("https://oauth2.googleapis.com/tokeninfo?id_token=abc.def&alt=json")
			.expect("Token-info URL fixture should parse.");
		let redacted = redact_query(&url);

		assert_eq!(
			redacted.as_str(),
			"https://oauth2.googleapis.com/tokeninfo?id_token=%3Credacted%3E&alt=json"
		);

		let plain = Url::parse("http://hydra:4445/oauth2/auth/requests/login?login_challenge=c1")
			.expect("Admin URL fixture should parse.");

		assert_eq!(redact_query(&plain), plain);
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(Operation::FetchRequest, Some(Flow::Login));
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
