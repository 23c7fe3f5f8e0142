// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	admin::Flow,
	obs::{CallOutcome, Operation},
};

/// Per-call recorder for `hydra_admin_call_total` and `hydra_admin_call_duration_seconds`.
///
/// Counters are labeled by `operation`, `flow` and `outcome`; failures also carry the error
/// layer (`config`, `transport`, `response` or `claims`). Everything is a no-op unless the
/// `metrics` feature is enabled.
#[derive(Debug)]
pub struct CallRecorder {
	operation: Operation,
	flow: Option<Flow>,
	started: Instant,
}
impl CallRecorder {
	/// Records the attempt and starts the call clock.
	pub fn start(operation: Operation, flow: Option<Flow>) -> Self {
		record_call_outcome(operation, flow, CallOutcome::Attempt, None);

		Self { operation, flow, started: Instant::now() }
	}

	/// Records the outcome and elapsed time of `result`.
	pub fn finish<T>(self, result: &Result<T>) {
		let (outcome, layer) = match result {
			Ok(_) => (CallOutcome::Success, None),
			Err(e) => (CallOutcome::Failure, Some(error_layer(e))),
		};

		record_call_outcome(self.operation, self.flow, outcome, layer);

		#[cfg(feature = "metrics")]
		{
			metrics::histogram!(
				"hydra_admin_call_duration_seconds",
				"operation" => self.operation.as_str(),
				"flow" => flow_label(self.flow),
				"outcome" => outcome.as_str()
			)
			.record(self.started.elapsed().as_secs_f64());
		}

		#[cfg(not(feature = "metrics"))]
		{
			let _ = self.started;
		}
	}
}

/// Increments `hydra_admin_call_total` via the global metrics recorder (when enabled).
pub fn record_call_outcome(
	operation: Operation,
	flow: Option<Flow>,
	outcome: CallOutcome,
	layer: Option<&'static str>,
) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"hydra_admin_call_total",
			"operation" => operation.as_str(),
			"flow" => flow_label(flow),
			"outcome" => outcome.as_str(),
			"layer" => layer.unwrap_or("none")
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, flow, outcome, layer);
	}
}

/// Error layer label recorded for failed calls.
pub fn error_layer(error: &Error) -> &'static str {
	match error {
		Error::Config(_) => "config",
		Error::Transport(_) => "transport",
		Error::Response(_) => "response",
		Error::Claims(_) => "claims",
	}
}

#[cfg(feature = "metrics")]
fn flow_label(flow: Option<Flow>) -> &'static str {
	flow.map_or("none", Flow::as_str)
}
