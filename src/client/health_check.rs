//! Provider reachability and credential check.

// self
use crate::{
	_prelude::*,
	classify,
	client::Client,
	consts::HEALTH_CHECK_ENDPOINT,
	http::ProviderHttpClient,
	model::{HealthCheckRequest, HealthCheckResponse},
	obs::{self, CallKind},
};

impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Calls the health check endpoint to confirm the provider is reachable and accepts
	/// this client's credentials.
	///
	/// Resolves with the provider body unchanged when `stat` is `"OK"`; every other
	/// outcome is an [`Error`] whose message comes from the body, or from the transport
	/// when no body exists.
	pub async fn health_check(&self) -> Result<HealthCheckResponse> {
		obs::observe(CallKind::HealthCheck, async {
			let audience = self.config.endpoint_url(HEALTH_CHECK_ENDPOINT);
			let request = HealthCheckRequest {
				client_id: self.config.client_id().to_owned(),
				client_assertion: self.assertion_builder().build(&audience)?,
			};
			let payload = self.post_form(&audience, &request.form_pairs()).await?;

			classify::classify_health_check(payload)
		})
		.await
	}
}
