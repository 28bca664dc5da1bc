//! App builder - constructs and runs the Curricula application

use std::sync::Arc;

use crate::meta_adapter::MetaAdapter;
use crate::prelude::*;
use crate::{routes, webserver};
pub use curricula_core::app::{App, AppBuilderOpts, AppState, VERSION};

pub struct AppBuilder {
	listen: Box<str>,
	jwt_secret: Option<Box<str>>,
	meta_adapter: Option<Arc<dyn MetaAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		AppBuilder { listen: "127.0.0.1:3000".into(), jwt_secret: None, meta_adapter: None }
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.listen = listen.into();
		self
	}
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self {
		self.jwt_secret = Some(jwt_secret.into());
		self
	}

	// Adapters
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.meta_adapter = Some(meta_adapter);
		self
	}

	pub async fn run(self) -> ClResult<()> {
		info!("Curricula V{}", VERSION);

		let Some(meta_adapter) = self.meta_adapter else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::Internal("No meta adapter configured".to_string()));
		};
		let Some(jwt_secret) = self.jwt_secret.filter(|s| !s.is_empty()) else {
			error!("FATAL: No JWT secret configured");
			return Err(Error::ConfigError("JWT secret is required".to_string()));
		};

		let app: App = Arc::new(AppState {
			opts: AppBuilderOpts { listen: self.listen, jwt_secret },
			meta_adapter,
		});
		debug!(opts = ?app.opts, "Application state initialized");

		let router = routes::init(app.clone());
		webserver::serve(&app, router).await
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
