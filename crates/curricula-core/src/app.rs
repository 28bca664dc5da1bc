//! App state type

use std::sync::Arc;

use curricula_types::meta_adapter::MetaAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub meta_adapter: Arc<dyn MetaAdapter>,
}

pub type App = Arc<AppState>;

pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// HS256 key of the access tokens
	pub jwt_secret: Box<str>,
}

impl std::fmt::Debug for AppBuilderOpts {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppBuilderOpts")
			.field("listen", &self.listen)
			.field("jwt_secret", &"***")
			.finish()
	}
}

// vim: ts=4
