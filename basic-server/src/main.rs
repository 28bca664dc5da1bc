use std::{env, path, sync::Arc};

use curricula::error::{ClResult, Error};
use curricula_meta_adapter_sqlite::MetaAdapterSqlite;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub jwt_secret: String,
}

impl Config {
	fn from_env() -> ClResult<Self> {
		let jwt_secret = env::var("JWT_SECRET")
			.ok()
			.filter(|s| !s.is_empty())
			.ok_or_else(|| Error::ConfigError("JWT_SECRET must be set".to_string()))?;

		Ok(Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			jwt_secret,
		})
	}
}

#[tokio::main]
async fn main() -> ClResult<()> {
	let mut builder = curricula::AppBuilder::new();
	let config = Config::from_env()?;

	let meta_adapter = Arc::new(MetaAdapterSqlite::new(&config.db_dir).await?);

	builder.listen(config.listen).jwt_secret(config.jwt_secret).meta_adapter(meta_adapter);
	builder.run().await
}

// vim: ts=4
