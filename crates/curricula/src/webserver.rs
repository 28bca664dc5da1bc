//! HTTP listener

use axum::Router;
use tokio::net::TcpListener;

use crate::prelude::*;

/// Serve the router on the configured listen address until the process stops
pub async fn serve(app: &App, router: Router) -> ClResult<()> {
	let listener = TcpListener::bind(app.opts.listen.as_ref()).await.inspect_err(|err| {
		error!("FATAL: Cannot listen on {}: {}", app.opts.listen, err);
	})?;
	info!("Listening on HTTP {}", app.opts.listen);

	axum::serve(listener, router).await?;

	Ok(())
}

// vim: ts=4
