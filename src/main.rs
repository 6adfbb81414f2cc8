use anyhow::Context;
use tracing::info;

use process_data_server::{
    app::App,
    config::ServerConfig,
    server::{bind, init_tracing, with_http_layers},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let settings = ServerConfig::load()?;
    info!(
        msg = "Loaded configuration",
        addr = %settings.server.addr(),
        allowed_origins = ?settings.cors.allowed_origins
    );

    let app = with_http_layers(App::new(settings.cors).router()?);

    let addr = settings.server.addr();
    let listener = bind(&addr).await?;

    info!(msg = "Starting server", %addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("server terminated")?;

    Ok(())
}
