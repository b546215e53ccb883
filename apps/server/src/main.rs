use clap::Parser;
use cryptomotor_server::api::app_router;
use cryptomotor_server::config::{Cli, Config};
use cryptomotor_server::{build_state, init_tracing, metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    init_tracing(config.debug);

    let metrics_handle = metrics::install()?;
    let state = build_state(&config, Some(metrics_handle));

    let router = app_router(state, &config);
    let addr = format!("{}:{}", config.listen_host, config.port);
    tracing::info!("Starting cryptomotor daemon, listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;
    Ok(())
}
