use campus_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campus_observability::init();

    let config = Config::from_env();
    let bind = config.bind.clone();
    let app = campus_api::app::build_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
