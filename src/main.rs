use anyhow::Context;
use formsmith::server::{build_router, AppState};
use formsmith::util::{env_bind_addr, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let state = AppState::from_env();
    let missing = state.config.missing();
    if missing.is_empty() {
        tracing::info!(
            model = %state.config.model,
            base_url = %state.config.base_url,
            "Model provider configured"
        );
    } else {
        tracing::warn!(
            missing = ?missing,
            "Model provider not configured; every form request will fail until these are set"
        );
    }

    let addr = env_bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Formsmith listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .await
        .context("server error")?;

    Ok(())
}
