use anyhow::Context;
use reqwest::Client;
use tracing_subscriber::{EnvFilter, fmt};

use shift_signup::modules::shifts::use_cases::register_volunteer::decide::SignUpPolicy;
use shift_signup::shell::config::Config;
use shift_signup::shell::http::router;
use shift_signup::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env().context("reading configuration")?;
    let client = Client::builder()
        .user_agent("shift-signup")
        .build()
        .context("building http client")?;

    let stores = config.stores(&client).context("building table stores")?;
    let state = AppState::new(
        config.page_title.clone(),
        SignUpPolicy {
            require_email: config.require_email,
        },
        config.roster_layout.clone(),
        stores.roster,
        stores.registrations,
    );

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!("Sign-up page: http://{}/", config.bind_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
