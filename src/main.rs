use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voc_writer::{app, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = app::Args::parse();
    let config = config::get_configuration()?;
    let log_level = config.log_level.as_str();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_level(true))
        .init();

    app::run(args, config).await
}
