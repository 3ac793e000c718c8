use turnstile::App;
use turnstile::config::Config;
use turnstile::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let app = App::from_config(&cfg);

    tokio::select! {
        res = server::listener::run(&cfg, app) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
