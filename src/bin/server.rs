use anyhow::Context;
use clap::Parser;
use the_books::{
    cli_args::CliArgs,
    server::{Server, ServerConfig},
};

fn init_tracing() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish(),
    )
    .context("Failed to set global tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "server=info,the_books=debug,tower_http=info");
    }

    init_tracing()?;

    let cli_args = CliArgs::parse();

    tracing::info!("Starting ...");

    let mut server_config = match cli_args.config_file {
        Some(config_file) => ServerConfig::from_config_file(config_file).await?,
        None => ServerConfig::default(),
    };

    if let Some(address) = cli_args.address {
        server_config = server_config.with_socket_address(address);
    }

    let server = Server::new(server_config);

    if let Err(err) = server.run().await {
        tracing::error!(err = format!("{err:#}"), "Server terminated");

        return Err(err);
    }

    Ok(())
}
