mod cli;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use aimharder_core::{ApiClient, CancellationToken, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine, the variables may come from the environment.
    let _ = dotenvy::dotenv();
    let cli = cli::Cli::parse();
    init_tracing(cli.debug)?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    run(cli, &cancel).await
}

fn init_tracing(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}

async fn connect(cli: &cli::Cli, cancel: &CancellationToken) -> Result<ApiClient> {
    let config = ClientConfig::default()
        .with_base_url(cli.base_url.clone())
        .with_debug(cli.debug);

    if let Some(token) = cli.token.as_deref().filter(|token| !token.is_empty()) {
        return ApiClient::new(token, config).context("building client");
    }

    let (Some(mail), Some(password)) = (cli.mail.as_deref(), cli.password.as_deref()) else {
        bail!("set AIMHARDER_TOKEN, or AIMHARDER_MAIL and AIMHARDER_PW");
    };

    ApiClient::login(mail, password, config, cancel).await.context("logging in")
}

async fn run(cli: cli::Cli, cancel: &CancellationToken) -> Result<()> {
    let client = connect(&cli, cancel).await?;

    match cli.command {
        cli::Commands::Me => {
            let me = client.users().me(cancel).await.context("fetching profile")?;
            println!("{}", serde_json::to_string_pretty(&me)?);
        }
        cli::Commands::NextBookings { box_id } => {
            let box_id = match box_id {
                Some(box_id) => box_id,
                None => client.users().me(cancel).await.context("fetching profile")?.box_id,
            };
            let bookings = client
                .bookings()
                .next(&box_id, cancel)
                .await
                .context("listing bookings")?;
            println!("{}", serde_json::to_string_pretty(&bookings)?);
        }
    }

    Ok(())
}
