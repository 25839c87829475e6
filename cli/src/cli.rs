use clap::{Parser, Subcommand};

use aimharder_core::DEFAULT_BASE_URL;

#[derive(Debug, Parser)]
#[command(
    name = "aimharder",
    about = "Query the Aimharder external API",
    author,
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Session token of an earlier login. Takes precedence over mail and password.
    #[arg(long, env = "AIMHARDER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "AIMHARDER_MAIL")]
    pub mail: Option<String>,

    #[arg(long, env = "AIMHARDER_PW", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Dump every request and response.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the profile of the logged in user.
    Me,
    /// List the upcoming class reservations in a box.
    NextBookings {
        /// Box id, defaults to the box of the logged in user.
        #[arg(long = "box")]
        box_id: Option<String>,
    },
}
