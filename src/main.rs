mod analysis;
mod api;
mod cache;
mod config;
mod display;
mod error;
mod logging;
mod pipeline;
mod rate_limit;
mod region;
mod server;
mod static_data;

use api::client::RiotApiClient;
use clap::{Parser, Subcommand};
use config::Config;
use display::output::{display_error, display_json, display_matchups, display_success};
use indicatif::ProgressBar;
use pipeline::{MatchupFinder, MatchupQuery};
use rate_limit::RateGovernor;
use static_data::{ddragon, StaticData};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "League Matchup")]
#[command(about = "Find ranked games where a player's champion faced a given enemy champion", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one matchup query and print the result
    Query {
        /// Platform region (na1, euw1, kr, ...)
        region: String,

        /// Summoner name
        summoner: String,

        /// Champion the player was on
        champion: String,

        /// Champion on the opposing team
        enemy_champion: String,

        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,

        /// Always fetch match details from the API
        #[arg(long)]
        no_cache: bool,
    },

    /// Serve the matchup query over HTTP
    Serve {
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },

    /// Download Data Dragon lookup tables into STATIC_DATA_DIR
    FetchStatic {
        /// Data Dragon version (default: latest)
        #[arg(long)]
        version: Option<String>,

        /// Target directory (overrides STATIC_DATA_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Query {
            region,
            summoner,
            champion,
            enemy_champion,
            json,
            no_cache,
        } => {
            let config = Config::from_env()?;
            let static_data = StaticData::load(&config.static_data_dir)?;
            let governor = Arc::new(RateGovernor::new(config.rate_policy.clone()));
            let mut client = RiotApiClient::new(config, governor);
            if no_cache {
                client = client.with_cache(None);
            }

            let query = MatchupQuery {
                region,
                summoner,
                champion,
                enemy_champion,
            };

            let spinner = (!json).then(|| {
                let pb = ProgressBar::new_spinner();
                pb.set_message(format!("Searching {}'s ranked games...", query.summoner));
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            });
            let result = MatchupFinder::new(&client, &static_data).find(&query);
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            let records = result?;
            if json {
                display_json(&records)?;
            } else {
                display_matchups(&records, &query.champion, &query.enemy_champion);
            }
        }
        Command::Serve { port } => {
            let config = Config::from_env()?;
            let static_data = Arc::new(StaticData::load(&config.static_data_dir)?);
            let governor = Arc::new(RateGovernor::new(config.rate_policy.clone()));
            let client = Arc::new(RiotApiClient::new(config, governor));

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(
                server::AppState::new(client, static_data),
                port,
            ))?;
        }
        Command::FetchStatic { version, dir } => {
            dotenvy::dotenv().ok();
            let dir = dir
                .or_else(|| std::env::var("STATIC_DATA_DIR").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("static"));

            let version = ddragon::download(ddragon::DATA_DRAGON_URL, &dir, version.as_deref())?;
            display_success(&format!(
                "Data Dragon {} written to {}",
                version,
                dir.display()
            ));
        }
    }

    Ok(())
}
