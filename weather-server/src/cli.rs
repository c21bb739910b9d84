use anyhow::Context;
use clap::{Parser, Subcommand};
use postal_weather_core::{
    Config, WeatherPipeline,
    provider::{resolver_from_config, temperature_source_from_config},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::routes::{AppState, create_router};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "postal-weather", version, about = "Current temperature by postal code")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve {
        /// Address to listen on; overrides `bind` from the config file.
        #[arg(long, env = "POSTAL_WEATHER_BIND")]
        bind: Option<String>,

        /// WeatherAPI.com key; overrides the key stored in the config file.
        #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind, api_key } => {
                init_tracing();

                let mut config = Config::load()?;
                if let Some(bind) = bind {
                    config.bind = bind;
                }
                if let Some(api_key) = api_key {
                    config.set_weather_api_key(api_key);
                }

                serve(config).await?;
            }
            Command::Configure => configure()?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
        }

        Ok(())
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("postal_weather=info,postal_weather_core=info,tower_http=info")
    });

    tracing_subscriber::registry().with(env_filter).with(tracing_subscriber::fmt::layer()).init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let pipeline = WeatherPipeline::new(
        resolver_from_config(&config)?,
        temperature_source_from_config(&config)?,
    );
    let app = create_router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(config.bind.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    tracing::info!(
        address = %config.bind,
        lookup = %config.lookup.base_url,
        weather = %config.weather.base_url,
        timeout_secs = config.timeout_secs,
        "Starting server"
    );

    axum::serve(listener, app).await.context("HTTP server terminated unexpectedly")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("WeatherAPI.com key:")
        .without_confirmation()
        .with_help_message("Get one at https://www.weatherapi.com/my/")
        .prompt()
        .context("Failed to read API key")?;

    config.set_weather_api_key(api_key);
    config.weather_api_key()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
