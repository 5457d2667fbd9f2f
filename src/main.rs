use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::io;
use std::process;
use udemy_stats::config::{
    BASE_URL_VAR, PAGE_SIZE_VAR, STATEMENT_VAR, TIMEOUT_VAR, TOKEN_VAR,
};
use udemy_stats::{Client, Config, ConfigError, Credentials};

#[derive(Debug, Parser)]
#[command(
    name = "udemy-stats",
    version,
    about = "Daily sales report for a Udemy instructor statement"
)]
struct Cli {
    /// API token; falls back to UDEMY_TOKEN env var
    #[arg(long, env = TOKEN_VAR, hide_env_values = true)]
    token: Option<String>,

    /// Statement id; falls back to UDEMY_STATEMENT env var
    #[arg(long, env = STATEMENT_VAR)]
    statement: Option<String>,

    /// Records requested per endpoint (default 500)
    #[arg(long, env = PAGE_SIZE_VAR)]
    page_size: Option<String>,

    /// API base URL
    #[arg(long, env = BASE_URL_VAR)]
    base_url: Option<String>,

    /// Request timeout in seconds (default 30)
    #[arg(long, env = TIMEOUT_VAR)]
    timeout: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<Config, ConfigError> {
        let config = Config::new(Credentials::new(self.token, self.statement)?)
            .with_page_size(self.page_size)?
            .with_base_url(self.base_url)
            .with_timeout(self.timeout)?;
        config.log_loaded();
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            println!("{err}");
            process::exit(1);
        }
    };

    let client = Client::new(config)?;
    udemy_stats::run(&client, Local::now().naive_local(), &mut io::stdout()).await?;

    Ok(())
}
