#![allow(clippy::uninlined_format_args)]

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use crate::commands::assert::Expectation;
use webassert::{DEFAULT_ASSERT_LOGLEVEL, Result, Settings, timestr};

const EXIT_SUCCESS: i32 = 0;

#[derive(Parser)]
#[command(name = "webassert")]
#[command(about = "Page assertions and element highlighting over WebDriver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    session: SessionArgs,
}

/// Overrides for settings read from WEBASSERT_* variables
#[derive(Args)]
struct SessionArgs {
    /// Browser to use (firefox, chrome)
    #[arg(long, global = true)]
    browser: Option<String>,

    /// WebDriver endpoint
    #[arg(long, global = true)]
    webdriver_url: Option<String>,

    /// Run browser in visible mode (disables headless)
    #[arg(long = "no-headless", global = true)]
    no_headless: bool,

    /// Default timeout, e.g. "5 s" or "1 min"
    #[arg(long, global = true)]
    timeout: Option<String>,

    /// Log file of the run ("NONE" for no log file)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Output directory of the run
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

impl SessionArgs {
    fn apply(self, settings: &mut Settings) -> Result<()> {
        if let Some(browser) = self.browser {
            settings.browser = browser.parse()?;
        }
        if let Some(url) = self.webdriver_url {
            settings.webdriver_url = Some(url);
        }
        if self.no_headless {
            settings.headless = false;
        }
        if let Some(timeout) = self.timeout {
            settings.default_timeout = timestr::timestr_to_duration(&timeout)?;
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = Some(log_file).filter(|p| p.as_os_str() != "NONE");
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = Some(output_dir);
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fail unless the page contains an element matching the locator
    Contains {
        /// URL to open
        url: String,

        /// Locator, e.g. "css:.card", "xpath://h1", "id:login"
        locator: String,

        /// Element kind used in messages (e.g. button, link)
        #[arg(long)]
        tag: Option<String>,

        /// Custom failure message
        #[arg(long)]
        message: Option<String>,

        /// Level the page source is logged at on failure ("NONE" to skip)
        #[arg(long, default_value = DEFAULT_ASSERT_LOGLEVEL)]
        loglevel: String,
    },

    /// Fail if the page contains an element matching the locator
    NotContains {
        /// URL to open
        url: String,

        /// Locator, e.g. "css:.card", "xpath://h1", "id:login"
        locator: String,

        /// Element kind used in messages (e.g. button, link)
        #[arg(long)]
        tag: Option<String>,

        /// Custom failure message
        #[arg(long)]
        message: Option<String>,

        /// Level the page source is logged at on failure ("NONE" to skip)
        #[arg(long, default_value = DEFAULT_ASSERT_LOGLEVEL)]
        loglevel: String,
    },

    /// Outline matching elements in red, hold, then restore their style
    Highlight {
        /// URL to open
        url: String,

        /// Locator, e.g. "css:.card"
        locator: String,

        /// How long to keep the highlight (defaults to the session timeout)
        #[arg(long)]
        hold: Option<String>,
    },

    /// Print the directory log artifacts are written to
    LogDir {
        /// Resolve as if no run were active
        #[arg(long)]
        no_run: bool,
    },
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": err.to_string(),
                "exit_code": err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webassert=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    cli.session.apply(&mut settings)?;

    match cli.command {
        Commands::Contains {
            url,
            locator,
            tag,
            message,
            loglevel,
        } => {
            commands::assert::handle_assert(
                &settings,
                Expectation::Contains,
                url,
                locator,
                tag,
                message,
                loglevel,
            )
            .await?
        }

        Commands::NotContains {
            url,
            locator,
            tag,
            message,
            loglevel,
        } => {
            commands::assert::handle_assert(
                &settings,
                Expectation::NotContains,
                url,
                locator,
                tag,
                message,
                loglevel,
            )
            .await?
        }

        Commands::Highlight { url, locator, hold } => {
            commands::highlight::handle_highlight(&settings, url, locator, hold).await?
        }

        Commands::LogDir { no_run } => commands::log_dir::handle_log_dir(&settings, no_run)?,
    }

    Ok(())
}
