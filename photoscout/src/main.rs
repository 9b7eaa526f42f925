mod cli;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use photoscout_core::{
    config::{self, Config},
    gateway::{FlickrGateway, PhotoGateway},
};
use photoscout_tui::{RunOptions, Theme};
use std::{path::PathBuf, process::ExitCode, sync::Arc};

#[derive(Parser)]
#[command(version, about = "Incremental Flickr image search in the terminal")]
struct Cli {
    /// Override path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Flickr API key (overrides PHOTOSCOUT_API_KEY and the config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Log level written to the log file
    #[arg(long, global = true, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once and print a single page of results
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        json: bool,
        /// Do not record the query in the search history
        #[arg(long)]
        no_history: bool,
    },
    /// Print the default feed of recent photos
    Recent {
        #[arg(long)]
        json: bool,
    },
    /// List saved searches, oldest first
    History {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_errors = command_wants_json(cli.command.as_ref());

    if let Err(e) = logging::setup_logging(cli.log_level) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            let cli_error = cli::CliError::system(format!("{error:#}"));
            cli::print_error(&cli_error, json_errors);
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Some(Commands::Search {
            query,
            page,
            json,
            no_history,
        }) => gateway(&config, cli.api_key.as_deref()).and_then(|gateway| {
            let mut history = cli::open_history(&config.history);
            let args = cli::SearchArgs {
                query,
                page,
                json,
                no_history,
            };
            cli::cmd_search(gateway.as_ref(), &mut history, &args)
        }),
        Some(Commands::Recent { json }) => gateway(&config, cli.api_key.as_deref())
            .and_then(|gateway| cli::cmd_recent(gateway.as_ref(), json)),
        Some(Commands::History { json }) => {
            let history = cli::open_history(&config.history);
            cli::cmd_history(&history, json)
        }
        None => gateway(&config, cli.api_key.as_deref())
            .and_then(|gateway| run_tui(&config, gateway).map_err(cli::CliError::from)),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            cli::print_error(&error, json_errors);
            let code: u8 = match error.code() {
                1 => 1,
                _ => 2,
            };
            ExitCode::from(code)
        }
    }
}

fn gateway(config: &Config, api_key: Option<&str>) -> cli::CliResult<Arc<dyn PhotoGateway>> {
    let api_key = config.resolved_api_key(api_key);
    if api_key.is_none() {
        log::warn!("No API key configured; every request will fail");
    }
    let gateway = FlickrGateway::new(api_key, &config.api)?;
    Ok(Arc::new(gateway))
}

fn run_tui(config: &Config, gateway: Arc<dyn PhotoGateway>) -> Result<()> {
    let history = cli::open_history(&config.history);
    let options = RunOptions {
        debounce: config.search.debounce(),
        scroll_threshold: config.search.scroll_threshold,
    };
    let theme = Theme::from_config(&config.theme);

    let mut terminal = ratatui::init();
    let result = photoscout_tui::run(&mut terminal, gateway, history, &options, &theme);
    ratatui::restore();
    result
}

fn command_wants_json(command: Option<&Commands>) -> bool {
    match command {
        Some(
            Commands::Search { json, .. } | Commands::Recent { json } | Commands::History { json },
        ) => *json,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from(["photoscout", "search", "cats", "--page", "2", "--json"])
            .unwrap();
        let Some(Commands::Search {
            query, page, json, ..
        }) = cli.command
        else {
            panic!("expected search command");
        };
        assert_eq!(query, "cats");
        assert_eq!(page, 2);
        assert!(json);
        assert_eq!(cli.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "photoscout",
            "history",
            "--api-key",
            "k",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["photoscout"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!command_wants_json(cli.command.as_ref()));
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
