use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lotto_core::config::Settings;
use lotto_core::error::ResultError;
use lotto_core::results::response::{ResponseBody, ResultSet};
use lotto_core::results::service::{chat_messages, RangeQuery, RelativeWindow, ResultService};
use lotto_core::source::fixture::FixtureDrawSource;
use lotto_core::source::http::HttpJsonDrawSource;
use lotto_core::source::DrawSource;

#[derive(Debug, Parser)]
#[command(name = "lotto_cli")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Game names to keep (repeatable, or comma separated).
    #[arg(long, global = true, value_delimiter = ',')]
    games: Vec<String>,

    /// Render jackpots without the peso sign.
    #[arg(long, global = true)]
    no_peso_sign: bool,

    /// Print chat messages instead of structured results.
    #[arg(long, global = true)]
    chat: bool,

    /// Chat chunk width. Without it the text is split into about nine messages.
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Read draws from a JSON file instead of the HTTP source.
    #[arg(long, global = true)]
    fixture: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draws for today's local date.
    Today,
    /// Draws for yesterday's local date.
    Yesterday,
    /// Draws from three days ago through today.
    Latest,
    /// Draws in an explicit date range.
    Custom {
        /// First date, YYYY/MM/DD.
        #[arg(long)]
        start_date: String,

        /// Last date (inclusive), YYYY/MM/DD.
        #[arg(long)]
        end_date: String,

        /// Weekdays to keep: Mon, Tue, Wed, Thu, Fri, Sat, Sun.
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let fixture = args.fixture.clone().or(settings.draw_source_fixture.clone());
    let source: Arc<dyn DrawSource> = match fixture {
        Some(path) => Arc::new(FixtureDrawSource::from_path(path).await?),
        None => Arc::new(HttpJsonDrawSource::from_settings(&settings)?),
    };
    let service = ResultService::new(source, settings.utc_offset_hours)?;

    let body = match run(&service, &args).await {
        Ok(set) => ResponseBody::from(set),
        Err(err) => {
            if let ResultError::Upstream(cause) = &err {
                sentry_anyhow::capture_anyhow(cause);
            }
            tracing::error!(error = %err, "query failed");
            ResponseBody::failure(&err)
        }
    };

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn run(service: &ResultService, args: &Args) -> Result<ResultSet, ResultError> {
    let games = non_empty(args.games.clone());
    let peso_sign = !args.no_peso_sign;

    let (results, default_width) = match &args.command {
        Command::Custom {
            start_date,
            end_date,
            days,
        } => {
            let query = RangeQuery {
                start_date: start_date.clone(),
                end_date: end_date.clone(),
                days: non_empty(days.clone()),
                games,
                peso_sign,
            };
            (service.results_by_range(query).await?, None)
        }
        Command::Today => relative(service, RelativeWindow::Today, games, peso_sign).await?,
        Command::Yesterday => {
            relative(service, RelativeWindow::Yesterday, games, peso_sign).await?
        }
        Command::Latest => relative(service, RelativeWindow::Latest, games, peso_sign).await?,
    };

    if args.chat {
        let width = args.width.or(default_width);
        Ok(ResultSet::Chat(chat_messages(&results, width)))
    } else {
        Ok(ResultSet::Structured(results))
    }
}

async fn relative(
    service: &ResultService,
    window: RelativeWindow,
    games: Option<Vec<String>>,
    peso_sign: bool,
) -> Result<(Vec<lotto_core::domain::result::FormattedResult>, Option<usize>), ResultError> {
    let results = service.results_relative(window, games, peso_sign).await?;
    Ok((results, Some(window.chat_width())))
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
