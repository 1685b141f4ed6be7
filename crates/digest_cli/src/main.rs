use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;
use digest_client::{create_source, init_logging, ClientConfig, RefreshController, RefreshOutcome, StalePolicy};
use digest_core::node::fragment_html;
use digest_core::{dates, validate, ArticleRecord, FixtureSet, Timeframe, TimeframeResponse};
use digest_page::{render_articles, MemoryDocument};
use digest_web::AppState;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let multiplier = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(multiplier)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render and refresh summarized article listings", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render an article list (JSON array or response envelope) as HTML
    Render {
        file: PathBuf,
    },
    /// Change the timeframe on an in-memory page and print the result
    Refresh {
        #[arg(long, default_value = "weekly")]
        timeframe: Timeframe,
        /// Backend base URL; falls back to DIGEST_BASE_URL
        #[arg(long)]
        base_url: Option<String>,
        /// Answer from a fixtures file instead of the backend
        #[arg(long)]
        fixtures: Option<PathBuf>,
        #[arg(long)]
        preference_id: Option<String>,
        /// Request timeout (e.g. 30s, 1m)
        #[arg(long)]
        timeout: Option<HumanDuration>,
        /// arrival | discard-stale
        #[arg(long, default_value = "arrival")]
        stale_policy: StalePolicy,
    },
    /// Run the stub backend serving fixtures
    Serve {
        #[arg(long)]
        fixtures: PathBuf,
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
        #[arg(long, default_value = "weekly")]
        timeframe: Timeframe,
        #[arg(long)]
        preference_id: Option<String>,
    },
    /// Format a date as MM/DD/YYYY
    FormatDate {
        date: String,
        /// Use the long "Month D, YYYY" form
        #[arg(long)]
        long: bool,
    },
    /// Check that an e-mail address is well formed
    CheckEmail {
        email: String,
    },
    /// Print the first day covered by a timeframe
    Since {
        timeframe: Timeframe,
        /// Count back from this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn load_articles(path: &Path) -> anyhow::Result<Vec<ArticleRecord>> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if let Ok(articles) = serde_json::from_str::<Vec<ArticleRecord>>(&json) {
        return Ok(articles);
    }
    let envelope: TimeframeResponse =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(envelope.into_articles()?)
}

async fn refresh(
    timeframe: Timeframe,
    base_url: Option<String>,
    fixtures: Option<PathBuf>,
    preference_id: Option<String>,
    timeout: Option<HumanDuration>,
    stale_policy: StalePolicy,
) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env()?.with_stale_policy(stale_policy);
    if let Some(url) = base_url {
        config = config.with_base_url(&url);
    }
    if let Some(timeout) = timeout {
        config = config.with_timeout(timeout.0);
    }

    let fixtures = fixtures.map(FixtureSet::load).transpose()?;
    let source = create_source(&config, fixtures)?;
    info!("🔌 Using {} article source", source.name());

    let document = Arc::new(MemoryDocument::standard_page(
        &config.layout,
        Timeframe::Daily,
        preference_id.as_deref(),
    ));
    let Some(controller) = RefreshController::bind(document.clone(), source, &config) else {
        bail!("timeframe selector missing from page");
    };

    document.set_value(&config.layout.timeframe_select, timeframe.as_str());
    match controller.handle_change().await {
        RefreshOutcome::Rendered(count) => info!("✨ Rendered {} summaries", count),
        RefreshOutcome::Failed(message) => eprintln!("⚠️ {}", message),
        RefreshOutcome::Superseded => info!("⏭️ Response superseded"),
    }

    println!("{}", document.inner_html(&config.layout.articles_container).unwrap_or_default());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Render { file } => {
            let articles = load_articles(&file)?;
            info!("📰 Rendering {} articles from {}", articles.len(), file.display());
            println!("{}", fragment_html(&render_articles(&articles)));
        }
        Commands::Refresh {
            timeframe,
            base_url,
            fixtures,
            preference_id,
            timeout,
            stale_policy,
        } => {
            refresh(timeframe, base_url, fixtures, preference_id, timeout, stale_policy).await?;
        }
        Commands::Serve {
            fixtures,
            addr,
            timeframe,
            preference_id,
        } => {
            let fixtures = FixtureSet::load(&fixtures)?;
            let mut state = AppState::new(fixtures).with_default_timeframe(timeframe);
            if let Some(id) = preference_id.as_deref() {
                state = state.with_preference_id(id);
            }
            digest_web::serve(addr, state, |_| {}).await?;
        }
        Commands::FormatDate { date, long } => {
            if long {
                println!("{}", dates::format_long_date(&date));
            } else {
                println!("{}", dates::format_date(&date));
            }
        }
        Commands::CheckEmail { email } => {
            if validate::is_valid_email(&email) {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
        Commands::Since { timeframe, today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            println!("{}", timeframe.start_date(today).format("%Y-%m-%d"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_human_duration() {
        assert_eq!("30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(30));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("45".parse::<HumanDuration>().unwrap().0, Duration::from_secs(45));
        assert!("5d".parse::<HumanDuration>().is_err());
        assert!("".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_rejects_overflow() {
        let max = u64::MAX;
        assert_eq!(
            format!("{}h", max).parse::<HumanDuration>().unwrap_err(),
            "Duration too large"
        );
        assert_eq!(
            format!("{}s1s", max).parse::<HumanDuration>().unwrap_err(),
            "Duration too large"
        );
        assert_eq!(
            format!("1s{}", max).parse::<HumanDuration>().unwrap_err(),
            "Duration too large"
        );
    }

    #[test]
    fn test_parse_refresh_args() {
        let cli = Cli::try_parse_from(["digest", "refresh", "--timeframe", "Quarterly", "--stale-policy", "discard-stale"]).unwrap();
        match cli.command {
            Commands::Refresh { timeframe, stale_policy, .. } => {
                assert_eq!(timeframe, Timeframe::Quarterly);
                assert_eq!(stale_policy, StalePolicy::DiscardStale);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_load_articles_accepts_list_and_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("list.json");
        let envelope = dir.path().join("envelope.json");
        std::fs::write(&list, r#"[{"title":"A"},{"title":"B"}]"#).unwrap();
        std::fs::write(&envelope, r#"{"success":true,"articles":[{"title":"C"}]}"#).unwrap();

        assert_eq!(load_articles(&list).unwrap().len(), 2);
        assert_eq!(load_articles(&envelope).unwrap()[0].title, "C");
    }

    #[test]
    fn test_load_articles_reports_failed_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.json");
        std::fs::write(&path, r#"{"success":false,"error":"bad range"}"#).unwrap();

        let err = load_articles(&path).unwrap_err();
        assert_eq!(err.to_string(), "bad range");
    }
}
