use anyhow::Context;
use clap::{Parser, Subcommand};
use freshmark_core::config::{PricingConfig, Settings};
use freshmark_core::domain::features::{FeatureInput, FeatureVector};
use freshmark_core::pricing::ml::HttpPricingService;
use freshmark_core::pricing::PricePredictor;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod products;

#[derive(Debug, Parser)]
#[command(name = "freshmark_worker")]
struct Args {
    /// Surface prediction failures instead of falling back to the pricing rules.
    #[arg(long, global = true)]
    no_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price a single product from its features.
    Quote {
        #[arg(long)]
        current_price: f64,
        #[arg(long, allow_hyphen_values = true)]
        days_to_expiry: i64,
        #[arg(long)]
        stock_level: i64,
        #[arg(long)]
        demand_score: f64,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        historical_sales: Option<f64>,
        /// Lower-case weekday name. Defaults to monday.
        #[arg(long)]
        day_of_week: Option<String>,
        /// Use the pricing rules only; never call the prediction service.
        #[arg(long)]
        offline: bool,
    },

    /// Price every product in a JSON export of product records.
    PriceProducts {
        #[arg(long)]
        input: std::path::PathBuf,
        /// Pricing time as RFC 3339. Defaults to the local clock.
        #[arg(long)]
        now: Option<String>,
        #[arg(long)]
        offline: bool,
    },

    /// Check that the prediction service is reachable.
    Health,

    /// Show what model the prediction service has loaded.
    ModelInfo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // `--help` and usage errors must not depend on the environment being valid.
    let args = Args::parse();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let res = run(args, &settings).await;
    if let Err(err) = &res {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %err, "worker command failed");
    }
    res
}

async fn run(args: Args, settings: &Settings) -> anyhow::Result<()> {
    match args.command {
        Command::Quote {
            current_price,
            days_to_expiry,
            stock_level,
            demand_score,
            category,
            historical_sales,
            day_of_week,
            offline,
        } => {
            let features = FeatureVector::try_from(FeatureInput {
                current_price: Some(current_price),
                days_to_expiry: Some(days_to_expiry),
                stock_level: Some(stock_level),
                demand_score: Some(demand_score),
                category,
                historical_sales,
                day_of_week,
            })?;

            let result = if offline {
                freshmark_core::pricing::fallback::recommend(&features)
            } else {
                let config = pricing_config(settings, args.no_fallback)?;
                freshmark_core::predict_price(&features, &config).await?
            };

            print_json(&result)
        }
        Command::PriceProducts {
            input,
            now,
            offline,
        } => {
            let now = freshmark_core::time::expiry::resolve_now(now.as_deref())?;
            let config = if offline {
                None
            } else {
                Some(pricing_config(settings, args.no_fallback)?)
            };

            let records = products::load(&input)?;
            let priced = products::price_all(records, &now, config.as_ref()).await;
            print_json(&priced)
        }
        Command::Health => {
            let service = http_service(settings)?;
            let health = service
                .health()
                .await
                .context("prediction service is not reachable")?;
            tracing::info!(
                status = health.status.as_deref().unwrap_or("unknown"),
                model_loaded = ?health.model_loaded,
                "prediction service reachable"
            );
            print_json(&health)
        }
        Command::ModelInfo => {
            let service = http_service(settings)?;
            let info = service
                .model_info()
                .await
                .context("failed to fetch model info")?;
            print_json(&info)
        }
    }
}

fn pricing_config(settings: &Settings, no_fallback: bool) -> anyhow::Result<PricingConfig> {
    let mut config = PricingConfig::from_settings(settings)?;
    if no_fallback {
        config.fallback_enabled = false;
    }
    Ok(config)
}

fn http_service(settings: &Settings) -> anyhow::Result<HttpPricingService> {
    let config = PricingConfig::from_settings(settings)?;
    HttpPricingService::from_config(&config).context("failed to build prediction service client")
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    println!("{out}");
    Ok(())
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
