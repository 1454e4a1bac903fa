use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use agd_bot::{DigestScheduler, DigestService, TelegramBot};
use agd_core::{
    CategoryConfig, DigestConfig, Error, KeywordConfig, Language, Result, ScrapeConfig,
    SourceCredibility,
};
use agd_inference::{create_summarizer, InferenceConfig, ModelRanker};
use agd_pipeline::{Categorizer, DigestFormatter, DigestPipeline, HeuristicRanker, Ranker, RelevanceFilter};
use agd_scrapers::SourceManager;
use agd_web::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Agriculture market news digest", long_about = None)]
struct Cli {
    /// Digest language: ru or en
    #[arg(long, default_value = "ru")]
    language: String,
    /// Maximum number of articles in the digest
    #[arg(long, default_value_t = 8)]
    max_articles: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the digest once and print it
    Digest {
        /// Disable AI summarization and AI ranking
        #[arg(long)]
        no_ai: bool,
    },
    /// Run the Telegram bot, the daily scheduler and the health server
    Run {
        /// Daily delivery time, HH:MM UTC
        #[arg(long, default_value = "08:00")]
        schedule: String,
        /// Health server port (falls back to the PORT env var, then 8080)
        #[arg(long)]
        port: Option<u16>,
    },
    /// List configured news sources
    Sources,
}

fn inference_config(language: Language) -> InferenceConfig {
    let defaults = InferenceConfig::default();
    InferenceConfig {
        api_key: std::env::var("OPENAI_API_KEY").ok(),
        base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
        model_name: std::env::var("OPENAI_MODEL").unwrap_or(defaults.model_name),
        language,
    }
}

fn build_service(language: Language, max_articles: usize, use_ai: bool) -> Result<DigestService> {
    let keywords = KeywordConfig::for_language(language);
    keywords.validate()?;

    let mut digest_config = DigestConfig::for_language(language);
    digest_config.max_articles = max_articles;
    digest_config.validate()?;

    let fallback = HeuristicRanker::new(&keywords, SourceCredibility::default(), max_articles);
    let mut ranker = Ranker::new(fallback);
    let mut formatter = DigestFormatter::new(digest_config);

    if use_ai {
        let inference = inference_config(language);
        match create_summarizer(&inference) {
            Some(summarizer) => {
                info!(summarizer = summarizer.name(), "AI summarization enabled");
                formatter = formatter.with_summarizer(summarizer);
                let api_key = inference.api_key.clone().unwrap_or_default();
                ranker = ranker.with_strategy(Box::new(ModelRanker::new(
                    api_key,
                    inference.base_url.clone(),
                    inference.model_name.clone(),
                    max_articles,
                )));
            }
            None => {
                info!("no API key configured, running with local heuristics only");
            }
        }
    }

    let pipeline = DigestPipeline::new(
        RelevanceFilter::new(&keywords),
        ranker,
        Categorizer::new(CategoryConfig::for_language(language)),
        formatter,
    );
    let sources = SourceManager::new(ScrapeConfig::default())?.with_default_sources();
    Ok(DigestService::new(sources, pipeline, language))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let language: Language = cli.language.parse()?;

    match cli.command {
        Commands::Digest { no_ai } => {
            let service = build_service(language, cli.max_articles, !no_ai)?;
            let message = service.generate_message().await;
            println!("{}", message);
        }
        Commands::Run { schedule, port } => {
            let service = Arc::new(build_service(language, cli.max_articles, true)?);

            let token = std::env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|_| Error::Config("TELEGRAM_BOT_TOKEN is not set".to_string()))?;
            let channel_id = std::env::var("TELEGRAM_CHANNEL_ID")
                .unwrap_or_else(|_| "@agro_digest".to_string());
            let bot = Arc::new(TelegramBot::new(token, channel_id, service.clone())?);
            let scheduler = DigestScheduler::new(bot.clone(), &schedule)?;

            let port = port
                .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
                .unwrap_or(8080);
            let state = AppState {
                service: service.clone(),
            };

            info!(port, schedule = %schedule, "starting Agro Digest");
            tokio::select! {
                result = agd_web::serve(state, port) => result?,
                _ = scheduler.run() => {},
                result = bot.run() => result?,
                _ = tokio::signal::ctrl_c() => {
                    info!("received ctrl-c, shutting down");
                }
            }
        }
        Commands::Sources => {
            let manager = SourceManager::new(ScrapeConfig::default())?.with_default_sources();
            println!("Configured sources:");
            for metadata in manager.sources() {
                println!("  - {} ({})", metadata.name, metadata.url);
            }
        }
    }

    Ok(())
}
