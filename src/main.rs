//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use mrdaniel_news::adapters::ai::{GeminiAdapter, MockAiAdapter};
use mrdaniel_news::adapters::clock::SystemClock;
use mrdaniel_news::adapters::export::FsReportSink;
use mrdaniel_news::adapters::ui::tui::TuiInputPort;
use mrdaniel_news::domain::LocaleBundle;
use mrdaniel_news::ports::{AiPort, ClockPort, InputPort, ReportPort};
use mrdaniel_news::shared::config::AppConfig;
use mrdaniel_news::usecases::{AppState, ChatService, ExportService, NewsDesk, NewsService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed; using defaults");
        AppConfig::default()
    });

    // --- Locale: resolved once here, injected into state ---
    let language = cfg.language();
    info!(
        language = language.code(),
        tag = cfg.language_tag().as_deref().unwrap_or("-"),
        "locale resolved"
    );
    mrdaniel_news::adapters::ui::init_ui(LocaleBundle::for_language(language));

    // --- AI provider ---
    let ai: Arc<dyn AiPort> = match cfg.api_key() {
        Some(api_key) => {
            info!(
                model = %cfg.model_or_default(),
                url = %cfg.api_base_url_or_default(),
                "AI provider enabled with Gemini adapter"
            );
            Arc::new(GeminiAdapter::new(
                cfg.api_base_url_or_default(),
                api_key,
                cfg.model_or_default(),
            ))
        }
        None => {
            warn!("MRDANIEL_API_KEY / GEMINI_API_KEY not set, using mock AI adapter");
            Arc::new(MockAiAdapter::new())
        }
    };

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let reports_dir = PathBuf::from(cfg.reports_dir_or_default());
    info!(path = %reports_dir.display(), "reports directory");
    let sink: Arc<dyn ReportPort> = Arc::new(FsReportSink::new(&reports_dir));

    // --- Services ---
    let desk = Arc::new(NewsDesk::new(
        AppState::new(language, cfg.default_category()),
        NewsService::new(Arc::clone(&ai), Arc::clone(&clock)),
        ChatService::new(Arc::clone(&ai), Arc::clone(&clock)),
        ExportService::new(sink, Arc::clone(&clock)),
        clock,
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(desk));

    // --- Run (menu -> Category / Refresh / Story / Chat / Export / Language) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
