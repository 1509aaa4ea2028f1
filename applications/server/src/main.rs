/// Mindful Audio Server - mindfulness audio backend
use clap::{Parser, Subcommand};
use mindful_audio::CommandOutput;
use mindful_core::{MediaProbe, SessionStore};
use mindful_playback::{AssetLibrary, AudioSessionManager};
use mindful_server::{api, config::ServerConfig, state::AppState, tasks};
use mindful_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mindful-server")]
#[command(about = "Mindfulness audio session server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MINDFUL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the duration of an asset
    Duration {
        /// Asset name, relative to the assets directory
        file: String,
    },
    /// List the cues of a session
    Cues {
        /// Session id
        session_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mindful_server=info,mindful_playback=info,mindful_audio=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Duration { file } => print_duration(&config, &file).await?,
        Commands::Cues { session_id } => print_cues(&config, session_id).await?,
    }

    Ok(())
}

async fn open_storage(config: &ServerConfig) -> anyhow::Result<LocalStorageContext> {
    let pool = mindful_storage::create_pool(&config.storage.database_url).await?;
    mindful_storage::run_migrations(&pool).await?;
    Ok(LocalStorageContext::new(pool))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Mindful Audio Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Arc::new(open_storage(&config).await?);
    tracing::info!("Database connected");

    // Initialize audio output and probe
    let (output, events) = CommandOutput::new(config.audio.output_config());
    let manager = AudioSessionManager::new(
        Arc::clone(&db) as Arc<dyn SessionStore>,
        Arc::new(output),
        config.audio.media_probe(),
        config.audio.manager_config(),
    );
    tracing::info!(
        "Audio player {:?}, {:?} probe, assets in {:?}",
        config.audio.player_program,
        config.audio.probe,
        config.audio.assets_dir
    );

    // Build application state
    let app_state = AppState::new(db, manager);

    // Background tasks
    tasks::spawn_event_pump(Arc::clone(&app_state.player), events);
    if let Some(period) = config.audio.progress_interval() {
        tasks::spawn_progress_checkpoints(Arc::clone(&app_state.player), period);
        tracing::info!("Progress checkpoints every {:?}", period);
    }

    // Build router
    let app = api::router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn print_duration(config: &ServerConfig, file: &str) -> anyhow::Result<()> {
    let assets = AssetLibrary::new(config.audio.assets_dir.clone());
    let path = assets.resolve(file)?;

    let info = config.audio.media_probe().probe(&path).await?;

    println!("{}: {:.3}s", file, info.duration_secs());
    if let (Some(rate), Some(channels)) = (info.sample_rate, info.channels) {
        println!("  {} Hz, {} channel(s)", rate, channels);
    }

    Ok(())
}

async fn print_cues(config: &ServerConfig, session_id: i64) -> anyhow::Result<()> {
    let db = open_storage(config).await?;

    let Some(session) = db.get_session(session_id).await? else {
        anyhow::bail!("Session {} not found", session_id);
    };

    println!("{} ({})", session.name, session.id);
    for cue in db.get_cues(session_id).await? {
        println!("  {:>5}s  {}", cue.time_sec, cue.message);
    }

    Ok(())
}
