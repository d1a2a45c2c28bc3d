use chrono::{Local, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inkframe::api;
use inkframe::models::{AppConfig, DeliveryStatus, ImmichSettings, PanelSpec, SettingsUpdate};
use inkframe::rendering::render_photo;
use inkframe::server::{self, ServerPaths};
use inkframe::services::{plan_sleep, ConfigWatcher, ImmichClient, SleepPlan};
use spectra_dither::{decode_frame, DisplayMode, DitherAlgorithm, Palette, PaletteColor};

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(about = "Photo frame server for six-color e-paper panels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Render a local photo to a transfer frame
    Render {
        /// Photo to render
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the transfer text
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the dithered preview PNG
        #[arg(short, long)]
        preview: Option<PathBuf>,

        /// Panel rotation in degrees (0, 90, 180, 270)
        #[arg(long)]
        rotation: Option<u32>,

        /// "fill" or "fit"
        #[arg(long)]
        mode: Option<String>,

        /// "atkinson" or "floyd-steinberg"
        #[arg(long)]
        algorithm: Option<String>,

        /// Error diffusion strength
        #[arg(long)]
        strength: Option<f32>,

        /// Saturation factor
        #[arg(long)]
        saturation: Option<f32>,

        /// Contrast factor
        #[arg(long)]
        contrast: Option<f32>,
    },
    /// Print the sleep plan for the configured schedule
    Sleep {
        /// Plan as if it were this local time today (HH:MM)
        #[arg(long)]
        at: Option<String>,
    },
    /// Decode a transfer frame and print its color histogram
    Inspect {
        /// Transfer text file
        file: PathBuf,

        /// Frame width in pixels
        #[arg(short, long, default_value_t = PanelSpec::SPECTRA6.width)]
        width: u32,
    },
    /// Show environment and configuration sources
    Status,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "inkframe API",
        description = "Photo frame server for six-color e-paper panels",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_download,
        api::handle_prepare,
        api::handle_preview,
        api::handle_preview_status,
        api::handle_sleep,
        api::handle_get_settings,
        api::handle_update_settings,
        api::handle_health,
    ),
    components(schemas(
        api::PrepareResponse,
        api::PreviewStatusResponse,
        api::SettingsResponse,
        api::BatteryStatus,
        api::HealthResponse,
        SleepPlan,
        ImmichSettings,
        SettingsUpdate,
        DeliveryStatus,
    )),
    tags(
        (name = "Frame", description = "Frame preparation and delivery"),
        (name = "Schedule", description = "Panel wakeup planning"),
        (name = "Settings", description = "Runtime configuration"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            preview,
            rotation,
            mode,
            algorithm,
            strength,
            saturation,
            contrast,
        }) => {
            init_cli_logging();
            let overrides = SettingsUpdate {
                rotation,
                display_mode: mode,
                dithering_method: algorithm,
                strength,
                enhanced: saturation,
                contrast,
                ..Default::default()
            };
            run_render_command(&input, &output, preview.as_deref(), overrides)
        }
        Some(Commands::Sleep { at }) => {
            init_cli_logging();
            run_sleep_command(at.as_deref())
        }
        Some(Commands::Inspect { file, width }) => run_inspect_command(&file, width),
        Some(Commands::Status) => {
            run_status_command();
            Ok(())
        }
        Some(Commands::Serve) | None => run_server().await,
    }
}

fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Settings from the config file if present, otherwise the environment
/// defaults. Never writes the file.
fn load_cli_config() -> AppConfig {
    let path = ServerPaths::from_env().config_path;
    if !path.exists() {
        return AppConfig::default();
    }
    AppConfig::load(&path).unwrap_or_else(|e| {
        tracing::warn!(%e, path = %path.display(), "Ignoring config file");
        AppConfig::default()
    })
}

/// Render a local photo (no server needed)
fn run_render_command(
    input: &Path,
    output: &Path,
    preview: Option<&Path>,
    overrides: SettingsUpdate,
) -> anyhow::Result<()> {
    if let Some(mode) = &overrides.display_mode {
        mode.parse::<DisplayMode>().map_err(anyhow::Error::msg)?;
    }
    if let Some(algorithm) = &overrides.dithering_method {
        algorithm.parse::<DitherAlgorithm>()?;
    }
    let settings = load_cli_config().immich.merged(overrides);
    settings.validate()?;

    let bytes = std::fs::read(input)?;
    let kind = inkframe::models::MediaKind::from_path(&input.to_string_lossy());
    let renderer = settings.renderer(PanelSpec::SPECTRA6);
    let rendered = render_photo(&bytes, kind, &renderer)?;

    std::fs::write(output, &rendered.frame.text)?;
    println!(
        "Rendered {} ({}x{}, {} bytes of text)",
        output.display(),
        rendered.frame.image.width(),
        rendered.frame.image.height(),
        rendered.frame.text.len()
    );
    if let Some(preview) = preview {
        std::fs::write(preview, &rendered.preview_png)?;
        println!("Preview  {}", preview.display());
    }

    Ok(())
}

fn run_sleep_command(at: Option<&str>) -> anyhow::Result<()> {
    let now = Local::now().naive_local();
    let now = match at {
        Some(at) => {
            let time = NaiveTime::parse_from_str(at, "%H:%M")
                .map_err(|e| anyhow::anyhow!("Invalid time {at:?} (expected HH:MM): {e}"))?;
            now.date().and_time(time)
        }
        None => now,
    };

    let config = load_cli_config();
    let settings = &config.immich;
    let window = settings.sleep_window();
    let plan = plan_sleep(now, settings.wakeup_interval, Some(&window));

    println!("Current time:  {}", plan.current_time);
    println!("Next wakeup:   {}", plan.next_wakeup);
    println!(
        "Sleep:         {} ms ({} min)",
        plan.sleep_duration,
        plan.sleep_duration / 60_000
    );
    Ok(())
}

fn run_inspect_command(file: &Path, width: u32) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)?;
    let image = decode_frame(&text, width, &Palette::spectra6())?;
    let total = (image.width() * image.height()).max(1) as f64;

    println!("{}: {}x{}", file.display(), image.width(), image.height());
    for (color, count) in PaletteColor::ALL.iter().zip(image.histogram()) {
        println!(
            "  {:<7} {:>8}  {:>5.1}%",
            color.name(),
            count,
            count as f64 * 100.0 / total
        );
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let api_key = std::env::var("IMMICH_API_KEY").ok().filter(|k| !k.is_empty());
    let paths = ServerPaths::from_env();

    println!("inkframe v{VERSION}");
    println!("Photo frame server for six-color e-paper panels\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR         = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:5000 (default)")
    );
    println!("  CONFIG_PATH       = {}", paths.config_path.display());
    println!("  IMMICH_PHOTO_DEST = {}", paths.photo_dir.display());
    println!(
        "  IMMICH_API_KEY    = {}",
        if api_key.is_some() { "(set)" } else { "(not set)" }
    );

    println!("\nConfiguration:");
    let source = if paths.config_path.exists() {
        paths.config_path.display().to_string()
    } else {
        "environment defaults (file not found)".to_string()
    };
    println!("  Source:   {source}");
    let config = load_cli_config();
    println!("  Immich:   {}", config.immich.url);
    println!("  Album:    {}", config.immich.album);
    println!(
        "  Render:   rotation {}, {} mode, {} at {}",
        config.immich.rotation,
        config.immich.display_mode,
        config.immich.dithering_method,
        config.immich.strength
    );
    println!(
        "  Schedule: every {} min, asleep {:02}:{:02}-{:02}:{:02}",
        config.immich.wakeup_interval,
        config.immich.sleep_start_hour,
        config.immich.sleep_start_minute,
        config.immich.sleep_end_hour,
        config.immich.sleep_end_minute
    );

    println!("\nCommands:");
    println!("  inkframe serve     Start the HTTP server");
    println!("  inkframe render    Render a photo to a transfer frame");
    println!("  inkframe sleep     Show the next wakeup");
    println!("  inkframe inspect   Summarise a transfer frame");
    println!("\nRun 'inkframe --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let paths = ServerPaths::from_env();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

    tracing::info!(
        config = %paths.config_path.display(),
        photos = %paths.photo_dir.display(),
        "Paths configured"
    );

    let client = ImmichClient::from_env();
    let state = server::create_app_state(&paths, Arc::new(client), PanelSpec::SPECTRA6)?;
    let _watcher = ConfigWatcher::new(state.config.clone());

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "inkframe server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
