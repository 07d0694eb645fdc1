//! Tracing configuration for the ku-check shell
//!
//! Installs the global `tracing-subscriber` registry: an env filter, a
//! stdout layer, a non-blocking file layer in the app log directory and an
//! optional Sentry layer.
//!
//! ## Call this / 调用位置
//!
//! Desktop: once in `run_app`, **before** the Tauri builder is created.
//! Mobile: once in `setup`, with the sandbox directory from the path
//! resolver, since there is no system data-local directory to fall back on.

use std::{fs, io, path::PathBuf, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

use kc_core::ports::AppDirsPort;
use kc_platform::app_dirs::DirsAppDirsAdapter;

const LOG_FILE_NAME: &str = "ku-check.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives when `RUST_LOG` is not set.
///
/// ## Behavior / 行为
/// - **Development**: debug for the shell crates
/// - **Production**: info for the shell crates
/// - Tauri/wry internals are kept quiet in both
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        "tauri=warn".to_string(),       // setup spans
        "wry=off".to_string(),          // custom_protocol spans
        "ipc::request=off".to_string(), // IPC handler spans
        "reqwest=info".to_string(),
        "hyper_util=info".to_string(),
        format!("kc_platform={level}"),
        format!("kc_infra={level}"),
    ]
}

/// Initialize the tracing subscriber.
///
/// `log_base` replaces the system data-local directory as the root of the
/// log directory; `None` keeps the system one.
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered. A log
/// directory that cannot be created only disables the file layer.
pub fn init_tracing_subscriber(log_base: Option<PathBuf>) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    // Sentry only when SENTRY_DSN is set; the guard must outlive the app.
    let sentry_layer = if let Ok(dsn) = std::env::var("SENTRY_DSN") {
        let guard = sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                traces_sample_rate: 1.0,
                ..Default::default()
            },
        ));

        if SENTRY_GUARD.set(guard).is_err() {
            eprintln!("Sentry guard already initialized");
        }

        Some(sentry_tracing::layer())
    } else {
        None
    };

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer(log_base) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err:#}");
            None
        }
    };

    // "2026-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let subscriber = registry()
        .with(env_filter)
        .with(sentry_layer)
        .with(stdout_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn resolve_log_dir(log_base: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let adapter = match log_base {
        Some(base) => DirsAppDirsAdapter::with_base_data_local_dir(base),
        None => DirsAppDirsAdapter::new(),
    };
    Ok(adapter.get_app_dirs()?.app_log_root)
}

fn build_file_writer(log_base: Option<PathBuf>) -> anyhow::Result<NonBlocking> {
    let log_dir = resolve_log_dir(log_base)?;
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
