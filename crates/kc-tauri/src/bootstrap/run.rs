//! Tauri run loop: builder, setup, page-load hook and teardown.

use std::sync::Arc;

use anyhow::Context;
use tauri::webview::PageLoadEvent;
use tauri::{App, Manager, RunEvent, Runtime, WebviewUrl, WebviewWindowBuilder};
use tracing::{debug, error, info};

use crate::adapters::webview::MAIN_WEBVIEW_LABEL;
use crate::adapters::{
    TauriLifecycleEventEmitter, TauriNotificationChannels, TauriNotificationPermission,
    TauriNotificationScheduler, TauriWebviewBridge,
};
use crate::bootstrap::tracing::init_tracing_subscriber;
use crate::bootstrap::{resolve_config, wire_services, PlatformPorts, ShellServices};
use crate::commands;

/// Build and run the shell.
///
/// `context` must come from `tauri::generate_context!()` in the binary crate.
pub fn run_app(context: tauri::Context<tauri::Wry>) -> anyhow::Result<()> {
    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    if let Err(err) = init_tracing_subscriber(None) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_notification::init())
        .on_page_load(|webview, payload| {
            if !matches!(payload.event(), PageLoadEvent::Finished)
                || webview.label() != MAIN_WEBVIEW_LABEL
            {
                return;
            }
            let Some(services) = webview.try_state::<ShellServices>() else {
                debug!("Page loaded before services were wired");
                return;
            };

            let handshake = services.handshake.clone();
            let url = payload.url().to_string();
            tauri::async_runtime::spawn(async move {
                handshake.page_loaded(&url).await;
            });
        })
        .setup(|app| {
            setup(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::notifications::notifications_state_get,
            commands::notifications::notifications_initialize,
            commands::notifications::notifications_send_test,
            commands::notifications::notifications_clear_error,
            commands::registration::device_registration_get,
            commands::native::push_native_token_report,
            commands::native::notification_received,
            commands::native::notification_response,
        ])
        .build(context)
        .context("error while building tauri application")?;

    app.run(|app_handle, event| {
        if let RunEvent::Exit = event {
            if let Some(services) = app_handle.try_state::<ShellServices>() {
                let controller = services.controller.clone();
                tauri::async_runtime::block_on(async move { controller.stop().await });
            }
        }
    });

    Ok(())
}

fn setup<R: Runtime>(app: &mut App<R>) -> anyhow::Result<()> {
    let handle = app.handle().clone();

    #[cfg(any(target_os = "android", target_os = "ios"))]
    if let Err(err) = init_tracing_subscriber(app.path().app_local_data_dir().ok()) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let data_dir = app
        .path()
        .app_data_dir()
        .context("Failed to resolve app data directory")?;
    let config = resolve_config(data_dir)?;

    let ports = PlatformPorts {
        permission: Arc::new(TauriNotificationPermission::new(handle.clone())),
        channels: Arc::new(TauriNotificationChannels::new(handle.clone())),
        scheduler: Arc::new(TauriNotificationScheduler::new(handle.clone())),
        bridge: Arc::new(TauriWebviewBridge::new(handle.clone(), MAIN_WEBVIEW_LABEL)),
        emitter: Arc::new(TauriLifecycleEventEmitter::new(handle)),
    };
    let services = wire_services(&config, &app.config().identifier, ports)?;
    // Managed before the window exists so the first page load finds it.
    app.manage(services.clone());

    let site_url: tauri::Url = config
        .site_url
        .parse()
        .with_context(|| format!("Invalid site url: {}", config.site_url))?;
    info!(url = %site_url, "Opening main window");

    let url = WebviewUrl::External(site_url);
    let builder = WebviewWindowBuilder::new(app, MAIN_WEBVIEW_LABEL, url).on_navigation(|url| {
        let allowed = url.scheme() == "https";
        if !allowed {
            debug!(%url, "Blocked non-https navigation");
        }
        allowed
    });

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    let builder = builder.title("KU Check").inner_size(420.0, 860.0);

    builder.build().context("Failed to build main window")?;

    let controller = services.controller.clone();
    tauri::async_runtime::spawn(async move {
        controller.start().await;
        let state = controller.state().await;
        if let Some(err) = state.error {
            error!(error = %err, "Notification setup finished with an error");
        }
    });

    Ok(())
}
