//! KU Check shell
//!
//! 将远程网站封装为移动应用并负责推送通知注册的外壳

/// Application entry point shared by the desktop binary and the mobile
/// library targets.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    kc_tauri::run_app(tauri::generate_context!()).expect("error while running tauri application");
}
