pub mod banner;
pub mod progress;
pub mod tui;

use crate::domain::LocaleBundle;

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui(bundle: &LocaleBundle) {
    banner::print_welcome(bundle.app_title, bundle.app_subtitle);
    tui::apply_theme();
}
