//! Sonic Studio - simulated AI remix studio

use sonic_core::config::{default_config_path, THEME_FILE};
use sonic_studio::ui::StudioApp;
use sonic_widgets::theme::{init_theme, load_theme};

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Theme from ~/.config/sonic-remix/theme.yaml
    init_theme(load_theme(&default_config_path(THEME_FILE)));

    iced::application(StudioApp::new, StudioApp::update, StudioApp::view)
        .title(StudioApp::title)
        .window_size(iced::Size::new(1280.0, 860.0))
        .theme(StudioApp::theme)
        .subscription(StudioApp::subscription)
        .run()
}
