//! Theme configuration and resolved palette
//!
//! Colors are configured the way a CSS design system declares them: theme
//! variables hold bare HSL triplets (`"180 100% 50%"`) that accent strings
//! reference as `hsl(var(--primary))`. Stem accents are free-form color
//! strings in any notation [`AccentColor`](crate::color::AccentColor) parses.
//!
//! Default location: ~/.config/sonic-remix/theme.yaml

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use iced::Color;
use serde::{Deserialize, Serialize};
use sonic_core::StemKind;

use crate::color::parse_hsl_triplet;

/// Global theme instance (initialized once at startup)
static THEME: OnceLock<ThemeConfig> = OnceLock::new();

/// Global palette resolved from [`THEME`]
static PALETTE: OnceLock<Palette> = OnceLock::new();

/// Root theme configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme variables as HSL triplets
    pub variables: ThemeVariables,
    /// Stem accent colors
    pub stems: StemColors,
}

/// Named theme variables, referenced as `var(--name)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeVariables {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub foreground: String,
    pub background: String,
    pub muted: String,
    pub card: String,
}

impl Default for ThemeVariables {
    fn default() -> Self {
        Self {
            primary: "180 100% 50%".to_string(),
            secondary: "280 100% 65%".to_string(),
            accent: "320 100% 60%".to_string(),
            foreground: "0 0% 95%".to_string(),
            background: "240 15% 6%".to_string(),
            muted: "240 5% 60%".to_string(),
            card: "240 15% 10%".to_string(),
        }
    }
}

impl ThemeVariables {
    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("foreground", self.foreground.as_str()),
            ("background", self.background.as_str()),
            ("muted", self.muted.as_str()),
            ("card", self.card.as_str()),
        ]
    }
}

/// Stem accent colors in any supported notation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemColors {
    pub vocals: String,
    pub drums: String,
    pub bass: String,
    pub melody: String,
    pub other: String,
}

impl Default for StemColors {
    fn default() -> Self {
        let [vocals, drums, bass, melody] = sonic_core::stem::STEM_ACCENTS;
        Self {
            vocals: vocals.to_string(),
            drums: drums.to_string(),
            bass: bass.to_string(),
            melody: melody.to_string(),
            other: "hsl(var(--muted))".to_string(),
        }
    }
}

impl StemColors {
    /// Accent string for a stem category
    pub fn for_kind(&self, kind: StemKind) -> &str {
        match kind {
            StemKind::Vocals => &self.vocals,
            StemKind::Drums => &self.drums,
            StemKind::Bass => &self.bass,
            StemKind::Melody => &self.melody,
            StemKind::Other => &self.other,
        }
    }
}

/// Theme variables resolved to concrete colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    variables: BTreeMap<String, Color>,
    /// Drawn in place of colors that cannot be parsed
    pub fallback: Color,
}

impl Palette {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = ThemeVariables::default();
        let variables = config
            .variables
            .entries()
            .into_iter()
            .zip(defaults.entries())
            .map(|((name, value), (_, default))| {
                let color = parse_hsl_triplet(value).unwrap_or_else(|| {
                    log::warn!("theme: invalid value '{}' for --{}, using default", value, name);
                    parse_hsl_triplet(default).unwrap_or(Color::WHITE)
                });
                (name.to_string(), color)
            })
            .collect::<BTreeMap<_, _>>();

        let fallback = variables.get("foreground").copied().unwrap_or(Color::WHITE);
        Self { variables, fallback }
    }

    /// Look up a theme variable by name, with or without the leading `--`
    pub fn variable(&self, name: &str) -> Option<Color> {
        self.variables.get(name.trim().trim_start_matches("--")).copied()
    }

    fn named(&self, name: &str) -> Color {
        self.variable(name).unwrap_or(self.fallback)
    }

    pub fn primary(&self) -> Color {
        self.named("primary")
    }

    pub fn secondary(&self) -> Color {
        self.named("secondary")
    }

    pub fn accent(&self) -> Color {
        self.named("accent")
    }

    pub fn foreground(&self) -> Color {
        self.named("foreground")
    }

    pub fn background(&self) -> Color {
        self.named("background")
    }

    pub fn muted(&self) -> Color {
        self.named("muted")
    }

    pub fn card(&self) -> Color {
        self.named("card")
    }

    /// iced theme built from the palette
    pub fn iced_theme(&self) -> iced::Theme {
        let mut palette = iced::theme::Palette::DARK;
        palette.background = self.background();
        palette.text = self.foreground();
        palette.primary = self.primary();
        iced::Theme::custom("Sonic Remix".to_string(), palette)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

/// Load theme configuration from a YAML file
///
/// Missing or unreadable files yield the default theme.
pub fn load_theme(path: &Path) -> ThemeConfig {
    let config: ThemeConfig = sonic_core::config::load_config(path);
    log::debug!(
        "load_theme: stems vocals={}, drums={}, bass={}, melody={}",
        config.stems.vocals,
        config.stems.drums,
        config.stems.bass,
        config.stems.melody
    );
    config
}

/// Install the global theme (call once at startup)
pub fn init_theme(config: ThemeConfig) {
    log::info!(
        "init_theme: primary={}, secondary={}, accent={}",
        config.variables.primary,
        config.variables.secondary,
        config.variables.accent
    );
    if THEME.set(config).is_err() {
        log::warn!("init_theme: Theme already initialized");
    }
}

/// Global theme configuration, defaults if not initialized
pub fn theme() -> &'static ThemeConfig {
    THEME.get_or_init(ThemeConfig::default)
}

/// Global palette resolved from the theme
pub fn palette() -> &'static Palette {
    PALETTE.get_or_init(|| Palette::from_config(theme()))
}
