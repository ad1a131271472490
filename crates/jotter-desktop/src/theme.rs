//! Theme configuration for the desktop app

use std::sync::OnceLock;

use jotter_core::Theme;

/// Cached system dark mode preference (detected once at startup)
static SYSTEM_DARK_MODE: OnceLock<bool> = OnceLock::new();

/// Theme to start with, following the system preference
#[must_use]
pub fn initial_theme() -> Theme {
    if is_system_dark_mode() {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Detect system dark mode preference (cached after first call)
#[must_use]
pub fn is_system_dark_mode() -> bool {
    *SYSTEM_DARK_MODE.get_or_init(detect_system_dark_mode)
}

#[cfg(target_os = "windows")]
fn detect_system_dark_mode() -> bool {
    use std::process::Command;
    // AppsUseLightTheme is 0x0 in dark mode
    let output = Command::new("reg")
        .args([
            "query",
            r"HKCU\SOFTWARE\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output();

    match output {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains("0x0"),
        Err(e) => {
            tracing::warn!("Failed to detect system theme: {}", e);
            false
        }
    }
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode() -> bool {
    use std::process::Command;
    match Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .trim()
            .eq_ignore_ascii_case("dark"),
        Err(e) => {
            tracing::warn!("Failed to detect system theme: {}", e);
            false
        }
    }
}

#[cfg(target_os = "linux")]
fn detect_system_dark_mode() -> bool {
    std::env::var("GTK_THEME").is_ok_and(|theme| gtk_theme_is_dark(&theme))
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn detect_system_dark_mode() -> bool {
    false
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn gtk_theme_is_dark(theme: &str) -> bool {
    theme.to_lowercase().contains("dark")
}

/// Color palette for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub error_bg: &'static str,
    pub overlay: &'static str,
}

/// Light theme colors
pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f7f7f5",
    bg_tertiary: "#ecebe8",
    text_primary: "#1f1f1f",
    text_secondary: "#5c5c5c",
    text_muted: "#999999",
    border: "#dddddd",
    accent: "#2563eb",
    accent_text: "#ffffff",
    error: "#b91c1c",
    error_bg: "#fee2e2",
    overlay: "rgba(0, 0, 0, 0.35)",
};

/// Dark theme colors
pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#1b1b1d",
    bg_secondary: "#232326",
    bg_tertiary: "#2e2e33",
    text_primary: "#ececec",
    text_secondary: "#a3a3a3",
    text_muted: "#6b6b6b",
    border: "#3a3a3f",
    accent: "#60a5fa",
    accent_text: "#0b0b0c",
    error: "#fca5a5",
    error_bg: "#3f1d1d",
    overlay: "rgba(0, 0, 0, 0.6)",
};

/// Get the color palette for `theme`
#[must_use]
pub const fn palette(theme: Theme) -> &'static ColorPalette {
    match theme {
        Theme::Light => &LIGHT_PALETTE,
        Theme::Dark => &DARK_PALETTE,
    }
}

/// Icon on the toggle button: the theme it switches to
#[must_use]
pub const fn toggle_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    }
}
