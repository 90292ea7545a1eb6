use winit::dpi::LogicalSize;
use winit::window::{Window, WindowAttributes, WindowButtons};

/// Affordances requested for a window's chrome.
///
/// These are requests; the platform decides what it honors (some X11 window
/// managers ignore button restrictions entirely).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindowStyle {
    pub closable: bool,
    pub resizable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

impl WindowStyle {
    /// Close button only: no resize, no minimize/maximize affordances.
    pub const CLOSE: Self = Self {
        closable: true,
        resizable: false,
        minimizable: false,
        maximizable: false,
    };

    /// Fully decorated window with all affordances.
    pub const DECORATED: Self = Self {
        closable: true,
        resizable: true,
        minimizable: true,
        maximizable: true,
    };

    /// Maps the chrome-button flags to winit's button set.
    ///
    /// Resizability is a separate winit attribute, not a button.
    fn buttons(self) -> WindowButtons {
        let mut buttons = WindowButtons::empty();
        if self.closable {
            buttons |= WindowButtons::CLOSE;
        }
        if self.minimizable {
            buttons |= WindowButtons::MINIMIZE;
        }
        if self.maximizable {
            buttons |= WindowButtons::MAXIMIZE;
        }
        buttons
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::DECORATED
    }
}

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    pub style: WindowStyle,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "oriel".to_string(),
            size: LogicalSize::new(1280.0, 720.0),
            style: WindowStyle::default(),
        }
    }
}

/// Builds winit window attributes from a config.
///
/// Title, size and style pass through unmodified.
pub(crate) fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.size)
        .with_resizable(config.style.resizable)
        .with_enabled_buttons(config.style.buttons())
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    // ── style flags ───────────────────────────────────────────────────────

    #[test]
    fn close_style_requests_close_button_only() {
        assert_eq!(WindowStyle::CLOSE.buttons(), WindowButtons::CLOSE);
        assert!(!WindowStyle::CLOSE.resizable);
    }

    #[test]
    fn decorated_style_requests_all_buttons() {
        assert_eq!(WindowStyle::DECORATED.buttons(), WindowButtons::all());
        assert!(WindowStyle::DECORATED.resizable);
    }

    #[test]
    fn unclosable_style_drops_the_close_button() {
        let style = WindowStyle {
            closable: false,
            ..WindowStyle::CLOSE
        };
        assert_eq!(style.buttons(), WindowButtons::empty());
    }

    // ── attribute pass-through ────────────────────────────────────────────

    #[test]
    fn attributes_carry_title_and_size_unmodified() {
        let config = WindowConfig {
            title: "OpenGL".to_string(),
            size: LogicalSize::new(800.0, 600.0),
            style: WindowStyle::CLOSE,
        };
        let attrs = window_attributes(&config);

        assert_eq!(attrs.title, "OpenGL");
        assert_eq!(
            attrs.inner_size,
            Some(Size::Logical(LogicalSize::new(800.0, 600.0)))
        );
    }

    #[test]
    fn attributes_carry_close_only_style() {
        let config = WindowConfig {
            style: WindowStyle::CLOSE,
            ..Default::default()
        };
        let attrs = window_attributes(&config);

        assert!(!attrs.resizable);
        assert_eq!(attrs.enabled_buttons, WindowButtons::CLOSE);
    }

    #[test]
    fn default_config_is_a_decorated_window() {
        let attrs = window_attributes(&WindowConfig::default());
        assert!(attrs.resizable);
        assert_eq!(attrs.enabled_buttons, WindowButtons::all());
    }
}
