use tg_app::Theme;

use crate::render::Color;

/// Widget palette for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub window_bg: Color,
    pub panel_bg: Color,
    pub text: Color,
    pub accent: Color,
    pub status_text: Color,
}

pub const LIGHT: Palette = Palette {
    window_bg: Color::rgb(0.96, 0.96, 0.96),
    panel_bg: Color::rgb(1.0, 1.0, 1.0),
    text: Color::rgb(0.12, 0.12, 0.12),
    accent: Color::rgb(0.0, 0.47, 0.84),
    status_text: Color::rgb(0.35, 0.35, 0.35),
};

pub const DARK: Palette = Palette {
    window_bg: Color::rgb(0.12, 0.12, 0.13),
    panel_bg: Color::rgb(0.17, 0.17, 0.18),
    text: Color::rgb(0.92, 0.92, 0.92),
    accent: Color::rgb(0.25, 0.6, 0.95),
    status_text: Color::rgb(0.65, 0.65, 0.65),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

#[cfg(test)]
mod tests {
    use tg_app::Theme;

    #[test]
    fn toggling_twice_restores_the_palette() {
        let start = super::palette(Theme::Light);
        let toggled = super::palette(Theme::Light.toggled());
        assert_ne!(start, toggled);
        assert_eq!(start, super::palette(Theme::Light.toggled().toggled()));
    }
}
