//! Central registry of highlight colors offered to the answer UI.

/// A selectable highlight color and the value the viewer paints with.
#[derive(Debug, Clone, Copy)]
pub struct ColorOption {
    pub key: &'static str,
    pub css: &'static str,
}

/// All supported highlight colors.
pub const COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption {
        key: "yellow",
        css: "rgba(255, 226, 143, 0.6)",
    },
    ColorOption {
        key: "lime",
        css: "rgba(190, 242, 100, 0.5)",
    },
    ColorOption {
        key: "blue",
        css: "rgba(147, 197, 253, 0.5)",
    },
    ColorOption {
        key: "purple",
        css: "rgba(216, 180, 254, 0.5)",
    },
    ColorOption {
        key: "orange",
        css: "rgba(253, 186, 116, 0.5)",
    },
    ColorOption {
        key: "pink",
        css: "rgba(249, 168, 212, 0.5)",
    },
];

/// Color used when no preference is given.
pub const DEFAULT_COLOR: &str = COLOR_OPTIONS[0].key;

fn find(key: &str) -> Option<&'static ColorOption> {
    let key = key.trim();
    COLOR_OPTIONS.iter().find(|opt| opt.key.eq_ignore_ascii_case(key))
}

/// Returns true when the provided key names a known color.
pub fn is_valid_color(key: &str) -> bool {
    find(key).is_some()
}

/// Display value for `key`, if known.
pub fn resolve(key: &str) -> Option<&'static str> {
    find(key).map(|opt| opt.css)
}

/// Display value for `key`, or the default color's.
pub fn resolve_or_default(key: &str) -> &'static str {
    find(key).unwrap_or(&COLOR_OPTIONS[0]).css
}
