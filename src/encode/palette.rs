use crate::foundation::core::Color;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Color theme. Selects a [`Palette`]; never changes categories.
pub enum Theme {
    /// Dark ink on a light background.
    #[default]
    Light,
    /// Light ink on a dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Colors used by the visual encoder, one slot per visual meaning.
pub struct Palette {
    /// Canvas background.
    pub background: Color,
    /// Label text.
    pub text: Color,
    /// Default body outline.
    pub outline: Color,
    /// Untouched bodies (unvisited, unsorted, pending, idle).
    pub neutral: Color,
    /// Finished bodies (visited, settled, in tree).
    pub done: Color,
    /// Waiting bodies (frontier, candidate, search window).
    pub frontier: Color,
    /// Body under the cursor or being worked on.
    pub current: Color,
    /// Compared cells.
    pub compare: Color,
    /// Swapped cells.
    pub swap: Color,
    /// Cells in final position and merged ranges.
    pub sorted: Color,
    /// Out-of-range or eliminated cells.
    pub dimmed: Color,
    /// Target found.
    pub found: Color,
    /// Pivot, key, min, mid and via roles.
    pub role: Color,
    /// Binary-search bounds.
    pub bound: Color,
    /// Plain connector.
    pub edge: Color,
    /// Tree, path and spanning-tree connectors.
    pub edge_strong: Color,
    /// Connector being relaxed or considered.
    pub edge_active: Color,
    /// Next-suggestion outline.
    pub next: Color,
    /// Accent for values inferred to have just changed.
    pub updated: Color,
}

impl Palette {
    /// Light theme colors.
    pub const LIGHT: Self = Self {
        background: Color::rgb(0xff, 0xff, 0xff),
        text: Color::rgb(0x1f, 0x29, 0x37),
        outline: Color::rgb(0x4b, 0x55, 0x63),
        neutral: Color::rgb(0xe5, 0xe7, 0xeb),
        done: Color::rgb(0x93, 0xc5, 0xfd),
        frontier: Color::rgb(0xfd, 0xe6, 0x8a),
        current: Color::rgb(0xf9, 0x73, 0x16),
        compare: Color::rgb(0xfa, 0xcc, 0x15),
        swap: Color::rgb(0xef, 0x44, 0x44),
        sorted: Color::rgb(0x22, 0xc5, 0x5e),
        dimmed: Color::rgb(0xd1, 0xd5, 0xdb),
        found: Color::rgb(0x16, 0xa3, 0x4a),
        role: Color::rgb(0xa8, 0x55, 0xf7),
        bound: Color::rgb(0x06, 0xb6, 0xd4),
        edge: Color::rgb(0x9c, 0xa3, 0xaf),
        edge_strong: Color::rgb(0x25, 0x63, 0xeb),
        edge_active: Color::rgb(0xf9, 0x73, 0x16),
        next: Color::rgb(0xdb, 0x27, 0x77),
        updated: Color::rgb(0x7c, 0x3a, 0xed),
    };

    /// Dark theme colors.
    pub const DARK: Self = Self {
        background: Color::rgb(0x11, 0x18, 0x27),
        text: Color::rgb(0xf3, 0xf4, 0xf6),
        outline: Color::rgb(0x9c, 0xa3, 0xaf),
        neutral: Color::rgb(0x37, 0x41, 0x51),
        done: Color::rgb(0x1d, 0x4e, 0xd8),
        frontier: Color::rgb(0xa1, 0x62, 0x07),
        current: Color::rgb(0xea, 0x58, 0x0c),
        compare: Color::rgb(0xca, 0x8a, 0x04),
        swap: Color::rgb(0xdc, 0x26, 0x26),
        sorted: Color::rgb(0x15, 0x80, 0x3d),
        dimmed: Color::rgb(0x1f, 0x29, 0x37),
        found: Color::rgb(0x22, 0xc5, 0x5e),
        role: Color::rgb(0x93, 0x33, 0xea),
        bound: Color::rgb(0x08, 0x91, 0xb2),
        edge: Color::rgb(0x6b, 0x72, 0x80),
        edge_strong: Color::rgb(0x60, 0xa5, 0xfa),
        edge_active: Color::rgb(0xfb, 0x92, 0x3c),
        next: Color::rgb(0xf4, 0x72, 0xb6),
        updated: Color::rgb(0xc4, 0xb5, 0xfd),
    };

    /// Palette for `theme`.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }
}
