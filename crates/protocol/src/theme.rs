use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    LaneBackground,
    LaneBackgroundAlt,
    LaneBorder,
    LaneHeaderBackground,
    LaneHeaderText,

    AxisBackground,
    AxisTick,
    Gridline,

    ShiftAssigned,
    ShiftUnassigned,
    ShiftBorder,
    ShiftText,

    TextPrimary,
    TextMuted,

    SelectionHighlight,
}
