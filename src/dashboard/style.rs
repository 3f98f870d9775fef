//! Shared chart styling
//!
//! Every chart leaves the dispatcher with the same presentation settings so
//! the browser only has to copy them into the plot layout.

use serde::Serialize;

/// Pastel qualitative palette
pub const PASTEL: [&str; 11] = [
    "rgb(102, 197, 204)",
    "rgb(246, 207, 113)",
    "rgb(248, 156, 116)",
    "rgb(220, 176, 242)",
    "rgb(135, 197, 95)",
    "rgb(158, 185, 243)",
    "rgb(254, 136, 177)",
    "rgb(201, 219, 116)",
    "rgb(139, 224, 164)",
    "rgb(180, 151, 231)",
    "rgb(179, 179, 179)",
];

const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontStyle {
    pub family: &'static str,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

/// Plot margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    pub const fn uniform(px: u32) -> Self {
        Self {
            l: px,
            r: px,
            t: px,
            b: px,
        }
    }
}

/// Title placement and font
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleStyle {
    /// Horizontal anchor, 0.5 is centered
    pub x: f64,
    pub font: FontStyle,
}

/// Presentation settings applied to every chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    pub font: FontStyle,
    pub margin: Margin,
    pub title: TitleStyle,
    pub colorway: Vec<&'static str>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            plot_bgcolor: TRANSPARENT,
            paper_bgcolor: TRANSPARENT,
            font: FontStyle {
                family: "Arial",
                size: 12,
                color: None,
            },
            margin: Margin::uniform(40),
            title: TitleStyle {
                x: 0.5,
                font: FontStyle {
                    family: "Arial Black",
                    size: 22,
                    color: Some("RebeccaPurple"),
                },
            },
            colorway: PASTEL.to_vec(),
        }
    }
}
