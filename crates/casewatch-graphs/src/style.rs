//! Chart styling derived from the `chart` configuration section.

use casewatch_config::ChartConfig;
use plotters::style::RGBColor;

/// Resolved chart styling.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub series_label: String,
    pub x_label: String,
    pub line_color: RGBColor,
    pub background_color: RGBColor,
    pub font_family: String,
    pub title_font_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

impl From<&ChartConfig> for ChartStyle {
    fn from(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            series_label: config.series_label.clone(),
            x_label: config.x_label.clone(),
            line_color: parse_color(&config.line_color),
            background_color: parse_color(&config.background_color),
            font_family: config.font_family.clone(),
            title_font_size: config.title_font_size,
        }
    }
}

/// Parse a `#RRGGBB` color string, defaulting to black
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(parse_color("#1f77b4"), RGBColor(31, 119, 180));

        assert_eq!(parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#ZZ0000"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#FFF"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_style_from_config() {
        let config = ChartConfig {
            width: 640,
            line_color: "#D62728".to_string(),
            ..ChartConfig::default()
        };
        let style = ChartStyle::from(&config);
        assert_eq!(style.width, 640);
        assert_eq!(style.height, 1000);
        assert_eq!(style.line_color, RGBColor(214, 39, 40));
        assert_eq!(style.background_color, RGBColor(255, 255, 255));
        assert_eq!(style.series_label, "US");
    }
}
