use super::error::PlotError;
use plotters::style::RGBColor;

/// Resolved look of a figure. Sizes are in points, the figure in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub figsize: (f64, f64),
    pub font_family: &'static str,
    pub font_size: f64,
    pub line_width: f64,
    pub axes_line_width: f64,
    pub tick_size: f64,
    /// draw the frame on all four sides, not only bottom and left
    pub mirror_frame: bool,
    pub grid: bool,
    pub line_color: RGBColor,
    pub pad_inches: f64,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            figsize: (6.4, 4.8),
            font_family: "sans-serif",
            font_size: 10.,
            line_width: 1.5,
            axes_line_width: 0.8,
            tick_size: 3.5,
            mirror_frame: false,
            grid: false,
            line_color: RGBColor(0x1f, 0x77, 0xb4),
            pad_inches: 0.1,
        }
    }
}

/// A named set of overrides, applied on top of a Theme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub figsize: Option<(f64, f64)>,
    pub font_family: Option<&'static str>,
    pub font_size: Option<f64>,
    pub line_width: Option<f64>,
    pub axes_line_width: Option<f64>,
    pub tick_size: Option<f64>,
    pub mirror_frame: Option<bool>,
    pub grid: Option<bool>,
    pub line_color: Option<RGBColor>,
    pub pad_inches: Option<f64>,
}

impl StyleSheet {
    pub fn science() -> StyleSheet {
        StyleSheet {
            figsize: Some((3.5, 2.625)),
            font_family: Some("serif"),
            line_width: Some(1.),
            axes_line_width: Some(0.5),
            tick_size: Some(3.),
            mirror_frame: Some(true),
            grid: Some(false),
            line_color: Some(RGBColor(0x0c, 0x5d, 0xa5)),
            pad_inches: Some(0.05),
            ..StyleSheet::default()
        }
    }

    /// journal column width, small sans-serif text
    pub fn nature() -> StyleSheet {
        StyleSheet {
            figsize: Some((3.3, 2.5)),
            font_family: Some("sans-serif"),
            font_size: Some(7.),
            line_width: Some(1.),
            axes_line_width: Some(0.5),
            ..StyleSheet::default()
        }
    }

    pub fn named(name: &str) -> Result<StyleSheet, PlotError> {
        match name {
            "science" => Ok(StyleSheet::science()),
            "nature" => Ok(StyleSheet::nature()),
            other => Err(PlotError::UnknownStyle(other.to_string())),
        }
    }

    pub fn apply(&self, theme: &mut Theme) {
        if let Some(v) = self.figsize {
            theme.figsize = v;
        }
        if let Some(v) = self.font_family {
            theme.font_family = v;
        }
        if let Some(v) = self.font_size {
            theme.font_size = v;
        }
        if let Some(v) = self.line_width {
            theme.line_width = v;
        }
        if let Some(v) = self.axes_line_width {
            theme.axes_line_width = v;
        }
        if let Some(v) = self.tick_size {
            theme.tick_size = v;
        }
        if let Some(v) = self.mirror_frame {
            theme.mirror_frame = v;
        }
        if let Some(v) = self.grid {
            theme.grid = v;
        }
        if let Some(v) = self.line_color {
            theme.line_color = v;
        }
        if let Some(v) = self.pad_inches {
            theme.pad_inches = v;
        }
    }
}

impl Theme {
    /// Compose the named presets, later names override earlier ones.
    pub fn from_styles<S: AsRef<str>>(names: &[S]) -> Result<Theme, PlotError> {
        let mut theme = Theme::default();
        for name in names {
            StyleSheet::named(name.as_ref())?.apply(&mut theme);
        }
        Ok(theme)
    }

    /// canvas size in pixels at the given resolution
    pub fn canvas_size(&self, dpi: u32) -> (u32, u32) {
        let w = (self.figsize.0 * dpi as f64).round() as u32;
        let h = (self.figsize.1 * dpi as f64).round() as u32;
        (w.max(1), h.max(1))
    }
}

/// points to pixels
pub fn pt_to_px(pt: f64, dpi: u32) -> u32 {
    ((pt * dpi as f64 / 72.).round() as u32).max(1)
}
