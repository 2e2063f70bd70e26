use super::config::{PlotConfig, Scale};
use super::error::PlotError;
use super::theme::{pt_to_px, Theme};
use super::{min_and_max, Series};
use image::{imageops, ImageFormat, Rgb, RgbImage};
use log::{debug, warn};
use plotters::coord::ranged1d::{AsRangedCoord, Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

fn drawing_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Splits the series into runs of consecutive points that both axes can show.
/// A value that cannot be shown (NAN, or <= 0 on a log axis) breaks the line.
pub fn segments(series: &Series, x_scale: Scale, y_scale: Scale) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (x, y) in series.points() {
        if x_scale.accepts(x) && y_scale.accepts(y) {
            current.push((x, y));
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Exact extent of the values, widened when it collapses to a single value.
pub fn tight_range(values: &[f64], scale: Scale) -> Option<(f64, f64)> {
    let (lo, hi) = min_and_max(values)?;
    if lo < hi {
        return Some((lo, hi));
    }
    let range = match scale {
        Scale::Linear => (lo - 0.5, hi + 0.5),
        Scale::Log => (lo / 10., hi * 10.),
    };
    Some(range)
}

/// extent of an axis with nothing on it
pub fn default_range(scale: Scale) -> (f64, f64) {
    match scale {
        Scale::Linear => (0., 1.),
        Scale::Log => (1., 10.),
    }
}

pub fn format_tick(v: f64) -> String {
    if v != 0. && (v.abs() >= 1e5 || v.abs() < 1e-3) {
        return format!("{:e}", v);
    }
    let rounded = (v * 1e6).round() / 1e6;
    if rounded == 0. {
        String::from("0")
    } else {
        format!("{}", rounded)
    }
}

/// Draws the series on a white canvas sized from the theme and dpi,
/// then trims the canvas to the drawn content.
pub fn render(series: &Series, cfg: &PlotConfig, theme: &Theme) -> Result<RgbImage, PlotError> {
    let segs = segments(series, cfg.x_scale, cfg.y_scale);
    let kept: usize = segs.iter().map(|s| s.len()).sum();
    if kept == 0 {
        warn!(
            "none of the {} values of '{}' can be drawn on the chosen axes, saving empty axes",
            series.len(),
            series.name()
        );
    } else if kept < series.len() {
        warn!(
            "{} of {} values of '{}' cannot be drawn on the chosen axes and were skipped",
            series.len() - kept,
            series.len(),
            series.name()
        );
    }
    let xs: Vec<f64> = segs.iter().flatten().map(|p| p.0).collect();
    let ys: Vec<f64> = segs.iter().flatten().map(|p| p.1).collect();
    let (x0, x1) = tight_range(&xs, cfg.x_scale).unwrap_or_else(|| default_range(cfg.x_scale));
    let (y0, y1) = tight_range(&ys, cfg.y_scale).unwrap_or_else(|| default_range(cfg.y_scale));
    debug!("x range {}..{}, y range {}..{}", x0, x1, y0, y1);

    if cfg.legend && cfg.series_label.is_none() {
        warn!("legend requested but the series has no label, no legend drawn");
    }

    let (w, h) = theme.canvas_size(cfg.dpi);
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_err)?;
        match (cfg.x_scale, cfg.y_scale) {
            (Scale::Linear, Scale::Linear) => {
                draw_chart(&root, &segs, x0..x1, y0..y1, cfg, theme)?
            }
            (Scale::Linear, Scale::Log) => {
                draw_chart(&root, &segs, x0..x1, (y0..y1).log_scale(), cfg, theme)?
            }
            (Scale::Log, Scale::Linear) => {
                draw_chart(&root, &segs, (x0..x1).log_scale(), y0..y1, cfg, theme)?
            }
            (Scale::Log, Scale::Log) => draw_chart(
                &root,
                &segs,
                (x0..x1).log_scale(),
                (y0..y1).log_scale(),
                cfg,
                theme,
            )?,
        }
        root.present().map_err(drawing_err)?;
    }
    let img = RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| PlotError::Drawing(String::from("canvas buffer has the wrong size")))?;
    let pad = (theme.pad_inches * cfg.dpi as f64).round() as u32;
    Ok(trim(&img, pad))
}

fn draw_chart<DB, XS, YS>(
    root: &DrawingArea<DB, Shift>,
    segs: &[Vec<(f64, f64)>],
    x_spec: XS,
    y_spec: YS,
    cfg: &PlotConfig,
    theme: &Theme,
) -> Result<(), PlotError>
where
    DB: DrawingBackend,
    XS: AsRangedCoord<Value = f64>,
    YS: AsRangedCoord<Value = f64>,
    XS::CoordDescType: Ranged<ValueType = f64> + ValueFormatter<f64>,
    YS::CoordDescType: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let font_px = pt_to_px(theme.font_size, cfg.dpi);
    let line_px = pt_to_px(theme.line_width, cfg.dpi);
    let axes_px = pt_to_px(theme.axes_line_width, cfg.dpi);
    let tick_px = pt_to_px(theme.tick_size, cfg.dpi) as i32;
    let pad_px = (theme.pad_inches * cfg.dpi as f64).round() as u32;
    let text = TextStyle::from((theme.font_family, font_px as f64).into_font()).color(&BLACK);
    let tick_fmt = |v: &f64| format_tick(*v);

    let mut chart = ChartBuilder::on(root)
        .margin(pad_px + font_px)
        .x_label_area_size(font_px * 3)
        .y_label_area_size(font_px * 4)
        .build_cartesian_2d(x_spec, y_spec)
        .map_err(drawing_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(cfg.x_label.as_str())
        .y_desc(cfg.y_label.as_str())
        .label_style(text.clone())
        .axis_desc_style(text.clone())
        .axis_style(BLACK.stroke_width(axes_px))
        .set_all_tick_mark_size(tick_px)
        .x_label_formatter(&tick_fmt)
        .y_label_formatter(&tick_fmt);
    if !theme.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(drawing_err)?;

    let line_style = theme.line_color.stroke_width(line_px);
    for (i, seg) in segs.iter().enumerate() {
        let anno = chart
            .draw_series(LineSeries::new(seg.iter().copied(), line_style))
            .map_err(drawing_err)?;
        // one legend entry for the whole series
        if let (0, Some(label)) = (i, &cfg.series_label) {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 4 * line_px as i32, y)], line_style)
            });
        }
    }

    if cfg.legend && cfg.series_label.is_some() {
        chart
            .configure_series_labels()
            .label_font(text.clone())
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(drawing_err)?;
    }

    if theme.mirror_frame {
        let (xr, yr) = chart.plotting_area().get_pixel_range();
        root.draw(&Rectangle::new(
            [(xr.start, yr.start), (xr.end - 1, yr.end - 1)],
            BLACK.stroke_width(axes_px),
        ))
        .map_err(drawing_err)?;
    }
    Ok(())
}

/// Crops the image to the bounding box of non-background pixels, keeping `pad` pixels around it.
pub fn trim(img: &RgbImage, pad: u32) -> RgbImage {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if *px == BACKGROUND {
            continue;
        }
        bbox = Some(match bbox {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let (x0, y0, x1, y1) = match bbox {
        Some(b) => b,
        None => return img.clone(),
    };
    let left = x0.saturating_sub(pad);
    let top = y0.saturating_sub(pad);
    let right = (x1 + 1 + pad).min(img.width());
    let bottom = (y1 + 1 + pad).min(img.height());
    debug!(
        "trimming {}x{} canvas to {}x{} at ({}, {})",
        img.width(),
        img.height(),
        right - left,
        bottom - top,
        left,
        top
    );
    imageops::crop_imm(img, left, top, right - left, bottom - top).to_image()
}

pub fn save_png(img: &RgbImage, fout: &Path) -> Result<(), PlotError> {
    img.save_with_format(fout, ImageFormat::Png)
        .map_err(|source| PlotError::Image {
            path: fout.to_path_buf(),
            source,
        })
}
