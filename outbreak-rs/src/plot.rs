//! Population heatmap rendering with plotters.
//!
//! The figure is drawn into an RGB buffer and encoded as PNG in memory, so callers
//! decide where the bytes go. Text needs a TrueType font registered at runtime; when
//! none can be found the heatmap, marker and colour bar are still drawn without
//! captions, labels or legend.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use log::{debug, warn};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use crate::config::OutputConfig;
use crate::error::{OutbreakError, Result};
use crate::grid::PopulationGrid;
use crate::locator::OutbreakCentre;

const FONT_FAMILY: &str = "sans-serif";
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const TITLE: &str = "Population Distribution & Outbreak Center (log scale)";
const X_DESC: &str = "East-West (100m per cell)";
const Y_DESC: &str = "North-South (100m per cell)";
const COLORBAR_DESC: &str = "Population (log scale)";
const MARKER_LABEL: &str = "Outbreak Center";

const COLORBAR_WIDTH: u32 = 140;
const COLORBAR_STEPS: usize = 128;

static FONT_READY: OnceLock<bool> = OnceLock::new();

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for OutbreakError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        OutbreakError::Plot(err.to_string())
    }
}

/// Registers the first readable font. Registration is process-wide and happens once.
fn ensure_font(configured: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));
        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                Ok(()) => {
                    debug!("Using font {}", path.display());
                    return true;
                }
                Err(_) => warn!("{} is not a usable TrueType font", path.display()),
            }
        }
        warn!("No TrueType font found; drawing the figure without text");
        false
    })
}

/// Maps population onto [0, 1] logarithmically. Non-positive values count as 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    lo: f64,
    hi: f64,
}

impl LogScale {
    pub fn from_grid(grid: &PopulationGrid) -> Self {
        let (lo, hi) = grid
            .iter()
            .map(|(_, _, v)| clamp_positive(v).ln())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0));
        // A flat grid still needs a non-degenerate colour range.
        let hi = if hi > lo { hi } else { lo + 1.0 };
        LogScale { lo, hi }
    }

    /// Bounds in natural-log units.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn normalise(&self, value: f64) -> f64 {
        ((clamp_positive(value).ln() - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0)
    }
}

pub fn clamp_positive(value: f64) -> f64 {
    if value <= 0.0 { 1.0 } else { value }
}

/// Blue through cyan and yellow to red, as in the classic "jet" colour map.
pub fn jet(t: f64) -> RGBColor {
    let channel = |offset: f64| {
        let v = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    RGBColor(channel(3.0), channel(2.0), channel(1.0))
}

/// Renders the grid as a log-scaled heatmap with the outbreak centre marked.
pub fn render_heatmap(
    grid: &PopulationGrid,
    centre: OutbreakCentre,
    cell_size: f64,
    output: &OutputConfig,
) -> Result<Vec<u8>> {
    let (width, height) = (output.width, output.height);
    let has_font = ensure_font(output.font.as_deref());
    let scale = LogScale::from_grid(grid);

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let map_width = width.saturating_sub(COLORBAR_WIDTH.min(width / 2));
        let (map_area, bar_area) = root.split_horizontally(map_width as i32);
        draw_map(&map_area, grid, centre, cell_size, &scale, has_font)?;
        draw_colorbar(&bar_area, &scale, has_font)?;
        root.present()?;
    }
    debug!("Rendered {}x{} heatmap", width, height);
    encode_png(&pixels, width, height)
}

fn draw_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    grid: &PopulationGrid,
    centre: OutbreakCentre,
    cell_size: f64,
    scale: &LogScale,
    has_font: bool,
) -> Result<()> {
    let x_range = -0.5..(grid.cols().max(1) as f64 - 0.5);
    let y_range = -0.5..(grid.rows().max(1) as f64 - 0.5);

    let mut builder = ChartBuilder::on(area);
    builder.margin(15);
    if has_font {
        builder
            .caption(TITLE, (FONT_FAMILY, 20))
            .x_label_area_size(45)
            .y_label_area_size(55);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    if has_font {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .label_style((FONT_FAMILY, 12))
            .axis_desc_style((FONT_FAMILY, 14))
            .draw()?;
    }

    chart.draw_series(grid.iter().map(|(row, col, value)| {
        let (x, y) = (col as f64, row as f64);
        Rectangle::new(
            [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
            jet(scale.normalise(value)).filled(),
        )
    }))?;

    let marker = (centre.x / cell_size, centre.y / cell_size);
    let series = chart.draw_series(std::iter::once(Circle::new(marker, 6, BLACK.filled())))?;
    if has_font {
        series
            .label(MARKER_LABEL)
            .legend(|(x, y)| Circle::new((x, y), 5, BLACK.filled()));
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, 12))
            .draw()?;
    }
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: &LogScale,
    has_font: bool,
) -> Result<()> {
    let (lo, hi) = scale.bounds();

    let mut builder = ChartBuilder::on(area);
    builder.margin_top(50).margin_bottom(60).margin_right(30);
    if has_font {
        builder.y_label_area_size(80);
    }
    let mut chart = builder.build_cartesian_2d(0.0..1.0, lo..hi)?;

    if has_font {
        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_desc(COLORBAR_DESC)
            .y_label_formatter(&|v| format!("{:.0}", v.exp()))
            .label_style((FONT_FAMILY, 12))
            .axis_desc_style((FONT_FAMILY, 14))
            .draw()?;
    }

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|k| {
        let y0 = lo + step * k as f64;
        let t = (k as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], jet(t).filled())
    }))?;
    Ok(())
}

fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(pixels, width, height, image::ColorType::Rgb8)?;
    Ok(png)
}
