//! Visualization utilities: render charts to **SVG** or **PNG**.
//!
//! - Per-source series colors (Microsoft Office palette)
//! - Locale-aware tick labels, whole numbers
//! - Chart kinds: stacked area (energy mix), grouped bar (country comparison),
//!   line (GDP, forecasts), scatter (gapminder, consumption vs. emissions)
//!
//! The `ab_glyph` text path does not discover OS fonts, so a usable
//! "sans-serif" font is registered once from a set of common system paths.
//! Rendering fails with a clear error when none is found.

use crate::error::{Error, Result};
use crate::models::{ConsumptionTotals, EnergySource, GapMinderPoint, Row, ScatterPoint};
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// One-time registration of a "sans-serif" font for the `ab_glyph` text path.
/// `ab_glyph` does not discover OS fonts, so common install paths are probed.
static INIT_FONTS: Once = Once::new();
static FONTS_OK: AtomicBool = AtomicBool::new(false);

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// True when a chart text font is (or could be) registered.
pub fn fonts_available() -> bool {
    INIT_FONTS.call_once(|| {
        for path in FONT_CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                if plotters::style::register_font(
                    "sans-serif",
                    plotters::style::FontStyle::Normal,
                    bytes,
                )
                .is_ok()
                {
                    FONTS_OK.store(true, Ordering::Relaxed);
                    return;
                }
            }
        }
    });
    FONTS_OK.load(Ordering::Relaxed)
}

fn require_fonts() -> Result<()> {
    if fonts_available() {
        Ok(())
    } else {
        Err(Error::Render(
            "no usable font found for chart text (install DejaVu Sans or Liberation Sans)".into(),
        ))
    }
}

fn rerr<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{:?}", e))
}

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("svg")
}

/// Y tick labels as whole numbers with locale thousands separators.
fn y_label(v: &f64) -> String {
    let n = (*v).round() as i64;
    n.to_formatted_string(&Locale::en)
}

fn span_f64(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        Some((min, max))
    } else {
        None
    }
}

/// Stacked area chart of one country's per-source consumption over time.
/// With `normalize`, each year is rescaled to shares of that year's total.
pub fn plot_consumption<P: AsRef<Path>>(
    country: &str,
    rows: &[Row],
    out_path: P,
    width: u32,
    height: u32,
    normalize: bool,
) -> Result<()> {
    require_fonts()?;
    if rows.is_empty() {
        return Err(Error::Render("no data to plot".into()));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_consumption(root, country, rows, normalize)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_consumption(root, country, rows, normalize)
    }
}

fn draw_consumption<DB>(
    root: DrawingArea<DB, Shift>,
    country: &str,
    rows: &[Row],
    normalize: bool,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(rerr)?;

    let mut min_year = rows.iter().map(|r| r.year).min().unwrap_or(0);
    let mut max_year = rows.iter().map(|r| r.year).max().unwrap_or(0);
    if min_year == max_year {
        min_year -= 1;
        max_year += 1;
    }
    let years: Vec<i32> = (min_year..=max_year).collect();

    // Per-source values mapped onto the full year grid, missing -> 0.
    let mut grid = vec![[0.0f64; crate::models::SOURCE_COUNT]; years.len()];
    for row in rows {
        let i = (row.year - min_year) as usize;
        let mut values = row.consumption;
        if normalize && row.consumption_total > 0.0 {
            for v in values.iter_mut() {
                *v /= row.consumption_total;
            }
        }
        grid[i] = values;
    }

    let max_stack = grid
        .iter()
        .map(|vals| vals.iter().sum::<f64>())
        .fold(0.0f64, f64::max)
        .max(f64::EPSILON);

    let (title, y_desc) = if normalize {
        (
            format!("Energy consumption in {country} - normalized"),
            "Energy consumption - relative",
        )
    } else {
        (
            format!("Energy consumption in {country}"),
            "Energy consumption in TWh",
        )
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(
            min_year as f64..max_year as f64,
            0.0..max_stack * 1.05,
        )
        .map_err(rerr)?;

    let x_label_fmt = |x: &f64| format!("{}", x.round() as i32);
    let y_label_fmt = |v: &f64| {
        if normalize {
            format!("{:.0}%", v * 100.0)
        } else {
            y_label(v)
        }
    };
    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(y_desc)
        .x_labels(years.len().min(12))
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(rerr)?;

    // Stack the sources bottom-up; each band is a polygon between the running
    // cumulative and the cumulative plus this source.
    let mut cum = vec![0.0f64; years.len()];
    for source in EnergySource::ALL {
        let color = office_color(source.index());
        let mut lower: Vec<(f64, f64)> = Vec::with_capacity(years.len());
        let mut upper: Vec<(f64, f64)> = Vec::with_capacity(years.len());
        for (i, year) in years.iter().enumerate() {
            let x = *year as f64;
            lower.push((x, cum[i]));
            cum[i] += grid[i][source.index()].max(0.0);
            upper.push((x, cum[i]));
        }
        let mut poly: Vec<(f64, f64)> = Vec::with_capacity(upper.len() * 2);
        poly.extend(lower.iter().copied());
        poly.extend(upper.iter().rev().copied());

        chart
            .draw_series(std::iter::once(Polygon::new(
                poly,
                color.mix(0.30).filled(),
            )))
            .map_err(rerr)?;
        let legend_color = color;
        chart
            .draw_series(std::iter::once(PathElement::new(
                upper,
                color.stroke_width(1),
            )))
            .map_err(rerr)?
            .label(source.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], legend_color)
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(rerr)?;

    root.present().map_err(rerr)?;
    Ok(())
}

/// Grouped bar chart of summed per-source consumption, one group per country.
pub fn plot_comparison<P: AsRef<Path>>(
    totals: &[ConsumptionTotals],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    require_fonts()?;
    if totals.is_empty() {
        return Err(Error::Render("no data to plot".into()));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_comparison(root, totals)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_comparison(root, totals)
    }
}

fn draw_comparison<DB>(root: DrawingArea<DB, Shift>, totals: &[ConsumptionTotals]) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(rerr)?;

    let n = totals.len();
    let max_val = totals
        .iter()
        .flat_map(|t| t.by_source.iter().copied())
        .fold(0.0f64, f64::max)
        .max(f64::EPSILON);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Total energy consumption by source", ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0.0..max_val * 1.05)
        .map_err(rerr)?;

    let countries: Vec<String> = totals.iter().map(|t| t.country.clone()).collect();
    let x_label_fmt = move |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 0.25 && i >= 0.0 && (i as usize) < countries.len() {
            countries[i as usize].clone()
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Energy consumption in TWh")
        .x_labels(n)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&|v| y_label(v))
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(rerr)?;

    let group_width = 0.8f64;
    let bar_w = group_width / crate::models::SOURCE_COUNT as f64;
    for source in EnergySource::ALL {
        let color = office_color(source.index());
        let bars = totals.iter().enumerate().map(|(c, t)| {
            let x0 = c as f64 - group_width / 2.0 + source.index() as f64 * bar_w;
            let x1 = x0 + bar_w;
            Rectangle::new([(x0, 0.0), (x1, t.by_source[source.index()])], color.filled())
        });
        let legend_color = color;
        chart
            .draw_series(bars)
            .map_err(rerr)?
            .label(source.label())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], legend_color.filled())
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(rerr)?;

    root.present().map_err(rerr)?;
    Ok(())
}

/// Multi-series line chart of GDP over time, one series per country.
pub fn plot_gdp<P: AsRef<Path>>(
    series: &[(String, Vec<(i32, f64)>)],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    require_fonts()?;
    let (min_year, max_year) = match span_f64(
        series
            .iter()
            .flat_map(|(_, s)| s.iter().map(|(y, _)| *y as f64)),
    ) {
        Some((a, b)) => (a, b),
        None => return Err(Error::Render("no data to plot".into())),
    };
    let (min_val, max_val) = span_f64(series.iter().flat_map(|(_, s)| s.iter().map(|(_, v)| *v)))
        .ok_or_else(|| Error::Render("no numeric values to plot".into()))?;

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_gdp(root, series, min_year, max_year, min_val, max_val)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_gdp(root, series, min_year, max_year, min_val, max_val)
    }
}

fn draw_gdp<DB>(
    root: DrawingArea<DB, Shift>,
    series: &[(String, Vec<(i32, f64)>)],
    min_year: f64,
    max_year: f64,
    min_val: f64,
    max_val: f64,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(rerr)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("GDP Development", ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(min_year..max_year, min_val..max_val)
        .map_err(rerr)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("GDP (in USD)")
        .x_labels(12)
        .y_labels(10)
        .x_label_formatter(&|x| format!("{}", x.round() as i32))
        .y_label_formatter(&|v| y_label(v))
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(rerr)?;

    for (idx, (country, points)) in series.iter().enumerate() {
        let color = office_color(idx);
        let style = ShapeStyle {
            color,
            filled: false,
            stroke_width: 2,
        };
        let line: Vec<(f64, f64)> = points.iter().map(|(y, v)| (*y as f64, *v)).collect();
        let legend_color = color;
        chart
            .draw_series(LineSeries::new(line, style))
            .map_err(rerr)?
            .label(country)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], legend_color));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(rerr)?;

    root.present().map_err(rerr)?;
    Ok(())
}

/// Gapminder view for one year: GDP (x, log) against total consumption
/// (y, log), marker size from population.
pub fn plot_gap_minder<P: AsRef<Path>>(
    points: &[GapMinderPoint],
    year: i32,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    require_fonts()?;
    let valid: Vec<(f64, f64, f64)> = points
        .iter()
        .filter_map(|p| match (p.gdp, p.population) {
            (Some(gdp), Some(pop)) if gdp > 0.0 && p.consumption_total > 0.0 && pop > 0.0 => {
                Some((gdp, p.consumption_total, pop))
            }
            _ => None,
        })
        .collect();
    if valid.is_empty() {
        return Err(Error::Render("no data to plot".into()));
    }

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_gap_minder(root, &valid, year)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_gap_minder(root, &valid, year)
    }
}

fn draw_gap_minder<DB>(
    root: DrawingArea<DB, Shift>,
    points: &[(f64, f64, f64)],
    year: i32,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(rerr)?;

    let (min_x, max_x) = span_f64(points.iter().map(|(gdp, _, _)| *gdp)).unwrap_or((1.0, 10.0));
    let (min_y, max_y) = span_f64(points.iter().map(|(_, c, _)| *c)).unwrap_or((1.0, 10.0));
    let max_pop = points
        .iter()
        .map(|(_, _, p)| *p)
        .fold(f64::EPSILON, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("Gapminder - {year}"), ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(
            (min_x * 0.8..max_x * 1.25).log_scale(),
            (min_y * 0.8..max_y * 1.25).log_scale(),
        )
        .map_err(rerr)?;

    chart
        .configure_mesh()
        .x_desc("GDP in $")
        .y_desc("Total energy consumption in TWh")
        .x_label_formatter(&|v| y_label(v))
        .y_label_formatter(&|v| y_label(v))
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(rerr)?;

    let color = office_color(0);
    chart
        .draw_series(points.iter().map(|(gdp, consumption, population)| {
            let radius = 3 + (25.0 * (population / max_pop).sqrt()) as i32;
            Circle::new((*gdp, *consumption), radius, color.mix(0.5).filled())
        }))
        .map_err(rerr)?;

    root.present().map_err(rerr)?;
    Ok(())
}

/// Per-country scatter of mean consumption (x) against mean emissions (y),
/// marker size from mean population.
pub fn plot_scatter<P: AsRef<Path>>(
    points: &[ScatterPoint],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    require_fonts()?;
    let valid: Vec<(f64, f64, f64)> = points
        .iter()
        .filter_map(|p| {
            p.mean_emissions
                .map(|e| (p.mean_consumption, e, p.mean_population.unwrap_or(0.0)))
        })
        .collect();
    if valid.is_empty() {
        return Err(Error::Render("no data to plot".into()));
    }

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_scatter(root, &valid)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_scatter(root, &valid)
    }
}

fn draw_scatter<DB>(root: DrawingArea<DB, Shift>, points: &[(f64, f64, f64)]) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(rerr)?;

    let (min_x, max_x) = span_f64(points.iter().map(|(c, _, _)| *c)).unwrap_or((0.0, 1.0));
    let (min_y, max_y) = span_f64(points.iter().map(|(_, e, _)| *e)).unwrap_or((0.0, 1.0));
    let max_pop = points
        .iter()
        .map(|(_, _, p)| *p)
        .fold(f64::EPSILON, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Consumption and emissions by country", ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(min_x..max_x * 1.05, min_y..max_y * 1.05)
        .map_err(rerr)?;

    chart
        .configure_mesh()
        .x_desc("Consumption total in TWh")
        .y_desc("Emissions in t")
        .x_label_formatter(&|v| y_label(v))
        .y_label_formatter(&|v| y_label(v))
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(rerr)?;

    let color = office_color(1);
    chart
        .draw_series(points.iter().map(|(consumption, emissions, population)| {
            let radius = 3 + (25.0 * (population / max_pop).sqrt()) as i32;
            Circle::new((*consumption, *emissions), radius, color.mix(0.5).filled())
        }))
        .map_err(rerr)?;

    root.present().map_err(rerr)?;
    Ok(())
}

/// Historical series plus forecast as two line series.
pub fn plot_forecast<P: AsRef<Path>>(
    title: &str,
    y_desc: &str,
    history: &[(i32, f64)],
    forecast: &[f64],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    require_fonts()?;
    if history.is_empty() || forecast.is_empty() {
        return Err(Error::Render("no data to plot".into()));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_forecast(root, title, y_desc, history, forecast)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_forecast(root, title, y_desc, history, forecast)
    }
}

fn draw_forecast<DB>(
    root: DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    history: &[(i32, f64)],
    forecast: &[f64],
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(rerr)?;

    let (last_year, last_value) = match history.last() {
        Some(&last) => last,
        None => return Err(Error::Render("no data to plot".into())),
    };
    let predicted: Vec<(f64, f64)> = std::iter::once((last_year as f64, last_value))
        .chain(
            forecast
                .iter()
                .enumerate()
                .map(|(i, v)| ((last_year + 1 + i as i32) as f64, *v)),
        )
        .collect();

    let min_year = history.first().map(|(y, _)| *y).unwrap_or(last_year) as f64;
    let max_year = last_year as f64 + forecast.len() as f64;
    let (min_val, max_val) = span_f64(
        history
            .iter()
            .map(|(_, v)| *v)
            .chain(forecast.iter().copied()),
    )
    .ok_or_else(|| Error::Render("no numeric values to plot".into()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(min_year..max_year, min_val..max_val)
        .map_err(rerr)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(y_desc)
        .x_labels(12)
        .y_labels(10)
        .x_label_formatter(&|x| format!("{}", x.round() as i32))
        .y_label_formatter(&|v| y_label(v))
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(rerr)?;

    let historical: Vec<(f64, f64)> = history.iter().map(|(y, v)| (*y as f64, *v)).collect();
    chart
        .draw_series(LineSeries::new(historical, RED.stroke_width(2)))
        .map_err(rerr)?
        .label("historical")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], RED));
    chart
        .draw_series(LineSeries::new(predicted, BLUE.stroke_width(2)))
        .map_err(rerr)?
        .label("predicted")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], BLUE));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(rerr)?;

    root.present().map_err(rerr)?;
    Ok(())
}
