use plotters::{
    chart::ChartBuilder,
    prelude::{Circle, IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, RGBColor, TextStyle, WHITE},
};

use crate::Theme;

pub const COLOR_SERIES: RGBColor = RGBColor(156, 39, 176);

pub const OPACITY_LINE: f64 = 0.9;
pub const OPACITY_POINT: f64 = 1.0;

pub const WIDTH_LINE: u32 = 2;
pub const SIZE_POINT: u32 = 4;

pub const FONT: (&str, u32) = ("Roboto", 11);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub points: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 420,
            height: 200,
            points: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn of(series: &[f32]) -> Option<Self> {
        let min = series.iter().copied().reduce(f32::min)?;
        let max = series.iter().copied().reduce(f32::max)?;
        Some(Self { min, max })
    }

    /// The y axis starts at zero if the series contains zero.
    fn min_with_margin(self) -> f32 {
        if self.min.abs() <= f32::EPSILON {
            return self.min;
        }
        self.min - self.margin()
    }

    fn max_with_margin(self) -> f32 {
        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Plot a series as a line chart.
///
/// The values are placed in order at x positions 1 to n. Each value is marked with a point if
/// enabled in the options. Returns `None` if the series is empty.
#[allow(clippy::missing_errors_doc)]
pub fn plot_series(
    series: &[f32],
    options: &ChartOptions,
    theme: Theme,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let Some(bounds) = Bounds::of(series) else {
        return Ok(None);
    };

    #[allow(clippy::cast_precision_loss)]
    let points = series
        .iter()
        .enumerate()
        .map(|(i, v)| ((i + 1) as f32, *v))
        .collect::<Vec<_>>();

    #[allow(clippy::cast_precision_loss)]
    let x_max = series.len() as f32 + 0.5;

    let mut result = String::new();

    {
        let root =
            SVGBackend::with_string(&mut result, (options.width, options.height)).into_drawing_area();
        let (color, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(40f32)
            .build_cartesian_2d(
                0.5f32..x_max,
                bounds.min_with_margin()..bounds.max_with_margin(),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(usize::min(series.len(), 10))
            .x_label_formatter(&|x| format!("{x:.0}"))
            .y_labels(6)
            .y_label_formatter(&|y| format!("{y:.0}"))
            .draw()?;

        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            COLOR_SERIES.mix(OPACITY_LINE).stroke_width(WIDTH_LINE),
        ))?;

        if options.points {
            chart.draw_series(points.iter().map(|(x, y)| {
                Circle::new(
                    (*x, *y),
                    SIZE_POINT,
                    COLOR_SERIES.mix(OPACITY_POINT).filled(),
                )
            }))?;
        }

        root.present()?;
    }

    Ok(Some(result))
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::System | Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}
