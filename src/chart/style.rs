use anyhow::Result;
use chrono::NaiveDate;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;

//matplotlib "tab" palette, which the reports have always used
pub const TAB_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const TAB_ORANGE: RGBColor = RGBColor(255, 127, 14);
pub const TAB_GREEN: RGBColor = RGBColor(44, 160, 44);
pub const TAB_RED: RGBColor = RGBColor(214, 39, 40);
pub const DARK_ORANGE: RGBColor = RGBColor(224, 99, 0);
pub const GRID_GRAY: RGBColor = RGBColor(128, 128, 128);

pub const X_DESC: &str = "Fecha";

pub type DayCoord = Cartesian2d<RangedCoordf64, RangedCoordf64>;

//how y tick values are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    Plain,
    Thousands,
    Kilo,
    Millions,
    Percent,
}

impl TickFormat {
    //compact tick text, zero and negative ticks are left blank
    pub fn format(&self, value: f64) -> String {
        if value <= 0.0 {
            return String::new();
        }
        match self {
            TickFormat::Plain => format!("{:.0}", value),
            TickFormat::Thousands => format!("{:.0} mil", value * 1e-3),
            TickFormat::Kilo => format!("{:.0} K", value * 1e-3),
            TickFormat::Millions => format!("{:.1} M", value * 1e-6),
            TickFormat::Percent => format!("{:.1} %", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(position: LegendPosition) -> Self {
        match position {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        }
    }
}

//axis settings shared by every chart
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    pub y_max: f64,
    pub y_desc: String,
    pub format: TickFormat,
    //minor subdivisions between two major y ticks
    pub minor_divisions: usize,
    pub legend: Option<LegendPosition>,
    pub grid: bool,
}

impl AxisStyle {
    pub fn new(y_max: f64, format: TickFormat) -> Self {
        AxisStyle {
            y_max,
            y_desc: String::new(),
            format,
            minor_divisions: 5,
            legend: Some(LegendPosition::UpperLeft),
            grid: true,
        }
    }

    pub fn y_desc(mut self, desc: &str) -> Self {
        self.y_desc = desc.to_string();
        self
    }

    pub fn minor_divisions(mut self, divisions: usize) -> Self {
        self.minor_divisions = divisions;
        self
    }

    pub fn legend(mut self, legend: Option<LegendPosition>) -> Self {
        self.legend = legend;
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = false;
        self
    }

    //top of the y range, 5% headroom over the data
    pub fn y_top(&self) -> f64 {
        padded_top(self.y_max)
    }
}

pub fn padded_top(y_max: f64) -> f64 {
    let top = y_max * 1.05;
    if top.is_finite() && top > 0.0 {
        top
    } else {
        1.0
    }
}

//x tick labels: the last day and every 7th day before it get a "%d/%m" label
//with first_date != 0 the first labelled day moves to that index and the two
//days after it are blanked; days 1 and 2 never carry text unless one of them
//is first_date
pub fn weekly_tick_labels(dates: &[NaiveDate], first_date: usize) -> Vec<String> {
    let n = dates.len();
    let mut labels: Vec<String> = dates.iter().map(|d| d.format("%d/%m").to_string()).collect();

    for i in 0..n.saturating_sub(1) {
        if i % 7 != 0 {
            labels[n - 1 - i].clear();
        }
    }

    if first_date != 0 && n > 0 {
        labels[0].clear();
        if let Some(date) = dates.get(first_date) {
            labels[first_date] = date.format("%d/%m").to_string();
        }
        for blank in [first_date + 1, first_date + 2] {
            if let Some(label) = labels.get_mut(blank) {
                label.clear();
            }
        }
    }

    for blank in [1, 2] {
        if blank != first_date {
            if let Some(label) = labels.get_mut(blank) {
                label.clear();
            }
        }
    }

    labels
}

//label for an x key point, only whole day positions carry text
pub fn tick_label_at(ticks: &[String], x: f64) -> String {
    let day = x.round();
    if day < 0.0 || (x - day).abs() > 1e-6 {
        return String::new();
    }
    ticks.get(day as usize).cloned().unwrap_or_default()
}

//cartesian chart over days 0..n_days with the standard label areas
pub fn build_day_chart<'a, DB>(
    area: &'a DrawingArea<DB, Shift>,
    n_days: usize,
    y_top: f64,
) -> Result<ChartContext<'a, DB, DayCoord>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let chart = ChartBuilder::on(area)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..n_days.max(1) as f64, 0.0..y_top)?;
    Ok(chart)
}

//draws axes, weekly x labels, daily minor ticks and y gridlines
pub fn draw_day_mesh<DB>(
    chart: &mut ChartContext<'_, DB, DayCoord>,
    ticks: &[String],
    style: &AxisStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_formatter = |x: &f64| tick_label_at(ticks, *x);
    let y_formatter = |y: &f64| style.format.format(*y);
    let (bold, light) = if style.grid {
        (GRID_GRAY.mix(0.5), GRID_GRAY.mix(0.2))
    } else {
        (TRANSPARENT, TRANSPARENT)
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ticks.len() + 1)
        .x_label_formatter(&x_formatter)
        .y_labels(8)
        .y_label_formatter(&y_formatter)
        .y_max_light_lines(style.minor_divisions.saturating_sub(1))
        .bold_line_style(&bold)
        .light_line_style(&light)
        .x_desc(X_DESC)
        .y_desc(style.y_desc.as_str())
        .axis_desc_style(("sans-serif", 15))
        .label_style(("sans-serif", 13))
        .draw()?;

    Ok(())
}

//series legend box, shared by single and dual axis charts
pub fn draw_legend<'a, DB, CT>(
    chart: &mut ChartContext<'a, DB, CT>,
    position: LegendPosition,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    CT: CoordTranslate,
{
    chart
        .configure_series_labels()
        .position(position.into())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 14))
        .draw()?;
    Ok(())
}
