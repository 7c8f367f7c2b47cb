use crate::chart::style::{
    build_day_chart, draw_day_mesh, draw_legend, padded_top, AxisStyle, LegendPosition,
    GRID_GRAY,
};
use crate::chart::Chart;
use crate::metrics::{round_to_magnitude, series_max, SeriesError};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::DerefMut;

//one plotted line, x positions are day indices
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub label: String,
    pub values: Vec<f64>,
    pub color: RGBColor,
    pub markers: bool,
}

impl LineSpec {
    pub fn new(label: &str, values: Vec<f64>, color: RGBColor) -> Self {
        LineSpec {
            label: label.to_string(),
            values,
            color,
            markers: false,
        }
    }

    pub fn from_counts(label: &str, values: &[i64], color: RGBColor) -> Self {
        Self::new(label, values.iter().map(|&v| v as f64).collect(), color)
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }
}

fn draw_line<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    line: &LineSpec,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let color = line.color;
    let points = line.points();

    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
        .label(line.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

    if line.markers {
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))?;
    }
    Ok(())
}

//one or more lines over a shared day axis
#[derive(Debug, Clone)]
pub struct LineChart {
    name: String,
    title: String,
    ticks: Vec<String>,
    lines: Vec<LineSpec>,
    style: AxisStyle,
}

impl LineChart {
    //`ticks` has one entry per day, empty strings for unlabelled days
    pub fn new(
        name: &str,
        title: &str,
        ticks: Vec<String>,
        lines: Vec<LineSpec>,
        style: AxisStyle,
    ) -> Self {
        LineChart {
            name: name.to_string(),
            title: title.to_string(),
            ticks,
            lines,
            style,
        }
    }

    pub fn lines(&self) -> &[LineSpec] {
        &self.lines
    }

    pub fn style(&self) -> &AxisStyle {
        &self.style
    }
}

impl Chart for LineChart {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn draw<DB>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let mut chart = build_day_chart(area, self.ticks.len(), self.style.y_top())?;
        draw_day_mesh(&mut chart, &self.ticks, &self.style)?;

        for line in &self.lines {
            draw_line(&mut chart, line)?;
        }

        if let Some(position) = self.style.legend {
            draw_legend(&mut chart, position)?;
        }
        Ok(())
    }
}

//a cumulative line on the left axis and a daily line on a stretched right axis
//the right axis shows a single reference value rounded to the nearest hundred
#[derive(Debug, Clone)]
pub struct DualAxisChart {
    name: String,
    title: String,
    ticks: Vec<String>,
    primary: LineSpec,
    secondary: LineSpec,
    style: AxisStyle,
    secondary_top: f64,
    reference: i64,
}

impl DualAxisChart {
    pub fn new(
        name: &str,
        title: &str,
        ticks: Vec<String>,
        primary: LineSpec,
        secondary: LineSpec,
        style: AxisStyle,
    ) -> Result<Self, SeriesError> {
        let secondary_max = series_max(&secondary.values)?;
        let reference = round_to_magnitude(secondary_max.round() as i64, 2)?;

        Ok(DualAxisChart {
            name: name.to_string(),
            title: title.to_string(),
            ticks,
            primary,
            secondary,
            style,
            secondary_top: secondary_max * 5.0,
            reference,
        })
    }

    pub fn reference(&self) -> i64 {
        self.reference
    }

    pub fn secondary_top(&self) -> f64 {
        self.secondary_top
    }

    //five evenly spaced minor lines up to and including the reference
    pub fn reference_lines(&self) -> Vec<f64> {
        (1..=5)
            .map(|k| self.reference as f64 * k as f64 / 5.0)
            .collect()
    }
}

impl Chart for DualAxisChart {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn draw<DB>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let n_days = self.ticks.len().max(1) as f64;
        let secondary_top = if self.secondary_top > 0.0 {
            self.secondary_top
        } else {
            1.0
        };

        let mut chart = ChartBuilder::on(area)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .right_y_label_area_size(70)
            .build_cartesian_2d(0.0..n_days, 0.0..padded_top(self.style.y_max))?
            .set_secondary_coord(0.0..n_days, 0.0..secondary_top);

        //primary axis has no minor ticks or gridlines of its own
        draw_day_mesh(&mut chart, &self.ticks, &self.style)?;

        chart
            .configure_secondary_axes()
            .y_labels(2)
            .y_label_formatter(&|_: &f64| String::new())
            .draw()?;

        let x_end = n_days;
        for (k, y) in self.reference_lines().into_iter().enumerate() {
            let major = k == 4;
            let style = if major {
                GRID_GRAY.mix(0.6).stroke_width(1)
            } else {
                GRID_GRAY.mix(0.25).stroke_width(1)
            };
            chart.draw_secondary_series(LineSeries::new(vec![(0.0, y), (x_end, y)], style))?;
        }

        let reference_font = ("sans-serif", 13)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Bottom));
        chart.draw_secondary_series(std::iter::once(Text::new(
            self.reference.to_string(),
            (x_end, self.reference as f64),
            reference_font,
        )))?;

        //daily line first so it leads the legend
        let color = self.secondary.color;
        let points = self.secondary.points();
        chart
            .draw_secondary_series(LineSeries::new(
                points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(self.secondary.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        if self.secondary.markers {
            chart.draw_secondary_series(
                points.iter().map(|&p| Circle::new(p, 3, color.filled())),
            )?;
        }

        draw_line(chart.deref_mut(), &self.primary)?;

        draw_legend(chart.deref_mut(), LegendPosition::UpperLeft)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::style::{TickFormat, TAB_ORANGE, TAB_RED};

    fn deaths_chart(daily: &[i64]) -> Result<DualAxisChart, SeriesError> {
        let ticks = vec![String::new(); daily.len()];
        let cumulative: Vec<i64> = daily
            .iter()
            .scan(0, |acc, &d| {
                *acc += d;
                Some(*acc)
            })
            .collect();

        DualAxisChart::new(
            "deaths",
            "Fallecidos",
            ticks,
            LineSpec::from_counts("Acumulado", &cumulative, TAB_RED),
            LineSpec::from_counts("Diarios", daily, TAB_ORANGE).with_markers(),
            AxisStyle::new(cumulative.last().copied().unwrap_or(0) as f64, TickFormat::Thousands)
                .without_grid(),
        )
    }

    #[test]
    fn secondary_axis_is_five_times_the_peak() {
        let chart = deaths_chart(&[40, 120, 260, 180]).unwrap();
        assert_eq!(chart.secondary_top(), 1300.0);
        assert_eq!(chart.reference(), 300);
        assert_eq!(
            chart.reference_lines(),
            vec![60.0, 120.0, 180.0, 240.0, 300.0]
        );
    }

    #[test]
    fn reference_rounds_half_to_even() {
        assert_eq!(deaths_chart(&[10, 250]).unwrap().reference(), 200);
        assert_eq!(deaths_chart(&[10, 350]).unwrap().reference(), 400);
    }

    #[test]
    fn empty_secondary_series_fails_explicitly() {
        assert_eq!(deaths_chart(&[]).unwrap_err(), SeriesError::EmptySeries);
    }

    #[test]
    fn line_points_use_day_index() {
        let line = LineSpec::from_counts("a", &[5, 7], TAB_RED);
        assert_eq!(line.points(), vec![(0.0, 5.0), (1.0, 7.0)]);
        assert!(!line.markers);
        assert!(line.with_markers().markers);
    }
}
