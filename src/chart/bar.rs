use crate::chart::style::{build_day_chart, draw_day_mesh, draw_legend, AxisStyle};
use crate::chart::Chart;
use crate::metrics::{series_max, sum_series, SeriesError};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

//one bar series, value i is drawn at day x_start + i
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub label: String,
    pub values: Vec<i64>,
    pub color: RGBColor,
}

impl BarSeries {
    pub fn new(label: &str, values: Vec<i64>, color: RGBColor) -> Self {
        BarSeries {
            label: label.to_string(),
            values,
            color,
        }
    }
}

fn bar(x: f64, width: f64, bottom: f64, top: f64) -> [(f64, f64); 2] {
    [(x - width / 2.0, bottom), (x + width / 2.0, top)]
}

fn legend_box(color: RGBColor) -> impl Fn((i32, i32)) -> Rectangle<(i32, i32)> {
    move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
}

//side-by-side bars per day, one slot per series
#[derive(Debug, Clone)]
pub struct GroupedBarChart {
    name: String,
    title: String,
    ticks: Vec<String>,
    series: Vec<BarSeries>,
    style: AxisStyle,
    x_start: f64,
    width: f64,
    shift: f64,
}

impl GroupedBarChart {
    //y range is fixed by the tallest bar of any series
    pub fn new(
        name: &str,
        title: &str,
        ticks: Vec<String>,
        series: Vec<BarSeries>,
        style: AxisStyle,
    ) -> Result<Self, SeriesError> {
        let all: Vec<i64> = series.iter().flat_map(|s| s.values.iter().copied()).collect();
        let y_max = series_max(&all)?;

        Ok(GroupedBarChart {
            name: name.to_string(),
            title: title.to_string(),
            ticks,
            series,
            style: AxisStyle {
                y_max: y_max as f64,
                ..style
            },
            x_start: 1.0,
            width: 0.24,
            shift: 0.13,
        })
    }

    pub fn y_max(&self) -> f64 {
        self.style.y_max
    }

    //center of the bar for series `slot` on value index `i`
    pub fn bar_center(&self, slot: usize, i: usize) -> f64 {
        let half = (self.series.len() / 2) as f64;
        self.x_start + i as f64 + self.shift + self.width * (slot as f64 - half)
    }
}

impl Chart for GroupedBarChart {
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

        for (slot, series) in self.series.iter().enumerate() {
            let color = series.color;
            chart
                .draw_series(series.values.iter().enumerate().map(|(i, &v)| {
                    let x = self.bar_center(slot, i);
                    Rectangle::new(bar(x, self.width, 0.0, v as f64), color.filled())
                }))?
                .label(series.label.as_str())
                .legend(legend_box(color));

            chart.draw_series(series.values.iter().enumerate().map(|(i, &v)| {
                let x = self.bar_center(slot, i);
                Rectangle::new(bar(x, self.width, 0.0, v as f64), BLACK.stroke_width(1))
            }))?;
        }

        if let Some(position) = self.style.legend {
            draw_legend(&mut chart, position)?;
        }
        Ok(())
    }
}

//bars stacked bottom to top in series order, outlined per day with a thin
//segment at each sub-total
#[derive(Debug, Clone)]
pub struct StackedBarChart {
    name: String,
    title: String,
    ticks: Vec<String>,
    layers: Vec<BarSeries>,
    totals: Vec<i64>,
    style: AxisStyle,
    x_start: f64,
    width: f64,
}

impl StackedBarChart {
    //y range is fixed by the tallest stack
    pub fn new(
        name: &str,
        title: &str,
        ticks: Vec<String>,
        layers: Vec<BarSeries>,
        style: AxisStyle,
    ) -> Result<Self, SeriesError> {
        let values: Vec<Vec<i64>> = layers.iter().map(|l| l.values.clone()).collect();
        let totals = sum_series(&values)?;
        let y_max = series_max(&totals)?;

        Ok(StackedBarChart {
            name: name.to_string(),
            title: title.to_string(),
            ticks,
            layers,
            totals,
            style: AxisStyle {
                y_max: y_max as f64,
                ..style
            },
            x_start: 1.0,
            width: 0.86,
        })
    }

    pub fn totals(&self) -> &[i64] {
        &self.totals
    }

    pub fn y_max(&self) -> f64 {
        self.style.y_max
    }

    //running sub-totals where a separator line is drawn on day `i`
    //the boundary under the top layer is skipped when the top layer is empty
    pub fn segment_levels(&self, i: usize) -> Vec<i64> {
        let n = self.layers.len();
        let mut levels = Vec::with_capacity(n.saturating_sub(1));
        let mut running = 0;

        for (k, layer) in self.layers.iter().enumerate().take(n.saturating_sub(1)) {
            running += layer.values[i];
            let below_top = k + 2 == n;
            if below_top && self.layers[n - 1].values[i] == 0 {
                continue;
            }
            levels.push(running);
        }
        levels
    }
}

impl Chart for StackedBarChart {
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

        let mut bottoms = vec![0i64; self.totals.len()];
        for layer in &self.layers {
            let color = layer.color;
            chart
                .draw_series(layer.values.iter().enumerate().map(|(i, &v)| {
                    let x = self.x_start + i as f64;
                    let bottom = bottoms[i] as f64;
                    Rectangle::new(bar(x, self.width, bottom, bottom + v as f64), color.filled())
                }))?
                .label(layer.label.as_str())
                .legend(legend_box(color));

            for (b, v) in bottoms.iter_mut().zip(&layer.values) {
                *b += v;
            }
        }

        chart.draw_series(self.totals.iter().enumerate().map(|(i, &total)| {
            let x = self.x_start + i as f64;
            Rectangle::new(bar(x, self.width, 0.0, total as f64), BLACK.stroke_width(1))
        }))?;

        for i in 0..self.totals.len() {
            let x = self.x_start + i as f64;
            let half = self.width / 2.0;
            chart.draw_series(self.segment_levels(i).into_iter().map(|level| {
                PathElement::new(
                    vec![(x - half, level as f64), (x + half, level as f64)],
                    BLACK.stroke_width(1),
                )
            }))?;
        }

        if let Some(position) = self.style.legend {
            draw_legend(&mut chart, position)?;
        }
        Ok(())
    }
}
