use crate::chart::style::{build_day_chart, draw_day_mesh, draw_legend, AxisStyle};
use crate::chart::Chart;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

//one filled area from zero up to the series
#[derive(Debug, Clone)]
pub struct AreaSpec {
    pub label: String,
    pub values: Vec<f64>,
    pub color: RGBColor,
    //higher layers are painted later, on top of lower ones
    pub layer: i32,
    pub edge_width: u32,
}

impl AreaSpec {
    pub fn from_counts(label: &str, values: &[i64], color: RGBColor, layer: i32) -> Self {
        AreaSpec {
            label: label.to_string(),
            values: values.iter().map(|&v| v as f64).collect(),
            color,
            layer,
            edge_width: 1,
        }
    }

    pub fn with_edge_width(mut self, width: u32) -> Self {
        self.edge_width = width;
        self
    }
}

//overlapping (not stacked) filled areas sharing the day axis
#[derive(Debug, Clone)]
pub struct AreaChart {
    name: String,
    title: String,
    ticks: Vec<String>,
    areas: Vec<AreaSpec>,
    style: AxisStyle,
}

impl AreaChart {
    pub fn new(
        name: &str,
        title: &str,
        ticks: Vec<String>,
        mut areas: Vec<AreaSpec>,
        style: AxisStyle,
    ) -> Self {
        //stable, so equal layers keep their given order
        areas.sort_by_key(|a| a.layer);
        AreaChart {
            name: name.to_string(),
            title: title.to_string(),
            ticks,
            areas,
            style,
        }
    }

    //areas in paint order
    pub fn areas(&self) -> &[AreaSpec] {
        &self.areas
    }
}

impl Chart for AreaChart {
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

        for spec in &self.areas {
            let color = spec.color;
            let points = spec
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v));

            chart
                .draw_series(
                    AreaSeries::new(points, 0.0, color.filled())
                        .border_style(BLACK.stroke_width(spec.edge_width)),
                )?
                .label(spec.label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
                });
        }

        if let Some(position) = self.style.legend {
            draw_legend(&mut chart, position)?;
        }
        Ok(())
    }
}
