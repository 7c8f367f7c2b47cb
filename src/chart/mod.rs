//chart rendering: every figure is an explicit value drawn onto its own backend

pub mod area;
pub mod bar;
pub mod line;
pub mod style;

pub use area::{AreaChart, AreaSpec};
pub use bar::{BarSeries, GroupedBarChart, StackedBarChart};
pub use line::{DualAxisChart, LineChart, LineSpec};
pub use style::{AxisStyle, LegendPosition, TickFormat};

use crate::config::{FigureSize, OutputFormat};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::PathBuf;
use tracing::info;

//something that can draw itself onto a drawing area of any backend
pub trait Chart {
    //file stem of the rendered figure
    fn name(&self) -> &str;

    //caption drawn above the plot
    fn title(&self) -> String;

    fn draw<DB>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static;
}

//output target for charts: pixel size, image format and directory
#[derive(Debug, Clone)]
pub struct Figure {
    pub size: FigureSize,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

impl Figure {
    pub fn new(output_dir: impl Into<PathBuf>, size: FigureSize, format: OutputFormat) -> Self {
        Figure {
            size,
            format,
            output_dir: output_dir.into(),
        }
    }

    //where a chart with the given name ends up
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", name, self.format.extension()))
    }

    //renders the chart to `<output_dir>/<name>.<ext>`
    pub fn save<C: Chart>(&self, chart: &C) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {:?}", self.output_dir))?;

        let path = self.path_for(chart.name());
        let dims = (self.size.width, self.size.height);

        match self.format {
            OutputFormat::Svg => {
                let root = SVGBackend::new(&path, dims).into_drawing_area();
                render_onto(&root, chart)?;
            }
            OutputFormat::Png => {
                let root = BitMapBackend::new(&path, dims).into_drawing_area();
                render_onto(&root, chart)?;
            }
        }

        info!(chart = chart.name(), path = %path.display(), "rendered figure");
        Ok(path)
    }

    //renders the chart to an in-memory SVG document
    pub fn render_svg<C: Chart>(&self, chart: &C) -> Result<String> {
        let mut svg = String::new();
        {
            let root =
                SVGBackend::with_string(&mut svg, (self.size.width, self.size.height))
                    .into_drawing_area();
            render_onto(&root, chart)?;
        }
        Ok(svg)
    }
}

fn render_onto<DB, C>(root: &DrawingArea<DB, Shift>, chart: &C) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    C: Chart,
{
    root.fill(&WHITE)?;
    let area = root.titled(&chart.title(), ("sans-serif", 24))?;
    chart
        .draw(&area)
        .with_context(|| format!("Failed to draw {}", chart.name()))?;
    root.present()?;
    Ok(())
}
