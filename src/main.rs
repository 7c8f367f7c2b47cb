use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use epicharts::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "epicharts")]
#[command(about = "Charts of COVID-19 situation and vaccination data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //draw the situation charts from a cases file
    Cases {
        //path to tab-separated cases file
        #[arg(long)]
        data: PathBuf,

        //directory for the rendered figures
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,

        //image format (svg, png)
        #[arg(long, default_value = "svg")]
        format: String,

        //legend labels for daily and active cases (eg "Diarios,Activos")
        #[arg(long, value_delimiter = ',')]
        daily_labels: Option<Vec<String>>,

        //legend labels for daily and accumulated deaths
        #[arg(long, value_delimiter = ',')]
        deaths_labels: Option<Vec<String>>,
    },

    //draw the vaccination charts from a doses file
    Vaccines {
        //path to tab-separated vaccination file
        #[arg(long)]
        data: PathBuf,

        //directory for the rendered figures
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,

        //image format (svg, png)
        #[arg(long, default_value = "svg")]
        format: String,

        //legend labels for first, second, third and complete doses
        #[arg(long, value_delimiter = ',')]
        accum_labels: Option<Vec<String>>,

        //legend labels for the four daily dose categories
        #[arg(long, value_delimiter = ',')]
        daily_labels: Option<Vec<String>>,

        //trailing rows shown in the grouped daily chart
        #[arg(long, default_value = "71")]
        window: usize,
    },

    //print a per-column summary of a data file
    Summary {
        //path to tab-separated data file
        #[arg(long)]
        data: PathBuf,
    },

    //run a report described by a json file
    Render {
        //path to report configuration
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("epicharts=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cases {
            data,
            out_dir,
            format,
            daily_labels,
            deaths_labels,
        } => {
            let config = ReportConfiguration {
                kind: ReportKind::Situation,
                data_path: data,
                output_dir: out_dir,
                format: parse_format(&format)?,
                daily_labels,
                deaths_labels,
                ..ReportConfiguration::default()
            };
            render(&config)?;
        }
        Commands::Vaccines {
            data,
            out_dir,
            format,
            accum_labels,
            daily_labels,
            window,
        } => {
            let config = ReportConfiguration {
                kind: ReportKind::Vaccination,
                data_path: data,
                output_dir: out_dir,
                format: parse_format(&format)?,
                accum_labels,
                daily_labels,
                daily_window: window,
                ..ReportConfiguration::default()
            };
            render(&config)?;
        }
        Commands::Summary { data } => {
            summarize(data)?;
        }
        Commands::Render { config } => {
            let config = ReportConfiguration::from_json_file(&config)
                .context(format!("Failed to read report configuration {:?}", config))?;
            render(&config)?;
        }
    }

    Ok(())
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::parse(format).ok_or_else(|| anyhow::anyhow!("Unknown image format: {}", format))
}

fn render(config: &ReportConfiguration) -> Result<()> {
    println!("Epicharts");
    println!("=========\n");

    println!("Report: {:?}", config.kind);
    println!("Data: {:?}", config.data_path);
    println!(
        "Output: {:?} ({}x{} {})\n",
        config.output_dir,
        config.size.width,
        config.size.height,
        config.format.extension()
    );

    let paths = run_report(config)?;

    println!("Rendered {} figure(s)", paths.len());
    for path in &paths {
        println!("  {}", path.display());
    }

    Ok(())
}

fn summarize(data_path: PathBuf) -> Result<()> {
    println!("Loading data from {:?}...", data_path);
    let dataset =
        load_tsv(&data_path).context(format!("Failed to load data from {:?}", data_path))?;

    let summary = DatasetSummary::from_dataset(&dataset)?;

    match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => {
            println!("Loaded {} days, {} to {}\n", summary.days, first, last)
        }
        _ => println!("No rows in {:?}\n", data_path),
    }

    summary.pretty_print_table();
    Ok(())
}
