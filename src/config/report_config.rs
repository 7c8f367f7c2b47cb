use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

//which family of charts to draw from a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Situation,
    Vaccination,
}

impl ReportKind {
    //parse report kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cases" | "situation" => Some(ReportKind::Situation),
            "vaccines" | "vaccination" => Some(ReportKind::Vaccination),
            _ => None,
        }
    }
}

//image format of the rendered figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

//metric column positions in a situation (cases) file, date column excluded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CasesColumns {
    pub samples: usize,
    pub daily: usize,
    pub active: usize,
    pub accumulated: usize,
    pub daily_deaths: usize,
    pub accumulated_deaths: usize,
    pub serious: usize,
    pub critical: usize,
}

impl Default for CasesColumns {
    fn default() -> Self {
        CasesColumns {
            samples: 0,
            daily: 1,
            active: 2,
            accumulated: 3,
            daily_deaths: 4,
            accumulated_deaths: 5,
            serious: 6,
            critical: 7,
        }
    }
}

//metric column positions in a vaccination file, all cumulative
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaccinesColumns {
    pub total: usize,
    pub first: usize,
    pub second: usize,
    pub third: usize,
    pub complete: usize,
}

impl Default for VaccinesColumns {
    fn default() -> Self {
        VaccinesColumns {
            total: 0,
            first: 1,
            second: 2,
            third: 3,
            complete: 4,
        }
    }
}

//figure size in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FigureSize {
    fn default() -> Self {
        //13 x 6 inches at 100 dpi
        FigureSize {
            width: 1300,
            height: 600,
        }
    }
}

//complete report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfiguration {
    //data
    pub kind: ReportKind,
    pub data_path: PathBuf,

    //output
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    #[serde(default)]
    pub size: FigureSize,

    //label overrides, header labels are used when absent
    #[serde(default)]
    pub daily_labels: Option<Vec<String>>,
    #[serde(default)]
    pub deaths_labels: Option<Vec<String>>,
    #[serde(default)]
    pub accum_labels: Option<Vec<String>>,

    //vaccination only: how many trailing rows the grouped daily chart shows
    #[serde(default = "default_daily_window")]
    pub daily_window: usize,

    #[serde(default)]
    pub cases_columns: CasesColumns,
    #[serde(default)]
    pub vaccines_columns: VaccinesColumns,
}

fn default_daily_window() -> usize {
    71
}

impl Default for ReportConfiguration {
    fn default() -> Self {
        ReportConfiguration {
            kind: ReportKind::Situation,
            data_path: PathBuf::from("cases.txt"),
            output_dir: PathBuf::from("charts"),
            format: OutputFormat::Svg,
            size: FigureSize::default(),
            daily_labels: None,
            deaths_labels: None,
            accum_labels: None,
            daily_window: default_daily_window(),
            cases_columns: CasesColumns::default(),
            vaccines_columns: VaccinesColumns::default(),
        }
    }
}

impl ReportConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ReportConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kinds_and_formats() {
        assert_eq!(ReportKind::parse("Cases"), Some(ReportKind::Situation));
        assert_eq!(ReportKind::parse("vaccines"), Some(ReportKind::Vaccination));
        assert_eq!(ReportKind::parse("deaths"), None);
        assert_eq!(OutputFormat::parse("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::Svg.extension(), "svg");
    }

    #[test]
    fn json_round_trip_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let config = ReportConfiguration {
            kind: ReportKind::Vaccination,
            data_path: PathBuf::from("vaccines.txt"),
            accum_labels: Some(vec!["Primera dosis".to_string()]),
            daily_window: 30,
            ..Default::default()
        };
        config.to_json_file(&path).unwrap();

        let loaded = ReportConfiguration::from_json_file(&path).unwrap();
        assert_eq!(loaded.kind, ReportKind::Vaccination);
        assert_eq!(loaded.accum_labels, config.accum_labels);
        assert_eq!(loaded.daily_window, 30);
        assert_eq!(loaded.vaccines_columns, VaccinesColumns::default());
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let json = r#"{
            "kind": "Situation",
            "data_path": "cases.txt",
            "output_dir": "out",
            "format": "Png"
        }"#;
        let config: ReportConfiguration = serde_json::from_str(json).unwrap();

        assert_eq!(config.daily_window, 71);
        assert_eq!(config.size, FigureSize::default());
        assert_eq!(config.cases_columns.critical, 7);
        assert!(config.daily_labels.is_none());
    }
}
