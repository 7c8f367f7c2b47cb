pub mod report_config;

pub use report_config::{
    CasesColumns, FigureSize, OutputFormat, ReportConfiguration, ReportKind, VaccinesColumns,
};
