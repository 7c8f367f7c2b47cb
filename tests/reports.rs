use epicharts::prelude::*;
use std::fs;
use std::path::Path;

const CASES: &str = "\
Fecha\tMuestras\tDiarios\tActivos\tAcumulados\tFallecidos\tFallecidos acumulados\tGraves\tCriticos
2021-08-01\t20000\t1000\t9000\t300000\t10\t2000\t50\t20
2021-08-02\t25000\t2000\t10500\t302000\t30\t2030\t80\t40

2021-08-03\t22000\t1600\t11000\t303600\t16\t2046\t64\t16
";

const VACCINES: &str = "\
Fecha\tTotal\tPrimera\tSegunda\tTercera\tEsquema completo
2021-12-01\t1000\t600\t300\t100\t420
2021-12-02\t1300\t700\t420\t180\t520
2021-12-03\t1500\t790\t470\t240\t600
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_a_cases_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "cases.txt", CASES);

    let dataset = load_tsv(&path).unwrap();
    assert_eq!(dataset.date_label(), "Fecha");
    assert_eq!(dataset.row_count(), 3);
    assert_eq!(dataset.dates().len(), dataset.row_count());
    assert_eq!(dataset.column_by_label("Activos").unwrap(), vec![9000, 10500, 11000]);
}

#[test]
fn situation_report_prepares_every_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "cases.txt", CASES);
    let dataset = load_tsv(&path).unwrap();

    let config = ReportConfiguration {
        daily_labels: Some(vec!["Nuevos".to_string(), "En curso".to_string()]),
        ..ReportConfiguration::default()
    };
    let charts = SituationCharts::build(&dataset, &config).unwrap();

    assert_eq!(charts.daily_cases.lines()[0].label, "Nuevos");
    assert_eq!(charts.positivity.lines()[0].values, vec![5.0, 8.0, 7.27]);
    assert_eq!(charts.daily_deaths.secondary_top(), 150.0);
}

#[test]
fn vaccination_report_ties_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "vaccines.txt", VACCINES);
    let dataset = load_tsv(&path).unwrap();

    let doses = DailyDoses::from_dataset(&dataset, &VaccinesColumns::default()).unwrap();
    assert!(doses.ties_out());
    assert_eq!(doses.administered(), daily_delta(&dataset.column(0).unwrap()).as_slice());

    let charts = VaccinationCharts::build(&dataset, &ReportConfiguration::default()).unwrap();
    assert_eq!(charts.daily_stack.totals(), &[300, 200]);
}

#[test]
fn header_only_file_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "empty.txt", "Fecha\tTotal\tPrimera\tSegunda\tTercera\tCompleto\n");

    let dataset = load_tsv(&data).unwrap();
    assert!(dataset.is_empty());

    let config = ReportConfiguration {
        kind: ReportKind::Vaccination,
        data_path: data,
        output_dir: dir.path().join("charts"),
        ..ReportConfiguration::default()
    };
    let err = run_report(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::Series(SeriesError::EmptySeries))
    ));
}

#[test]
fn invalid_date_is_reported_with_its_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bad.txt", "Fecha\ta\tb\n2022-01-01\t100\t50\n2022-13-01\t150\t80\n");

    let err = load_tsv(&path).unwrap_err();
    assert!(matches!(err, DatasetError::InvalidDate { line: 3, .. }));
}

#[test]
fn missing_file_fails_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfiguration {
        data_path: dir.path().join("nope.txt"),
        output_dir: dir.path().join("charts"),
        ..ReportConfiguration::default()
    };

    let err = run_report(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::NotFound(_))
    ));
}

#[test]
fn report_configuration_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    let config = ReportConfiguration {
        kind: ReportKind::Vaccination,
        format: OutputFormat::Png,
        daily_window: 30,
        ..ReportConfiguration::default()
    };
    config.to_json_file(&path).unwrap();

    let loaded = ReportConfiguration::from_json_file(&path).unwrap();
    assert_eq!(loaded.kind, ReportKind::Vaccination);
    assert_eq!(loaded.format, OutputFormat::Png);
    assert_eq!(loaded.daily_window, 30);
}

#[test]
fn renders_situation_figures_to_svg() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "cases.txt", CASES);
    let config = ReportConfiguration {
        data_path: data,
        output_dir: dir.path().join("charts"),
        ..ReportConfiguration::default()
    };

    let paths = run_report(&config).unwrap();
    assert_eq!(paths.len(), 6);
    for path in paths {
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "svg");
    }
}

#[test]
fn renders_a_stacked_chart_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "vaccines.txt", VACCINES);
    let dataset = load_tsv(&data).unwrap();
    let charts = VaccinationCharts::build(&dataset, &ReportConfiguration::default()).unwrap();

    let figure = Figure::new(dir.path(), FigureSize::default(), OutputFormat::Svg);
    let svg = figure.render_svg(&charts.daily_stack).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Dosis diarias"));
}

//twenty days starting 2021-08-01 with daily deaths peaking at 260
fn twenty_days_of_cases() -> String {
    let mut text = String::from(
        "Fecha\tMuestras\tDiarios\tActivos\tAcumulados\tFallecidos\tFallecidos acumulados\tGraves\tCriticos\n",
    );
    let mut accumulated = 300_000;
    let mut accumulated_deaths = 2_000;
    for day in 0..20i64 {
        let daily = 1_000 + 50 * day;
        let deaths = 13 * (day + 1);
        accumulated += daily;
        accumulated_deaths += deaths;
        text.push_str(&format!(
            "2021-08-{:02}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            day + 1,
            20_000 + 100 * day,
            daily,
            9_000 + 200 * day,
            accumulated,
            deaths,
            accumulated_deaths,
            50 + day,
            20 + day,
        ));
    }
    text
}

#[test]
fn dual_axis_svg_carries_title_ticks_and_reference() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "cases.txt", &twenty_days_of_cases());
    let dataset = load_tsv(&data).unwrap();
    let charts = SituationCharts::build(&dataset, &ReportConfiguration::default()).unwrap();
    assert_eq!(charts.daily_deaths.reference(), 300);

    let figure = Figure::new(dir.path(), FigureSize::default(), OutputFormat::Svg);
    let svg = figure.render_svg(&charts.daily_deaths).unwrap();

    assert!(svg.contains("Fallecidos diarios y acumulado"));
    for tick in ["01/08", "06/08", "13/08", "20/08"] {
        assert!(svg.contains(tick), "missing tick {}", tick);
    }
    assert!(!svg.contains("02/08"));
    assert!(svg.contains(">300<"));
}

#[test]
fn grouped_bars_render_with_window_title() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "vaccines.txt", VACCINES);
    let dataset = load_tsv(&data).unwrap();
    let config = ReportConfiguration {
        daily_window: 2,
        ..ReportConfiguration::default()
    };
    let charts = VaccinationCharts::build(&dataset, &config).unwrap();

    let figure = Figure::new(dir.path(), FigureSize::default(), OutputFormat::Svg);
    let svg = figure.render_svg(&charts.daily).unwrap();
    assert!(svg.contains("Dosis diarias (Últimos 1 días)"));

    let areas = figure.render_svg(&charts.accumulated).unwrap();
    assert!(areas.contains("Acumulados por dosis"));
    assert!(areas.contains("Primera"));
}
