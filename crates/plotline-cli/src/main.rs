//! plotline CLI - render insights charts to SVG or JSON scenes.

mod error;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use plotline_charts::{
    audit_series, Chart, Dataset, Dimension, InsightsPreset, ResponsiveContainer, SvgWriter,
};
use plotline_core::Size;
use plotline_yaml::ChartManifest;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "plotline")]
#[command(about = "Render line, area and bar charts from bucketed metrics")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart from a dataset
    Render {
        /// JSON rows or an insights timeseries response ("-" for stdin)
        #[arg(short, long)]
        data: PathBuf,

        /// YAML chart manifest
        #[arg(short, long, conflicts_with = "preset")]
        manifest: Option<PathBuf>,

        /// Built-in insights chart (requests, tokens, latency, success-rate)
        #[arg(short, long)]
        preset: Option<InsightsPreset>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Display width, e.g. 100% or 640px
        #[arg(long)]
        width: Option<Dimension>,

        /// Display height, e.g. 320px
        #[arg(long)]
        height: Option<Dimension>,

        /// Width of the page the chart is placed in
        #[arg(long, default_value_t = 960.0)]
        parent_width: f32,

        /// Height of the page the chart is placed in
        #[arg(long, default_value_t = 320.0)]
        parent_height: f32,
    },

    /// Check YAML manifest validity
    Check {
        /// Path to manifest file
        #[arg(default_value = "chart.yaml")]
        manifest: PathBuf,
    },

    /// List the built-in insights charts
    Presets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Standalone SVG document
    Svg,
    /// Scene draw commands as JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line output
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(cli.command, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Logs go to stderr so rendered output on stdout stays clean. `RUST_LOG`
/// overrides the verbosity flags.
fn init_logging(verbose: u8, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    match format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

fn run(command: Commands, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Commands::Render {
            data,
            manifest,
            preset,
            format,
            output,
            width,
            height,
            parent_width,
            parent_height,
        } => {
            let request = RenderRequest {
                data,
                manifest,
                preset,
                format,
                width,
                height,
                parent: Size::new(parent_width, parent_height),
            };
            let rendered = render(&request)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered).map_err(|e| CliError::io(&path, e))?;
                    info!(path = %path.display(), "wrote chart");
                }
                None => out.write_all(rendered.as_bytes())?,
            }
            Ok(())
        }
        Commands::Check { manifest } => check_manifest(&manifest, out),
        Commands::Presets => {
            for preset in InsightsPreset::ALL {
                writeln!(out, "{:<14} {}", preset.name(), preset.title())?;
            }
            Ok(())
        }
    }
}

struct RenderRequest {
    data: PathBuf,
    manifest: Option<PathBuf>,
    preset: Option<InsightsPreset>,
    format: OutputFormat,
    width: Option<Dimension>,
    height: Option<Dimension>,
    parent: Size,
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::io(path, e))?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

fn load_chart(request: &RenderRequest) -> Result<(Chart, ResponsiveContainer), CliError> {
    if let Some(path) = &request.manifest {
        let manifest = ChartManifest::load(&read_input(path)?)?;
        debug!(path = %path.display(), kind = %manifest.kind, "loaded manifest");
        return Ok((manifest.to_chart(), manifest.container()));
    }
    if let Some(preset) = request.preset {
        debug!(%preset, "using preset");
        return Ok((preset.chart(), ResponsiveContainer::default()));
    }
    Err(CliError::NoChart)
}

fn render(request: &RenderRequest) -> Result<String, CliError> {
    let (chart, mut container) = load_chart(request)?;
    if let Some(width) = request.width {
        container.width = width;
    }
    if let Some(height) = request.height {
        container.height = height;
    }

    let dataset = Dataset::from_json(&read_input(&request.data)?)?;
    let series = chart.resolved_series(&dataset);
    for audit in audit_series(&dataset, &series) {
        if !audit.is_clean() {
            warn!(
                data_key = %audit.data_key,
                missing = audit.missing,
                defaulted = audit.defaulted,
                "series has values that plot as zero"
            );
        }
    }

    let scene = chart.render(&dataset);
    info!(
        kind = %chart.kind(),
        rows = dataset.len(),
        series = series.len(),
        commands = scene.command_count(),
        "rendered chart"
    );

    match request.format {
        OutputFormat::Svg => {
            let mut writer = SvgWriter::for_container(&container, request.parent);
            if let Some(title) = chart.get_title() {
                writer = writer.title(title);
            }
            Ok(writer.write(&scene))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&scene)? + "\n"),
    }
}

fn check_manifest(path: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Checking manifest: {}", path.display())?;
    let manifest = ChartManifest::load(&read_input(path)?)?;
    let drawn = manifest
        .series_decls()
        .iter()
        .filter(|s| s.kind == manifest.kind)
        .count();

    writeln!(out, "Manifest valid!")?;
    writeln!(out, "  Kind: {}", manifest.kind)?;
    if let Some(title) = &manifest.title {
        writeln!(out, "  Title: {title}")?;
    }
    writeln!(out, "  Series: {} ({drawn} drawn)", manifest.series.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const BUCKETS: &str = r#"{"granularity": "day", "buckets": [
        {"bucket_start": "2024-05-01T00:00:00Z", "requests": 12, "failed_requests": 2},
        {"bucket_start": "2024-05-02T00:00:00Z", "requests": 30, "failed_requests": "?"}
    ]}"#;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("plotline-cli-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn run_to_string(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli.command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // =========================================================================
    // Argument Parsing Tests
    // =========================================================================

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args() {
        let cli = Cli::try_parse_from([
            "plotline", "-vv", "render", "--data", "d.json", "--preset", "success-rate",
            "--width", "50%", "--height", "240px", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render {
                preset,
                width,
                height,
                format,
                ..
            } => {
                assert_eq!(preset, Some(InsightsPreset::SuccessRate));
                assert_eq!(width, Some(Dimension::Percent(50.0)));
                assert_eq!(height, Some(Dimension::Pixels(240.0)));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_manifest_and_preset_conflict() {
        let result = Cli::try_parse_from([
            "plotline", "render", "-d", "d.json", "-m", "c.yaml", "-p", "tokens",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_dimension_rejected() {
        let result = Cli::try_parse_from(["plotline", "render", "-d", "d.json", "--width", "wide"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(1), LevelFilter::INFO);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(9), LevelFilter::TRACE);
    }

    // =========================================================================
    // Command Tests
    // =========================================================================

    #[test]
    fn test_render_preset_svg() {
        let data = temp_file("requests.json", BUCKETS);
        let svg = run_to_string(&[
            "plotline",
            "render",
            "--data",
            data.to_str().unwrap(),
            "--preset",
            "requests",
            "--parent-width",
            "1200",
        ])
        .unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="1200" height="320""#));
        assert!(svg.contains("<title>Requests</title>"));
        assert!(svg.contains(">30</text>"));
    }

    #[test]
    fn test_render_manifest_json() {
        let data = temp_file("latency.json", r#"[{"label": "Mon", "ms": 120}, {"label": "Tue", "ms": 80}]"#);
        let manifest = temp_file("latency.yaml", "kind: line\nseries:\n  - data_key: ms\n");
        let json = run_to_string(&[
            "plotline",
            "render",
            "-d",
            data.to_str().unwrap(),
            "-m",
            manifest.to_str().unwrap(),
            "-f",
            "json",
        ])
        .unwrap();
        let scene: plotline_core::Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(scene.count_of("circle"), 2);
    }

    #[test]
    fn test_render_without_source_fails() {
        let data = temp_file("nosource.json", "[]");
        let err = run_to_string(&["plotline", "render", "-d", data.to_str().unwrap()]).unwrap_err();
        assert!(matches!(err, CliError::NoChart));
    }

    #[test]
    fn test_render_missing_data_file() {
        let err = run_to_string(&[
            "plotline",
            "render",
            "-d",
            "/nonexistent/plotline/data.json",
            "-p",
            "latency",
        ])
        .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_check_manifest_output() {
        let manifest = temp_file(
            "check.yaml",
            "kind: bar\ntitle: Requests\nseries:\n  - data_key: requests\n  - kind: line\n    data_key: success_rate\n",
        );
        let out = run_to_string(&["plotline", "check", manifest.to_str().unwrap()]).unwrap();
        assert!(out.contains("Manifest valid!"));
        assert!(out.contains("Kind: bar"));
        assert!(out.contains("Series: 2 (1 drawn)"));
    }

    #[test]
    fn test_check_invalid_manifest() {
        let manifest = temp_file("invalid.yaml", "kind: bar\nseries: []\n");
        let err = run_to_string(&["plotline", "check", manifest.to_str().unwrap()]).unwrap_err();
        assert!(matches!(err, CliError::Manifest(_)));
    }

    #[test]
    fn test_presets_listing() {
        let out = run_to_string(&["plotline", "presets"]).unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("success-rate"));
    }
}
