use crate::config::load_config;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_rows;
use crate::render::{write_output_png, write_output_svg};
use crate::{RenderOptions, build_chart};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "PVNC_LOG";

#[derive(Parser, Debug)]
#[command(name = "pvnc", version, about = "Diverging positive/negative bar chart renderer")]
pub struct Args {
    /// Input rows file (.json5/.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, chart)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Plot width, excluding the label column
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Render the frame this many ms after the rows were set instead of the
    /// settled frame
    #[arg(long = "at")]
    pub at_ms: Option<f64>,

    /// Write the computed layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }

    let input = read_input(args.input.as_deref())?;
    let rows = parse_rows(&input)?;
    let options = RenderOptions {
        theme: config.theme.clone(),
        chart: config.chart.clone(),
        width: f64::from(config.render.width),
        at_ms: args.at_ms,
    };
    let (chart, at) = build_chart(rows, &options)?;
    tracing::info!(rows = chart.rows().len(), at_ms = at, "rendering frame");

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, chart.layout(), &chart.plan(), chart.config())?;
    }

    let svg = chart.render_svg(at, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
