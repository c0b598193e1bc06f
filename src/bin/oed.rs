use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use oed_rs::{Client, DataHandler, Period};
use oed_rs::{forecast, stats, storage, viz};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "oed",
    version,
    about = "Download, clean, enrich, analyze & visualize the OWID energy dataset"
)]
struct Cli {
    /// Directory holding the local dataset mirror.
    #[arg(long, default_value = "downloads", global = true)]
    dir: PathBuf,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the raw dataset (and optionally save the cleaned table).
    Fetch(FetchArgs),
    /// List all known countries.
    Countries,
    /// Sum per-source consumption for countries over a period.
    Compare(CompareArgs),
    /// Plot one country's energy mix over time.
    Consumption(ConsumptionArgs),
    /// GDP over time for one or more countries.
    Gdp(GdpArgs),
    /// GDP vs. consumption vs. population for one year.
    Gapminder(GapminderArgs),
    /// Forecast a country's consumption or emissions.
    Predict(PredictArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MetricArg {
    Consumption,
    Emissions,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Re-download even when a local copy exists.
    #[arg(long, default_value_t = false)]
    force: bool,
    /// Save the cleaned, enriched table to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Country names separated by comma or semicolon (e.g., Germany,France)
    #[arg(short, long)]
    countries: String,
    /// Year range (YYYY:YYYY). Defaults to the full cleaned range.
    #[arg(short = 'p', long)]
    period: Option<String>,
    /// Create a grouped bar chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print grouped statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct ConsumptionArgs {
    #[arg(short, long)]
    country: String,
    /// Rescale each year to shares of that year's total.
    #[arg(long, default_value_t = false)]
    normalize: bool,
    /// Chart output path (.svg or .png).
    #[arg(long)]
    plot: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct GdpArgs {
    /// Country names separated by comma or semicolon.
    #[arg(short, long)]
    countries: String,
    /// Year range (YYYY:YYYY). Defaults to 1970:2016.
    #[arg(short = 'p', long)]
    period: Option<String>,
    /// Chart output path (.svg or .png).
    #[arg(long)]
    plot: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct GapminderArgs {
    #[arg(short, long)]
    year: i32,
    /// Chart output path (.svg or .png).
    #[arg(long)]
    plot: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[arg(short, long)]
    country: String,
    /// Series to forecast.
    #[arg(long, value_enum, default_value = "consumption")]
    metric: MetricArg,
    /// Number of predicted years.
    #[arg(long, default_value_t = 10)]
    horizon: usize,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_period(s: &str) -> Result<Period> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("invalid --period, expected YYYY:YYYY"))?;
    let start = a.parse::<i32>()?;
    let end = b.parse::<i32>()?;
    Ok(Period::new(start, end)?)
}

fn load_handler(dir: &Path) -> Result<DataHandler> {
    let path = Client::default().ensure_local(dir)?;
    Ok(DataHandler::from_path(&path)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Fetch(args) => cmd_fetch(&cli.dir, args),
        Command::Countries => cmd_countries(&cli.dir),
        Command::Compare(args) => cmd_compare(&cli.dir, args),
        Command::Consumption(args) => cmd_consumption(&cli.dir, args),
        Command::Gdp(args) => cmd_gdp(&cli.dir, args),
        Command::Gapminder(args) => cmd_gapminder(&cli.dir, args),
        Command::Predict(args) => cmd_predict(&cli.dir, args),
    }
}

fn cmd_fetch(dir: &Path, args: FetchArgs) -> Result<()> {
    let client = Client::default();
    let report = client.download_to(dir.join(oed_rs::download::DATA_FILE), args.force)?;
    if report.fetched {
        eprintln!("Downloaded {} ({} bytes)", report.path.display(), report.bytes);
    } else {
        eprintln!("Kept existing {} ({} bytes)", report.path.display(), report.bytes);
    }

    if let Some(path) = args.out.as_ref() {
        let data = DataHandler::from_path(&report.path)?;
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(data.rows(), path)?,
            "json" => storage::save_json(data.rows(), path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", data.len(), path.display());
    }
    Ok(())
}

fn cmd_countries(dir: &Path) -> Result<()> {
    let data = load_handler(dir)?;
    for country in data.list_countries() {
        println!("{country}");
    }
    Ok(())
}

fn cmd_compare(dir: &Path, args: CompareArgs) -> Result<()> {
    let countries = parse_list(&args.countries);
    let period = match &args.period {
        Some(s) => parse_period(s)?,
        None => Period::new(1970, 2019)?,
    };
    let data = load_handler(dir)?;

    let totals = data.compare_consumption(&countries, period)?;
    for t in &totals {
        println!(
            "{}  total={} TWh  emissions={} t",
            t.country,
            fmt_opt(Some(t.total)),
            fmt_opt(t.emissions_total)
        );
    }

    if let Some(plot_path) = args.plot.as_ref() {
        viz::plot_comparison(&totals, plot_path, args.width, args.height)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.stats {
        let summaries = stats::grouped_summary(data.rows(), stats::Metric::ConsumptionTotal);
        for s in summaries.iter().filter(|s| countries.contains(&s.country)) {
            println!(
                "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                s.country,
                s.metric,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }
    Ok(())
}

fn cmd_consumption(dir: &Path, args: ConsumptionArgs) -> Result<()> {
    let data = load_handler(dir)?;
    let rows = data.country_rows(&args.country)?;
    viz::plot_consumption(
        &args.country,
        &rows,
        &args.plot,
        args.width,
        args.height,
        args.normalize,
    )?;
    eprintln!("Wrote plot to {}", args.plot.display());
    Ok(())
}

fn cmd_gdp(dir: &Path, args: GdpArgs) -> Result<()> {
    let period = match &args.period {
        Some(s) => parse_period(s)?,
        None => Period::new(1970, 2016)?,
    };
    let data = load_handler(dir)?;
    let mut series = Vec::new();
    for country in parse_list(&args.countries) {
        let points = data.gdp_series(&country, period)?;
        series.push((country, points));
    }
    viz::plot_gdp(&series, &args.plot, args.width, args.height)?;
    eprintln!("Wrote plot to {}", args.plot.display());
    Ok(())
}

fn cmd_gapminder(dir: &Path, args: GapminderArgs) -> Result<()> {
    let data = load_handler(dir)?;
    let points = data.gap_minder(args.year);
    viz::plot_gap_minder(&points, args.year, &args.plot, args.width, args.height)?;
    eprintln!("Wrote plot to {}", args.plot.display());
    Ok(())
}

fn cmd_predict(dir: &Path, args: PredictArgs) -> Result<()> {
    let data = load_handler(dir)?;
    let (history, y_desc) = match args.metric {
        MetricArg::Consumption => (
            data.consumption_series(&args.country)?,
            "Consumption in TWh",
        ),
        MetricArg::Emissions => (data.emission_series(&args.country)?, "Emissions in t"),
    };

    let values: Vec<f64> = history.iter().map(|(_, v)| *v).collect();
    let forecast = forecast::arima_predict(&values, args.horizon)?;

    let last_year = history.last().map(|(y, _)| *y).unwrap_or(0);
    for (i, value) in forecast.iter().enumerate() {
        println!("{}  {}", last_year + 1 + i as i32, fmt_opt(Some(*value)));
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let title = match args.metric {
            MetricArg::Consumption => format!("Consumption of {}", args.country),
            MetricArg::Emissions => format!("Emission of {}", args.country),
        };
        viz::plot_forecast(
            &title,
            y_desc,
            &history,
            &forecast,
            plot_path,
            args.width,
            args.height,
        )?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }
    Ok(())
}
