//! sheetfit CLI - post-conversion filters for workbook snapshots

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetfit::prelude::*;
use sheetfit::{ClassifierOptions, DecimalShape, FormatClassifier};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetfit")]
#[command(
    author,
    version,
    about = "Post-conversion number-format and page-fit filters for spreadsheets"
)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the display-format decision for each value
    Classify {
        /// Values to classify
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// JSON file with classifier options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Apply the filter chain to a workbook snapshot (JSON)
    Run {
        /// Input workbook snapshot
        input: PathBuf,

        /// Output snapshot (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with chain options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip the number-format filter
        #[arg(long)]
        no_number_format: bool,

        /// Skip the single-page filter
        #[arg(long)]
        no_single_page: bool,

        /// Reformat numbers on hidden sheets too
        #[arg(long)]
        include_hidden: bool,

        /// Ignore trailing formula cells with empty results when sizing pages
        #[arg(long)]
        ignore_blank_formulas: bool,

        /// Policy for page styles shared by several sheets
        #[arg(long, value_enum)]
        shared_styles: Option<StylePolicyArg>,

        /// Worker threads for measuring sheets (0 = serial)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Exit with an error if any cell or sheet failed
        #[arg(long)]
        strict: bool,
    },

    /// Show sheets, used ranges and page styles of a snapshot
    Inspect {
        /// Input workbook snapshot
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StylePolicyArg {
    Union,
    LastWriteWins,
}

impl From<StylePolicyArg> for SharedStylePolicy {
    fn from(arg: StylePolicyArg) -> Self {
        match arg {
            StylePolicyArg::Union => SharedStylePolicy::Union,
            StylePolicyArg::LastWriteWins => SharedStylePolicy::LastWriteWins,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Classify { values, config } => classify_values(&values, config.as_deref()),
        Commands::Run {
            input,
            output,
            config,
            no_number_format,
            no_single_page,
            include_hidden,
            ignore_blank_formulas,
            shared_styles,
            threads,
            timeout,
            strict,
        } => {
            let mut options = match config.as_deref() {
                Some(path) => read_json::<ChainOptions>(path)?,
                None => ChainOptions::default(),
            };
            apply_overrides(
                &mut options,
                &Overrides {
                    no_number_format,
                    no_single_page,
                    include_hidden,
                    ignore_blank_formulas,
                    shared_styles,
                    threads,
                },
            );
            let cancel = match timeout {
                Some(secs) => CancelToken::new().with_timeout(Duration::from_secs(secs)),
                None => CancelToken::new(),
            };
            run_chain(&input, output.as_deref(), &options, cancel, strict)
        }
        Commands::Inspect { input } => inspect(&input),
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse '{}'", path.display()))
}

fn classify_values(values: &[f64], config: Option<&Path>) -> Result<()> {
    let options = match config {
        Some(path) => read_json::<ClassifierOptions>(path)?,
        None => ClassifierOptions::default(),
    };
    let classifier = FormatClassifier::new(options);

    let mut stdout = io::stdout().lock();
    for value in values {
        let shape = DecimalShape::from_f64(*value)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            stdout,
            "{}\t{}\t{}",
            value,
            classifier.classify(*value),
            shape
        )
        .context("Failed to write to stdout")?;
    }
    Ok(())
}

/// Command-line switches layered over the config file
struct Overrides {
    no_number_format: bool,
    no_single_page: bool,
    include_hidden: bool,
    ignore_blank_formulas: bool,
    shared_styles: Option<StylePolicyArg>,
    threads: Option<usize>,
}

fn apply_overrides(options: &mut ChainOptions, overrides: &Overrides) {
    if overrides.no_number_format {
        options.number_format = None;
    }
    if overrides.no_single_page {
        options.single_page = None;
    }
    if let Some(nf) = options.number_format.as_mut() {
        if overrides.include_hidden {
            nf.include_hidden_sheets = true;
        }
    }
    if let Some(sp) = options.single_page.as_mut() {
        if overrides.ignore_blank_formulas {
            sp.fit.count_blank_formula_results = false;
        }
        if let Some(policy) = overrides.shared_styles {
            sp.shared_styles = policy.into();
        }
        match overrides.threads {
            Some(0) => sp.parallelism = Parallelism::Serial,
            Some(n) => sp.parallelism = Parallelism::Threads(n),
            None => {}
        }
    }
}

fn load_workbook(input: &Path) -> Result<Workbook> {
    read_json(input)
}

fn save_workbook(workbook: &Workbook, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(workbook).context("Failed to serialize workbook")?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write to stdout")
        }
    }
}

fn run_chain(
    input: &Path,
    output: Option<&Path>,
    options: &ChainOptions,
    cancel: CancelToken,
    strict: bool,
) -> Result<()> {
    let workbook = load_workbook(input)?;
    let doc = SharedWorkbook::new(workbook);

    let chain = FilterChain::from_options(options);
    let report = chain
        .apply(
            &Document::Spreadsheet(&doc),
            &FilterContext::with_cancel(cancel),
        )
        .with_context(|| format!("Filters failed on '{}'", input.display()))?;

    for line in report.to_string().lines() {
        eprintln!("{line}");
    }
    for failure in report.failures() {
        eprintln!("  failed: {failure}");
    }

    let workbook = doc.into_inner().context("Workbook lock poisoned")?;
    save_workbook(&workbook, output)?;

    if strict && !report.is_clean() {
        bail!("{} item(s) failed", report.failure_count());
    }
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let workbook = load_workbook(input)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!();
        println!(
            "  Sheet {}: \"{}\"{}",
            i,
            sheet.name(),
            if sheet.is_visible() { "" } else { " (hidden)" }
        );
        println!("    Used range: {}", sheet.used_range());
        println!("    Shapes: {}", sheet.shapes().len());
        println!("    Page style: {}", sheet.page_style());
    }

    println!();
    println!("Page styles:");
    for (name, style) in workbook.page_styles() {
        println!(
            "  {}: {} (scale to pages: {}, margins {}/{}/{}/{})",
            name,
            style.size,
            style.scale_to_pages,
            style.margins.top,
            style.margins.bottom,
            style.margins.left,
            style.margins.right
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use sheetfit::SizeBox;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides() {
        let mut options = ChainOptions::default();
        apply_overrides(
            &mut options,
            &Overrides {
                no_number_format: false,
                no_single_page: false,
                include_hidden: true,
                ignore_blank_formulas: true,
                shared_styles: Some(StylePolicyArg::LastWriteWins),
                threads: Some(0),
            },
        );

        assert!(options.number_format.as_ref().unwrap().include_hidden_sheets);
        let sp = options.single_page.unwrap();
        assert!(!sp.fit.count_blank_formula_results);
        assert_eq!(sp.shared_styles, SharedStylePolicy::LastWriteWins);
        assert_eq!(sp.parallelism, Parallelism::Serial);
    }

    #[test]
    fn test_run_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");

        let mut wb = Workbook::empty();
        let mut ws = Worksheet::new("Data");
        ws.set_default_column_width(2000);
        ws.set_default_row_height(400);
        ws.set_cell_value("E10", 100000000000.0).unwrap();
        wb.add_existing_worksheet(ws).unwrap();
        std::fs::write(&input, serde_json::to_string(&wb).unwrap()).unwrap();

        run_chain(
            &input,
            Some(&output),
            &ChainOptions::default(),
            CancelToken::new(),
            true,
        )
        .unwrap();

        let result = load_workbook(&output).unwrap();
        assert_eq!(
            result.page_style("Default").map(|s| s.size),
            Some(SizeBox::new(14200, 10600))
        );
        let cell = result
            .worksheet(0)
            .unwrap()
            .cell("E10")
            .unwrap()
            .unwrap();
        let entry = result.number_formats().get(cell.format).unwrap();
        assert_eq!(entry.pattern, "0.#####E+00");
    }

    #[test]
    fn test_missing_input_reports_path() {
        let err = load_workbook(Path::new("/nonexistent/book.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/book.json"));
    }
}
