// src/main.rs
// =============================================================================
// This is the entry point of the imhotep CLI.
//
// What happens here:
// 1. Parse command-line arguments and validate the configuration
// 2. Load the manifest for every requested mode (fatal if it can't be read)
// 3. Crawl the site once, collecting assets for all requested modes
// 4. Reconcile each mode's manifest against the assets
// 5. Write the CSV report and print a summary (or JSON)
// 6. Exit with 0 = everything matched, 1 = failures found, 2 = error
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use imhotep::assets::HttpSizeProbe;
use imhotep::cli::Cli;
use imhotep::config::CrawlConfig;
use imhotep::crawl::{CrawlStats, HttpFetcher, SiteCrawler};
use imhotep::manifest::{self, ComparisonResult, CsvWorkbook};
use imhotep::report::{self, CsvReportSink, Report};

#[tokio::main]
async fn main() {
    // Logs go to stderr so --json output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = CrawlConfig::from_cli(&cli)?;
    let mode = cli.mode();
    let start = config.start_url(&cli.content_path)?;

    // The manifest is loaded up front: a bad manifest must stop the run
    // before any crawling happens.
    let workbook = CsvWorkbook::open(&cli.manifest)
        .with_context(|| format!("Failed to open manifest {}", cli.manifest.display()))?;
    let mut manifests = Vec::new();
    for &kind in mode.kinds() {
        let entries = manifest::load(&workbook, kind)
            .with_context(|| format!("Failed to load {} manifest", kind))?;
        manifests.push((kind, entries));
    }

    // Opened before the crawl so an unwritable path fails fast.
    let mut sink = CsvReportSink::create(&cli.output)
        .with_context(|| format!("Failed to create report {}", cli.output.display()))?;

    let client = config.http_client()?;
    let crawler = SiteCrawler::new(
        HttpFetcher::new(client.clone()),
        HttpSizeProbe::new(client),
        config.classifier(),
        config.crawl,
    );

    tracing::info!("Crawling {} ({:?})", start, mode);
    let outcome = crawler.crawl(start, mode).await;
    tracing::info!(
        "Crawl finished: {} page(s) fetched, {} asset(s) found, {} failure(s)",
        outcome.stats.pages_fetched,
        outcome.assets.len(),
        outcome.errors.len()
    );

    let runs = manifests
        .into_iter()
        .map(|(kind, entries)| (kind, manifest::reconcile(&entries, &outcome.assets, kind)))
        .collect();
    let report = report::assemble(runs, &outcome.errors);

    report::write_report(&report, &mut sink).context("Failed to write report")?;
    sink.finish().context("Failed to write report")?;

    print_results(&report, &outcome.stats, outcome.errors.len(), cli.json)?;
    if !cli.json {
        println!("📝 Report written to {}", cli.output.display());
    }

    if report.failure_count() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Prints the report either as a summary table or as JSON.
fn print_results(
    report: &Report,
    stats: &CrawlStats,
    error_count: usize,
    json: bool,
) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report, stats, error_count);
    }
    Ok(())
}

fn print_table(report: &Report, stats: &CrawlStats, error_count: usize) {
    for section in &report.sections {
        println!("\n{} failures", section.kind);
        println!("{:<12} {:<30} {:<12} {:<16}", "JOB", "FILENAME", "PID", "OUTCOME");
        println!("{}", "=".repeat(72));

        for result in &section.failures {
            let entry = result.entry();
            let filename = if entry.filename.chars().count() > 27 {
                format!("{}...", entry.filename.chars().take(27).collect::<String>())
            } else {
                entry.filename.clone()
            };
            println!(
                "{:<12} {:<30} {:<12} {:<16}",
                entry.job,
                filename,
                entry.pid,
                format_outcome(result)
            );
        }
    }

    println!();
    println!("📊 Summary:");
    println!(
        "   📄 Pages: {} fetched ({} index, {} leaf), {} revisit(s) skipped",
        stats.pages_fetched, stats.index_pages, stats.leaf_pages, stats.revisits_skipped
    );
    println!("   ✅ Matched: {}", report.success_count());
    println!("   ❌ Failed: {}", report.failure_count());
    println!("   ⚠️  Fetch errors: {}", error_count);
}

fn format_outcome(result: &ComparisonResult) -> String {
    match result {
        ComparisonResult::Matched { .. } => "✅ MATCHED".to_string(),
        ComparisonResult::SizeMismatch { mismatches, .. } => {
            let classes: Vec<_> = mismatches.iter().map(|m| m.size_class.as_str()).collect();
            format!("📐 SIZE ({})", classes.join(","))
        }
        ComparisonResult::Missing { .. } => "❌ MISSING".to_string(),
    }
}
