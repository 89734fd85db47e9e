// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two positional inputs are required: the content path to crawl and the
// manifest. If either is missing clap prints the usage text and exits with
// status 2 before anything else runs.
//
// Mode flags pick what to audit. With neither flag we audit graphics.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::assets::ExtractMode;

#[derive(Parser, Debug)]
#[command(
    name = "imhotep",
    version,
    about = "Audit migrated image assets on a content site against a manifest",
    long_about = "imhotep crawls a topic tree on the site, collects the images on every guide \
                  page and checks them against the expected-asset manifest. Assets that are \
                  missing or published at the wrong width are reported alongside any pages \
                  that could not be fetched."
)]
pub struct Cli {
    /// Content path to start from, relative to the site root
    /// (e.g. /education/topics/zdsnb9q). A full URL also works.
    pub content_path: String,

    /// Manifest workbook: a CSV file (graphics sheet only) or a directory of
    /// CSV sheets where the first is graphics and the second is photos
    pub manifest: PathBuf,

    /// Audit graphics (the default when no mode flag is given)
    #[arg(short, long)]
    pub graphics: bool,

    /// Audit photos
    #[arg(short, long)]
    pub photos: bool,

    /// Where to write the CSV report
    #[arg(short, long, default_value = "report.csv")]
    pub output: PathBuf,

    /// Site root that content paths and relative links resolve against
    #[arg(long, env = "IMHOTEP_SITE_ROOT", default_value = "http://www.bbc.co.uk")]
    pub site_root: String,

    /// HTTP proxy for every request (e.g. http://proxy.example.com:80)
    #[arg(long, env = "IMHOTEP_PROXY")]
    pub proxy: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long, env = "IMHOTEP_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Walk pages again when they are linked from more than one place.
    /// Without the visited set a site with looping links never finishes.
    #[arg(long)]
    pub allow_revisits: bool,

    /// Print the report as JSON instead of a summary table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn mode(&self) -> ExtractMode {
        ExtractMode::from_flags(self.graphics, self.photos)
    }
}
