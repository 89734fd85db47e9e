// src/config.rs
// =============================================================================
// Run configuration, validated once from the command line.
//
// Everything that needs checking (URLs, the proxy) is checked here so the run
// fails with a clear message before the manifest is read or the first request
// goes out.
// =============================================================================

use anyhow::{Context, Result};
use reqwest::{Client, Proxy};
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::crawl::CrawlOptions;
use crate::page::PageClassifier;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub site_root: Url,
    pub proxy: Option<Url>,
    pub user_agent: String,
    pub timeout: Duration,
    pub crawl: CrawlOptions,
}

impl CrawlConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let site_root = Url::parse(&cli.site_root)
            .with_context(|| format!("Invalid site root '{}'", cli.site_root))?;

        let proxy = cli
            .proxy
            .as_deref()
            .map(|p| Url::parse(p).with_context(|| format!("Invalid proxy URL '{}'", p)))
            .transpose()?;

        let user_agent = cli
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("imhotep/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            site_root,
            proxy,
            user_agent,
            timeout: Duration::from_secs(cli.timeout),
            crawl: CrawlOptions {
                dedupe_pages: !cli.allow_revisits,
            },
        })
    }

    /// The shared client used for both page fetches and size probes.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(5));

        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str()).context("Invalid proxy")?);
        }

        builder.build().context("Failed to build HTTP client")
    }

    /// Resolves the content path from the command line against the site root.
    pub fn start_url(&self, content_path: &str) -> Result<Url> {
        self.site_root.join(content_path).with_context(|| {
            format!("Cannot resolve '{}' against {}", content_path, self.site_root)
        })
    }

    pub fn classifier(&self) -> PageClassifier {
        PageClassifier::new(self.site_root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Result<CrawlConfig> {
        let mut argv = vec!["imhotep", "/education/topics/z1", "manifest.csv"];
        argv.extend_from_slice(args);
        CrawlConfig::from_cli(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_start_url_joins_site_root() {
        let cfg = config(&["--site-root", "http://www.example.com"]).unwrap();
        assert_eq!(
            cfg.start_url("/education/topics/zdsnb9q").unwrap().as_str(),
            "http://www.example.com/education/topics/zdsnb9q"
        );
        assert_eq!(
            cfg.start_url("https://other.example.org/x").unwrap().as_str(),
            "https://other.example.org/x"
        );
    }

    #[test]
    fn test_invalid_site_root_rejected() {
        assert!(config(&["--site-root", "not a url"]).is_err());
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        assert!(config(&["--proxy", "::::"]).is_err());
    }

    #[test]
    fn test_allow_revisits_turns_off_dedupe() {
        let cfg = config(&["--allow-revisits"]).unwrap();
        assert!(!cfg.crawl.dedupe_pages);
        assert!(config(&[]).unwrap().crawl.dedupe_pages);
    }

    #[test]
    fn test_client_builds_with_proxy() {
        let cfg = config(&[
            "--proxy",
            "http://proxy.example.com:80",
            "--user-agent",
            "ua",
        ])
        .unwrap();
        assert_eq!(cfg.user_agent, "ua");
        assert!(cfg.http_client().is_ok());
    }
}
