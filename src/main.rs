//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `attack_surface` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use attack_surface::initialization::init_logger_with;
use attack_surface::{run_analysis, AnalysisReport, Config, Subdomain, SubdomainState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    match run_analysis(config).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            eprintln!("attack_surface error: {:#}", e);
            process::exit(1);
        }
    }
}

fn print_report(report: &AnalysisReport) {
    for subdomain in &report.subdomains {
        println!("{}", summary_line(subdomain));
    }
    for record in &report.historical {
        println!(
            "📜 {} (historical, certificate from {} issued by {})",
            record.subdomain, record.source, record.certificate_info.issuer
        );
    }

    let takeovers = report
        .subdomains
        .iter()
        .filter(|s| s.takeover.is_some())
        .count();
    println!(
        "✅ Analyzed {} subdomain{} of {} ({} historical, {} takeover risk{}) in {:.1}s",
        report.subdomains.len(),
        if report.subdomains.len() == 1 { "" } else { "s" },
        report.domain,
        report.historical.len(),
        takeovers,
        if takeovers == 1 { "" } else { "s" },
        report.stats.duration_seconds
    );
}

fn summary_line(subdomain: &Subdomain) -> String {
    let mut line = format!("{} [{}]", subdomain.name, subdomain.source);
    match subdomain.state {
        SubdomainState::RedirectToMain => line.push_str(" -> main domain"),
        SubdomainState::Historical => line.push_str(" historical"),
        _ => {
            if let Some(ip) = &subdomain.resolved_ip {
                line.push_str(&format!(" {ip} ({})", subdomain.vendor.vendor));
            }
            if let Some(target) = &subdomain.cname_target {
                line.push_str(&format!(" CNAME {target}"));
            }
            if let Some(service) = &subdomain.primary_service {
                line.push_str(&format!(" service={}", service.name));
            }
            if let Some(infrastructure) = &subdomain.infrastructure {
                line.push_str(&format!(" infra={}", infrastructure.name));
            }
            if subdomain.takeover.is_some() {
                line.push_str(" ⚠ TAKEOVER RISK");
            }
        }
    }
    line
}
