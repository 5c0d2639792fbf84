//! One-shot terminal lookup: `skycast-lookup [city...]`
//!
//! Prompts for a city when none is given on the command line. Nothing is
//! written to the search history.

use std::process::ExitCode;

use anyhow::{Context, Result};
use skycast_config::AppConfig;
use skycast_core::{ResolveError, WeatherReport};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cfg = AppConfig::load().context("Failed to load configuration")?;
    let resolver = skycast_server::resolver_from_config(&cfg)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let city = if args.is_empty() {
        prompt_city().await?
    } else {
        args.join(" ")
    };
    let city = city.trim();
    if city.is_empty() {
        eprintln!("No city given.");
        return Ok(ExitCode::from(2));
    }

    match resolver.resolve_city(city).await {
        Ok(report) => {
            print!("{}", render(&report));
            Ok(ExitCode::SUCCESS)
        }
        Err(ResolveError::CityNotFound(city)) => {
            eprintln!("Could not find a place called '{city}'.");
            Ok(ExitCode::FAILURE)
        }
        Err(e @ ResolveError::UpstreamFailure(_)) => {
            let detail = std::error::Error::source(&e)
                .map(|s| s.to_string())
                .unwrap_or_default();
            eprintln!("Weather lookup failed: {e} ({detail})");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn prompt_city() -> Result<String> {
    println!("Skycast weather lookup");
    println!("Which city? ");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let line = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?;
    Ok(line.unwrap_or_default())
}

fn render(report: &WeatherReport) -> String {
    format!(
        "Temperature in {city}: {:.1}°C\nWind speed in {city}: {:.1} km/h\nConditions: {}\n",
        report.temperature,
        report.windspeed,
        report.description,
        city = report.city,
    )
}
