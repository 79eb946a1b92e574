//! Interactive command implementation
//!
//! One query per line: `TICKER [EPS BVPS]`. A failed lookup prints a report
//! with unavailable readouts and the session continues.

use super::{build_calculator, normalize_ticker};
use crate::config::Config;
use crate::indicators::AnalysisRequest;
use clap::Args;
use rust_decimal::Decimal;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const PROMPT: &str = "ticker> ";

#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Benchmark index for beta (defaults to the configured benchmark)
    #[arg(short, long)]
    pub benchmark: Option<String>,
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Blank line
    Empty,
    /// `quit` or `exit`
    Quit,
    /// Analyze a ticker
    Analyze(AnalysisRequest),
}

/// Parse `TICKER [EPS BVPS]`
///
/// Decimal commas are accepted (`1,25`).
pub fn parse_query(line: &str) -> anyhow::Result<Query> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let Some(first) = tokens.first() else {
        return Ok(Query::Empty);
    };
    if first.eq_ignore_ascii_case("quit") || first.eq_ignore_ascii_case("exit") {
        return Ok(Query::Quit);
    }

    let ticker = normalize_ticker(first).ok_or_else(|| anyhow::anyhow!("Missing ticker"))?;
    let mut request = AnalysisRequest::new(ticker);

    match tokens.len() {
        1 => {}
        3 => {
            request.eps = Some(parse_number(tokens[1], "EPS")?);
            request.bvps = Some(parse_number(tokens[2], "BVPS")?);
        }
        _ => anyhow::bail!("Expected `TICKER` or `TICKER EPS BVPS`, got: {}", line.trim()),
    }

    Ok(Query::Analyze(request))
}

fn parse_number(raw: &str, label: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(&raw.replace(',', "."))
        .map_err(|e| anyhow::anyhow!("Invalid {} {:?}: {}", label, raw, e))
}

impl InteractiveArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let calculator = build_calculator(config)?;
        let benchmark = self.benchmark.as_deref().and_then(normalize_ticker);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!("Interactive session started");

        loop {
            stdout.write_all(PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let mut request = match parse_query(&line) {
                Ok(Query::Empty) => continue,
                Ok(Query::Quit) => break,
                Ok(Query::Analyze(request)) => request,
                Err(e) => {
                    eprintln!("{}", e);
                    continue;
                }
            };
            request.benchmark = benchmark.clone();

            let report = calculator.analyze(&request).await;
            let table = report.format_table(&config.display.currency);
            stdout.write_all(table.as_bytes()).await?;
        }

        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        tracing::info!("Interactive session ended");
        Ok(())
    }
}
