// Thin command-line front end; all numeric work lives in the library.
//   generative-nn data.csv              generate rows from the data
//   generative-nn data.csv 0.5          same, advancing the target by 0.5 per row
//   generative-nn data.csv --supervised plain supervised fit
use std::process::ExitCode;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use generative_nn::data::csv::{read_rows, split_target};
use generative_nn::{predict, test, train, train_generatively, Network, RunConfig};

const USAGE: &str =
    "usage: generative-nn <data.csv> [offset] [--config run.json] [--supervised] [--snapshot out.json]";

#[derive(Debug, Default)]
struct Cli {
    data: String,
    offset: Option<f64>,
    config: Option<String>,
    snapshot: Option<String>,
    supervised: bool,
}

impl Cli {
    fn parse(args: &[String]) -> anyhow::Result<Cli> {
        let mut cli = Cli::default();
        let mut positional = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--supervised" => cli.supervised = true,
                "--config" => cli.config = Some(flag_value(&mut iter, "--config")?),
                "--snapshot" => cli.snapshot = Some(flag_value(&mut iter, "--snapshot")?),
                other => positional.push(other.to_string()),
            }
        }
        let mut positional = positional.into_iter();
        cli.data = positional.next().context("missing data file")?;
        if let Some(offset) = positional.next() {
            cli.offset = Some(
                offset
                    .parse()
                    .with_context(|| format!("offset '{offset}' is not a number"))?,
            );
        }
        if let Some(extra) = positional.next() {
            bail!("unexpected argument '{extra}'");
        }
        Ok(cli)
    }
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> anyhow::Result<String> {
    iter.next()
        .cloned()
        .with_context(|| format!("{flag} needs a value"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match Cli::parse(&args) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load_json(path)
            .with_context(|| format!("failed to load config {path}"))?,
        None => RunConfig::default(),
    };
    if let Some(offset) = cli.offset {
        config.offset = offset;
    }

    let rows = read_rows(&cli.data)?;
    tracing::info!(path = %cli.data, rows = rows.len(), "opened data file");
    let (inputs, expected) = split_target(&rows)?;

    let topology = config.topology(inputs[0].len())?;
    let mut network = Network::new(&topology)?.with_padding(config.padding);
    tracing::info!(layers = ?topology.layers, "initialized network");

    if cli.supervised {
        let report = train(&mut network, &inputs, &expected, &config.train_config())?;
        println!(
            "epoch {} error {:.6} converged {}",
            report.epoch, report.error, report.converged
        );
        println!("last row output {:.6}", test(&mut network, &inputs)?);
    } else {
        let report = train_generatively(&mut network, &inputs, &expected, &config.generative_config())?;
        for row in &report.rows {
            println!("{}", join(row));
        }
        println!();
        for (row, target) in inputs.iter().zip(&expected) {
            let p = predict(&mut network, row, target[0])?;
            println!("{},{}", p.x, p.y);
        }
    }

    if let Some(path) = &cli.snapshot {
        network
            .save_json(path)
            .with_context(|| format!("failed to write snapshot {path}"))?;
        tracing::info!(path = %path, "snapshot written");
    }
    Ok(())
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_data_offset_and_flags() {
        let cli = Cli::parse(&args(&["d.csv", "0.5", "--supervised", "--snapshot", "n.json"])).unwrap();
        assert_eq!(cli.data, "d.csv");
        assert_eq!(cli.offset, Some(0.5));
        assert!(cli.supervised);
        assert_eq!(cli.snapshot.as_deref(), Some("n.json"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn missing_data_or_flag_value_is_an_error() {
        assert!(Cli::parse(&[]).is_err());
        assert!(Cli::parse(&args(&["d.csv", "--config"])).is_err());
        assert!(Cli::parse(&args(&["d.csv", "abc"])).is_err());
        assert!(Cli::parse(&args(&["d.csv", "1", "2"])).is_err());
    }
}
