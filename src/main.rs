use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use currency_calc::{config, format_dollars, Calculator, DEFAULT_MAX_DEPTH};
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

const DEMO_EXPRESSION: &str = "toDollars(737p + toRubles($85.4))";

#[derive(Parser, Debug)]
#[clap(version, about = "Evaluates expressions that mix dollar ($12.50) and ruble (737p) amounts")]
struct Args {
    #[clap(short, long, action, help = "the file to write logs to, by default they go to stderr")]
    log_file: Option<String>,
    #[clap(short, long, action = clap::ArgAction::Count,
           help = "show more in logs, may be provided multiple times")]
    verbose: u8,
    #[clap(long, env = "CURRENCY_CALC_RATE", help = "rubles per dollar, overrides the config file")]
    rate: Option<String>,
    #[clap(short, long, default_value = config::DEFAULT_CONFIG_FILE,
           help = "a file whose first line is the number of rubles per dollar")]
    config_file: PathBuf,
    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH,
           help = "how deeply parentheses and conversion calls may nest")]
    max_depth: usize,
    #[clap(short, long, action, help = "read expressions from stdin, one per line, until an empty line")]
    interactive: bool,
    #[clap(help = "the expression to evaluate, defaults to a demonstration expression")]
    expression: Option<String>,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let log_level_filter = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let writer = match &args.log_file {
        Some(log_file) => BoxMakeWriter::new(Mutex::new(
            fs::File::create(log_file).context("unable to create log file")?,
        )),
        None => BoxMakeWriter::new(io::stderr),
    };
    tracing_subscriber::registry()
        .with(log_level_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer),
        )
        .init();
    Ok(())
}

fn repl(calculator: &Calculator) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush().context("flushing prompt")?;

    for line in io::stdin().lines() {
        let line = line.context("reading expression")?;
        if line.trim().is_empty() {
            break;
        }

        match calculator.evaluate(&line) {
            Ok(result) => println!("{}", format_dollars(result)),
            Err(e) => {
                debug!("{:?}", e);
                println!("Error, {}", e);
            },
        }

        print!("> ");
        stdout.flush().context("flushing prompt")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args).context("creating logger")?;

    let rate = config::load_rate(args.rate.as_deref(), &args.config_file)
        .context("loading exchange rate")?;
    let calculator = Calculator::new(rate).with_max_depth(args.max_depth);

    if args.interactive {
        return repl(&calculator);
    }

    let expression = args.expression.as_deref().unwrap_or(DEMO_EXPRESSION);
    match calculator.evaluate(expression) {
        Ok(result) => {
            println!("Result: {}", format_dollars(result));
            Ok(())
        },
        Err(err) => {
            error!("evaluating '{}': {}", expression, err);
            Err(err).with_context(|| format!("evaluating '{}'", expression))
        },
    }
}
