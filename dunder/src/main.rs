use clap::Parser;
use dunder_core::{bytes, CompareOp};
use dunder_rt::{cmp::RichCompareSite, Runtime};
use tracing_subscriber::EnvFilter;

mod demo;
mod opts;

use opts::{Command, Opts};

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn compare(op: CompareOp, ordering: bool, left: &str, right: &str) -> anyhow::Result<()> {
    if ordering {
        let ordering = bytes::compare(left.as_bytes(), right.as_bytes());
        println!("{}", ordering as i8);

        return Ok(());
    }

    let rt = Runtime::new();
    let site = RichCompareSite::new();

    let left = rt.new_bytes(left.as_bytes());
    let right = rt.new_bytes(right.as_bytes());

    tracing::info!(
        "{} {} {}",
        rt.repr(left)?,
        op,
        rt.repr(right)?
    );

    let result = site.execute(&rt, left, right, op)?;

    println!("{}", if result { "True" } else { "False" });

    Ok(())
}

fn lookup(name: &str) -> anyhow::Result<()> {
    let rt = Runtime::new();
    let demo = demo::Demo::build(&rt)?;

    match demo.lookup(&rt, name) {
        Ok((repr, rule)) => println!("{} = {}  ({})", name, repr, rule),
        Err(exc) if exc.is_attribute_error() => println!("{}", exc),
        Err(exc) => return Err(exc.into()),
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    init_tracing(opts.verbose);

    tracing::debug!("{:?}", opts);

    match opts.command {
        Command::Cmp {
            op,
            ordering,
            left,
            right,
        } => compare(op, ordering, &left, &right),

        Command::Lookup { name } => lookup(&name),
    }
}
