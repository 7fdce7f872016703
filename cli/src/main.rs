use anyhow::Context;
use carpark_core::{Level, MAX_LEVEL, Session, SessionConfig};
use clap::Parser;
use std::io;

use console::TerminalConsole;

mod console;
mod input;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Clear the parking lot, then walk out through the exit", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level to start at
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_LEVEL)))]
    level: Level,

    /// Stop after clearing this level
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_LEVEL)))]
    last_level: Option<Level>,

    /// Keep previous frames on screen instead of clearing the terminal
    #[arg(long)]
    no_clear: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {}", seed);

    let config = SessionConfig {
        first_level: args.level,
        last_level: args.last_level,
        seed,
    };
    let mut session = Session::new(config).context("Could not generate the first level")?;

    let mut console = TerminalConsole::new(io::stdin().lock(), io::stdout().lock(), !args.no_clear);
    let end = session.run(&mut console)?;
    console.finish()?;

    log::debug!("Session finished: {:?}", end);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_level_one() {
        let args = Args::try_parse_from(["carpark"]).unwrap();

        assert_eq!(args.level, 1);
        assert_eq!(args.seed, None);
        assert_eq!(args.last_level, None);
        assert!(!args.no_clear);
    }

    #[test]
    fn args_reject_levels_out_of_range() {
        assert!(Args::try_parse_from(["carpark", "--level", "0"]).is_err());
        assert!(Args::try_parse_from(["carpark", "--level", "126"]).is_err());

        let args =
            Args::try_parse_from(["carpark", "-s", "42", "-l", "3", "--last-level", "5"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.level, 3);
        assert_eq!(args.last_level, Some(5));
    }
}
