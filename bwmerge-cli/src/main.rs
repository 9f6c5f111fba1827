mod inspect;
mod merge;

use anyhow::Result;
use clap::{Arg, Command};
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
    pub const BIN_NAME: &str = "bwmerge";
    pub const VERBOSITY: &str = "verbosity";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author(consts::AUTHOR)
        .about("Merge bigWig signal tracks into a single track weighted by each track's maximum value.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSITY)
                .long("verbosity")
                .global(true)
                .value_parser(["silent", "normal", "verbose"])
                .default_value("normal")
                .help("Logging level (RUST_LOG overrides it)"),
        )
        .subcommand(merge::cli::create_merge_cli())
        .subcommand(inspect::cli::create_inspect_cli())
}

fn init_logging(verbosity: &str) {
    let filter = match verbosity {
        "silent" => "off",
        "verbose" => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let verbosity = matches
        .get_one::<String>(consts::VERBOSITY)
        .map(String::as_str)
        .unwrap_or("normal");
    init_logging(verbosity);

    match matches.subcommand() {
        //
        // MERGE
        //
        Some((merge::cli::MERGE_CMD, matches)) => {
            merge::handlers::run_merge(matches, verbosity != "silent")?;
        }

        //
        // INSPECT
        //
        Some((inspect::cli::INSPECT_CMD, matches)) => {
            inspect::handlers::run_inspect(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }

    #[test]
    fn test_merge_requires_three_paths() {
        let result = build_parser().try_get_matches_from(["bwmerge", "merge", "a.bw", "out.bw"]);
        assert!(result.is_err());

        let result =
            build_parser().try_get_matches_from(["bwmerge", "merge", "a.bw", "b.bw", "out.bw"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_commands_carry_package_author() {
        let parser = build_parser();
        assert_eq!(parser.get_author(), Some("bwmerge contributors"));
        for sub in parser.get_subcommands() {
            assert_eq!(sub.get_author(), Some(consts::AUTHOR), "{}", sub.get_name());
        }
    }
}
