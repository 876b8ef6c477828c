use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use exn::ResultExt;
use favi::error::{ErrorKind, Result};
use favi::{Config, Prepender, Strategy};

/// Prepend site favicons to the external links of an HTML fragment.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// HTML fragment to read; standard input when omitted or `-`.
    input: Option<PathBuf>,
    /// Where to write the result; standard output when omitted or `-`.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// plain, service-proxy or thorough. Defaults to the configured strategy.
    #[arg(short, long, value_parser = parse_strategy)]
    strategy: Option<Strategy>,
    /// Config file (TOML, YAML or JSON).
    #[arg(short, long, env = "FAVI_CONFIG")]
    config: Option<PathBuf>,
    /// More log output on stderr; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_strategy(value: &str) -> std::result::Result<Strategy, String> {
    value.parse::<Strategy>().map_err(|err| (*err).to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    favi::logging::init(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref()).map_err(ErrorKind::config)?;
    let mut prepender = Prepender::from_config(&config);
    if let Some(strategy) = cli.strategy {
        prepender = prepender.with_strategy(strategy);
    }
    tracing::info!(strategy = %prepender.strategy(), "Prepending favicons");

    let html = read_input(cli.input.as_ref())?;
    let output = prepender.prepend(&html);
    write_output(cli.output.as_ref(), output.as_bytes())
}

fn is_stdio(path: Option<&PathBuf>) -> bool {
    path.is_none_or(|path| path.as_os_str() == "-")
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            fs::read_to_string(path).or_raise(|| ErrorKind::Io(format!("reading {}", path.display())))
        },
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .or_raise(|| ErrorKind::Io("reading standard input".to_string()))?;
            Ok(html)
        },
    }
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            fs::write(path, bytes).or_raise(|| ErrorKind::Io(format!("writing {}", path.display())))
        },
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .or_raise(|| ErrorKind::Io("writing standard output".to_string()))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("plain", Strategy::Plain)]
    #[case("service-proxy", Strategy::ServiceProxy)]
    #[case("Thorough", Strategy::Thorough)]
    #[case("google", Strategy::ServiceProxy)]
    fn strategy_flag(#[case] value: &str, #[case] expected: Strategy) {
        let cli = Cli::try_parse_from(["favi", "-s", value]).unwrap();
        assert_eq!(cli.strategy, Some(expected));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Cli::try_parse_from(["favi", "--strategy", "psychic"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["favi", "-vv", "in.html", "-o", "out.html"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.input, Some(PathBuf::from("in.html")));
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("-"), true)]
    #[case(Some("page.html"), false)]
    fn stdio_paths(#[case] path: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_stdio(path.map(PathBuf::from).as_ref()), expected);
    }
}
