use crate::report::{run_estimate, run_evaluate, EstimateArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use senior_rights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Senior Rights Analyzer",
    about = "Determine senior claims against distressed-loan collateral",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate every record in a CSV export and print the assessments
    Evaluate(EvaluateArgs),
    /// Print the small-deposit and current-year tax estimates
    Estimate(EstimateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Estimate(args) => run_estimate(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn evaluate_parses_csv_and_flags() {
        let cli = Cli::try_parse_from([
            "senior-rights-api",
            "evaluate",
            "--csv",
            "records.csv",
            "--as-of",
            "2025-06-01",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.csv.to_str(), Some("records.csv"));
                assert!(args.json);
                assert!(args.as_of.is_some());
            }
            other => panic!("expected evaluate, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["senior-rights-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
