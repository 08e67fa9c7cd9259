use crate::demo::{
    run_analyze, run_cycle, run_demo, run_environment, run_matrix, AnalyzeArgs, CycleArgs,
    DemoArgs, EnvironmentArgs, MatrixArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use coating_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Coating Advisor",
    about = "Marine coating repair recommendations from inspection photos",
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
    /// Estimate the corrosivity category for a location
    Environment(EnvironmentArgs),
    /// Look up the repair cycle for an area, defect and environment
    Cycle(CycleArgs),
    /// Export the full decision table as CSV
    Matrix(MatrixArgs),
    /// Classify inspection photos with the configured model and print the report
    Analyze(AnalyzeArgs),
    /// Run the inspection workflow end to end against an offline classifier
    Demo(DemoArgs),
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
        Command::Environment(args) => run_environment(args),
        Command::Cycle(args) => run_cycle(args),
        Command::Matrix(args) => run_matrix(args),
        Command::Analyze(args) => run_analyze(args).await,
        Command::Demo(args) => run_demo(args).await,
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
    fn parses_cycle_subcommand() {
        let cli = Cli::try_parse_from([
            "coating-advisor-api",
            "cycle",
            "--area",
            "Ballast Tank",
            "--defect",
            "pitting",
            "--environment",
            "C5M",
        ])
        .expect("valid arguments");

        match cli.command {
            Some(Command::Cycle(args)) => {
                assert_eq!(args.area, "Ballast Tank");
                assert_eq!(
                    args.environment,
                    Some(coating_advisor::workflows::inspection::EnvironmentCategory::C5M)
                );
            }
            other => panic!("expected cycle command, got {other:?}"),
        }
    }

    #[test]
    fn analyze_requires_an_image() {
        assert!(Cli::try_parse_from(["coating-advisor-api", "analyze", "--area", "Deck"]).is_err());
    }
}
