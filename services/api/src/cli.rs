use crate::demo::{run_assess, run_demo, AssessArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_scout::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Scout",
    about = "Score freelance job postings and the clients behind them",
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
    /// Assess one extracted job record stored as JSON
    Assess(AssessArgs),
    /// Print assessments for built-in sample postings
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
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["job-scout"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_accepts_preference_overrides() {
        let cli = Cli::try_parse_from([
            "job-scout",
            "assess",
            "--record",
            "job.json",
            "--experience",
            "expert",
            "--job-type",
            "fixed-price",
            "--min-fixed-price",
            "750",
            "--today",
            "2025-06-15",
            "--json",
        ])
        .expect("parses");

        let Some(Command::Assess(args)) = cli.command else {
            panic!("expected assess command");
        };
        assert_eq!(args.record.to_str(), Some("job.json"));
        assert_eq!(args.min_fixed_price, Some(750.0));
        assert!(args.json);
        assert!(args.today.is_some());
    }

    #[test]
    fn assess_rejects_unknown_experience() {
        let result = Cli::try_parse_from([
            "job-scout",
            "assess",
            "--record",
            "job.json",
            "--experience",
            "guru",
        ]);
        assert!(result.is_err());
    }
}
