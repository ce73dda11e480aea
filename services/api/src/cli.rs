use crate::demo::{run_demo, run_forecast, run_value, DemoArgs, ForecastArgs, ValueArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tradesnap::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TradeSnap",
    about = "Value trade-in vehicles, forecast demand, and book dealer visits",
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
    /// Quote a trade-in offer for a registration
    Value(ValueArgs),
    /// Print the seasonal and regional demand forecast for a model
    Forecast(ForecastArgs),
    /// Walk through a full trade-in journey with the mock lookup provider
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
        Command::Value(args) => run_value(args),
        Command::Forecast(args) => run_forecast(args),
        Command::Demo(args) => run_demo(args),
    }
}
