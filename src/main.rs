use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use musafirgo_pipeline::{Config, RunOptions, SystemCommandRunner, Variant, logging, run};

/// MusafirGO Pipeline - build, start and smoke-test the MusafirGO services
#[derive(Parser, Debug)]
#[command(
    name = "musafirgo-pipeline",
    version,
    about = "Build, start, probe and benchmark the MusafirGO services, then write a report",
    after_help = "EXAMPLES:\n\
        musafirgo-pipeline itinerary http://localhost:8080 --skip-data-load\n\
        musafirgo-pipeline web --skip-init --no-open\n\
        \n\
        The base URL is the first argument after the subcommand.\n\
        \n\
        ENVIRONMENT VARIABLES:\n\
        MUSAFIRGO_ITINERARY_URL     Base URL of the itinerary API\n\
        MUSAFIRGO_WEB_URL           Base URL of the web mock API\n\
        MUSAFIRGO_FRONTEND_URL      URL of the Angular dev server\n\
        MUSAFIRGO_COMPOSE_BIN       Compose CLI (default: docker-compose)\n\
        MUSAFIRGO_WEB_PROJECT_DIR   Web project checkout\n\
        MUSAFIRGO_TEST_IMAGE        Image uploaded by the media test\n\
        MUSAFIRGO_STARTUP_WAIT      Seconds to wait after starting the stack\n\
        MUSAFIRGO_REPORT_DIR        Directory receiving the reports\n\
        MUSAFIRGO_OPEN_REPORT       Open the HTML report when done (true/false)\n\
        MUSAFIRGO_BROWSER           Browser command used to open the report\n\
        RUST_LOG                    Log filter (default: info)"
)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the itinerary service pipeline
    Itinerary(PipelineArgs),

    /// Run the web service pipeline
    Web(PipelineArgs),
}

#[derive(ClapArgs, Debug)]
struct PipelineArgs {
    /// Base URL of the service under test (default: from configuration)
    base_url: Option<String>,

    /// Do not start the stack (database initialization / mock services)
    #[arg(long)]
    skip_init: bool,

    /// Do not load the SQL fixtures
    #[arg(long)]
    skip_data_load: bool,

    /// Do not run the endpoint tests
    #[arg(long)]
    skip_tests: bool,

    /// Do not open the HTML report in a browser
    #[arg(long)]
    no_open: bool,

    /// Print the final pipeline result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Directory receiving the reports
    #[arg(long, value_name = "DIR", env = "MUSAFIRGO_REPORT_DIR")]
    report_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let (variant, args) = match args.command {
        Commands::Itinerary(args) => (Variant::Itinerary, args),
        Commands::Web(args) => (Variant::Web, args),
    };

    logging::init(args.verbose, args.json);

    let mut config = Config::from_env();
    if let Some(dir) = args.report_dir {
        config.report.output_dir = dir;
    }
    let options = RunOptions {
        skip_init: args.skip_init,
        skip_data_load: args.skip_data_load,
        skip_tests: args.skip_tests,
        open_report: config.report.open_in_browser && !args.no_open,
    };

    let result = run(variant, config, options, args.base_url, Box::new(SystemCommandRunner))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    std::process::exit(if result.success { 0 } else { 1 });
}
