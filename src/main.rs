use clap::{Parser, Subcommand};

use zylos_component::config::ConfigStore;
use zylos_component::paths::ComponentPaths;
use zylos_component::send::{self, PlaceholderTransport};
use zylos_component::{daemon, logging, setup, COMPONENT_NAME};

#[derive(Parser)]
#[command(name = "zylos-component")]
#[command(about = "Zylos component service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the component service (default)
    Daemon,
    /// Send a message through this component's bridge
    Send {
        /// Target endpoint identifier
        endpoint_id: String,
        /// Message text; may start with "[MEDIA:<type>] <path>"
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Create the data directory layout and initial config
    Setup,
}

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();
    let paths = ComponentPaths::resolve(COMPONENT_NAME);

    let result = match cli.command {
        None | Some(Commands::Daemon) => daemon::run(&paths),
        Some(Commands::Send {
            endpoint_id,
            message,
        }) => run_send(&paths, &endpoint_id, &message.join(" ")),
        Some(Commands::Setup) => setup::run(&paths),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run_send(paths: &ComponentPaths, endpoint_id: &str, message: &str) -> anyhow::Result<()> {
    let store = ConfigStore::load(paths.config_path());
    if !store.get().enabled {
        anyhow::bail!("{COMPONENT_NAME} is disabled in config");
    }

    send::dispatch(&PlaceholderTransport, endpoint_id, message)?;
    println!("Message sent successfully");
    Ok(())
}
