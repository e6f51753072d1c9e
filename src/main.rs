//! wirerouter command line.
//!
//! ```text
//! wirerouter serve    --config routes.toml     # TCP listener, one request per connection
//! wirerouter dispatch --config routes.toml < request.txt
//! wirerouter routes   --config routes.toml
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use wirerouter::config::{load_config, AppConfig};
use wirerouter::net::{Listener, Server};
use wirerouter::observability::logging;
use wirerouter::{App, Kernel};

#[derive(Parser)]
#[command(name = "wirerouter")]
#[command(about = "Minimal HTTP message parser and request router", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults apply when omitted).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Listen for connections and answer from the configured routes
    Serve {
        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Route one raw request read from a file or stdin and print the response
    Dispatch {
        /// File holding the raw request; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List registered routes in match order
    Routes,
}

fn load(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(AppConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load(cli.config.as_deref())?;
    logging::init(&config.observability);

    let app = App::from_config(&config)?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.listener.bind_address = bind;
            }
            tracing::info!(
                bind_address = %config.listener.bind_address,
                max_connections = config.listener.max_connections,
                routes = app.router().routes().len(),
                "wirerouter starting"
            );

            let listener = Listener::bind(&config.listener).await?;
            let server = Server::new(Kernel::new(app), config.listener.clone());
            server
                .run(listener, async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %e, "Failed to listen for ctrl-c");
                        std::future::pending::<()>().await;
                    }
                })
                .await?;

            tracing::info!("Shutdown complete");
        }
        Commands::Dispatch { input } => {
            let raw = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut raw = String::new();
                    std::io::stdin().read_to_string(&mut raw)?;
                    raw
                }
            };
            let kernel = Kernel::new(app);
            print!("{}", kernel.handle_raw(&raw));
        }
        Commands::Routes => {
            for (i, route) in app.router().routes().iter().enumerate() {
                println!("{:>3}  {:<8} {:<30} {}", i, route.method(), route.path(), route.pattern().as_str());
            }
        }
    }

    Ok(())
}
