mod render;
mod webserver;

use clap::{Parser, Subcommand};
use pulse_lib::quote::{HttpQuoteSource, DEFAULT_QUOTE_ENDPOINT};
use pulse_lib::sheet::SledSheetStore;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "quantum-pulse")]
#[command(about = "Quantum Pulse social feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the Quantum Pulse server")]
    Start {
        #[arg(long, value_name = "HTTP_PORT")]
        http_port: Option<u16>,

        #[arg(long, value_name = "HTTP_HOSTNAME")]
        http_hostname: Option<String>,

        #[arg(short, long, value_name = "DATA_DIR")]
        data: Option<PathBuf>,

        #[arg(long, value_name = "QUOTE_ENDPOINT")]
        quote_endpoint: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            http_port,
            http_hostname,
            data,
            quote_endpoint,
        } => {
            println!("Starting Quantum Pulse...");

            // Set up tracing
            let collector = tracing_subscriber::fmt()
                .with_max_level(Level::DEBUG)
                .finish();
            tracing::subscriber::set_global_default(collector)
                .expect("There was a problem setting up tracing");

            let http_host = http_hostname.unwrap_or("0.0.0.0".to_string());
            let http_port = http_port.unwrap_or(8080);

            let data_directory = data.unwrap_or(PathBuf::from("data"));
            let db_file = data_directory.join("pulse.db");

            let quote_endpoint =
                quote_endpoint.unwrap_or(DEFAULT_QUOTE_ENDPOINT.to_string());

            // Create tokio async runtime
            let rt = tokio::runtime::Runtime::new()?;

            // Open (or create) the worksheet datastore
            let store = SledSheetStore::open(&db_file)?;
            let quotes = HttpQuoteSource::new(quote_endpoint)?;

            // Fire up the web server
            let http_addr = format!("{}:{}", http_host, http_port);
            let server_handler =
                rt.spawn(async move { webserver::start_webserver(http_addr, store, quotes).await });

            println!("\nQuantum Pulse started successfully! (Press Ctrl+C to exit)");
            println!("Serving on http://{}:{}", http_host, http_port);

            rt.block_on(async move {
                tokio::signal::ctrl_c().await?;
                server_handler.abort();
                Ok::<_, anyhow::Error>(())
            })?;
        }
    }

    Ok(())
}
