//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Courier HTTP client.
#[derive(Debug, Parser)]
#[command(name = "courier", version, about)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "COURIER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Environment used for `{{variable}}` substitution
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Return 3xx responses instead of following them
    #[arg(long, global = true)]
    pub no_follow: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the final request of a request or execution without sending it
    Render {
        /// Collection file
        file: PathBuf,
        /// Request or execution, by id or name
        item: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Http)]
        format: RenderFormat,
    },
    /// Send a request or execution and print the response
    Send {
        /// Collection file
        file: PathBuf,
        /// Request or execution, by id or name
        item: String,
        /// Write script changes to environments back to the file
        #[arg(long)]
        save: bool,
    },
    /// Add a request parsed from a curl command to a collection file
    ImportCurl {
        /// Collection file, created if missing
        file: PathBuf,
        /// The curl command (read from stdin when omitted)
        #[arg(short, long)]
        command: Option<String>,
        /// Folder to place the request in
        #[arg(long)]
        folder: Option<String>,
    },
    /// Serve the enabled mock responses of a collection until interrupted
    Mock {
        /// Collection file
        file: PathBuf,
        /// Port (defaults to the collection's mock port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// How `render` prints a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Raw HTTP/1.1 text
    Http,
    /// A curl command line
    Curl,
}
