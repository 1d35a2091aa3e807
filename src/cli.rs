//! Command-line interface implementation for Scribe.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for Scribe.
#[derive(Parser, Debug)]
#[command(author, version, about = "Scribe: template-driven code generator", long_about = None)]
pub struct Args {
    /// Path to the generator directory
    #[arg(value_name = "GENERATOR")]
    pub generator: PathBuf,

    /// Directory where the generated assets will be created
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Enable verbose logging output and the detailed result table
    #[arg(short, long)]
    pub verbose: bool,

    /// Get answers from stdin
    #[arg(short, long)]
    pub stdin: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
