use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idf-rail-dashboard")]
#[command(about = "Hourly validation profiles for the Île-de-France rail network")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the two source CSV files")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dataset overview and a text rendition of each chart
    Report {
        #[arg(
            short,
            long,
            help = "Keep one day-type category (e.g. JOHV); 'tous' or 'all' keeps every type"
        )]
        day_type: Option<String>,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Stations to keep, by name or key; empty keeps all"
        )]
        stations: Vec<String>,

        #[arg(long, default_value = "0", help = "First hour of the inclusive range")]
        from_hour: u8,

        #[arg(long, default_value = "23", help = "Last hour of the inclusive range")]
        to_hour: u8,
    },

    /// Write the chart datasets and the filtered table to the export directory
    Export {
        #[arg(
            short,
            long,
            help = "Keep one day-type category (e.g. JOHV); 'tous' or 'all' keeps every type"
        )]
        day_type: Option<String>,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Stations to keep, by name or key; empty keeps all"
        )]
        stations: Vec<String>,

        #[arg(long, default_value = "0", help = "First hour of the inclusive range")]
        from_hour: u8,

        #[arg(long, default_value = "23", help = "Last hour of the inclusive range")]
        to_hour: u8,

        #[arg(short, long, help = "Output directory [default: exports]")]
        output_dir: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Write compact JSON")]
        compact: bool,
    },

    /// Check data quality without rendering anything
    Check,
}
