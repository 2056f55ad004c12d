use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pdfmend::{Anchor, StandardFont};

/// Repair Japanese font names and stamp text onto PDF pages.
#[derive(Debug, Parser)]
#[command(name = "pdfmend", about, version)]
pub struct Cli {
    /// Print debug logs to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report whether font names can be normalized
    Check {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// Rename corrupted Japanese font names and save the result
    Normalize {
        /// Path to the input PDF
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Path to write the normalized PDF to
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// List the distinct fonts of a PDF
    Fonts {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = FontsFormat::Text)]
        format: FontsFormat,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// Draw a line of text on PDF pages
    Stamp {
        /// Path to the input PDF
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Path to write the stamped PDF to
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Text to draw
        #[arg(long)]
        text: String,

        /// Standard font (Helvetica, Helvetica-Bold, Times-Roman, Times-Bold,
        /// Courier, Courier-Bold)
        #[arg(long, default_value_t = StandardFont::Helvetica)]
        font: StandardFont,

        /// Font size in points
        #[arg(long, default_value_t = 12.0)]
        size: f64,

        /// Anchor position, e.g. 'bottom-center' or 'top-right'
        #[arg(long, default_value_t = Anchor::BOTTOM_CENTER)]
        anchor: Anchor,

        /// Horizontal offset from the anchor in points
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset_x: f64,

        /// Vertical offset from the anchor in points
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset_y: f64,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Do not wrap existing page content in q/Q
        #[arg(long)]
        no_isolate: bool,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },
}

/// Output format for the fonts subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum FontsFormat {
    Text,
    Json,
}
