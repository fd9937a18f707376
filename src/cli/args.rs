use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::watermark::WatermarkFont;

#[derive(Parser, Debug)]
#[command(name = "pdftool")]
#[command(
    author,
    version,
    about = "A versatile PDF processing tool: shrink PDFs and stamp text watermarks",
    disable_help_subcommand = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Shrink a PDF file or all PDFs in a folder
    Shrink {
        /// Path to a PDF file or folder containing PDFs
        target: PathBuf,

        /// Overwrite the original PDF(s)
        #[arg(long)]
        overwrite: bool,
    },

    /// Add a diagonal text watermark to a PDF file or all PDFs in a folder
    Watermark {
        /// Path to a PDF file or a folder of PDFs
        target: PathBuf,

        /// Watermark text to apply
        text: String,

        /// Rotation in degrees (counter-clockwise)
        #[arg(long, default_value_t = 35)]
        rotation: i32,

        /// Text gray level (0.0 is white, 1.0 is black)
        #[arg(long, default_value_t = 0.5)]
        gray: f32,

        /// Text alpha level (0.0 transparent, 1.0 opaque)
        #[arg(long, default_value_t = 0.5)]
        alpha: f32,

        /// Font for the watermark text
        #[arg(long, value_enum, default_value_t = WatermarkFont::Helvetica)]
        font: WatermarkFont,

        /// Font size for the watermark text, in points
        #[arg(long, default_value_t = 45, value_parser = clap::value_parser!(u32).range(1..))]
        fontsize: u32,

        /// Overwrite the original PDF(s)
        #[arg(long)]
        overwrite: bool,
    },

    /// Print the license overview
    License,

    /// Print the full license text
    #[command(name = "full_license")]
    FullLicense,

    /// Display information about how to use pdftool
    Help,
}
