use anyhow::Result;
use clap::Parser;

use pdftool::cli::{Args, Command};
use pdftool::watermark::WatermarkOptions;
use pdftool::{add_watermark, license, paths, resolve_targets, shrink_pdf};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match args.command {
        Command::Shrink { target, overwrite } => {
            print_startup_message();
            let files = resolve_targets(&target)?;
            let mut failures = 0;
            for file in &files {
                let output = if overwrite {
                    file.clone()
                } else {
                    paths::with_stem_suffix(file, paths::SHRUNKEN_SUFFIX)
                };
                match shrink_pdf(file, &output) {
                    Ok(()) => println!("Shrunken PDF saved to: {}", output.display()),
                    Err(err) => {
                        log::error!("Failed to shrink {}: {err}", file.display());
                        failures += 1;
                    }
                }
            }
            report_batch(failures, files.len())
        }

        Command::Watermark {
            target,
            text,
            rotation,
            gray,
            alpha,
            font,
            fontsize,
            overwrite,
        } => {
            let options = WatermarkOptions {
                text,
                rotation,
                gray,
                alpha,
                font,
                font_size: fontsize,
            };
            // Reject bad levels once, before touching any file in the batch.
            options.validate()?;

            let files = resolve_targets(&target)?;
            let mut failures = 0;
            for file in &files {
                match add_watermark(file, &options, overwrite) {
                    Ok(Some(output)) => {
                        println!("Watermarked PDF saved to: {}", output.display())
                    }
                    Ok(None) => {} // already watermarked, warning logged by the op
                    Err(err) => {
                        log::error!("Failed to watermark {}: {err}", file.display());
                        failures += 1;
                    }
                }
            }
            report_batch(failures, files.len())
        }

        Command::License => {
            println!("{}", license::license_text()?);
            Ok(())
        }

        Command::FullLicense => {
            println!("{}", license::full_license_text()?);
            Ok(())
        }

        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

/// Per-file errors in a batch are reported as they happen; the process
/// still exits non-zero when anything failed.
fn report_batch(failures: usize, total: usize) -> Result<()> {
    if failures > 0 {
        anyhow::bail!("{failures} of {total} file(s) failed");
    }
    Ok(())
}

fn print_startup_message() {
    let year = time::OffsetDateTime::now_utc().year();
    println!(
        "\npdftool  Copyright (C) {year}\n\
         This program comes with ABSOLUTELY NO WARRANTY; for the GPLv3 license overview,\n\
         type `pdftool license`. This is free software, and you are welcome to redistribute it\n\
         under certain conditions; type `pdftool full_license` for the full GPLv3 license.\n"
    );
}

fn print_help() {
    println!(
        "\
pdftool: A versatile PDF processing tool.

Available commands:
  - shrink [FILE_OR_FOLDER]: Shrink a PDF file or all PDFs in a folder.
  - watermark [FILE_OR_FOLDER TEXT]: Add a watermark to a PDF file or all PDFs in a folder.
  - license: Print the license overview.
  - full_license: Print the full license text.
  - help: Display this help message.

Examples:
  pdftool shrink my_file.pdf
  pdftool shrink /path/to/folder
  pdftool shrink /path/to/folder --overwrite

  pdftool watermark my_file.pdf \"Confidential\" --rotation 45 --gray 0.5 --alpha 0.5
  pdftool watermark /path/to/folder \"Copyright (c) 2024 The Author\" --font \"Times-Roman\" --fontsize 50
  pdftool watermark my_file.pdf \"Confidential\" --overwrite

  pdftool license
  pdftool full_license"
    );
}
