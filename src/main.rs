// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Sorts photos and videos into a date-based library, renaming name
//! collisions and quarantining true duplicates.

use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser, Subcommand};

use crate::{
  exif::{ExifReader, ExifToolReader},
  org::{LogProgress, Organizer},
  prim::{Classifier, MetadataReader},
};

mod config;
mod error;
mod exif;
mod io;
mod org;
mod prim;
mod setup;
#[cfg(test)]
mod testing;

#[derive(Parser)]
struct Args {
  /// Directory of photo library. Updates default in `XDG_CONFIG_HOME`.
  #[arg(short, global = true)]
  library: Option<PathBuf>,

  /// Verbosity level. Max: 2.
  #[arg(short, action = ArgAction::Count, global = true)]
  verbose: u8,

  /// Read dates with `exiftool` instead of the built-in EXIF reader.
  #[arg(long, global = true)]
  exiftool: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Move everything under path into library.
  Import {
    path: PathBuf,

    /// Print the final tally as JSON on stdout.
    #[arg(long)]
    json: bool,
  },
  /// Show where each file under path would go, without moving anything.
  Plan { path: PathBuf },
}

fn main() -> ExitCode {
  let args = Args::parse();
  setup::configure_logging(args.verbose);

  match run(args) {
    Ok(code) => code,
    Err(e) => {
      log::error!("{e}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: Args) -> Result<ExitCode, String> {
  let library = setup::get_or_update_library(args.library)?;

  let reader: Box<dyn MetadataReader> = if args.exiftool {
    let version = ExifToolReader::check().map_err(|e| e.to_string())?;
    log::debug!("Using ExifTool {version}.");
    Box::new(ExifToolReader)
  } else {
    Box::new(ExifReader)
  };
  let organizer = Organizer::new(Classifier::default(), reader);

  match args.command {
    Commands::Import { path, json } => {
      setup::validate_roots(&path, &library)?;

      let mut progress = LogProgress::default();
      let tally = organizer
        .organize(&path, &library, Some(&mut progress))
        .map_err(|e| e.to_string())?;

      if json {
        let out = serde_json::to_string_pretty(&tally).map_err(|e| e.to_string())?;
        println!("{out}");
      }

      Ok(if tally.is_clean() {
        ExitCode::SUCCESS
      } else {
        ExitCode::FAILURE
      })
    }
    Commands::Plan { path } => {
      setup::validate_roots(&path, &library)?;

      for (src, dst) in organizer.plan(&path, &library).map_err(|e| e.to_string())? {
        println!("{} -> {}", src.display(), dst.display());
      }

      Ok(ExitCode::SUCCESS)
    }
  }
}
