//! Main Program for Scrambler
//! Run with `--help` for more instruction

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{bail, Context, Error};
use clap::{Parser, ValueEnum};
use pixel_scrambler::{ConfigBuilder, Direction, Picture, Scrambler, DEFAULT_GRID_SIDE};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCRAMBLED_SUFFIX: &str = ".scram";
const UNSCRAMBLED_SUFFIX: &str = ".unscram";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Scramble an image file
    Scramble,
    /// Unscramble an image file
    Unscramble,
}

impl From<Mode> for Direction {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Scramble => Direction::Forward,
            Mode::Unscramble => Direction::Backward,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Operation to perform
    mode: Mode,

    /// Path to an image file to process
    input: PathBuf,

    /// Password to scramble the file with
    #[arg(env = "SCRAMBLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output file (defaults to a name derived from the input)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Side of the square index grid the key is built from
    #[arg(long, default_value_t = DEFAULT_GRID_SIDE)]
    grid_side: usize,
}

/// `photo.jpg` scrambles to `photo.scram.png`,
/// which unscrambles to `photo.unscram.png`.
fn output_path(input: &Path, direction: Direction) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match direction {
        Direction::Forward => format!("{stem}{SCRAMBLED_SUFFIX}.png"),
        Direction::Backward => format!(
            "{}{UNSCRAMBLED_SUFFIX}.png",
            stem.strip_suffix(SCRAMBLED_SUFFIX).unwrap_or(&stem)
        ),
    };
    input.with_file_name(name)
}

/// Usage errors exit with 1, `--help` and `--version` with 0.
fn parse_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

fn run(args: Args) -> Result<(), Error> {
    let password = match args.password {
        Some(p) if !p.is_empty() => p,
        _ => bail!("You must specify a password (argument or SCRAMBLE_PASSWORD)"),
    };
    let direction = Direction::from(args.mode);

    let config = ConfigBuilder::new().grid_side(args.grid_side).build()?;

    let picture = Picture::open(&args.input)
        .with_context(|| format!("Could not read image {}", args.input.display()))?;
    info!(
        width = picture.width(),
        height = picture.height(),
        color = ?picture.color,
        "loaded image"
    );

    let scrambler = Scrambler::new(&password, &config);
    let picture = picture.map_pixels(|pixels| scrambler.transform(pixels, direction));

    let output = args
        .output
        .unwrap_or_else(|| output_path(&args.input, direction));
    picture
        .save_png(&output)
        .with_context(|| format!("Could not write image {}", output.display()))?;

    println!("Image written to {}", output.display());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            exit(parse_exit_code(&e));
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        exit(1);
    }
}
