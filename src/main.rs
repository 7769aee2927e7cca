use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use packed_morse::{DecodeOptions, Decoder};

/// Packed binary Morse code.
///
/// Text is encoded one timing element per bit: dots, dashes and the gaps
/// between symbols, characters and words, terminated by the AR prosign.
#[derive(Parser, Debug)]
#[command(name = "morse")]
#[command(version, about = "Encode text as packed binary Morse code and back", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a text file as binary Morse.
    ///
    /// Letters are case-folded; any run of other characters becomes a single
    /// word gap.
    Encode {
        /// Source text file
        src: PathBuf,
        /// Output file (default: stdout)
        dest: Option<PathBuf>,
    },
    /// Decode a binary Morse file back to text.
    Decode {
        /// Source binary Morse file
        src: PathBuf,
        /// Output file (default: stdout)
        dest: Option<PathBuf>,
        /// Only accept 1, 3 and 7 bit gaps
        #[arg(long)]
        strict: bool,
    },
}

/// Command-line arguments, with the subcommand implied when the binary is
/// invoked as `morse-encode` or `morse-decode`.
fn args() -> Vec<OsString> {
    let mut args: Vec<OsString> = std::env::args_os().collect();
    let implied = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .and_then(|name| match name.strip_suffix(".exe").unwrap_or(name) {
            "morse-encode" => Some("encode"),
            "morse-decode" => Some("decode"),
            _ => None,
        });
    if let Some(command) = implied {
        args.insert(1, command.into());
    }
    args
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

fn write_output(dest: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match dest {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .context("cannot write output")
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(args());

    match cli.command {
        Commands::Encode { src, dest } => {
            let text = read_input(&src)?;
            let morse = packed_morse::encode::<u8>(&text).context("cannot encode text")?;
            write_output(dest.as_deref(), &morse)?;
        }
        Commands::Decode { src, dest, strict } => {
            let morse = read_input(&src)?;
            let decoder = Decoder::new(DecodeOptions {
                strict_gaps: strict,
            });
            let text = decoder
                .decode(&morse)
                .with_context(|| format!("cannot decode {}", src.display()))?;
            write_output(dest.as_deref(), &text)?;
        }
    }

    Ok(())
}
