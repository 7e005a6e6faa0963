use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use huffseq::Codec;
use log::info;

#[derive(Parser, Debug)]
#[command(about = "Restore a file packed by fieldpack", long_about = None)]
struct Args {
    /// The packed file.
    input: PathBuf,

    /// Where to write the restored bytes.
    output: PathBuf,
}

pub fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .unwrap();

    let packed = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if packed.len() < 12 {
        bail!("{} is too short to be a packed file", args.input.display());
    }

    let orig_len = u64::from_le_bytes(packed[..8].try_into().unwrap()) as usize;
    let blob_len = u32::from_le_bytes(packed[8..12].try_into().unwrap()) as usize;
    let rest = &packed[12..];
    if rest.len() < blob_len + 8 {
        bail!("{} is truncated", args.input.display());
    }
    let codec = Codec::deserialize(&rest[..blob_len])?;
    let bits = u64::from_le_bytes(rest[blob_len..blob_len + 8].try_into().unwrap()) as usize;
    let stream = &rest[blob_len + 8..];
    if stream.len() < (bits + 7) / 8 {
        bail!("{} is missing stream bytes", args.input.display());
    }

    info!("Decoding {} bits...", bits);
    let mut data = vec![0u8; orig_len.max(1)];
    let decoded = codec.decode(stream, bits, &mut data)?;
    if decoded != orig_len {
        bail!("decoded {} bytes, expected {}", decoded, orig_len);
    }
    fs::write(&args.output, &data[..decoded])
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!("Restored {} bytes", decoded);
    Ok(())
}
