use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::*;
use huffseq::Codec;
use log::info;

/// Packed file layout: original length (u64), blob length (u32), codec
/// blob, stream bit count (u64), stream bytes. All integers little
/// endian; the codec blob itself records its producer's endianness.
#[derive(Parser, Debug)]
#[command(about = "Compress a file with a length-limited Huffman codec", long_about = None)]
struct Args {
    /// The file to compress.
    input: PathBuf,

    /// Where to write the packed file.
    output: PathBuf,

    /// Build the codec without an escape code; bytes absent from the
    /// input would then fail to encode, which cannot happen when packing
    /// the training data itself.
    #[clap(long)]
    no_escape: bool,

    /// Dump the histogram and code table after training.
    #[clap(short, long)]
    print_codec: bool,
}

pub fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .unwrap();

    let data = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut codec = Codec::new();
    let mut pl = ProgressLogger::default();
    pl.item_name("byte").expected_updates(Some(data.len()));
    pl.start("Training histogram...");
    for chunk in data.chunks(1 << 16) {
        codec.add(chunk)?;
        pl.update_with_count(chunk.len());
    }
    pl.done();

    codec.build(!args.no_escape)?;
    if args.print_codec {
        codec.print();
    }

    info!("Encoding {} bytes...", data.len());
    let mut blob = vec![0u8; Codec::max_serial_size()];
    let blob_len = codec.serialize(&mut blob)?;
    let mut stream = vec![0u8; codec.encoded_capacity(data.len())];
    let bits = codec.encode(&data, &mut stream)?;
    let stream_len = (bits + 7) / 8;

    let mut packed = Vec::with_capacity(8 + 4 + blob_len + 8 + stream_len);
    packed.extend_from_slice(&(data.len() as u64).to_le_bytes());
    packed.extend_from_slice(&(blob_len as u32).to_le_bytes());
    packed.extend_from_slice(&blob[..blob_len]);
    packed.extend_from_slice(&(bits as u64).to_le_bytes());
    packed.extend_from_slice(&stream[..stream_len]);
    fs::write(&args.output, &packed)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        "{} bits out for {} bits in ({:.2}%), {} codec bytes",
        bits,
        data.len() * 8,
        bits as f64 * 100.0 / (data.len() * 8).max(1) as f64,
        blob_len
    );
    Ok(())
}
