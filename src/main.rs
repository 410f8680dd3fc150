//! ddscope CLI - Command-line tool for inspecting DDS texture containers.
//!
//! This is the main entry point for the ddscope command-line application.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use ddscope::prelude::*;

type FileDecoder = DdsDecoder<BufReader<File>>;

/// ddscope - DDS texture container inspector
#[derive(Parser)]
#[command(name = "ddscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the texture parameters of a DDS file
    Info {
        /// Path to the DDS file
        #[arg(short, long, env = "DDSCOPE_INPUT")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every frame of a DDS file
    Frames {
        /// Path to the DDS file
        #[arg(short, long, env = "DDSCOPE_INPUT")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single frame, by flat index or by address
    Frame {
        /// Path to the DDS file
        #[arg(short, long, env = "DDSCOPE_INPUT")]
        input: PathBuf,

        /// Flat frame index
        #[arg(long, conflicts_with_all = ["array", "mip", "slice"])]
        index: Option<u32>,

        /// Array index
        #[arg(long, default_value_t = 0)]
        array: u32,

        /// Mip level
        #[arg(long, default_value_t = 0)]
        mip: u32,

        /// Depth slice
        #[arg(long, default_value_t = 0)]
        slice: u32,
    },

    /// Inspect all DDS files below a directory
    Scan {
        /// Directory to walk
        #[arg(short, long, env = "DDSCOPE_DIR")]
        dir: PathBuf,

        /// Filter pattern (glob-style, matched against the relative path)
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input, json } => {
            cmd_info(&input, json)?;
        }
        Commands::Frames { input, json } => {
            cmd_frames(&input, json)?;
        }
        Commands::Frame {
            input,
            index,
            array,
            mip,
            slice,
        } => {
            cmd_frame(&input, index, FrameAddress::new(array, mip, slice))?;
        }
        Commands::Scan { dir, filter } => {
            cmd_scan(&dir, filter.as_deref())?;
        }
    }

    Ok(())
}

fn open_decoder(path: &Path) -> Result<FileDecoder> {
    tracing::debug!(path = %path.display(), "opening DDS file");
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let decoder = DdsDecoder::open(BufReader::new(file))
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(decoder)
}

fn cmd_info(input: &Path, json: bool) -> Result<()> {
    let decoder = open_decoder(input)?;
    let params = decoder.parameters()?;
    let container = decoder.container_format();

    if json {
        let report = serde_json::json!({
            "container": container,
            "parameters": params,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File:        {}", input.display());
    println!("Container:   {} ({})", container.name, container.guid);
    println!("Size:        {}x{}", params.width, params.height);
    println!("Depth:       {}", params.depth);
    println!("Mip levels:  {}", params.mip_levels);
    println!("Array size:  {}", params.array_size);
    println!("Frames:      {}", params.frame_count);
    println!("Format:      {}", params.format);
    println!("Dimension:   {}", params.dimension);
    println!("Alpha mode:  {}", params.alpha_mode);

    Ok(())
}

fn cmd_frames(input: &Path, json: bool) -> Result<()> {
    let decoder = open_decoder(input)?;
    let count = decoder.frame_count()?;

    if json {
        let frames = (0..count)
            .map(|index| {
                let frame = decoder.frame(index)?;
                Ok(serde_json::json!({
                    "index": index,
                    "address": frame.address(),
                    "info": frame.info(),
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&frames)?);
        return Ok(());
    }

    println!(
        "{:>6} {:>6} {:>4} {:>6} {:>12} {:>12}",
        "index", "array", "mip", "slice", "size", "blocks"
    );
    for index in 0..count {
        let frame = decoder.frame(index)?;
        let address = frame.address();
        let (width, height) = frame.size();
        let (bw, bh) = frame.size_in_blocks();
        println!(
            "{:>6} {:>6} {:>4} {:>6} {:>12} {:>12}",
            index,
            address.array_index,
            address.mip_level,
            address.slice_index,
            format!("{width}x{height}"),
            format!("{bw}x{bh}")
        );
    }

    println!("\nTotal: {} frames", count);

    Ok(())
}

fn cmd_frame(input: &Path, index: Option<u32>, address: FrameAddress) -> Result<()> {
    let decoder = open_decoder(input)?;

    let frame = match index {
        Some(index) => decoder.frame(index)?,
        None => decoder.frame_by_address(address.array_index, address.mip_level, address.slice_index)?,
    };

    let info = frame.info();
    let format = frame.format_info();
    println!("Address:     {}", frame.address());
    println!("Size:        {}x{}", info.width, info.height);
    println!("Format:      {}", format.format);
    println!("Block:       {}x{}, {} bytes", format.block_width, format.block_height, format.bytes_per_block);
    println!("Blocks:      {}x{}", info.width_in_blocks, info.height_in_blocks);
    match info.data_size() {
        Some(size) => println!("Data size:   {} bytes", size),
        None => println!("Data size:   unknown (unsupported format)"),
    }

    Ok(())
}

fn cmd_scan(dir: &Path, filter: Option<&str>) -> Result<()> {
    let pattern = filter
        .map(glob::Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;
    let match_options = glob::MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("dds"))
        })
        .filter(|path| match &pattern {
            Some(pattern) => {
                let relative = path.strip_prefix(dir).unwrap_or(path);
                pattern.matches_path_with(relative, match_options)
            }
            None => true,
        })
        .collect();

    println!("Scanning {} DDS files in {}...", files.len(), dir.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let results: Vec<(&PathBuf, Result<TextureInfo>)> = files
        .par_iter()
        .map(|path| {
            let result = open_decoder(path)
                .and_then(|decoder| decoder.parameters().context("Failed to read parameters"));
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_with_message("Done");

    let mut by_format: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_frames = 0u64;
    let mut failures = Vec::new();

    for (path, result) in results {
        match result {
            Ok(params) => {
                *by_format
                    .entry(format!("{} {}", params.format, params.dimension))
                    .or_default() += 1;
                total_frames += u64::from(params.frame_count);
            }
            Err(e) => failures.push((path, e)),
        }
    }

    println!("Scanned in {:?}", start.elapsed());
    for (format, count) in &by_format {
        println!("{:>8}  {}", count, format);
    }
    println!("Total frames: {}", total_frames);

    if !failures.is_empty() {
        println!("\n{} files failed:", failures.len());
        for (path, e) in &failures {
            eprintln!("  {}: {:#}", path.display(), e);
        }
    }

    Ok(())
}
