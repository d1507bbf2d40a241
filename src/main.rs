//! Modelpack - batch model-to-asset converter.
//!
//! Imports a model file, runs the conversion pipeline, and writes one
//! self-contained .mpk asset file.

mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use modelpack_format::RecordReader;
use modelpack_pipeline::{convert_scene, write_document, ConvertOptions};
use modelpack_scene::import_scene;

use crate::cli::{default_output_path, Cli, Command, ConvertArgs, InspectArgs};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    match Cli::parse().command {
        Command::Convert(args) => convert(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    let scene = import_scene(&args.model).context("Failed to import model")?;
    info!(
        "Imported '{}': {} meshes, {} materials",
        args.model.display(),
        scene.meshes.len(),
        scene.materials.len()
    );

    let base_dir = args.model.parent().unwrap_or(Path::new("."));
    let options = ConvertOptions {
        index_width: args.index_width.into(),
    };
    let document = convert_scene(&scene, base_dir, &options).context("Failed to convert scene")?;

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.model));
    write_document(&document, &output).context("Failed to write asset file")?;

    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read '{}'", args.file.display()))?;
    let reader = RecordReader::new(&bytes).context("Failed to read asset file")?;

    println!(
        "{}: format v{}, {} records",
        args.file.display(),
        reader.version(),
        reader.record_count()
    );
    for (index, record) in reader.enumerate() {
        let record = record.with_context(|| format!("Failed to decode record {index}"))?;
        println!(
            "  [{}] '{}': {} vertices, {} u{} indices, material '{}', diffuse {}, normal {}",
            index,
            record.name,
            record.vertex_count,
            record.indices.len(),
            record.indices.bit_width(),
            record.material,
            payload(&record.diffuse_texture),
            payload(&record.normal_texture),
        );
    }

    Ok(())
}

fn payload(texture: &Option<Vec<u8>>) -> String {
    match texture {
        Some(bytes) => format!("{} bytes", bytes.len()),
        None => "absent".to_string(),
    }
}
