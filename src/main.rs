//! Inkshape CLI - classify stroke captures from JSON.
//!
//! Reads a JSON array of strokes (a file path argument, or `-` for stdin)
//! and writes the recognized shapes as a JSON array on stdout. Diagnostics
//! go to stderr via `RUST_LOG`.

use anyhow::{bail, Context, Result};
use inkshape::{RecognizedShape, Stroke};
use std::io::Read;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let input = match args.get(1).map(String::as_str) {
        Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        None => bail!("usage: inkshape <strokes.json | ->"),
    };

    let strokes: Vec<Stroke> =
        serde_json::from_str(&input).context("invalid strokes JSON")?;
    log::info!("classifying {} strokes", strokes.len());

    let shapes: Vec<RecognizedShape> = strokes.iter().map(Stroke::recognize).collect();
    for (stroke, shape) in strokes.iter().zip(&shapes) {
        log::info!("stroke {} -> {}", stroke.id, shape.kind());
    }

    println!("{}", serde_json::to_string_pretty(&shapes)?);
    Ok(())
}
