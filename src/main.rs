//! Headless command-line entry point
//!
//! The GUI shell is a separate component; this binary exposes the core over
//! a few maintenance commands: inspecting a saved annotation record,
//! running text detection over an image file, and listing recent captures.

use std::process::ExitCode;

use anyhow::{Context, Result};

use inkshot::capture::image::CapturedFrame;
use inkshot::capture::ocr::{self, OcrEngine, TextDetector};
use inkshot::config::InkshotConfig;
use inkshot::domain::{RectF, ShapeKind};
use inkshot::store::{RecentCaptures, RecordStore};

const USAGE: &str = "usage: inkshot <command>

commands:
  inspect [record]                 summarize an annotation record
  ocr <image> [left top right bottom]
                                   detect text in an image region
  recent                           list recent captures";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("inspect") => inspect(args.get(1)),
        Some("ocr") => run_ocr(&args[1..]),
        Some("recent") => list_recent(),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Print a per-kind summary of a saved annotation record
fn inspect(path: Option<&String>) -> Result<()> {
    let store = match path {
        Some(p) => RecordStore::new(p),
        None => {
            let config = InkshotConfig::load();
            RecordStore::new(
                config
                    .record_path()
                    .context("no data directory available")?,
            )
        }
    };

    let shapes = runtime()?.block_on(store.load())?;
    println!("{}: {} shape(s)", store.path().display(), shapes.len());

    for kind in [
        ShapeKind::Polyline,
        ShapeKind::Line,
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Text,
    ] {
        let count = shapes.iter().filter(|s| s.kind() == kind).count();
        if count > 0 {
            println!("  {}: {}", kind.name(), count);
        }
    }
    Ok(())
}

/// Detect text in a region of an image file
fn run_ocr(args: &[String]) -> Result<()> {
    let path = args
        .first()
        .context("usage: inkshot ocr <image> [left top right bottom]")?;
    if !ocr::tesseract_available() {
        anyhow::bail!("tesseract is not installed or not on PATH");
    }

    let img = image::open(path)
        .with_context(|| format!("failed to open image {path}"))?
        .to_rgba8();
    let region = match args.len() {
        1 => RectF::new(0.0, 0.0, img.width() as f32, img.height() as f32),
        5 => {
            let coord = |i: usize| -> Result<f32> {
                args[i]
                    .parse()
                    .with_context(|| format!("invalid coordinate `{}`", args[i]))
            };
            RectF::new(coord(1)?, coord(2)?, coord(3)?, coord(4)?)
        }
        _ => anyhow::bail!("usage: inkshot ocr <image> [left top right bottom]"),
    };

    let frame = CapturedFrame::new(img, (0.0, 0.0), 1.0)?;
    let engine = OcrEngine::with_language(frame, InkshotConfig::load().ocr_language);
    let text = engine.detect_text(region)?;
    if text.is_empty() {
        println!("No text detected");
    } else {
        println!("{text}");
    }
    Ok(())
}

/// List recently captured screenshots, newest first
fn list_recent() -> Result<()> {
    let path = InkshotConfig::recent_captures_path().context("no data directory available")?;
    let recent = runtime()?.block_on(RecentCaptures::load(&path))?;
    if recent.entries().is_empty() {
        println!("No recent captures");
    } else {
        for entry in recent.entries() {
            println!("{}", entry.display());
        }
    }
    Ok(())
}
