// src/main.rs

//! `lanewise-probe`: prints the species table for the active configuration
//! and runs a short self-check of every element kind.
//!
//! Usage: `lanewise-probe [--json] [CONFIG.json]`

use anyhow::{ensure, Context};
use log::{info, warn};
use serde::Serialize;

use lanewise::config::{self, Config};
use lanewise::species;
use lanewise::{Element, ElementKind, KindFlags, Shape, Species};

/// One row of the species table.
#[derive(Debug, Serialize)]
struct SpeciesRow {
    kind: ElementKind,
    shape: Shape,
    bit_size: usize,
    lane_count: usize,
    flags: KindFlags,
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path))?;
    let config = Config::from_json_str(&text)
        .with_context(|| format!("Failed to parse config file '{}'", path))?;
    Ok(config)
}

fn species_table() -> Vec<SpeciesRow> {
    let mut rows = Vec::with_capacity(ElementKind::ALL.len() * Shape::ALL.len());
    for kind in ElementKind::ALL {
        for shape in Shape::ALL {
            match species::descriptor(kind, shape) {
                Ok(desc) => rows.push(SpeciesRow {
                    kind,
                    shape,
                    bit_size: desc.bit_size(),
                    lane_count: desc.lane_count(),
                    flags: kind.flags(),
                }),
                Err(e) => warn!("No species for {} at {}: {}", kind, shape, e),
            }
        }
    }
    rows
}

/// Exercises the core operations on the max-shape species of `E`.
fn self_check<E: Element>() -> anyhow::Result<()> {
    let s = Species::<E>::preferred()
        .with_context(|| format!("No preferred species for {}", E::KIND))?;
    let n = s.lane_count();

    let a = s.iota();
    let b = s.broadcast(E::ONE);
    ensure!(a.add(&b)?.sub(&b)? == a, "{}: add/sub round trip", s);

    let reverse = s.shuffle_from_fn(|i| n - 1 - i)?;
    let twice = a.rearrange(&reverse)?.rearrange(&reverse)?;
    ensure!(twice == a, "{}: double reversal", s);

    ensure!(b.mul_all() == E::ONE, "{}: product of ones", s);

    let mut out = vec![E::ZERO; n + 1];
    a.into_array(&mut out, 1)?;
    ensure!(s.from_array(&out, 1)? == a, "{}: array store/load", s);

    let all = s.mask_all_true();
    ensure!(all.not().all_true() == !all.any_true(), "{}: mask duality", s);

    info!("Self-check passed for {}", s);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut json = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => config_path = Some(arg),
        }
    }

    if let Some(path) = config_path {
        let config = load_config(&path)?;
        info!("Configuration loaded from '{}'", path);
        config::install(config).context("Failed to install configuration")?;
    } else {
        info!("Configuration loaded (environment/defaults).");
    }

    info!("Max shape is {} bits", Shape::Max.bit_size());

    let rows = species_table();
    if json {
        let text = serde_json::to_string_pretty(&rows).context("Failed to encode species table")?;
        println!("{}", text);
    } else {
        println!("{:<6} {:<10} {:>6} {:>6}", "kind", "shape", "bits", "lanes");
        for row in &rows {
            println!(
                "{:<6} {:<10} {:>6} {:>6}",
                row.kind.to_string(),
                row.shape.to_string(),
                row.bit_size,
                row.lane_count
            );
        }
    }

    self_check::<i8>()?;
    self_check::<i16>()?;
    self_check::<i32>()?;
    self_check::<i64>()?;
    self_check::<u8>()?;
    self_check::<u16>()?;
    self_check::<u32>()?;
    self_check::<u64>()?;
    self_check::<f32>()?;
    self_check::<f64>()?;

    info!("All self-checks passed.");
    Ok(())
}
