//! Probe command handlers
//!
//! Reads meter debug logs, extracts `payload=` lines, and reports every
//! candidate layout for each record.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use a2probe::{scan_value, search, summarize_head, Candidate, PayloadRecord, ValueHit, VarInt};

use crate::config::Config;

/// Leading varints and head bytes shown per record.
const HEAD_LIMIT: usize = 12;

/// Report for one payload line, in extraction order.
#[derive(Debug, Serialize)]
pub struct RecordReport {
    pub index: usize,
    pub target: u64,
    pub actor: u64,
    pub damage: u64,
    pub length: usize,
    pub candidates: Vec<Candidate>,
    /// Raw varint scans for the known values; present only when no
    /// candidate matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackScan>,
}

#[derive(Debug, Serialize)]
pub struct FallbackScan {
    pub target_hits: Vec<ValueHit>,
    pub actor_hits: Vec<ValueHit>,
}

/// Handle the probe command
pub fn handle(file: Option<&Path>, max_gap: Option<usize>, show_raw: bool, json: bool) -> Result<()> {
    let text = read_input(file)?;

    let max_gap = match max_gap {
        Some(gap) => gap,
        None => Config::load()?.effective_max_gap(),
    };

    let mut records = Vec::new();
    for parsed in a2probe::extract_records(text.lines()) {
        records.push(parsed.context("Malformed payload line")?);
    }

    if records.is_empty() {
        bail!("No payload lines found. Expected lines with 'payload=' and target/actor/damage info.");
    }

    let reports: Vec<RecordReport> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| build_report(idx + 1, record, max_gap))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (report, record) in reports.iter().zip(&records) {
            print_report(report, record, show_raw);
        }
    }

    Ok(())
}

/// Run the layout search for one record, with the raw value scan filled in
/// when the structured search finds nothing.
pub fn build_report(index: usize, record: &PayloadRecord, max_gap: usize) -> RecordReport {
    let candidates = search(&record.payload, record.target, record.actor, max_gap);
    let fallback = candidates.is_empty().then(|| FallbackScan {
        target_hits: scan_value(&record.payload, record.target),
        actor_hits: scan_value(&record.payload, record.actor),
    });

    RecordReport {
        index,
        target: record.target,
        actor: record.actor,
        damage: record.damage,
        length: record.payload.len(),
        candidates,
        fallback,
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read log from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read log from stdin")?;
            Ok(text)
        }
    }
}

fn print_report(report: &RecordReport, record: &PayloadRecord, show_raw: bool) {
    println!();
    println!("== Payload {} ==", report.index);
    println!(
        "target={} actor={} damage={} length={}",
        report.target, report.actor, report.damage, report.length
    );
    if show_raw {
        println!("raw: {}", fmt_bytes(&record.payload));
    }
    println!(
        "varints@0: {}",
        fmt_head(&summarize_head(&record.payload, HEAD_LIMIT))
    );
    let head_end = record.payload.len().min(HEAD_LIMIT);
    println!("head bytes: {}", fmt_bytes(&record.payload[..head_end]));

    if report.candidates.is_empty() {
        println!("candidates: none");
    } else {
        println!("candidates:");
        for candidate in &report.candidates {
            println!("  - {}", fmt_candidate(candidate));
        }
    }

    if let Some(fallback) = &report.fallback {
        println!("scan: varint matches for target/actor");
        print_hits("target", &fallback.target_hits);
        print_hits("actor", &fallback.actor_hits);
    }
}

fn print_hits(label: &str, hits: &[ValueHit]) {
    if hits.is_empty() {
        println!("  {}: none", label);
    } else {
        let rendered: Vec<String> = hits
            .iter()
            .map(|hit| format!("{}({}b)", hit.offset, hit.length))
            .collect();
        println!("  {}: {}", label, rendered.join(", "));
    }
}

pub fn fmt_candidate(candidate: &Candidate) -> String {
    format!(
        "target@{}({}b) gap={} actor@{}({}b) unknown={} skill_raw={} skill_code={} damage={} next@{}",
        candidate.start,
        candidate.target_len,
        candidate.gap,
        candidate.actor_offset,
        candidate.actor_len,
        candidate.unknown,
        candidate.skill_raw,
        candidate.skill_code,
        candidate.damage,
        candidate.end
    )
}

fn fmt_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fmt_head(varints: &[VarInt]) -> String {
    varints
        .iter()
        .map(|info| format!("{}({}b)", info.value, info.length))
        .collect::<Vec<_>>()
        .join(", ")
}
