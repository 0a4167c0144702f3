//! Inspect command handlers
//!
//! One-off diagnostics for a single payload pasted as hex: leading-varint
//! summary, hex dump, and an optional raw value scan.

use anyhow::{Context, Result};

use a2probe::{decode_hex_payload, scan_value, summarize_head};

/// Handle the inspect command
pub fn handle(payload_hex: &str, find: Option<u64>, limit: usize) -> Result<()> {
    let payload = decode_hex_payload(payload_hex).context("Invalid payload hex")?;

    println!("length: {} bytes", payload.len());

    let head = summarize_head(&payload, limit);
    if head.is_empty() {
        println!("varints@0: none");
    } else {
        let rendered: Vec<String> = head
            .iter()
            .map(|info| format!("{}({}b)", info.value, info.length))
            .collect();
        println!("varints@0: {}", rendered.join(", "));
    }

    println!();
    hex_dump(&payload);

    if let Some(needle) = find {
        let hits = scan_value(&payload, needle);
        if hits.is_empty() {
            println!();
            println!("varints equal to {}: none", needle);
        } else {
            let rendered: Vec<String> = hits
                .iter()
                .map(|hit| format!("{}({}b)", hit.offset, hit.length))
                .collect();
            println!();
            println!("varints equal to {}: {}", needle, rendered.join(", "));
        }
    }

    Ok(())
}

/// Print an offset / hex / ASCII dump, 16 bytes per row.
fn hex_dump(data: &[u8]) {
    for (row, chunk) in data.chunks(16).enumerate() {
        print!("{:08x}  ", row * 16);
        for (col, byte) in chunk.iter().enumerate() {
            print!("{:02x} ", byte);
            if col == 7 {
                print!(" ");
            }
        }
        // Pad if last line is short
        if chunk.len() < 16 {
            for col in chunk.len()..16 {
                print!("   ");
                if col == 7 {
                    print!(" ");
                }
            }
        }
        print!(" |");
        for byte in chunk {
            let c = *byte as char;
            if c.is_ascii_graphic() || c == ' ' {
                print!("{}", c);
            } else {
                print!(".");
            }
        }
        println!("|");
    }
}
