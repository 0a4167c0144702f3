//! # a2probe
//!
//! Layout probing for Aion2 damage record payloads.
//!
//! The DPS meter dumps the raw bytes of any damage record it could not
//! fully parse as a `payload=<hex>` debug line, together with the target,
//! actor, and damage values it did decode. This library searches those
//! payloads for field layouts consistent with the known values:
//!
//! - decode LEB128-style varints at arbitrary offsets
//! - enumerate every start-offset / gap-width hypothesis under which a
//!   record reads as target, actor, unknown, fixed skill field, damage
//! - fall back to a raw value scan when no full layout fits
//!
//! ## Example
//!
//! ```
//! let payload = a2probe::decode_hex_payload("AC 02 05 00 30 75 00 00 64")?;
//! let candidates = a2probe::search(&payload, 300, 5, 3);
//!
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates[0].skill_code, 300);
//! assert_eq!(candidates[0].damage, 100);
//! # Ok::<(), a2probe::PayloadError>(())
//! ```

pub mod log;
pub mod probe;
pub mod varint;

// Re-export commonly used items
#[doc(inline)]
pub use log::{decode_hex_payload, extract_records, parse_line, PayloadError, PayloadRecord};
#[doc(inline)]
pub use probe::{scan_value, search, summarize_head, Candidate, ValueHit};
#[doc(inline)]
pub use varint::{decode, decode_fixed_u32_le, encode, VarInt};
