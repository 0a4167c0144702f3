//! Brute-force layout search over damage record payloads.
//!
//! The meter already knows two fields of a record it failed to parse: the
//! target and actor IDs it logged next to the payload. This module
//! enumerates every layout hypothesis under which the record decodes as
//!
//! ```text
//! varint target | gap bytes | varint actor | varint unknown | u32le skill | varint damage
//! ```
//!
//! with the two varints reproducing the known values exactly. Hypotheses
//! are tried at every start offset and every gap width up to a bound, and
//! every fully-consistent chain is reported; judging which candidate is the
//! real layout is left to the reader.

use serde::Serialize;

use crate::varint::{self, VarInt};

/// Divisor between the raw skill field and the skill codes in the meter's
/// tables. Observed scaling convention across captured payloads.
const SKILL_CODE_DIVISOR: u32 = 100;

/// One fully-consistent layout hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Offset of the target varint.
    pub start: usize,
    /// Byte length of the target varint.
    pub target_len: usize,
    /// Unexplained padding bytes between the target and actor fields.
    pub gap: usize,
    /// Offset of the actor varint.
    pub actor_offset: usize,
    /// Byte length of the actor varint.
    pub actor_len: usize,
    /// Value of the varint between the actor and skill fields.
    pub unknown: u64,
    /// Fixed-width field following the unknown varint.
    pub skill_raw: u32,
    /// `skill_raw` scaled down to the meter's skill-code convention.
    pub skill_code: u32,
    /// Value of the trailing damage varint.
    pub damage: u64,
    /// Cursor just past the damage varint.
    pub end: usize,
}

/// Search a payload for layouts consistent with the known field values.
///
/// Exhaustive over every start offset and every gap width in
/// `0..=max_gap`; a failed decode or a value mismatch abandons only the
/// current hypothesis. Candidates come back ordered by ascending start
/// offset, then ascending gap, and the search never stops at the first
/// match - a payload can legitimately yield zero, one, or many.
pub fn search(data: &[u8], target: u64, actor: u64, max_gap: usize) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for start in 0..data.len() {
        let Some(target_info) = varint::decode(data, start) else {
            continue;
        };
        if target_info.value != target {
            continue;
        }
        let after_target = start + target_info.length;

        for gap in 0..=max_gap {
            let actor_offset = after_target + gap;
            let Some(actor_info) = varint::decode(data, actor_offset) else {
                continue;
            };
            if actor_info.value != actor {
                continue;
            }

            let mut cursor = actor_offset + actor_info.length;
            let Some(unknown_info) = varint::decode(data, cursor) else {
                continue;
            };
            cursor += unknown_info.length;

            let Some(skill_raw) = varint::decode_fixed_u32_le(data, cursor) else {
                continue;
            };
            cursor += 4;

            let Some(damage_info) = varint::decode(data, cursor) else {
                continue;
            };
            cursor += damage_info.length;

            candidates.push(Candidate {
                start,
                target_len: target_info.length,
                gap,
                actor_offset,
                actor_len: actor_info.length,
                unknown: unknown_info.value,
                skill_raw,
                skill_code: skill_raw / SKILL_CODE_DIVISOR,
                damage: damage_info.value,
                end: cursor,
            });
        }
    }

    candidates
}

/// A position where a varint decodes to a sought value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueHit {
    pub offset: usize,
    pub length: usize,
}

/// Scan every offset for a varint equal to `needle`, ignoring structure.
///
/// Fallback diagnostic for payloads where [`search`] comes up empty: shows
/// where the known values sit so the surrounding layout can be read off by
/// eye. Hits come back in ascending offset order.
pub fn scan_value(data: &[u8], needle: u64) -> Vec<ValueHit> {
    let mut hits = Vec::new();
    for offset in 0..data.len() {
        if let Some(info) = varint::decode(data, offset) {
            if info.value == needle {
                hits.push(ValueHit {
                    offset,
                    length: info.length,
                });
            }
        }
    }
    hits
}

/// Decode up to `limit` consecutive varints from the start of the payload.
///
/// Stops early on the first failed decode or when the payload runs out.
/// Diagnostic only; no matching against known values.
pub fn summarize_head(data: &[u8], limit: usize) -> Vec<VarInt> {
    let mut head = Vec::new();
    let mut cursor = 0;

    for _ in 0..limit {
        let Some(info) = varint::decode(data, cursor) else {
            break;
        };
        head.push(info);
        cursor += info.length;
        if cursor >= data.len() {
            break;
        }
    }
    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varint::encode;

    /// Build a full chain: target varint, gap filler, actor varint,
    /// unknown varint, skill u32le, damage varint.
    fn chain(target: u64, gap: &[u8], actor: u64, unknown: u64, skill: u32, damage: u64) -> Vec<u8> {
        let mut bytes = encode(target);
        bytes.extend_from_slice(gap);
        bytes.extend(encode(actor));
        bytes.extend(encode(unknown));
        bytes.extend_from_slice(&skill.to_le_bytes());
        bytes.extend(encode(damage));
        bytes
    }

    #[test]
    fn test_concrete_scenario() {
        // target 300 (AC 02), actor 5, unknown 0, skill 30000, damage 100.
        let data = [0xAC, 0x02, 0x05, 0x00, 0x30, 0x75, 0x00, 0x00, 0x64];
        let candidates = search(&data, 300, 5, 1);

        assert_eq!(
            candidates,
            vec![Candidate {
                start: 0,
                target_len: 2,
                gap: 0,
                actor_offset: 2,
                actor_len: 1,
                unknown: 0,
                skill_raw: 30_000,
                skill_code: 300,
                damage: 100,
                end: 9,
            }]
        );
    }

    #[test]
    fn test_single_chain_with_offset_and_gap() {
        // Two lead-in bytes that decode to 1, then a chain with one
        // padding byte between target and actor.
        let mut data = vec![0x01, 0x01];
        data.extend(chain(300, &[0xAA], 7, 2, 4_500, 99));
        let candidates = search(&data, 300, 7, 3);

        assert_eq!(candidates.len(), 1);
        let found = candidates[0];
        assert_eq!(found.start, 2);
        assert_eq!(found.gap, 1);
        assert_eq!(found.actor_offset, 5);
        assert_eq!(found.skill_raw, 4_500);
        assert_eq!(found.skill_code, 45);
        assert_eq!(found.damage, 99);
        assert_eq!(found.end, data.len());
    }

    #[test]
    fn test_two_chains_ordered_by_start() {
        let first = chain(300, &[], 7, 1, 10_000, 44);
        let second = chain(300, &[], 7, 1, 10_000, 44);
        let mut data = first.clone();
        data.extend_from_slice(&second);

        let candidates = search(&data, 300, 7, 3);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].start, 0);
        assert_eq!(candidates[1].start, first.len());
        assert!(candidates[0].start < candidates[1].start);
    }

    #[test]
    fn test_gap_order_within_same_start() {
        // Actor value repeated so both gap=0 and gap=1 hypotheses hold.
        let data = [
            0xAC, 0x02, // target 300
            0x05, 0x05, 0x05, // actor / actor / unknown, depending on gap
            0x01, 0x00, 0x00, 0x00, // skill for the gap=1 chain
            0x02, 0x03, 0x00, 0x00, 0x00, 0x04,
        ];
        let candidates = search(&data, 300, 5, 1);

        assert_eq!(candidates.len(), 2);
        assert_eq!((candidates[0].start, candidates[0].gap), (0, 0));
        assert_eq!((candidates[1].start, candidates[1].gap), (0, 1));
    }

    #[test]
    fn test_no_candidates_for_mismatched_values() {
        let data = chain(300, &[], 7, 1, 10_000, 44);
        assert!(search(&data, 301, 7, 3).is_empty());
        assert!(search(&data, 300, 8, 3).is_empty());
    }

    #[test]
    fn test_empty_payload() {
        assert!(search(&[], 300, 7, 3).is_empty());
        assert!(scan_value(&[], 300).is_empty());
        assert!(summarize_head(&[], 12).is_empty());
    }

    #[test]
    fn test_fallback_scan_finds_lone_target() {
        // Seven zero bytes, then a bare target varint and nothing after
        // it: no chain can complete, but the scan pins the value down.
        let mut data = vec![0x00; 7];
        data.extend(encode(300));

        let candidates = search(&data, 300, 5, 3);
        assert!(candidates.is_empty());

        let hits = scan_value(&data, 300);
        assert_eq!(hits, vec![ValueHit { offset: 7, length: 2 }]);
    }

    #[test]
    fn test_scan_value_multiple_hits() {
        let mut data = encode(44);
        data.extend(encode(44));
        data.push(0x00);

        let hits = scan_value(&data, 44);
        assert_eq!(
            hits,
            vec![
                ValueHit { offset: 0, length: 1 },
                ValueHit { offset: 1, length: 1 }
            ]
        );
    }

    #[test]
    fn test_summarize_head() {
        let data = [0xAC, 0x02, 0x05, 0x64];
        let head = summarize_head(&data, 12);
        assert_eq!(
            head,
            vec![
                VarInt { value: 300, length: 2 },
                VarInt { value: 5, length: 1 },
                VarInt { value: 100, length: 1 },
            ]
        );

        // Limit respected.
        assert_eq!(summarize_head(&data, 2).len(), 2);

        // Stops at the first undecodable position.
        let truncated = [0x05, 0x80];
        assert_eq!(summarize_head(&truncated, 12).len(), 1);
    }
}
