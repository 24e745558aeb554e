//! SNV registry CSV loader.
//!
//! # File format
//!
//! Government SNV dumps are semicolon-delimited, Latin-1 encoded, and use
//! the decimal comma.  One row per highway stretch:
//!
//! ```csv
//! id_trecho_snv;sg_uf;vl_br;ds_local_i;ds_local_f;vl_km_inic;vl_km_fina;vmd_crescente;vmd_decrescente
//! 116BPR0010;PR;116;CURITIBA;ENTR BR-277;0,0;12,4;15230;14890
//! 116BPR0030;PR;116;ENTR BR-277;QUATRO BARRAS;12,4;25,1;;
//! ```
//!
//! - `vl_br` is normalized to the zero-padded three-digit form at load time
//!   ("60" → "060"); rows whose code has no numeric part are skipped.
//! - Empty or non-numeric VMD cells load as `None` (the stretch has no
//!   traffic count, not zero traffic — the aggregator decides how to treat
//!   that).
//! - Rows with unparseable kilometre markers are skipped with a warning
//!   rather than failing the whole load; registry dumps routinely contain a
//!   handful of mangled rows.

use std::io::Read;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use evs_core::SegmentId;

use crate::error::{SnvError, SnvResult};
use crate::record::{normalize_highway_code, RoadSegment, SegmentTable};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RegistryRecord {
    id_trecho_snv:   String,
    sg_uf:           String,
    vl_br:           String,
    ds_local_i:      String,
    ds_local_f:      String,
    vl_km_inic:      String,
    vl_km_fina:      String,
    #[serde(default)]
    vmd_crescente:   String,
    #[serde(default)]
    vmd_decrescente: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the registry from a Latin-1, semicolon-delimited CSV file.
pub fn load_registry_csv(path: &Path) -> SnvResult<SegmentTable> {
    let bytes = std::fs::read(path)?;
    let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
    load_registry_reader(decoded.as_bytes())
}

/// Like [`load_registry_csv`] but accepts any UTF-8 `Read` source.
///
/// Useful for testing (pass a byte slice or `std::io::Cursor`).
pub fn load_registry_reader<R: Read>(reader: R) -> SnvResult<SegmentTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut segments: Vec<RoadSegment> = Vec::new();

    for result in csv_reader.deserialize::<RegistryRecord>() {
        let row = result.map_err(|e| SnvError::Parse(e.to_string()))?;

        let Some(highway) = normalize_highway_code(&row.vl_br) else {
            warn!(
                "registry row {}: highway code {:?} has no numeric part, skipping",
                row.id_trecho_snv, row.vl_br
            );
            continue;
        };

        let (Some(km_start), Some(km_end)) =
            (parse_decimal(&row.vl_km_inic), parse_decimal(&row.vl_km_fina))
        else {
            warn!(
                "registry row {}: unparseable km markers {:?}..{:?}, skipping",
                row.id_trecho_snv, row.vl_km_inic, row.vl_km_fina
            );
            continue;
        };

        segments.push(RoadSegment {
            id:             SegmentId(segments.len() as u32),
            snv_id:         row.id_trecho_snv,
            state:          row.sg_uf.to_uppercase(),
            highway,
            start_place:    row.ds_local_i,
            end_place:      row.ds_local_f,
            km_start,
            km_end,
            vmd_increasing: parse_decimal(&row.vmd_crescente),
            vmd_decreasing: parse_decimal(&row.vmd_decrescente),
        });
    }

    Ok(SegmentTable::new(segments))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse a decimal-comma number; empty or malformed cells yield `None`.
fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', ".").parse().ok()
}
