//! Ranked-candidate CSV table.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use evs_score::ScoredCandidate;

use crate::error::OutputResult;

/// Writes the scored candidate table, best first.
pub struct RankedTableWriter {
    writer: Writer<File>,
    finished: bool,
}

impl RankedTableWriter {
    /// Open (or create) the table at `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([
            "rank",
            "latitude",
            "longitude",
            "name",
            "category",
            "dist_to_route_km",
            "dist_from_origin_km",
            "dist_to_competitor_km",
            "window_score",
            "competitor_score",
            "traffic_score",
            "potential_score",
        ])?;
        Ok(Self { writer, finished: false })
    }

    /// Write the ranked candidates in the order given.
    pub fn write_candidates(&mut self, candidates: &[ScoredCandidate]) -> OutputResult<()> {
        for (rank, c) in candidates.iter().enumerate() {
            self.writer.write_record(&[
                (rank + 1).to_string(),
                format!("{:.6}", c.poi.pos.lat),
                format!("{:.6}", c.poi.pos.lon),
                c.poi.name.clone(),
                c.poi.category.label().to_owned(),
                format!("{:.2}", c.dist_to_route_km),
                format!("{:.2}", c.dist_from_origin_km),
                competitor_km_cell(c.dist_to_competitor_km),
                format!("{:.4}", c.window_score),
                format!("{:.4}", c.competitor_score),
                format!("{:.4}", c.traffic_score),
                format!("{:.4}", c.potential),
            ])?;
        }
        Ok(())
    }

    /// Flush and close the file.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

/// The +∞ "no competitor anywhere" sentinel prints as an empty cell, not
/// as "inf", so the table loads cleanly in spreadsheet tools.
fn competitor_km_cell(km: f64) -> String {
    if km.is_finite() {
        format!("{km:.2}")
    } else {
        String::new()
    }
}
