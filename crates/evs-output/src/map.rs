//! Interactive map artifact.
//!
//! Emits a single self-contained HTML file: Leaflet from its public CDN,
//! the analysis data embedded as a JSON literal, and a small inline script
//! that draws the route polyline, the autonomy circles at both endpoints,
//! the top-ranked candidate markers, and the competitor stations.  No
//! server, no build step — double-click and look.

use std::path::Path;

use serde_json::json;

use evs_collect::Station;
use evs_core::{GeoPoint, VehicleProfile};
use evs_score::ScoredCandidate;

use crate::error::OutputResult;

/// Everything the map shows.
pub struct MapSpec<'a> {
    pub title: &'a str,
    pub route: &'a [GeoPoint],
    pub candidates: &'a [ScoredCandidate],
    pub stations: &'a [Station],
    pub vehicle: &'a VehicleProfile,
    /// How many top-ranked candidates to mark.
    pub top_n: usize,
}

/// Render `spec` to a standalone HTML file.
pub fn write_map_html(path: &Path, spec: &MapSpec<'_>) -> OutputResult<()> {
    std::fs::write(path, render(spec)?)?;
    Ok(())
}

fn render(spec: &MapSpec<'_>) -> OutputResult<String> {
    let center = map_center(spec.route);

    let route: Vec<[f64; 2]> = spec.route.iter().map(|p| [p.lat, p.lon]).collect();

    let candidates: Vec<serde_json::Value> = spec
        .candidates
        .iter()
        .take(spec.top_n)
        .map(|c| {
            json!({
                "lat": c.poi.pos.lat,
                "lon": c.poi.pos.lon,
                "name": c.poi.name,
                "category": c.poi.category.label(),
                "potential": c.potential,
            })
        })
        .collect();

    let stations: Vec<serde_json::Value> = spec
        .stations
        .iter()
        .map(|s| json!({ "lat": s.pos.lat, "lon": s.pos.lon, "name": s.name }))
        .collect();

    // Circles at both route endpoints, radius = full autonomy.
    let endpoints: Vec<[f64; 2]> = match (spec.route.first(), spec.route.last()) {
        (Some(a), Some(b)) => vec![[a.lat, a.lon], [b.lat, b.lon]],
        _ => vec![],
    };

    let data = json!({
        "title": spec.title,
        "center": [center.lat, center.lon],
        "route": route,
        "candidates": candidates,
        "stations": stations,
        "endpoints": endpoints,
        "autonomyMeters": spec.vehicle.autonomy_km * 1_000.0,
        "vehicleColor": spec.vehicle.color,
    });

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const data = {data};
const map = L.map('map').setView(data.center, 7);
L.tileLayer('https://{{s}}.basemaps.cartocdn.com/light_all/{{z}}/{{x}}/{{y}}.png', {{
  attribution: '&copy; OpenStreetMap contributors &copy; CARTO'
}}).addTo(map);
L.polyline(data.route, {{ color: 'gray', weight: 5 }}).addTo(map);
for (const ep of data.endpoints) {{
  L.circle(ep, {{ radius: data.autonomyMeters, color: data.vehicleColor,
                  fill: true, fillOpacity: 0.15 }}).addTo(map);
}}
for (const c of data.candidates) {{
  L.marker([c.lat, c.lon])
    .bindPopup('<b>' + c.name + '</b><br>' + c.category +
               '<br>Score: ' + c.potential.toFixed(2))
    .addTo(map);
}}
for (const s of data.stations) {{
  L.circleMarker([s.lat, s.lon], {{ radius: 5, color: 'red' }})
    .bindPopup('<b>' + s.name + '</b><br>existing station')
    .addTo(map);
}}
</script>
</body>
</html>
"#,
        title = html_escape(spec.title),
        data = serde_json::to_string(&data)?,
    ))
}

/// Midpoint of the route's bounding coordinates; falls back to (0, 0) for
/// an empty route (the writer never sees one in practice).
fn map_center(route: &[GeoPoint]) -> GeoPoint {
    match (route.first(), route.last()) {
        (Some(a), Some(b)) => a.midpoint(*b),
        _ => GeoPoint::new(0.0, 0.0),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
pub(crate) fn render_for_test(spec: &MapSpec<'_>) -> OutputResult<String> {
    render(spec)
}
