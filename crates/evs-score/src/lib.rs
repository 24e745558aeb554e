//! `evs-score` — the candidate-ranking heuristic.
//!
//! Candidates within reach of the route are scored on three axes and
//! combined into one potential score:
//!
//! | Axis       | Meaning                                            | Module        |
//! |------------|----------------------------------------------------|---------------|
//! | window     | fit inside the vehicle's 60–90 % recharge window   | [`window`]    |
//! | competitor | distance to the nearest existing charging station  | [`scorer`]    |
//! | traffic    | corridor mean daily traffic vs. a reference volume | [`scorer`]    |
//!
//! Proximity filtering uses an R-tree over sampled route waypoints
//! ([`route_index`]), so the nearest-route-point query is logarithmic even
//! for long corridors.

pub mod error;
pub mod route_index;
pub mod scorer;
pub mod window;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ScoreError, ScoreResult};
pub use route_index::RouteIndex;
pub use scorer::{rank_candidates, ScoreParams, ScoreWeights, ScoredCandidate};
pub use window::window_score;
