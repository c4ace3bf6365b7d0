use std::sync::Arc;

pub type AirportId = Arc<str>;

/// Trims and upper-cases a location code so `tao ` and `TAO` meet at the same vertex.
pub fn normalize_code(code: &str) -> AirportId {
    Arc::from(code.trim().to_ascii_uppercase())
}
