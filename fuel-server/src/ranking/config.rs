//! Query defaults and the fuel-label policy.

/// Configuration parameters for cheapest-fuel queries.
///
/// The accepted fuel labels are an exact-match set compared
/// case-insensitively. Synonym or fuzzy matching is deliberately not
/// attempted; extending the set is a configuration change.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Accepted fuel-type labels.
    pub fuels: Vec<String>,

    /// Fuel assumed when the query does not name one.
    pub default_fuel: String,

    /// Search radius when the query does not give one (km).
    pub default_radius_km: f64,

    /// Result limit when the query does not give one.
    pub default_limit: usize,

    /// Hard ceiling on the result limit.
    pub max_limit: usize,
}

impl RankingConfig {
    /// Whether a label is in the accepted set (case-insensitive).
    pub fn is_known_fuel(&self, label: &str) -> bool {
        self.fuels.iter().any(|f| f.eq_ignore_ascii_case(label))
    }

    /// Clamp a requested limit to [1, max_limit].
    pub fn clamp_limit(&self, limit: usize) -> usize {
        limit.clamp(1, self.max_limit)
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            fuels: vec![
                "E10".to_string(),
                "E5".to_string(),
                "B7".to_string(),
                "SDV".to_string(),
            ],
            default_fuel: "E10".to_string(),
            default_radius_km: 10.0,
            default_limit: 10,
            max_limit: 100,
        }
    }
}
