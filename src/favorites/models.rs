use serde::{Deserialize, Serialize};

/// A saved city. Identity is the (lowercased name, country) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteCity {
    pub name: String,
    pub country: String,
    /// Unix millis at the time the favorite was added
    pub added_at: i64,
}

impl FavoriteCity {
    /// Case-insensitive on name, exact on country
    pub fn matches(&self, name: &str, country: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.country == country
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_name_case_but_not_country() {
        let favorite = FavoriteCity {
            name: "London".to_string(),
            country: "GB".to_string(),
            added_at: 0,
        };
        assert!(favorite.matches("london", "GB"));
        assert!(favorite.matches("LONDON", "GB"));
        assert!(!favorite.matches("London", "CA"));
    }
}
