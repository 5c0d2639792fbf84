//! WMO condition code descriptions
//!
//! The table only covers the codes the service reports on. Anything else
//! is described as [`UNKNOWN_CONDITION`].

/// Description used for codes missing from [`CONDITION_TABLE`]
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Code to description lookup, kept sorted by code
pub const CONDITION_TABLE: &[(i16, &str)] = &[
    (0, "Clear Sky"),
    (1, "Cloudy"),
    (2, "Cloudy"),
    (3, "Cloudy"),
    (61, "Rain"),
    (63, "Rain"),
    (65, "Rain"),
];

/// Human-readable description for a condition code
pub fn describe(code: i16) -> &'static str {
    CONDITION_TABLE
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| CONDITION_TABLE[idx].1)
        .unwrap_or(UNKNOWN_CONDITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(CONDITION_TABLE.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn clear_sky() {
        assert_eq!(describe(0), "Clear Sky");
    }

    #[test]
    fn cloudy() {
        for code in [1, 2, 3] {
            assert_eq!(describe(code), "Cloudy");
        }
    }

    #[test]
    fn rain() {
        for code in [61, 63, 65] {
            assert_eq!(describe(code), "Rain");
        }
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        for code in [4, 45, 62, 80, 95, 99, -1, i16::MIN, i16::MAX] {
            assert_eq!(describe(code), UNKNOWN_CONDITION, "code {code}");
        }
    }

    #[test]
    fn total_over_i16() {
        let known = (i16::MIN..=i16::MAX)
            .filter(|c| describe(*c) != UNKNOWN_CONDITION)
            .count();
        assert_eq!(known, CONDITION_TABLE.len());
    }
}
