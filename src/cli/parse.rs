use weekly_review_core::period::PeriodPreset;

/// Parse a period preset from its snake_case name
pub fn parse_preset(s: &str) -> std::result::Result<PeriodPreset, String> {
    s.parse::<PeriodPreset>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset() {
        assert_eq!(parse_preset("last_7_days"), Ok(PeriodPreset::Last7Days));
        let err = parse_preset("weekly").unwrap_err();
        assert!(err.contains("current_week"));
    }
}
