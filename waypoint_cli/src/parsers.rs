use jiff::SpanRelativeTo;

/// Accepts `2s`, `1500ms`, ISO 8601 (`PT2S`) or a bare number of milliseconds.
pub fn parse_time_budget(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(millis) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_millis(millis));
    }

    Err(format!("invalid time budget '{input}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_budget() {
        assert_eq!(
            parse_time_budget("2s"),
            Ok(jiff::SignedDuration::from_secs(2))
        );
        assert_eq!(
            parse_time_budget("PT1M"),
            Ok(jiff::SignedDuration::from_mins(1))
        );
        assert_eq!(
            parse_time_budget("1500"),
            Ok(jiff::SignedDuration::from_millis(1500))
        );
        assert!(parse_time_budget("soon").is_err());
    }
}
