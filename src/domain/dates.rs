use chrono::{DateTime, NaiveDateTime};

/// Best-effort parse of a scoreboard date line, e.g.
/// `"2024-11-03 21:14:09 GMT"`. Anything unparsable falls back to the
/// epoch so it sorts as the oldest possible value.
pub fn parse_scoreboard_date(raw: &str) -> NaiveDateTime {
    try_parse_scoreboard_date(raw).unwrap_or_else(epoch)
}

fn try_parse_scoreboard_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(" GMT").unwrap_or(trimmed);

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }

    None
}

fn epoch() -> NaiveDateTime {
    DateTime::UNIX_EPOCH.naive_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gmt_suffixed_date() {
        let dt = parse_scoreboard_date("2024-11-03 21:14:09 GMT");
        assert_eq!(dt.to_string(), "2024-11-03 21:14:09");
    }

    #[test]
    fn parses_date_without_seconds() {
        let dt = parse_scoreboard_date("2024-11-03 21:14");
        assert_eq!(dt.to_string(), "2024-11-03 21:14:00");
    }

    #[test]
    fn garbage_falls_back_to_epoch() {
        assert_eq!(parse_scoreboard_date("soon(tm)"), epoch());
        assert_eq!(parse_scoreboard_date(""), epoch());
    }
}
