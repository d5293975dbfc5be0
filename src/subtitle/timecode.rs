use super::SubtitleError;

/// Convert an `H:M:S` timestamp into whole milliseconds.
///
/// The seconds field may carry a fractional part with either `.` or `,` as
/// the decimal separator. Values are durations, not wall-clock times, so
/// there is no rollover handling and no upper bound on any field.
pub fn parse_timecode(raw: &str) -> Result<u64, SubtitleError> {
    let normalized = raw.trim().replace(',', ".");
    let mut fields = normalized.split(':');
    let (Some(h), Some(m), Some(s), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(SubtitleError::MalformedTimecode(raw.to_string()));
    };

    let parse_field = |field: &str| {
        field
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| SubtitleError::MalformedTimecode(raw.to_string()))
    };
    let (h, m, s) = (parse_field(h)?, parse_field(m)?, parse_field(s)?);

    Ok((h * 3_600_000.0 + m * 60_000.0 + s * 1_000.0).round() as u64)
}
