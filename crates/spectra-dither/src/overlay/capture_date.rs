//! Capture timestamp resolution for the date stamp.

use chrono::{NaiveDate, NaiveDateTime};

/// Capture date of a photo, resolved once from its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureDate {
    /// A timestamp in one of the recognized formats.
    Parsed(NaiveDate),
    /// A timestamp string that could not be parsed; shown verbatim.
    Raw(String),
    /// No timestamp in the metadata; no stamp is drawn.
    #[default]
    Absent,
}

impl CaptureDate {
    /// Resolve from candidate fields in priority order.
    ///
    /// The first candidate that is present and non-blank wins, whether or not
    /// it parses.
    ///
    /// ```
    /// use spectra_dither::CaptureDate;
    ///
    /// let date = CaptureDate::from_candidates([None, Some("2023:07:14 18:02:11")]);
    /// assert_eq!(date.label().as_deref(), Some("2023-07-14"));
    /// ```
    pub fn from_candidates<'a, I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        candidates
            .into_iter()
            .flatten()
            .map(clean)
            .find(|s| !s.is_empty())
            .map(Self::parse)
            .unwrap_or(CaptureDate::Absent)
    }

    /// Parse a single timestamp string.
    pub fn parse(raw: &str) -> Self {
        let raw = clean(raw);
        if raw.is_empty() {
            return CaptureDate::Absent;
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S") {
            return CaptureDate::Parsed(dt.date());
        }
        for format in ["%Y.%m.%d", "%Y-%m-%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return CaptureDate::Parsed(date);
            }
        }
        CaptureDate::Raw(raw.to_string())
    }

    /// Text to draw, or `None` when there is nothing to show.
    pub fn label(&self) -> Option<String> {
        match self {
            CaptureDate::Parsed(date) => Some(date.format("%Y-%m-%d").to_string()),
            CaptureDate::Raw(raw) => Some(raw.clone()),
            CaptureDate::Absent => None,
        }
    }
}

// EXIF ASCII values are often NUL-padded.
fn clean(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}
