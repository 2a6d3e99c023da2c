use std::fmt::Display;
use std::time::Duration;

/// Elapsed position within the source media, as reported by the engine's
/// progress output. Displayed as `HH:MM:SS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timecode {
    elapsed: Duration,
}

impl Timecode {
    pub fn from_duration(elapsed: Duration) -> Self {
        Timecode { elapsed }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Parses an `HH:MM:SS[.fraction]` marker. ffmpeg writes negative
    /// placeholders like `-577014:32:22.77` before the first frame is
    /// timestamped; those are rejected along with anything malformed.
    pub fn from_str(s: &str) -> Option<Timecode> {
        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        let fields: Vec<&str> = whole.split(':').collect();
        if fields.len() != 3 {
            return None;
        }
        let hours: u64 = fields[0].parse().ok()?;
        let minutes: u64 = fields[1].parse().ok()?;
        let seconds: u64 = fields[2].parse().ok()?;
        if minutes > 59 || seconds > 59 {
            return None;
        }
        // an hour field large enough to overflow is engine noise, not progress
        let total = hours
            .checked_mul(3600)?
            .checked_add(minutes * 60 + seconds)?;
        let mut elapsed = Duration::from_secs(total);
        if !fraction.is_empty() {
            let digits: String = fraction.chars().take(6).collect();
            if !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let micros: u64 = digits.parse().ok()?;
            let scale = 10u64.pow(6 - digits.len() as u32);
            elapsed += Duration::from_micros(micros * scale);
        }
        Some(Timecode { elapsed })
    }
}

impl Display for Timecode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = self.elapsed.as_secs();
        write!(f, "{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Timecode::from_str("00:00:01").unwrap().elapsed(), Duration::from_secs(1));
        assert_eq!(Timecode::from_str("01:02:03").unwrap().elapsed(), Duration::from_secs(3723));
        assert_eq!(Timecode::from_str("00:00:01.500000").unwrap().elapsed(), Duration::from_millis(1500));
        assert_eq!(Timecode::from_str("00:00:02.5").unwrap().elapsed(), Duration::from_millis(2500));
    }

    #[test]
    fn test_from_str_rejects_malformed() {
        assert_eq!(Timecode::from_str(""), None);
        assert_eq!(Timecode::from_str("N/A"), None);
        assert_eq!(Timecode::from_str("00:01"), None);
        assert_eq!(Timecode::from_str("00:61:00"), None);
        assert_eq!(Timecode::from_str("-577014:32:22.77"), None);
    }

    #[test]
    fn test_from_str_rejects_overflowing_hours() {
        assert_eq!(Timecode::from_str("9999999999999999999:00:00"), None);
        assert_eq!(Timecode::from_str("18446744073709551615:59:59"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Timecode::from_str("00:00:09.970000").unwrap()), "00:00:09");
        assert_eq!(format!("{}", Timecode::from_duration(Duration::from_secs(3661))), "01:01:01");
    }

    #[test]
    fn test_ordering() {
        assert!(Timecode::from_str("00:00:01").unwrap() < Timecode::from_str("00:00:02").unwrap());
        assert!(Timecode::from_duration(Duration::ZERO) <= Timecode::from_str("00:00:00").unwrap());
    }
}
