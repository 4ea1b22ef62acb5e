//! 活动时间模块
//!
//! 后端以 ISO 8601 字符串传输时间，本模块负责：
//! - `EventDate`: 解析后的 UTC 时间，可排序、可格式化展示
//! - `local_input_to_iso`: 把 `datetime-local` 表单值转换为带毫秒的 UTC ISO 字符串

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::fmt;

// =========================================================
// EventDate
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventDate(DateTime<Utc>);

impl EventDate {
    /// 宽松解析：RFC 3339，缺少时区的 `YYYY-MM-DDTHH:MM[:SS]`（按 UTC），以及纯日期
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(Self(naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    #[inline]
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// 按给定时区格式化，例如 `March 5, 2025 at 7:30 PM`
    pub fn format_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.0
            .with_timezone(tz)
            .format("%B %-d, %Y at %-I:%M %p")
            .to_string()
    }
}

impl From<DateTime<Utc>> for EventDate {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_in(&Local))
    }
}

/// 展示用：解析失败时原样返回，空值返回 `None`
pub fn display_date(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        EventDate::parse(raw)
            .map(|d| d.to_string())
            .unwrap_or_else(|| raw.to_string()),
    )
}

// =========================================================
// datetime-local 转换
// =========================================================

/// 把 `<input type="datetime-local">` 的值按 `tz` 解释后转为 UTC ISO 字符串
///
/// 夏令时重叠区间取较早的时刻；不存在的本地时间返回 `None`。
pub fn local_input_to_iso<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<String> {
    let raw = raw.trim();
    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;

    let local = tz.from_local_datetime(&naive).earliest()?;
    Some(
        local
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_parse_variants() {
        let a = EventDate::parse("2025-03-05T19:30:00.000Z").unwrap();
        let b = EventDate::parse("2025-03-05T19:30").unwrap();
        let c = EventDate::parse("2025-03-05T21:30:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(EventDate::parse("2025-03-05").unwrap() < a);
        assert!(EventDate::parse("not a date").is_none());
        assert!(EventDate::parse("   ").is_none());
    }

    #[test]
    fn test_format_in_fixed_zone() {
        let date = EventDate::parse("2025-03-05T19:30:00Z").unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(date.format_in(&utc), "March 5, 2025 at 7:30 PM");
    }

    #[test]
    fn test_display_date_falls_back_to_raw() {
        assert_eq!(display_date(None), None);
        assert_eq!(display_date(Some("")), None);
        assert_eq!(display_date(Some("soon")).as_deref(), Some("soon"));
    }

    #[test]
    fn test_local_input_to_iso() {
        let paris = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            local_input_to_iso("2025-03-05T19:30", &paris).as_deref(),
            Some("2025-03-05T18:30:00.000Z")
        );
        assert_eq!(
            local_input_to_iso("2025-03-05T19:30:15", &Utc).as_deref(),
            Some("2025-03-05T19:30:15.000Z")
        );
        assert_eq!(local_input_to_iso("", &Utc), None);
        assert_eq!(local_input_to_iso("tomorrow", &Utc), None);
    }
}
