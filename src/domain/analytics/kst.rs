//! KST(UTC+9) 시각 변환
//!
//! 기록의 `created_at`은 UTC로 저장되지만, 사용자에게 노출되는 날짜와
//! 시간대 분포는 한국 시간 기준으로 계산한다.

use chrono::{Duration, NaiveDateTime, Timelike};

/// 한국 표준시 오프셋 (시간)
pub const KST_OFFSET_HOURS: i64 = 9;

/// UTC 시각을 KST 시각으로 변환
pub fn to_kst(utc: NaiveDateTime) -> NaiveDateTime {
    utc + Duration::hours(KST_OFFSET_HOURS)
}

/// KST 시각을 UTC 시각으로 변환
pub fn to_utc(kst: NaiveDateTime) -> NaiveDateTime {
    kst - Duration::hours(KST_OFFSET_HOURS)
}

/// KST 기준 날짜 문자열 (YYYY-MM-DD)
pub fn kst_date(utc: NaiveDateTime) -> String {
    to_kst(utc).format("%Y-%m-%d").to_string()
}

/// KST 기준 시간대 (0..=23)
pub fn kst_hour(utc: NaiveDateTime) -> u32 {
    to_kst(utc).hour()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn kst_hour_should_shift_nine_hours_forward() {
        // UTC 15시 = KST 0시
        assert_eq!(kst_hour(utc(2025, 3, 1, 15)), 0);
        // UTC 0시 = KST 9시
        assert_eq!(kst_hour(utc(2025, 3, 1, 0)), 9);
    }

    #[test]
    fn kst_date_should_roll_over_at_utc_fifteen() {
        assert_eq!(kst_date(utc(2025, 3, 1, 14)), "2025-03-01");
        assert_eq!(kst_date(utc(2025, 3, 1, 15)), "2025-03-02");
    }

    #[test]
    fn to_kst_and_to_utc_should_be_inverse() {
        let t = utc(2025, 12, 31, 23);
        assert_eq!(to_utc(to_kst(t)), t);
    }
}
