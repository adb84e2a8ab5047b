use chrono::{Local, NaiveDateTime};

/// Current local time in the format stored in `dataCreazione`/`ultimaModifica`.
pub fn timestamp_now() -> String {
    format_timestamp(&Local::now().naive_local())
}

/// `d-m-YYYY HH:MM:SS`, day and month without zero padding.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%-d-%-m-%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_like_stored_records() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 7, 3)
            .unwrap();
        assert_eq!(format_timestamp(&at), "5-1-2024 09:07:03");
    }

    #[test]
    fn now_is_not_empty() {
        assert!(!timestamp_now().is_empty());
    }
}
