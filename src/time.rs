use chrono::prelude::{DateTime, Utc};

pub fn iso8601(st: std::time::SystemTime) -> String {
    let dt: DateTime<Utc> = st.into();
    dt.format("%+").to_string()
}

#[cfg(test)]
mod tests {
    use super::iso8601;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn formats_as_rfc3339() {
        let ts = UNIX_EPOCH + Duration::from_secs(86_400);
        assert_eq!(iso8601(ts), "1970-01-02T00:00:00+00:00");
    }
}
