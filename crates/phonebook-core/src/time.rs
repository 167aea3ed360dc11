use chrono::Utc;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::{now_millis, now_utc};

    #[test]
    fn millis_and_seconds_agree() {
        let seconds = now_utc();
        let millis = now_millis();
        assert!(millis / 1000 >= seconds);
        assert!(millis / 1000 - seconds <= 1);
    }
}
