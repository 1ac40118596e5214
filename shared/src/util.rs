/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Display timestamp in the `dd/MM/yyyy HH:mm` format the order and
/// ledger documents carry
pub fn now_datetime() -> String {
    chrono::Local::now().format("%d/%m/%Y %H:%M").to_string()
}

/// Fresh opaque id for cart items, orders and ledger entries
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_format_shape() {
        let s = now_datetime();
        // dd/MM/yyyy HH:mm
        assert_eq!(s.len(), 16);
        assert_eq!(&s[2..3], "/");
        assert_eq!(&s[5..6], "/");
        assert_eq!(&s[10..11], " ");
        assert_eq!(&s[13..14], ":");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
