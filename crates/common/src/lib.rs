pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_serializes_as_object() {
        let m = types::Message::new("Worker approved successfully");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["message"], "Worker approved successfully");
    }
}
