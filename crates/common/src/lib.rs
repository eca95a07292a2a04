pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_response_from_str() {
        let m = types::MessageResponse::new("Saved successfully");
        assert_eq!(m.message, "Saved successfully");
    }
}
