//! Transcript models shared by the session layer and its prompts.
//!
//! Messages here are what the user sees. What goes over the wire to the
//! model lives in `providers::types`.
pub mod message;

use uuid::Uuid;

/// A unique id such as `msg_9f1c...`, used for messages and log spans
pub fn object_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        let id = object_id("turn");
        let (prefix, hex) = id.split_once('_').unwrap();
        assert_eq!(prefix, "turn");
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(object_id("turn"), id);
    }
}
