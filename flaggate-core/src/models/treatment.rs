//! Treatment vocabulary shared by every client

/// Treatment label for an enabled flag
pub const ON: &str = "on";
/// Treatment label for a disabled flag
pub const OFF: &str = "off";
/// Returned when a flag is unknown or no rule data is available yet
pub const CONTROL: &str = "control";

/// Whether a treatment label means the flag is enabled
pub fn is_on(treatment: &str) -> bool {
    treatment == ON
}

/// Collapse any treatment label to `on` or `off`
pub fn normalize(treatment: &str) -> &'static str {
    if is_on(treatment) {
        ON
    } else {
        OFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("on"), ON);
        assert_eq!(normalize("off"), OFF);
        assert_eq!(normalize(CONTROL), OFF);
        assert_eq!(normalize("ON"), OFF);
        assert_eq!(normalize("v2"), OFF);
    }
}
