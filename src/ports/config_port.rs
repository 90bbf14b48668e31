//! Configuration access port trait.

/// Sectioned key/value lookup.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Falls back to `default` when the key is missing or not a number.
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
}
