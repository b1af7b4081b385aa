use std::env;
use std::str::FromStr;
use tracing::warn;

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// Empty segments are dropped, so an unset variable yields an empty vector.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parses an environment variable, returning `default` when it is unset or invalid.
///
/// An invalid value is logged rather than treated as fatal.
pub fn get_env_var_or<T: FromStr>(var: &str, default: T) -> T {
    match env::var(var) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring invalid value {:?} for {}", raw, var);
                default
            }
        },
        Err(_) => default,
    }
}

/// Optional string variable; blank counts as unset.
pub fn get_env_var_opt(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
