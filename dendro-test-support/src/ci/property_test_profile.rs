//! Property-test run profile parsing for CI and local overrides.
//!
//! Suites call [`ProptestRunProfile::load`] with their own defaults; the
//! environment can then raise or lower case counts, force forking, or cap
//! shrinking without touching the suites themselves.

use std::{env, fmt};

/// Environment variable controlling proptest case counts.
pub const DENDRO_PBT_CASES_ENV_KEY: &str = "DENDRO_PBT_CASES";
/// Environment variable controlling proptest process forking.
pub const DENDRO_PBT_FORK_ENV_KEY: &str = "DENDRO_PBT_FORK";
/// Environment variable capping proptest shrink iterations.
pub const DENDRO_PBT_MAX_SHRINK_ITERS_ENV_KEY: &str = "DENDRO_PBT_MAX_SHRINK_ITERS";

/// Shrink budget used when no override is present.
pub const DEFAULT_MAX_SHRINK_ITERS: u32 = 4_096;

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
    max_shrink_iters: u32,
}

impl ProptestRunProfile {
    /// Load a profile from environment variables with provided defaults.
    ///
    /// Invalid overrides are logged and ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dendro_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// assert!(profile.max_shrink_iters() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(DENDRO_PBT_CASES_ENV_KEY, default_cases, parse_positive),
            fork: override_or(DENDRO_PBT_FORK_ENV_KEY, default_fork, parse_bool),
            max_shrink_iters: override_or(
                DENDRO_PBT_MAX_SHRINK_ITERS_ENV_KEY,
                DEFAULT_MAX_SHRINK_ITERS,
                parse_positive,
            ),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }

    /// Upper bound on shrink iterations after a failure.
    #[must_use]
    pub fn max_shrink_iters(&self) -> u32 {
        self.max_shrink_iters
    }
}

/// Reason an override was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
enum OverrideError {
    NotANumber(String),
    Zero,
    NotABool,
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(reason) => write!(f, "parse error: {reason}"),
            Self::Zero => f.write_str("value must be > 0"),
            Self::NotABool => f.write_str("expected one of: true/false/1/0/yes/no/on/off"),
        }
    }
}

fn override_or<T, F>(key: &'static str, default: T, parser: F) -> T
where
    F: Fn(&str) -> Result<T, OverrideError>,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parser(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_positive(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::Zero),
        Ok(value) => Ok(value),
        Err(error) => Err(OverrideError::NotANumber(error.to_string())),
    }
}

fn parse_bool(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotABool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Holds the environment lock and restores every profile variable on drop.
    struct ScopedEnv {
        saved: Vec<(&'static str, Option<String>)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        fn new(overrides: &[(&'static str, Option<&str>)]) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            let keys = [
                DENDRO_PBT_CASES_ENV_KEY,
                DENDRO_PBT_FORK_ENV_KEY,
                DENDRO_PBT_MAX_SHRINK_ITERS_ENV_KEY,
            ];
            let saved = keys.iter().map(|&key| (key, env::var(key).ok())).collect();
            for key in keys {
                // SAFETY: tests serialize access with ENV_LOCK.
                unsafe { env::remove_var(key) };
            }
            for &(key, value) in overrides {
                if let Some(value) = value {
                    // SAFETY: tests serialize access with ENV_LOCK.
                    unsafe { env::set_var(key, value) };
                }
            }
            Self { saved, _lock: lock }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    // SAFETY: tests serialize access with ENV_LOCK.
                    Some(value) => unsafe { env::set_var(key, value) },
                    // SAFETY: tests serialize access with ENV_LOCK.
                    None => unsafe { env::remove_var(key) },
                }
            }
        }
    }

    #[test]
    fn load_defaults_when_no_overrides_exist() {
        let _env = ScopedEnv::new(&[]);
        let profile = ProptestRunProfile::load(64, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
        assert_eq!(profile.max_shrink_iters(), DEFAULT_MAX_SHRINK_ITERS);
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn load_accepts_valid_case_overrides(#[case] raw: &str, #[case] expected: u32) {
        let _env = ScopedEnv::new(&[(DENDRO_PBT_CASES_ENV_KEY, Some(raw))]);
        assert_eq!(ProptestRunProfile::load(64, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    fn load_rejects_invalid_numeric_overrides(#[case] raw: &str) {
        let _env = ScopedEnv::new(&[
            (DENDRO_PBT_CASES_ENV_KEY, Some(raw)),
            (DENDRO_PBT_MAX_SHRINK_ITERS_ENV_KEY, Some(raw)),
        ]);
        let profile = ProptestRunProfile::load(64, false);
        assert_eq!(profile.cases(), 64);
        assert_eq!(profile.max_shrink_iters(), DEFAULT_MAX_SHRINK_ITERS);
    }

    #[rstest]
    #[case("true", true)]
    #[case("YES", true)]
    #[case("on", true)]
    #[case("0", false)]
    #[case("Off", false)]
    fn load_accepts_valid_fork_overrides(#[case] raw: &str, #[case] expected: bool) {
        let _env = ScopedEnv::new(&[(DENDRO_PBT_FORK_ENV_KEY, Some(raw))]);
        assert_eq!(ProptestRunProfile::load(64, !expected).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    fn load_rejects_invalid_fork_overrides(#[case] raw: &str) {
        let _env = ScopedEnv::new(&[(DENDRO_PBT_FORK_ENV_KEY, Some(raw))]);
        assert!(ProptestRunProfile::load(64, true).fork());
    }

    #[test]
    fn shrink_budget_can_be_lowered() {
        let _env = ScopedEnv::new(&[(DENDRO_PBT_MAX_SHRINK_ITERS_ENV_KEY, Some("32"))]);
        assert_eq!(ProptestRunProfile::load(8, false).max_shrink_iters(), 32);
    }
}
