//! This module contains various configuration options. In general, the
//! configuration options impact performance and termination only. The default
//! configuration is sane and should work well for most users.
//!
//! All configuration options can also be set via environment variables. The
//! environment variables take precedence over the options set in this module.

use std::cell::RefCell;

use arbitrary::Arbitrary;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::new());
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct Config {
    pub frobenius_direct_cutoff: FrobeniusDirectCutoff,
    pub irreducible_generation_attempts: IrreducibleGenerationAttempts,
}

impl Config {
    fn new() -> Self {
        Self {
            frobenius_direct_cutoff: FrobeniusDirectCutoff::new(None),
            irreducible_generation_attempts: IrreducibleGenerationAttempts::new(None),
        }
    }
}

/// Reads `env_var`, falling back to `config_value`, then to `default`.
fn resolve(env_var: &str, config_value: Option<usize>, default: usize) -> usize {
    std::env::var(env_var)
        .ok()
        .and_then(|s| s.parse().ok())
        .or(config_value)
        .unwrap_or(default)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct FrobeniusDirectCutoff(usize);

impl FrobeniusDirectCutoff {
    const ENV_VAR: &'static str = "FP_POLY_FROBENIUS_DIRECT_CUTOFF";
    const DEFAULT: usize = 4096;

    /// Respects the precedence of the environment variable if set. Uses the
    /// default if no value is provided.
    fn new(config_value: Option<usize>) -> Self {
        Self(resolve(Self::ENV_VAR, config_value, Self::DEFAULT))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct IrreducibleGenerationAttempts(usize);

impl IrreducibleGenerationAttempts {
    const ENV_VAR: &'static str = "FP_POLY_IRREDUCIBLE_GENERATION_ATTEMPTS";
    const DEFAULT: usize = 1000;
    const MINIMUM: usize = 1;

    fn new(config_value: Option<usize>) -> Self {
        let attempts = resolve(Self::ENV_VAR, config_value, Self::DEFAULT).max(Self::MINIMUM);
        Self(attempts)
    }
}

/// Sets the largest exponent `e` for which the irreducibility test builds
/// `x^e - x` explicitly, where `e = q^k` for field order `q`.
///
/// The binomial has only two terms, but dividing it by a polynomial of degree
/// `n` takes roughly `e - n` steps. Above the cutoff, the residue of `x^e` is
/// instead computed by raising `x` to the `q`-th power `k` times.
///
/// Can also be set via the environment variable
/// `FP_POLY_FROBENIUS_DIRECT_CUTOFF`. The environment variable has higher
/// precedence than this function.
///
/// The default is 4096.
pub fn set_frobenius_direct_cutoff(cutoff: usize) {
    let cutoff = FrobeniusDirectCutoff::new(Some(cutoff));
    CONFIG.with(|c| c.borrow_mut().frobenius_direct_cutoff = cutoff);
}

pub(crate) fn frobenius_direct_cutoff() -> usize {
    CONFIG.with(|c| c.borrow().frobenius_direct_cutoff).0
}

/// Sets the number of candidates drawn when searching for a random irreducible
/// polynomial before giving up.
///
/// Can also be set via the environment variable
/// `FP_POLY_IRREDUCIBLE_GENERATION_ATTEMPTS`. The environment variable has
/// higher precedence than this function.
///
/// The default is 1000. The minimum is always 1.
pub fn set_irreducible_generation_attempts(attempts: usize) {
    let attempts = IrreducibleGenerationAttempts::new(Some(attempts));
    CONFIG.with(|c| c.borrow_mut().irreducible_generation_attempts = attempts);
}

pub(crate) fn irreducible_generation_attempts() -> usize {
    CONFIG
        .with(|c| c.borrow().irreducible_generation_attempts)
        .0
}
