//! Policy-constrained password generator.

use std::collections::HashSet;

use secrecy::zeroize::Zeroize;
use secrecy::{ExposeSecret, SecretString};

use crate::classes::{CharClass, DEFAULT_SYMBOLS, DIGITS, LOWERCASE, UPPERCASE};
use crate::error::PolicyError;
use crate::random::{OsRandom, SecureRandomSource};

pub const MIN_GENERATED_LENGTH: usize = 4;
pub const DEFAULT_GENERATED_LENGTH: usize = 20;

/// Constraints for a generated password.
///
/// Letters and digits are always part of the fill alphabet; the `require_*`
/// flags only decide which classes are guaranteed to appear. Symbols enter
/// the fill alphabet only when `allow_symbols` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPolicy {
    pub length: usize,
    pub require_lower: bool,
    pub require_upper: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
    pub allow_symbols: bool,
    pub symbol_alphabet: Vec<char>,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_GENERATED_LENGTH,
            require_lower: true,
            require_upper: true,
            require_digit: true,
            require_symbol: true,
            allow_symbols: true,
            symbol_alphabet: DEFAULT_SYMBOLS.chars().collect(),
        }
    }
}

impl GenerationPolicy {
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Disallows symbols entirely (and drops the symbol requirement with it).
    pub fn without_symbols(mut self) -> Self {
        self.allow_symbols = false;
        self.require_symbol = false;
        self
    }

    /// Classes that must appear at least once, in fixed order.
    pub fn required_classes(&self) -> Vec<CharClass> {
        let mut classes = Vec::with_capacity(4);
        if self.require_lower {
            classes.push(CharClass::Lower);
        }
        if self.require_upper {
            classes.push(CharClass::Upper);
        }
        if self.require_digit {
            classes.push(CharClass::Digit);
        }
        if self.require_symbol {
            classes.push(CharClass::Symbol);
        }
        classes
    }

    /// Checks the policy without drawing any randomness.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.length < MIN_GENERATED_LENGTH {
            return Err(invalid(format!(
                "length must be >= {}, got {}",
                MIN_GENERATED_LENGTH, self.length
            )));
        }
        if self.require_symbol && !self.allow_symbols {
            return Err(invalid("symbols are required but not allowed"));
        }
        if self.allow_symbols {
            if self.symbol_alphabet.is_empty() {
                return Err(invalid("symbols are allowed but the symbol alphabet is empty"));
            }
            if let Some(c) = self
                .symbol_alphabet
                .iter()
                .find(|&&c| CharClass::of(c) != Some(CharClass::Symbol))
            {
                return Err(invalid(format!(
                    "symbol alphabet contains non-symbol character {:?}",
                    c
                )));
            }
            let mut seen = HashSet::with_capacity(self.symbol_alphabet.len());
            if let Some(c) = self.symbol_alphabet.iter().find(|&&c| !seen.insert(c)) {
                return Err(invalid(format!(
                    "symbol alphabet contains duplicate character {:?}",
                    c
                )));
            }
        }

        let required = self.required_classes().len();
        if required == 0 {
            return Err(invalid("no character class is enabled"));
        }
        if required > self.length {
            return Err(invalid(format!(
                "{} required classes do not fit in length {}",
                required, self.length
            )));
        }
        Ok(())
    }

    fn pool(&self, class: CharClass) -> Vec<char> {
        match class {
            CharClass::Lower => LOWERCASE.chars().collect(),
            CharClass::Upper => UPPERCASE.chars().collect(),
            CharClass::Digit => DIGITS.chars().collect(),
            CharClass::Symbol => self.symbol_alphabet.clone(),
        }
    }

    fn combined_alphabet(&self) -> Vec<char> {
        let mut alphabet: Vec<char> = LOWERCASE
            .chars()
            .chain(UPPERCASE.chars())
            .chain(DIGITS.chars())
            .collect();
        if self.allow_symbols {
            alphabet.extend(self.symbol_alphabet.iter().copied());
        }
        alphabet
    }
}

fn invalid(reason: impl Into<String>) -> PolicyError {
    PolicyError::InvalidPolicy(reason.into())
}

/// A freshly generated password. The crate keeps no copy of it.
#[derive(Debug)]
pub struct GeneratedPassword(SecretString);

impl GeneratedPassword {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.expose_secret().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    pub fn into_secret(self) -> SecretString {
        self.0
    }
}

impl ExposeSecret<str> for GeneratedPassword {
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Generates a password satisfying `policy`, drawing from `rng`.
///
/// # Errors
/// Returns `PolicyError::InvalidPolicy` before any randomness is consumed
/// when the policy is malformed or contradictory.
pub fn generate<R: SecureRandomSource>(
    policy: &GenerationPolicy,
    rng: &mut R,
) -> Result<GeneratedPassword, PolicyError> {
    policy.validate()?;

    let required = policy.required_classes();
    let alphabet = policy.combined_alphabet();
    let mut chosen: Vec<char> = Vec::with_capacity(policy.length);

    // One guaranteed character per required class
    for class in &required {
        let pool = policy.pool(*class);
        let c = rng
            .choose(&pool)
            .copied()
            .ok_or_else(|| invalid(format!("{} pool is empty", class)))?;
        chosen.push(c);
    }

    while chosen.len() < policy.length {
        let c = rng
            .choose(&alphabet)
            .copied()
            .ok_or_else(|| invalid("combined alphabet is empty"))?;
        chosen.push(c);
    }

    secure_shuffle(&mut chosen, rng);

    let password: String = chosen.iter().collect();
    chosen.zeroize();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        length = policy.length,
        required_classes = required.len(),
        alphabet_size = alphabet.len(),
        "password generated"
    );

    Ok(GeneratedPassword(SecretString::new(password.into_boxed_str())))
}

/// Convenience wrapper over [`generate`] using operating system entropy.
pub fn generate_password(policy: &GenerationPolicy) -> Result<GeneratedPassword, PolicyError> {
    generate(policy, &mut OsRandom)
}

/// Fisher-Yates shuffle with every swap index drawn from `rng`.
pub fn secure_shuffle<T, R: SecureRandomSource>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
