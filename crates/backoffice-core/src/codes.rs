//! Code alphabets and candidate sampling for generated identifiers.
//!
//! Each generated identifier family (grouping references, report tokens,
//! Viatel redemption codes) is described by a [`CodeSpec`]: the per-position
//! alphabet, the fixed length, and the attempt budget the generator may spend
//! before giving up. Sampling is pure; uniqueness is enforced by the storage
//! layer and retried by the engine.

use rand::Rng;

/// Per-position character set of a code.
#[derive(Debug, Clone, Copy)]
pub enum Alphabet {
    /// Every position draws from the same character set.
    Uniform(&'static str),
    /// Each position has its own character set (one entry per position).
    PerPosition(&'static [&'static str]),
}

/// Fixed configuration of one generated-identifier family.
#[derive(Debug, Clone, Copy)]
pub struct CodeSpec {
    /// Allowed characters per position.
    pub alphabet: Alphabet,
    /// Exact code length in characters.
    pub length: usize,
    /// How many candidates the generator may try before failing.
    pub max_attempts: u32,
}

/// Grouping references: human-readable, so visually ambiguous characters
/// (0/O/Q, 1/I, 2/Z, 5/S, 8/B) are excluded.
pub const TRANSACTION_REFERENCE: CodeSpec = CodeSpec {
    alphabet: Alphabet::Uniform("34679ACDEFGHJKLMNPRTUVWXY"),
    length: 8,
    max_attempts: 5,
};

/// Opaque report tokens: a full hexadecimal digest alphabet, effectively
/// collision-free at length 32.
pub const REPORT_TOKEN: CodeSpec = CodeSpec {
    alphabet: Alphabet::Uniform("0123456789abcdef"),
    length: 32,
    max_attempts: 3,
};

/// Viatel redemption codes: six digits, no leading zero. The collision
/// probability is non-trivial at scale (~0.5% for 10000 new codes against
/// 45000 existing), hence the large attempt budget.
pub const VIATEL_CODE: CodeSpec = CodeSpec {
    alphabet: Alphabet::PerPosition(&[
        "123456789",
        "0123456789",
        "0123456789",
        "0123456789",
        "0123456789",
        "0123456789",
    ]),
    length: 6,
    max_attempts: 100,
};

impl CodeSpec {
    /// Allowed characters at `pos`.
    #[must_use]
    pub fn alphabet_at(&self, pos: usize) -> &'static str {
        match self.alphabet {
            Alphabet::Uniform(chars) => chars,
            Alphabet::PerPosition(sets) => sets[pos],
        }
    }

    /// Draw one candidate code, sampling each position uniformly from its
    /// alphabet.
    #[must_use]
    pub fn sample<R: Rng>(&self, rng: &mut R) -> String {
        let mut code = String::with_capacity(self.length);
        for pos in 0..self.length {
            let chars: Vec<char> = self.alphabet_at(pos).chars().collect();
            code.push(chars[rng.gen_range(0..chars.len())]);
        }
        code
    }

    /// Whether `code` could have been produced by this spec.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        code.chars().count() == self.length
            && code
                .chars()
                .enumerate()
                .all(|(pos, c)| self.alphabet_at(pos).contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampled_codes_conform_to_spec() {
        let mut rng = rand::thread_rng();
        for spec in [TRANSACTION_REFERENCE, REPORT_TOKEN, VIATEL_CODE] {
            for _ in 0..200 {
                let code = spec.sample(&mut rng);
                assert_eq!(code.chars().count(), spec.length);
                assert!(spec.matches(&code), "non-conforming code: {code}");
            }
        }
    }

    #[test]
    fn transaction_reference_excludes_ambiguous_characters() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let code = TRANSACTION_REFERENCE.sample(&mut rng);
            for ambiguous in ['0', 'O', 'Q', '1', 'I', '2', 'Z', '5', 'S', '8', 'B'] {
                assert!(!code.contains(ambiguous), "ambiguous char in {code}");
            }
        }
    }

    #[test]
    fn viatel_code_never_starts_with_zero() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let code = VIATEL_CODE.sample(&mut rng);
            assert!(!code.starts_with('0'), "leading zero in {code}");
        }
    }

    #[test]
    fn matches_rejects_wrong_length_and_alphabet() {
        assert!(TRANSACTION_REFERENCE.matches("ACDEFGHJ"));
        assert!(!TRANSACTION_REFERENCE.matches("ACDEFGH")); // too short
        assert!(!TRANSACTION_REFERENCE.matches("ACDEFGH0")); // excluded char
        assert!(VIATEL_CODE.matches("123456"));
        assert!(!VIATEL_CODE.matches("023456")); // leading zero
    }
}
