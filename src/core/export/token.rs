//! Temp token allocation
//!
//! Each per-sheet export is requested under a throwaway alias so the
//! reconciler can find the file the host wrote. Tokens are
//! `SBTMP_` + 8 characters drawn from the Crockford base32 alphabet
//! (40 random bits).
//!
//! Collision bound: for a batch of n tokens the chance of a raw collision is
//! about n² / 2^41, i.e. < 5e-5 for n = 10 000. The allocator also remembers
//! every token it issued and redraws on a repeat, so within one batch a
//! token is never handed out twice.

use crate::domain::ids::{TempToken, TEMP_TOKEN_BODY_LEN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Crockford base32: no I, L, O or U
const TOKEN_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Issues unique temp tokens for one batch
pub struct TempTokenAllocator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl TempTokenAllocator {
    /// Create an allocator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an allocator with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    /// Issue a token not handed out before by this allocator
    pub fn next_token(&mut self) -> TempToken {
        loop {
            let body = self.random_body();
            if self.issued.insert(body.clone()) {
                return TempToken::from_body(&body);
            }
            tracing::debug!(body = %body, "Temp token collision, drawing again");
        }
    }

    /// Number of tokens issued so far
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    fn random_body(&mut self) -> String {
        (0..TEMP_TOKEN_BODY_LEN)
            .map(|_| {
                let idx = self.rng.gen_range(0..TOKEN_ALPHABET.len());
                TOKEN_ALPHABET[idx] as char
            })
            .collect()
    }
}

impl Default for TempTokenAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let mut allocator = TempTokenAllocator::new();
        let token = allocator.next_token();

        assert!(token.as_str().starts_with("SBTMP_"));
        assert_eq!(token.body().len(), 8);
        assert!(token
            .body()
            .bytes()
            .all(|b| TOKEN_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_tokens_unique_within_batch() {
        let mut allocator = TempTokenAllocator::new();
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            assert!(seen.insert(allocator.next_token()));
        }
        assert_eq!(allocator.issued_count(), 10_000);
    }

    #[test]
    fn test_seeded_allocators_repeat() {
        let mut a = TempTokenAllocator::seeded(7);
        let mut b = TempTokenAllocator::seeded(7);
        assert_eq!(a.next_token(), b.next_token());
    }

    #[test]
    fn test_token_never_looks_like_sheet_number() {
        let mut allocator = TempTokenAllocator::new();
        let token = allocator.next_token();
        assert!(!"A101-Floor Plan".contains(token.as_str()));
        assert!(TempToken::is_temp_name(token.as_str()));
    }
}
