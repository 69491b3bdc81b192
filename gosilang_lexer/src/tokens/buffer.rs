//! Growable token buffer filled by one lexing pass
//!
//! The buffer is append-only and owned by the lexer while scanning. Once the
//! pass completes it is frozen into a read-only [`TokenStream`].
use super::stream::TokenStream;
use super::token::Token;
use crate::config::compile_time::lexical::{INITIAL_BUFFER_CAPACITY, MAX_TOKEN_COUNT};
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenBufferError {
    #[error("Token buffer could not grow from {capacity} to {requested} tokens: {source}")]
    AllocationFailed {
        capacity: usize,
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("Token limit of {limit} tokens exceeded")]
    CapacityExceeded { limit: usize },
}

#[derive(Debug)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    /// Logical capacity, doubled whenever the buffer is full
    capacity: usize,
    max_tokens: usize,
    growth_count: usize,
}

impl TokenBuffer {
    /// Empty buffer with the configured initial capacity
    pub fn new() -> Self {
        Self::with_limits(INITIAL_BUFFER_CAPACITY, MAX_TOKEN_COUNT)
    }

    pub fn with_limits(initial_capacity: usize, max_tokens: usize) -> Self {
        let capacity = initial_capacity.max(1).min(max_tokens.max(1));
        Self {
            tokens: Vec::with_capacity(capacity),
            capacity,
            max_tokens,
            growth_count: 0,
        }
    }

    /// Append in scan order, doubling the capacity first when full
    pub fn append(&mut self, token: Token) -> Result<(), TokenBufferError> {
        if self.tokens.len() >= self.max_tokens {
            return Err(TokenBufferError::CapacityExceeded {
                limit: self.max_tokens,
            });
        }

        if self.tokens.len() == self.capacity {
            self.grow()?;
        }

        self.tokens.push(token);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), TokenBufferError> {
        let requested = self.capacity.saturating_mul(2).min(self.max_tokens);

        self.tokens
            .try_reserve_exact(requested - self.tokens.len())
            .map_err(|source| TokenBufferError::AllocationFailed {
                capacity: self.capacity,
                requested,
                source,
            })?;

        self.capacity = requested;
        self.growth_count += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of doubling steps taken so far
    pub fn growth_count(&self) -> usize {
        self.growth_count
    }

    /// Freeze into the read-only stream handed to consumers
    pub fn finish(self) -> TokenStream {
        TokenStream::from_tokens(self.tokens)
    }
}

impl Default for TokenBuffer {
    fn default() -> Self {
        Self::new()
    }
}
