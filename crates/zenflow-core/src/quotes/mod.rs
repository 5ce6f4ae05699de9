//! Inspirational quotes.
//!
//! Two panels use quotes: the header rotates through a built-in list every
//! couple of minutes, and the inspiration card asks a public API once and
//! falls back to a local list on any failure.

mod client;
mod rotation;

pub use client::QuotableClient;
pub use rotation::QuoteRotation;

use std::future::Future;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    pub author: String,
}

impl Quote {
    pub fn new(content: &str, author: &str) -> Self {
        Self {
            content: content.to_string(),
            author: author.to_string(),
        }
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\u{201c}{}\u{201d} \u{2014} {}", self.content, self.author)
    }
}

/// Anything that can produce a quote. Never fails; sources degrade to the
/// local list instead.
pub trait QuoteSource {
    fn fetch(&self) -> impl Future<Output = Quote> + Send;
}

/// Fallback list for the inspiration card.
pub const FALLBACK_QUOTES: [(&str, &str); 3] = [
    ("The best way out is always through.", "Robert Frost"),
    ("Be where you are; otherwise you will miss your life.", "Buddha"),
    ("Simplicity is the soul of efficiency.", "Austin Freeman"),
];

/// Header rotation list.
pub const ROTATING_QUOTES: [(&str, &str); 5] = [
    (
        "Excellence is never an accident. It is always the result of high intention, sincere effort, and intelligent execution.",
        "Aristotle",
    ),
    ("The way to get started is to quit talking and begin doing.", "Walt Disney"),
    ("Innovation distinguishes between a leader and a follower.", "Steve Jobs"),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
];

pub fn pick<R: Rng + ?Sized>(list: &[(&str, &str)], rng: &mut R) -> Quote {
    list.choose(rng)
        .map(|(content, author)| Quote::new(content, author))
        .unwrap_or_else(|| Quote::new("Breathe.", "Zenflow"))
}

/// Offline source: a random pick from [`FALLBACK_QUOTES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalQuotes;

impl QuoteSource for LocalQuotes {
    async fn fetch(&self) -> Quote {
        pick(&FALLBACK_QUOTES, &mut rand::thread_rng())
    }
}
