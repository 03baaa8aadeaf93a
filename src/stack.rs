//! Stack discovery from the root change's description footer
//!
//! Stacking tools append a footer like:
//!
//! ```text
//! Stack from [ghstack](https://github.com/ezyang/ghstack):
//! * #103
//! * __->__ #102
//! * #101
//! ```
//!
//! The list is top-first; evaluation order is bottom-up.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static FOOTER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Stack from [^\n]*\n").expect("footer marker regex is valid")
});

static STACK_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[*+-]|\d+[.)])[ \t]+[^\n]*?#(\d+)")
        .expect("stack item regex is valid")
});

/// Extract the PR numbers of a stack from the root change's description.
///
/// Returns numbers base-first (reverse of footer order).
pub fn locate(description: &str) -> Result<Vec<u64>> {
    let marker = FOOTER_MARKER
        .find(description)
        .ok_or(Error::MalformedStackFooter)?;
    let footer = &description[marker.end()..];

    let mut numbers = STACK_ITEM
        .captures_iter(footer)
        .map(|caps| {
            caps[1]
                .parse::<u64>()
                .map_err(|_| Error::MalformedStackFooter)
        })
        .collect::<Result<Vec<_>>>()?;

    if numbers.is_empty() {
        return Err(Error::EmptyStack);
    }

    numbers.reverse();
    Ok(numbers)
}
