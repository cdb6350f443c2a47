//! Parsing of the values typed at session prompts.

use std::fmt;

use thiserror::Error;
use wgups_core::{Clock, PackageTable};

/// A rejected prompt answer. The session reports it and keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The time was not `HH:MM:SS` with in-range fields.
    #[error("Invalid time format")]
    TimeFormat {
        /// Text as typed.
        input: String,
    },
    /// The identifier was not a number or names no package.
    #[error("Invalid package identifier")]
    PackageId {
        /// Text as typed.
        input: String,
    },
}

/// A status query time typed as `HH:MM:SS`.
///
/// Seconds are validated but dropped; the clock has minute resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTime {
    text: String,
    clock: Clock,
}

impl QueryTime {
    /// The time truncated to the minute.
    #[must_use]
    pub const fn clock(&self) -> Clock {
        self.clock
    }
}

impl fmt::Display for QueryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parse `HH:MM:SS`, two digits per field.
///
/// # Errors
/// Returns [`InputError::TimeFormat`] for any other shape or an out-of-range
/// field.
pub fn parse_query_time(input: &str) -> Result<QueryTime, InputError> {
    let text = input.trim();
    let rejected = || InputError::TimeFormat {
        input: text.to_owned(),
    };
    let fields: Vec<u32> = text
        .split(':')
        .map(|field| {
            if field.len() == 2 && field.bytes().all(|byte| byte.is_ascii_digit()) {
                field.parse().ok()
            } else {
                None
            }
        })
        .collect::<Option<_>>()
        .ok_or_else(rejected)?;
    let [hours, minutes, seconds] = fields.as_slice() else {
        return Err(rejected());
    };
    if *hours >= 24 || *minutes >= 60 || *seconds >= 60 {
        return Err(rejected());
    }
    Ok(QueryTime {
        text: text.to_owned(),
        clock: Clock::new(*hours, *minutes),
    })
}

/// Parse a package id and check that the package exists.
///
/// # Errors
/// Returns [`InputError::PackageId`] when `input` is not a number or no
/// package has that id.
pub fn parse_package_id(input: &str, packages: &PackageTable) -> Result<u32, InputError> {
    let text = input.trim();
    text.parse::<u32>()
        .ok()
        .filter(|id| packages.contains(*id))
        .ok_or_else(|| InputError::PackageId {
            input: text.to_owned(),
        })
}
