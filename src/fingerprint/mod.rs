//! Name fingerprints.
//!
//! A fingerprint summarises structural features of a name (particles,
//! titles, numerals, initials) rather than its sound.

mod synoname;

pub use synoname::{synoname_toolcode, Synoname, Toolcode};

/// How much a name is rearranged before its fingerprint is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// The name is used as given.
    #[default]
    None,
    /// `"Last, First"` in the last name is split at the comma.
    CommaFlip,
    /// Comma flip, plus generation markers and Roman numerals move from
    /// the first name to the last name.
    Full,
}
