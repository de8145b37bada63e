//! Fluent, immutable, encoding-aware string manipulation.
//!
//! The central type is [`Strand`], an immutable string value carrying an
//! [`Encoding`] tag. Every operation returns a new value; the receiver is
//! never modified, so method chains read as a pipeline.
//!
//! # Example
//!
//! ```
//! use strand::Strand;
//!
//! let title = Strand::from("  fòô    BÀŘ  ")
//!     .trim(None)
//!     .collapse_whitespace()
//!     .lowercase()
//!     .upper_first();
//! assert_eq!(title, "Fòô bàř");
//!
//! // Splitting yields a collection that joins back up.
//! let slug = Strand::from("Foo, Bar & Baz!").slugify("-");
//! assert_eq!(slug, "foo-bar-baz");
//! ```

#![deny(missing_docs)]

/// Case conversion and composite casing.
pub mod case;
/// The [`Strands`] collection and splitting constructors.
pub mod collection;
/// Runtime encoding tags and the process-wide default.
pub mod encoding;
/// Error types for fallible operations.
pub mod error;
/// printf-style template substitution.
pub mod format;
/// Digests, armor and authenticated encryption.
pub mod hash;
/// HTML escaping, entity decoding and markup stripping.
pub mod html;
/// Content predicates (`is_email`, `is_json`, ...).
pub mod predicate;
/// Substring search and replacement.
pub mod search;
/// The [`Strand`] immutable string value.
pub mod strand;
/// Padding, trimming and truncation.
pub mod transform;
/// Transliteration and slug building.
pub mod translit;
/// Percent-encoding and multi-pass decoding.
pub mod url;
/// Word tokenization.
pub mod words;

// Re-export main types
pub use collection::Strands;
pub use encoding::{Encoding, default_encoding, set_default_encoding};
pub use error::{Error, Result};
pub use format::FormatArg;
pub use html::QuoteStyle;
pub use predicate::EmailOptions;
pub use strand::{Source, Strand};
pub use transform::PadType;
pub use url::MAX_DECODE_PASSES;
