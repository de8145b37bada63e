//! The [`Strands`] collection and the splitting constructors that
//! produce it.
//!
//! `Strands` is a thin ordered wrapper over `Vec<Strand>`: enough surface
//! to join back, iterate and index, without pretending to be a general
//! sequence type. Every element of a split inherits the encoding of the
//! strand it came from.

use std::ops::Index;

use crate::error::{Error, Result};
use crate::strand::Strand;

/// An ordered collection of [`Strand`] values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strands {
    items: Vec<Strand>,
}

impl Strands {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the collection holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Strand> {
        self.items.get(index)
    }

    /// Appends an element.
    #[inline]
    pub fn push(&mut self, strand: Strand) {
        self.items.push(strand);
    }

    /// Iterates over the elements by reference.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Strand> {
        self.items.iter()
    }

    /// Joins the elements with `separator` into a single strand.
    ///
    /// An empty collection implodes to an empty strand with the default
    /// encoding context.
    ///
    /// ```
    /// use strand::Strand;
    ///
    /// let parts = Strand::from("foo,bar,baz").explode(",").unwrap();
    /// assert_eq!(parts.implode(" + "), "foo + bar + baz");
    /// ```
    pub fn implode(&self, separator: &str) -> Strand {
        match self.items.first() {
            Some(first) => {
                let joined = self
                    .items
                    .iter()
                    .map(Strand::as_str)
                    .collect::<Vec<_>>()
                    .join(separator);
                first.derive(joined)
            }
            None => Strand::default(),
        }
    }

    /// Copies the contents out as plain `String`s.
    pub fn to_strings(&self) -> Vec<String> {
        self.items.iter().map(|s| s.as_str().to_owned()).collect()
    }
}

impl Index<usize> for Strands {
    type Output = Strand;

    fn index(&self, index: usize) -> &Strand {
        &self.items[index]
    }
}

impl IntoIterator for Strands {
    type Item = Strand;
    type IntoIter = std::vec::IntoIter<Strand>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Strands {
    type Item = &'a Strand;
    type IntoIter = std::slice::Iter<'a, Strand>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Strand> for Strands {
    fn from_iter<I: IntoIterator<Item = Strand>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<String> for Strands {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        iter.into_iter().map(Strand::from).collect()
    }
}

impl From<Vec<Strand>> for Strands {
    fn from(items: Vec<Strand>) -> Self {
        Self { items }
    }
}

// === Splitting constructors ===

impl Strand {
    /// Splits on `separator`, keeping at most the first `limit` pieces.
    ///
    /// The split happens in full first, then the result is cut down, so
    /// the last kept piece does not swallow the remainder. `None` keeps
    /// everything. An empty separator fails with
    /// [`Error::InvalidArgument`].
    ///
    /// ```
    /// use strand::Strand;
    ///
    /// let s = Strand::from("foo,bar,baz");
    /// assert_eq!(s.split(",", None).unwrap().to_strings(), ["foo", "bar", "baz"]);
    /// assert_eq!(s.split(",", Some(2)).unwrap().to_strings(), ["foo", "bar"]);
    /// ```
    pub fn split(&self, separator: &str, limit: Option<usize>) -> Result<Strands> {
        if separator.is_empty() {
            return Err(Error::invalid_argument("separator must not be empty"));
        }
        let mut pieces: Vec<Strand> = self
            .as_str()
            .split(separator)
            .map(|piece| self.derive(piece))
            .collect();
        if let Some(limit) = limit {
            pieces.truncate(limit);
        }
        Ok(Strands::from(pieces))
    }

    /// Splits on `separator` with no limit.
    #[inline]
    pub fn explode(&self, separator: &str) -> Result<Strands> {
        self.split(separator, None)
    }

    /// Splits into chunks of `size` codepoints; the last chunk may be
    /// shorter. A zero size fails with [`Error::InvalidArgument`].
    ///
    /// ```
    /// use strand::Strand;
    ///
    /// let s = Strand::from("fòôbàř");
    /// assert_eq!(s.chunk(4).unwrap().to_strings(), ["fòôb", "àř"]);
    /// ```
    pub fn chunk(&self, size: usize) -> Result<Strands> {
        if size == 0 {
            return Err(Error::invalid_argument("chunk size must be positive"));
        }
        let mut chunks = Strands::new();
        let mut current = String::new();
        let mut count = 0usize;
        for c in self.chars() {
            current.push(c);
            count += 1;
            if count == size {
                chunks.push(self.derive(std::mem::take(&mut current)));
                count = 0;
            }
        }
        if !current.is_empty() {
            chunks.push(self.derive(current));
        }
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Encoding, Strand, Strands};

    fn s(text: &str) -> Strand {
        Strand::from(text)
    }

    #[test]
    fn split_basics() {
        assert_eq!(
            s("foo,bar,baz").split(",", None).unwrap().to_strings(),
            ["foo", "bar", "baz"]
        );
        assert_eq!(
            s("foo,bar,baz").split(",", Some(2)).unwrap().to_strings(),
            ["foo", "bar"]
        );
        assert_eq!(
            s("foo,bar,baz").split(",", Some(0)).unwrap().to_strings(),
            Vec::<String>::new()
        );
        assert!(s("abc").split("", None).is_err());
    }

    #[test]
    fn split_preserves_empty_pieces() {
        assert_eq!(
            s("a,,b,").explode(",").unwrap().to_strings(),
            ["a", "", "b", ""]
        );
        // No separator present: one piece, the whole content.
        assert_eq!(s("abc").explode(",").unwrap().to_strings(), ["abc"]);
        assert_eq!(s("").explode(",").unwrap().to_strings(), [""]);
    }

    #[test]
    fn split_inherits_encoding() {
        let tagged = Strand::with_encoding("a,b", Encoding::Ascii).unwrap();
        let parts = tagged.explode(",").unwrap();
        assert!(parts.iter().all(|p| p.encoding() == Encoding::Ascii));
        assert_eq!(parts.implode("-").encoding(), Encoding::Ascii);
    }

    #[test]
    fn chunk_splits_by_codepoints() {
        assert_eq!(s("fòôbàř").chunk(4).unwrap().to_strings(), ["fòôb", "àř"]);
        assert_eq!(s("abc").chunk(1).unwrap().to_strings(), ["a", "b", "c"]);
        assert_eq!(s("abc").chunk(10).unwrap().to_strings(), ["abc"]);
        assert!(s("abc").chunk(10).unwrap()[0].is_equals(&s("abc")));
        assert_eq!(s("").chunk(3).unwrap().len(), 0);
        assert!(s("abc").chunk(0).is_err());
    }

    #[test]
    fn implode_round_trip() {
        let original = s("fòô bàř bàz");
        assert_eq!(original.explode(" ").unwrap().implode(" "), original);
        assert_eq!(Strands::new().implode(","), "");
    }

    #[test]
    fn collection_surface() {
        let parts = s("a,b,c").explode(",").unwrap();
        assert_eq!(parts.len(), 3);
        assert!(!parts.is_empty());
        assert_eq!(parts[1], "b");
        assert_eq!(parts.get(5), None);
        assert_eq!(parts.iter().count(), 3);

        let mut grown = parts.clone();
        grown.push(s("d"));
        assert_eq!(grown.implode(""), "abcd");

        let collected: Strands = vec!["x".to_owned(), "y".to_owned()]
            .into_iter()
            .collect();
        assert_eq!(collected.implode("/"), "x/y");
    }
}
