//! Fixed-width character fields and their named projection.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
};
use core::fmt::{self, Display, Write};

use zerocopy::FromBytes;

/// A fixed-width character field of `N` bytes.
///
/// Each byte is one character (ISO 8859-1). The bytes are kept exactly as
/// read: no trimming, and no interpretation of numeric-looking fields.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes)]
pub struct Text<const N: usize>([u8; N]);

impl<const N: usize> Text<N> {
    /// The field width in bytes.
    pub const LEN: usize = N;

    /// The raw bytes of the field.
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// The characters of the field, one per byte.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }

    /// The field as text, blanks included.
    pub fn text(&self) -> String {
        self.chars().collect()
    }

    /// The field as text, with leading and trailing blanks removed.
    pub fn trimmed(&self) -> String {
        self.text().trim_matches(' ').into()
    }

    /// Whether the field holds only blanks.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&b| b == b' ')
    }
}

impl<const N: usize> From<[u8; N]> for Text<N> {
    fn from(r: [u8; N]) -> Self {
        Self(r)
    }
}

impl<const N: usize> PartialEq<str> for Text<N> {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl<const N: usize> PartialEq<&str> for Text<N> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<const N: usize> Display for Text<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars().try_for_each(|c| f.write_char(c))
    }
}

impl<const N: usize> fmt::Debug for Text<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.text(), f)
    }
}

/// Publish the named columns of a record.
///
/// See the [`Columns`](macro@crate::Columns) derive macro for an automatic
/// implementation of this trait.
pub trait Columns {
    /// Visit each column name and value, in layout order.
    fn visit_columns(&self, visit: &mut dyn FnMut(&'static str, &dyn Display));

    /// Collect the columns into a map of column name to raw text.
    ///
    /// The map is rebuilt on every call.
    fn columns(&self) -> BTreeMap<&'static str, String> {
        let mut columns = BTreeMap::new();
        self.visit_columns(&mut |name, value| {
            columns.insert(name, value.to_string());
        });
        columns
    }
}
