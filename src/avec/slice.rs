//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    header::HeaderError,
    record::{Classify, SEPARATOR_LEN},
};

use super::{Entity, EntityBuilder, is_trailing_separator};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// A fixed-width field runs past the end of the slice.
    #[error("Unexpectedly reached the end of the slice at offset {offset} ({needed} bytes needed).")]
    UnexpectedEndOfStream { offset: usize, needed: usize },
    /// Name-format type outside `0` to `6`.
    #[error("Unsupported name format type ({0:#04X}).")]
    UnsupportedFormat(u8),
}

impl From<HeaderError> for Error {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::UnsupportedFormat(f) => Self::UnsupportedFormat(f),
        }
    }
}

/// Decode one entity from a slice of a document, starting at an offset.
///
/// On success, the offset is advanced past the entity and its trailing
/// separator, to the byte that ended it. On failure, the offset is left
/// wherever decoding stopped.
///
/// This method is also re-exported as `tobin_bas::avec::decode_slice`.
pub fn decode(r: &[u8], i: &mut usize, classify: &impl Classify) -> Result<Entity, Error> {
    let offset = *i;

    let (header, mut separator) = Decoder::advance(take(r, i)?)?
        .advance(take(r, i)?)
        .advance(take(r, i)?);

    let mut entity = EntityBuilder::new(offset as u64, header);

    loop {
        // The separator is omitted when the document ends too soon to hold it.
        let record_type = if r.len().saturating_sub(*i) >= SEPARATOR_LEN {
            separator.advance(Some(take(r, i)?))
        } else {
            separator.advance(None)
        };

        separator = match record_type.advance(r.get(*i).copied(), classify) {
            Left(Left(state)) => {
                *i += 1;
                let (annotation, separator) = state.advance(take(r, i)?);
                entity.add_annotation(annotation);
                separator
            }
            Left(Right(state)) => {
                *i += 1;
                let (coordinate, separator) = state.advance(take(r, i)?);
                entity.add_coordinate(coordinate);
                separator
            }
            Right(_) => break,
        };
    }

    if let Some(&b) = r.get(*i) {
        log::debug!("record type {b:#04X} at offset {} ends entity", *i);
    }

    Ok(entity.build())
}

/// Iterate over the entities of a document held in a slice.
pub fn entities<C: Classify>(r: &[u8], classify: C) -> Entities<'_, C> {
    Entities {
        r,
        i: 0,
        classify,
        failed: false,
    }
}

/// An iterator decoding entities until the end of a slice.
///
/// Blank lines after the last entity end iteration. Iteration also stops
/// after the first error, as the position of the next entity is then unknown.
#[derive(Debug)]
pub struct Entities<'a, C> {
    r: &'a [u8],
    i: usize,
    classify: C,
    failed: bool,
}

impl<C> Entities<'_, C> {
    /// Offset of the next entity.
    pub fn offset(&self) -> usize {
        self.i
    }
}

impl<C: Classify> Iterator for Entities<'_, C> {
    type Item = Result<Entity, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.r.get(self.i..).unwrap_or_default();
        if self.failed || rest.is_empty() || is_trailing_separator(rest) {
            return None;
        }

        let entity = decode(self.r, &mut self.i, &self.classify);
        self.failed = entity.is_err();

        Some(entity)
    }
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let s = *i;

    let bytes = r
        .get(s..)
        .and_then(|r| r.first_chunk::<N>())
        .ok_or(Error::UnexpectedEndOfStream {
            offset: s,
            needed: N,
        })?;

    *i += N;

    Ok(*bytes)
}
