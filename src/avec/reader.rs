//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use alloc::vec::Vec;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    header::{HEADER_LEN, HeaderError},
    record::{Classify, SEPARATOR_LEN},
};

use super::{Entity, EntityBuilder, is_trailing_separator};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A fixed-width field runs past the end of the document.
    #[error("Unexpectedly reached the end of the document at offset {offset} ({needed} bytes needed).")]
    UnexpectedEndOfStream { offset: u64, needed: usize },
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

/// Decode one entity from a reader of a document, starting at its current
/// position.
///
/// On success, the reader is left past the entity and its trailing separator,
/// at the byte that ended it.
///
/// This method is also re-exported as `tobin_bas::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<R: Read + Seek>(r: &mut R, classify: &impl Classify) -> Result<Entity, Error> {
    let offset = r.stream_position()?;
    let end = offset + remaining(r)?;

    let i = &mut { offset }; // Position of the cursor, used to find the end.

    let (header, mut separator) = Decoder::advance(take(r, i)?)?
        .advance(take(r, i)?)
        .advance(take(r, i)?);

    let mut entity = EntityBuilder::new(offset, header);

    loop {
        // The separator is omitted when the document ends too soon to hold it.
        let record_type = if end.saturating_sub(*i) >= SEPARATOR_LEN as u64 {
            separator.advance(Some(take(r, i)?))
        } else {
            separator.advance(None)
        };

        let next = peek(r, *i, end)?;

        separator = match record_type.advance(next, classify) {
            Left(Left(state)) => {
                take::<1>(r, i)?;
                let (annotation, separator) = state.advance(take(r, i)?);
                entity.add_annotation(annotation);
                separator
            }
            Left(Right(state)) => {
                take::<1>(r, i)?;
                let (coordinate, separator) = state.advance(take(r, i)?);
                entity.add_coordinate(coordinate);
                separator
            }
            Right(_) => {
                if let Some(b) = next {
                    log::debug!("record type {b:#04X} at offset {} ends entity", *i);
                }
                break;
            }
        };
    }

    Ok(entity.build())
}

/// Iterate over the entities of a document, from the reader's current
/// position.
///
/// _Requires Cargo feature `std`._
pub fn entities<R: Read + Seek, C: Classify>(r: R, classify: C) -> Entities<R, C> {
    Entities {
        r,
        classify,
        failed: false,
    }
}

/// An iterator decoding entities until the end of a reader.
///
/// Blank lines after the last entity end iteration. Iteration also stops
/// after the first error, as the position of the next entity is then unknown.
#[derive(Debug)]
pub struct Entities<R, C> {
    r: R,
    classify: C,
    failed: bool,
}

impl<R, C> Entities<R, C> {
    /// Release the underlying reader.
    pub fn into_inner(self) -> R {
        self.r
    }
}

impl<R: Read + Seek, C: Classify> Iterator for Entities<R, C> {
    type Item = Result<Entity, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let entity = match trailing_separator(&mut self.r) {
            Ok(true) => return None,
            Ok(false) => decode(&mut self.r, &self.classify),
            Err(err) => Err(err.into()),
        };

        self.failed = entity.is_err();

        Some(entity)
    }
}

/// Count the bytes between the cursor and the end of a reader.
fn remaining(r: &mut impl Seek) -> std::io::Result<u64> {
    let position = r.stream_position()?;
    let end = r.seek(SeekFrom::End(0))?;
    r.seek(SeekFrom::Start(position))?;

    Ok(end.saturating_sub(position))
}

/// Whether the reader is at the end, or before only stray line separators.
/// The cursor is left where it was.
fn trailing_separator<R: Read + Seek>(r: &mut R) -> std::io::Result<bool> {
    let n = remaining(r)?;
    if n == 0 {
        return Ok(true);
    }
    if n >= HEADER_LEN as u64 {
        return Ok(false);
    }

    let mut rest = Vec::new();
    r.read_to_end(&mut rest)?;
    r.seek_relative(-(rest.len() as i64))?;

    Ok(is_trailing_separator(&rest))
}

/// Read the byte at the cursor without consuming it, if the document has not
/// ended.
fn peek<R: Read + Seek>(r: &mut R, i: u64, end: u64) -> Result<Option<u8>, Error> {
    if i >= end {
        return Ok(None);
    }

    let mut buf = [0; 1];
    r.read_exact(&mut buf)?;
    r.seek_relative(-1)?;

    Ok(Some(buf[0]))
}

/// Take an exact number of bytes from a reader, advancing a position counter.
fn take<const N: usize>(r: &mut impl Read, i: &mut u64) -> Result<[u8; N], Error> {
    let mut buf = [0; N];

    r.read_exact(&mut buf).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => Error::UnexpectedEndOfStream {
            offset: *i,
            needed: N,
        },
        _ => Error::Io(err),
    })?;

    *i += N as u64;

    Ok(buf)
}
