//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode whole entities from files and data
//! slices. Each call decodes one entity and leaves the cursor at the start of
//! whatever follows it; the [`Entities`](slice::Entities) iterators repeat this
//! until the end of the document.
//!
//! Record-type bytes are classified by a [`Classify`] implementation, usually
//! [`TypeCodes::default()`].

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

pub use crate::sans::record::{Classify, RecordKind, TypeCodes};

use alloc::vec::Vec;

use crate::sans::{
    header::{HEADER_LEN, Header},
    record::{Annotation, Coordinate},
};

/// One header with its annotation and coordinate records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    offset: u64,
    header: Header,
    coordinates: Vec<Coordinate>,
    annotations: Vec<Annotation>,
}

impl Entity {
    /// Byte offset in the document at which the entity began.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The header that began the entity.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Coordinate records, in document order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Annotation records, in document order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Split the coordinates into polygon parts.
    ///
    /// Each part ends with a segment flagged as the end of its polygon. Any
    /// segments after the last such flag form a final, unclosed part.
    pub fn polygons(&self) -> impl Iterator<Item = &[Coordinate]> {
        self.coordinates
            .split_inclusive(Coordinate::is_end_of_polygon)
    }
}

/// Whether the rest of a document is only stray line separators, too short to
/// begin another entity.
fn is_trailing_separator(r: &[u8]) -> bool {
    r.len() < HEADER_LEN && r.iter().all(|b| matches!(b, b'\r' | b'\n'))
}

/// Accumulates the records of one entity while it is decoded.
struct EntityBuilder {
    offset: u64,
    header: Header,
    coordinates: Vec<Coordinate>,
    annotations: Vec<Annotation>,
}

impl EntityBuilder {
    fn new(offset: u64, header: Header) -> Self {
        Self {
            offset,
            header,
            coordinates: Vec::new(),
            annotations: Vec::new(),
        }
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        log::trace!("annotation {:?}", annotation.text);
        self.annotations.push(annotation);
    }

    fn add_coordinate(&mut self, coordinate: Coordinate) {
        log::trace!(
            "coordinate {} to {}",
            coordinate.start_point_lon_lat,
            coordinate.end_point_lon_lat
        );
        self.coordinates.push(coordinate);
    }

    fn build(self) -> Entity {
        log::debug!(
            "entity at offset {} (format {}): {} coordinates, {} annotations",
            self.offset,
            self.header.name_format_type,
            self.coordinates.len(),
            self.annotations.len()
        );

        Entity {
            offset: self.offset,
            header: self.header,
            coordinates: self.coordinates,
            annotations: self.annotations,
        }
    }
}
