//! States processing annotation and coordinate records.

use either::Either::{self, Left, Right};
use zerocopy::FromBytes;

use crate::{Columns, Text};

use super::header::EntityHeader;

/// Size of the line separator following every record.
pub const SEPARATOR_LEN: usize = 2;

/// Size of an annotation record, excluding its record-type byte.
pub const ANNOTATION_LEN: usize = 79;

/// Size of a coordinate record, excluding its record-type byte.
pub const COORDINATE_LEN: usize = 31;

/// State token to pass the line separator following a record.
#[derive(Debug)]
pub struct Separator(pub(super) ());

impl Separator {
    /// Transition to another state by passing the line separator.
    ///
    /// Supply `None` when fewer than [`SEPARATOR_LEN`] bytes remain in the
    /// document; the separator is then omitted. The separator bytes are not
    /// inspected.
    ///
    /// Returns the successor state token.
    pub fn advance(self, _r: Option<[u8; SEPARATOR_LEN]>) -> RecordType {
        RecordType(())
    }
}

/// The kind of record introduced by a record-type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Annotation,
    Coordinate,
    /// Anything else, which ends the current entity.
    Other,
}

/// Classify record-type bytes.
///
/// Implemented for [`TypeCodes`], and for any `Fn(u8) -> RecordKind`.
pub trait Classify {
    /// Classify the byte beginning the next record.
    fn classify(&self, r: u8) -> RecordKind;
}

impl<F: Fn(u8) -> RecordKind> Classify for F {
    fn classify(&self, r: u8) -> RecordKind {
        self(r)
    }
}

/// Record-type bytes for annotation and coordinate records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCodes {
    pub annotation: u8,
    pub coordinate: u8,
}

impl Default for TypeCodes {
    fn default() -> Self {
        Self {
            annotation: b'A',
            coordinate: b'C',
        }
    }
}

impl Classify for TypeCodes {
    fn classify(&self, r: u8) -> RecordKind {
        if r == self.annotation {
            RecordKind::Annotation
        } else if r == self.coordinate {
            RecordKind::Coordinate
        } else {
            RecordKind::Other
        }
    }
}

/// State token to classify the next record.
#[derive(Debug)]
pub struct RecordType(pub(super) ());

impl RecordType {
    /// Transition to another state by classifying the next byte, or `None` at
    /// the end of the document.
    ///
    /// **The byte must be consumed only if a record state is returned.** When
    /// the entity ends, the byte begins whatever follows it, usually the next
    /// entity's header.
    ///
    /// Returns a successor state token.
    pub fn advance(
        self,
        r: Option<u8>,
        classify: &impl Classify,
    ) -> Either<Either<AnnotationRecord, CoordinateRecord>, EntityHeader> {
        match r.map(|r| classify.classify(r)) {
            Some(RecordKind::Annotation) => Left(Left(AnnotationRecord(()))),
            Some(RecordKind::Coordinate) => Left(Right(CoordinateRecord(()))),
            Some(RecordKind::Other) | None => Right(EntityHeader),
        }
    }
}

/// State token to decode an annotation record.
#[derive(Debug)]
pub struct AnnotationRecord(());

impl AnnotationRecord {
    /// Transition to another state by decoding an annotation record.
    ///
    /// Returns the annotation, and a successor state token.
    pub fn advance(self, r: [u8; ANNOTATION_LEN]) -> (Annotation, Separator) {
        (zerocopy::transmute!(r), Separator(()))
    }
}

/// State token to decode a coordinate record.
#[derive(Debug)]
pub struct CoordinateRecord(());

impl CoordinateRecord {
    /// Transition to another state by decoding a coordinate record.
    ///
    /// Returns the coordinate, and a successor state token.
    pub fn advance(self, r: [u8; COORDINATE_LEN]) -> (Coordinate, Separator) {
        (zerocopy::transmute!(r), Separator(()))
    }
}

/// A text annotation placed on the map.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct Annotation {
    #[column("TextLocationLonLat")]
    pub text_location_lon_lat: Text<15>,
    #[column("TextLocationXY")]
    pub text_location_xy: Text<18>,
    #[column("TextAngle")]
    pub text_angle: Text<5>,
    #[column("TextSize")]
    pub text_size: Text<6>,
    #[column("NumberOfChars")]
    pub number_of_chars: Text<2>,
    #[column("TextFont")]
    pub text_font: Text<1>,
    #[column("Text")]
    pub text: Text<32>,
}

/// A line segment of a polygon outline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct Coordinate {
    #[column("StartPointLonLat")]
    pub start_point_lon_lat: Text<15>,
    #[column("EndPointLonLat")]
    pub end_point_lon_lat: Text<15>,
    #[column("EndOfPolygonFlag")]
    pub end_of_polygon_flag: Text<1>,
}

impl Coordinate {
    /// Whether this segment closes its polygon (flag `9`).
    pub fn is_end_of_polygon(&self) -> bool {
        self.end_of_polygon_flag.as_bytes() == b"9"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(flag: u8) -> Coordinate {
        let mut r = *b"-101.123456 31 -101.234567 31 0";
        r[COORDINATE_LEN - 1] = flag;
        let (coordinate, _) = CoordinateRecord(()).advance(r);
        coordinate
    }

    #[test]
    fn end_of_polygon_only_for_nine() {
        assert!(coordinate(b'9').is_end_of_polygon());

        for flag in [b'0', b' ', b'1', b'8', b'N', 0] {
            assert!(!coordinate(flag).is_end_of_polygon());
        }
    }

    #[test]
    fn coordinate_fields() {
        let coordinate = coordinate(b'9');
        assert_eq!(coordinate.start_point_lon_lat, "-101.123456 31 ");
        assert_eq!(coordinate.end_point_lon_lat, "-101.234567 31 ");
        assert_eq!(coordinate.end_of_polygon_flag, "9");
    }

    #[test]
    fn annotation_fields() {
        let r = *b"-101.500031.2501234567.0765432.10045.0012.50111SMITH RANCH                     ";
        let (annotation, _) = AnnotationRecord(()).advance(r);

        assert_eq!(annotation.text_location_lon_lat, "-101.500031.250");
        assert_eq!(annotation.text_location_xy, "1234567.0765432.10");
        assert_eq!(annotation.text_angle, "045.0");
        assert_eq!(annotation.text_size, "012.50");
        assert_eq!(annotation.number_of_chars, "11");
        assert_eq!(annotation.text_font, "1");
        assert_eq!(annotation.columns().len(), 7);
        assert_eq!(annotation.text.trimmed(), "SMITH RANCH");
    }

    #[test]
    fn unrecognized_record_type_ends_entity() {
        let codes = TypeCodes::default();

        assert!(matches!(
            RecordType(()).advance(Some(b'A'), &codes),
            Left(Left(_))
        ));
        assert!(matches!(
            RecordType(()).advance(Some(b'C'), &codes),
            Left(Right(_))
        ));
        assert!(matches!(
            RecordType(()).advance(Some(b'1'), &codes),
            Right(EntityHeader)
        ));
        assert!(matches!(
            RecordType(()).advance(None, &codes),
            Right(EntityHeader)
        ));
    }

    #[test]
    fn closures_classify() {
        let classify = |r: u8| match r {
            b'T' => RecordKind::Annotation,
            _ => RecordKind::Other,
        };

        assert!(matches!(
            RecordType(()).advance(Some(b'T'), &classify),
            Left(Left(_))
        ));
        assert!(matches!(
            RecordType(()).advance(Some(b'A'), &classify),
            Right(_)
        ));
    }
}
