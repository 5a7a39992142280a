//! States processing entity headers.

use alloc::{collections::BTreeMap, string::String};

use thiserror::Error;
use zerocopy::FromBytes;

use crate::{Columns, Text};

use super::{
    name_format::{self, Handler, NameFormat, SLOT_LEN},
    record::Separator,
};

/// Number of bytes preceding the name-format slot.
pub const LEAD_LEN: usize = 4;

/// Number of bytes following the name-format slot.
pub const TRAIL_LEN: usize = 48;

/// Total size of a header in bytes.
pub const HEADER_LEN: usize = LEAD_LEN + SLOT_LEN + TRAIL_LEN;

/// An error advancing over a header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Name-format type outside `0` to `6`.
    #[error("Unsupported name format type ({0:#04X}).")]
    UnsupportedFormat(u8),
}

/// State token to decode the leading bytes of a header.
///
/// Returned by [`RecordType`](super::record::RecordType) when an entity ends.
#[derive(Debug)]
pub struct EntityHeader;

impl EntityHeader {
    /// Transition to another state by decoding the data type, logical level
    /// and name-format type.
    ///
    /// Returns a successor state token, which will decode the name-format
    /// slot with the layout selected here.
    pub fn advance(r: [u8; LEAD_LEN]) -> Result<VariableSection, HeaderError> {
        #[repr(C)]
        #[derive(FromBytes)]
        struct Lead {
            data_type: Text<1>,
            logical_level: Text<2>,
            name_format_type: Text<1>,
        }

        let Lead {
            data_type,
            logical_level,
            name_format_type,
        } = zerocopy::transmute!(r);

        let [format_type] = *name_format_type.as_bytes();
        let handler =
            name_format::handler(format_type).ok_or(HeaderError::UnsupportedFormat(format_type))?;

        Ok(VariableSection {
            data_type,
            logical_level,
            name_format_type,
            handler,
        })
    }
}

/// State token to decode the name-format slot of a header.
pub struct VariableSection {
    data_type: Text<1>,
    logical_level: Text<2>,
    name_format_type: Text<1>,
    handler: Handler,
}

impl VariableSection {
    /// Transition to another state by decoding the name-format slot.
    ///
    /// The slot is always taken whole, so the fields after it are found at the
    /// same offset whichever format occupies it.
    ///
    /// Returns a successor state token.
    pub fn advance(self, r: [u8; SLOT_LEN]) -> HeaderTrail {
        HeaderTrail {
            data_type: self.data_type,
            logical_level: self.logical_level,
            name_format_type: self.name_format_type,
            name_format: (self.handler)(&r),
        }
    }
}

/// State token to decode the trailing bytes of a header.
#[derive(Debug)]
pub struct HeaderTrail {
    data_type: Text<1>,
    logical_level: Text<2>,
    name_format_type: Text<1>,
    name_format: NameFormat,
}

impl HeaderTrail {
    /// Transition to another state by decoding the trailing header fields.
    ///
    /// Returns the completed header, and a successor state token.
    pub fn advance(self, r: [u8; TRAIL_LEN]) -> (Header, Separator) {
        #[repr(C)]
        #[derive(FromBytes)]
        struct Trail {
            revision_date: Text<6>,
            source_code: Text<1>,
            polygon_range_box: Text<30>,
            state_and_zone_code: Text<4>,
            number_of_polygon_parts: Text<2>,
            meridian_code: Text<3>,
            _reserved: [u8; 2],
        }

        let Trail {
            revision_date,
            source_code,
            polygon_range_box,
            state_and_zone_code,
            number_of_polygon_parts,
            meridian_code,
            ..
        } = zerocopy::transmute!(r);

        let header = Header {
            data_type: self.data_type,
            logical_level: self.logical_level,
            name_format_type: self.name_format_type,
            name_format: self.name_format,
            revision_date,
            source_code,
            polygon_range_box,
            state_and_zone_code,
            number_of_polygon_parts,
            meridian_code,
        };

        (header, Separator(()))
    }
}

/// The leading record of an entity.
///
/// All fields are kept as raw text. Columns are published in layout order,
/// with the name-format fields in place of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Columns)]
pub struct Header {
    #[column("DataType")]
    pub data_type: Text<1>,
    #[column("LogicalLevel")]
    pub logical_level: Text<2>,
    #[column("NameFormatType")]
    pub name_format_type: Text<1>,
    #[column(flatten)]
    pub name_format: NameFormat,
    #[column("RevisionDate")]
    pub revision_date: Text<6>,
    #[column("SourceCode")]
    pub source_code: Text<1>,
    #[column("PolygonRangeBox")]
    pub polygon_range_box: Text<30>,
    #[column("StateAndZoneCode")]
    pub state_and_zone_code: Text<4>,
    #[column("NumberOfPolygonParts")]
    pub number_of_polygon_parts: Text<2>,
    #[column("MeridianCode")]
    pub meridian_code: Text<3>,
}

impl Header {
    /// The name-format fields, keyed by column name.
    pub fn variable_data(&self) -> BTreeMap<&'static str, String> {
        self.name_format.variable_data()
    }
}
