//! Layouts of the header's name-format slot.
//!
//! Columns 5 to 32 of a header hold one of seven layouts, selected by the
//! name-format type character that precedes them. Every layout here spans the
//! whole slot; bytes a format leaves unused are kept but never published.

use alloc::{collections::BTreeMap, string::String};
use core::fmt::Display;

use zerocopy::FromBytes;

use crate::{Columns, Text};

/// Width of the name-format slot in bytes.
pub const SLOT_LEN: usize = 28;

/// Decoder for the name-format slot.
pub type Handler = fn(&[u8; SLOT_LEN]) -> NameFormat;

const HANDLERS: [Handler; 7] = [
    |r| NameFormat::Section(zerocopy::transmute!(*r)),
    |r| NameFormat::AtbSurvey(zerocopy::transmute!(*r)),
    |r| NameFormat::AlphaSection(zerocopy::transmute!(*r)),
    |r| NameFormat::Abstract(zerocopy::transmute!(*r)),
    |r| NameFormat::StateCounty(zerocopy::transmute!(*r)),
    |r| NameFormat::Alpha(zerocopy::transmute!(*r)),
    |r| NameFormat::SurveyList(zerocopy::transmute!(*r)),
];

/// Select the slot decoder for a name-format type character (`b'0'` to
/// `b'6'`).
pub fn handler(format_type: u8) -> Option<Handler> {
    let index = format_type.checked_sub(b'0')?;
    HANDLERS.get(usize::from(index)).copied()
}

/// A decoded name-format slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFormat {
    /// Format `0`.
    Section(Section),
    /// Format `1`.
    AtbSurvey(AtbSurvey),
    /// Format `2`.
    AlphaSection(AlphaSection),
    /// Format `3`.
    Abstract(Abstract),
    /// Format `4`.
    StateCounty(StateCounty),
    /// Format `5`.
    Alpha(Alpha),
    /// Format `6`.
    SurveyList(SurveyList),
}

impl NameFormat {
    /// The name-format type character selecting this layout.
    pub fn format_type(&self) -> u8 {
        match self {
            Self::Section(_) => b'0',
            Self::AtbSurvey(_) => b'1',
            Self::AlphaSection(_) => b'2',
            Self::Abstract(_) => b'3',
            Self::StateCounty(_) => b'4',
            Self::Alpha(_) => b'5',
            Self::SurveyList(_) => b'6',
        }
    }

    /// The format-specific fields, keyed by column name.
    ///
    /// The key set is exactly the column set of the selected format. The map
    /// is rebuilt on every call.
    pub fn variable_data(&self) -> BTreeMap<&'static str, String> {
        self.columns()
    }
}

impl Columns for NameFormat {
    fn visit_columns(&self, visit: &mut dyn FnMut(&'static str, &dyn Display)) {
        match self {
            Self::Section(f) => f.visit_columns(visit),
            Self::AtbSurvey(f) => f.visit_columns(visit),
            Self::AlphaSection(f) => f.visit_columns(visit),
            Self::Abstract(f) => f.visit_columns(visit),
            Self::StateCounty(f) => f.visit_columns(visit),
            Self::Alpha(f) => f.visit_columns(visit),
            Self::SurveyList(f) => f.visit_columns(visit),
        }
    }
}

/// Format `0`: township, range and section.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct Section {
    #[column("APIStateCode")]
    pub api_state_code: Text<2>,
    #[column("APICountyCode")]
    pub api_county_code: Text<3>,
    _reserved: [u8; 1],
    #[column("TownshipNumber")]
    pub township_number: Text<3>,
    #[column("TownshipDirection")]
    pub township_direction: Text<1>,
    #[column("RangeNumber")]
    pub range_number: Text<3>,
    #[column("RangeDirection")]
    pub range_direction: Text<1>,
    #[column("SectionNumber")]
    pub section_number: Text<3>,
    _unused: [u8; 11],
}

/// Format `1`: ATB number and survey.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct AtbSurvey {
    #[column("APIStateCode")]
    pub api_state_code: Text<2>,
    #[column("APICountyCode")]
    pub api_county_code: Text<3>,
    #[column("Prefix")]
    pub prefix: Text<1>,
    #[column("ATBNumber")]
    pub atb_number: Text<6>,
    #[column("SurveyNumber")]
    pub survey_number: Text<5>,
    _unused: [u8; 11],
}

/// Format `2`: township, range and alphanumeric section name.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct AlphaSection {
    #[column("APIStateCode")]
    pub api_state_code: Text<2>,
    #[column("APICountyCode")]
    pub api_county_code: Text<3>,
    #[column("TownshipValue")]
    pub township_value: Text<3>,
    #[column("TownshipDirection")]
    pub township_direction: Text<1>,
    #[column("RangeNumber")]
    pub range_number: Text<3>,
    #[column("RangeDirection")]
    pub range_direction: Text<1>,
    #[column("AlphaSectionName")]
    pub alpha_section_name: Text<5>,
    _unused: [u8; 10],
}

/// Format `3`: abstract and survey.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct Abstract {
    #[column("APIStateCode")]
    pub api_state_code: Text<2>,
    #[column("APICountyCode")]
    pub api_county_code: Text<3>,
    #[column("Prefix")]
    pub prefix: Text<1>,
    #[column("AlphaAbstractName")]
    pub alpha_abstract_name: Text<6>,
    _reserved: [u8; 1],
    #[column("SurveyNumber")]
    pub survey_number: Text<5>,
    _unused: [u8; 10],
}

/// Format `4`: state and county name.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct StateCounty {
    #[column("APIStateCode")]
    pub api_state_code: Text<2>,
    #[column("APICountyCode")]
    pub api_county_code: Text<3>,
    #[column("StateCountyName")]
    pub state_county_name: Text<14>,
    _unused: [u8; 9],
}

/// Format `5`: free alphanumeric name.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct Alpha {
    #[column("AlphaName")]
    pub alpha_name: Text<19>,
    _unused: [u8; 9],
}

/// Format `6`: survey code list with block, league or township, and SLT/SA
/// numbers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes)]
pub struct SurveyList {
    pub api_state_code: Text<2>,
    pub api_county_code: Text<3>,
    pub survey_code_list_number: Text<3>,
    pub blt_flag: Text<1>,
    blt: [u8; 7],
    pub slt_flag: Text<1>,
    pub slt_number: Text<5>,
    pub sa_flag: Text<1>,
    pub sa_number: Text<5>,
}

impl SurveyList {
    /// The seven bytes following the BLT flag, relabelled by its value.
    pub fn blt(&self) -> Blt {
        match self.blt_flag.as_bytes() {
            b"B" => Blt::Block(zerocopy::transmute!(self.blt)),
            b"L" => Blt::League(zerocopy::transmute!(self.blt)),
            b"T" => Blt::Township(zerocopy::transmute!(self.blt)),
            _ => Blt::Blank,
        }
    }
}

impl Columns for SurveyList {
    fn visit_columns(&self, visit: &mut dyn FnMut(&'static str, &dyn Display)) {
        visit("APIStateCode", &self.api_state_code);
        visit("APICountyCode", &self.api_county_code);
        visit("SurveyCodeListNumber", &self.survey_code_list_number);
        visit("BLTFlag", &self.blt_flag);
        self.blt().visit_columns(visit);
        visit("SLTFlag", &self.slt_flag);
        visit("SLTNumber", &self.slt_number);
        visit("SAFlag", &self.sa_flag);
        visit("SANumber", &self.sa_number);
    }
}

/// Block, league or township span of a format `6` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blt {
    /// BLT flag `B`.
    Block(Block),
    /// BLT flag `L`.
    League(League),
    /// BLT flag `T`.
    Township(Township),
    /// Any other BLT flag; the span is skipped.
    Blank,
}

impl Columns for Blt {
    fn visit_columns(&self, visit: &mut dyn FnMut(&'static str, &dyn Display)) {
        match self {
            Self::Block(b) => b.visit_columns(visit),
            Self::League(l) => l.visit_columns(visit),
            Self::Township(t) => t.visit_columns(visit),
            Self::Blank => {}
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct Block {
    #[column("BlockName")]
    pub block_name: Text<6>,
    _reserved: [u8; 1],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct League {
    #[column("LeagueName")]
    pub league_name: Text<6>,
    _reserved: [u8; 1],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Columns)]
pub struct Township {
    #[column("BlockNumber")]
    pub block_number: Text<4>,
    #[column("TownshipNumber")]
    pub township_number: Text<2>,
    #[column("TownshipDirection")]
    pub township_direction: Text<1>,
}
