#![no_std]

//! A decoder for Tobin Base Acreage Schedule (BAS) cadastral records.
//!
//! A BAS file is a sequence of entities. Each entity is one fixed-width
//! header, followed by any number of annotation and coordinate records, with
//! a two-byte line separator after every record. The header reserves a 28-byte
//! slot whose layout depends on a name-format discriminator.
//!
//! Most users should begin with the decoders and iterators in the [`avec`]
//! module. Applications that manage their own buffers can drive the
//! finite-state machine in the [`sans`] module directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder (default).

extern crate alloc;
extern crate self as tobin_bas;

pub mod avec;
pub mod sans;

pub use sans::field::{Columns, Text};

/// Derive [`Columns`](trait@Columns) for a struct of fixed-width fields.
///
/// Add the `column("Name")` attribute to each field that should be published
/// under a column name, or `column(flatten)` to a field whose type itself
/// implements [`Columns`](trait@Columns). Fields without an attribute, such as
/// reserved bytes, are skipped. Columns are visited in declaration order.
///
/// ```
/// #[derive(Columns)]
/// struct Lot {
///     #[column("LotNumber")]
///     number: Text<4>,
///     _reserved: [u8; 1],
///     #[column(flatten)]
///     owner: Owner,
/// }
/// ```
pub use tobin_bas_derive::Columns;
