//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over how
//! bytes are buffered and read. See [`crate::avec`] for decoders covering
//! common patterns.
//!
//! # Architecture
//!
//! Every state is represented by a non-copy token. Once enough bytes are
//! ready, transition to another state by calling the token's `advance` method
//! with exactly the number of bytes its signature asks for. This returns a
//! successor state token, along with any decoded data.
//!
//! An entity is decoded as follows:
//!
//! 1. [`EntityHeader`](header::EntityHeader) takes the four leading header
//!    bytes and selects a name format, failing on an unsupported one.
//! 2. [`VariableSection`](header::VariableSection) always takes the full
//!    28-byte slot, however many of those bytes the selected format uses.
//! 3. [`HeaderTrail`](header::HeaderTrail) takes the remaining 48 header
//!    bytes and produces the [`Header`](header::Header).
//! 4. [`Separator`](record::Separator) takes a two-byte line separator, or
//!    nothing when fewer than two bytes remain.
//! 5. [`RecordType`](record::RecordType) inspects the next byte and either
//!    moves to an annotation or coordinate record (after which a separator
//!    follows again), or ends the entity.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! entered directly, through its associated `advance` function. Some parts of decoding are not represented in the state
//! machine and must be carefully written:
//!
//! - Counting remaining bytes, which decides whether a separator is read.
//!
//! - Consuming the record-type byte only when [`RecordType`](record::RecordType)
//!   moves to a record. A byte ending the entity belongs to whatever follows.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod field;
pub mod header;
pub mod name_format;
pub mod record;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::EntityHeader;
