//! # Domain Model
//!
//! Two layers, kept deliberately separate:
//!
//! - [`game`]: the wire types — what the remote collection stores and what
//!   the client serializes ([`Game`], [`GameCreate`], [`GamePatch`],
//!   [`Platform`]).
//! - [`form`]: the editing types — the five editable [`Field`]s, the form
//!   strings a session holds ([`FieldValues`]), and the conversions from form
//!   strings to wire payloads.
//!
//! The conversion step is where form-level representations (a `YYYY-MM-DD`
//! date string, a platform name) become wire values (an ISO-8601 date-time,
//! a [`Platform`] variant). A conversion failure is a local, field-scoped
//! error exactly like a validation failure; it never reaches the network.

pub mod form;
pub mod game;

pub use form::{Field, FieldValues};
pub use game::{Game, GameCreate, GamePatch, Platform};
