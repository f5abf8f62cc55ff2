//! Concrete service adapters.
//!
//! Each adapter owns an executor and a credential and exposes a handful of
//! domain methods. Application code depends on these, never on a transport.

pub mod billing;
pub mod media;

pub use billing::{BillingAdapter, InvoiceDeserializer, InvoiceRequestSerializer};
pub use media::{MediaAdapter, MediaFeed, MediaItem};
