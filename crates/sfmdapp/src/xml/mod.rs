//! XML codec: lenient decoding into an owned [`Element`] tree and canonical
//! encoding back to bytes.

pub mod decode;
pub mod element;
pub mod encode;

pub use decode::decode;
pub use element::{Body, Element};
pub use encode::{encode_document, encode_fragment, XML_DECLARATION};
