//! Audio decoding and normalization.

pub mod decode;
pub mod normalize;

pub use decode::{DecodedAudio, decode, resample};
pub use normalize::{NormalizedAudio, normalize};
