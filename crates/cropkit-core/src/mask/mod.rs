//! Shape masks for crop output.
//!
//! Masks decide per output pixel whether it belongs to the crop shape.
//! Coverage is evaluated at pixel centres and is binary: a pixel is either
//! kept untouched or made fully transparent, so masked exports carry no
//! partially transparent fringe.

pub mod circle;

pub use circle::CircleMask;
