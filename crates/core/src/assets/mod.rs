//! Assets module - investable instruments and their lots.

mod assets_model;


pub use assets_model::{Asset, NewAsset};
