mod browser;
mod raster;

pub use browser::*;
pub use raster::*;
