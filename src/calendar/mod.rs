mod event;
mod extract;
mod fetcher;
mod locator;
mod service;

pub use event::*;
pub use extract::*;
pub use fetcher::*;
pub use locator::*;
pub use service::*;
