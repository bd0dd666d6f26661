//! Background tasks: the push poller and the render ticker.

mod poller;
mod ticker;

pub use poller::Poller;
pub use ticker::Ticker;
