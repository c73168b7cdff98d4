pub use clock::*;
pub use error::*;
pub use message::*;
pub use session::*;

mod clock;
mod error;
mod message;
mod session;
