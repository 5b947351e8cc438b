pub mod booking;
pub mod holiday;
pub mod macros;
pub mod reference;
pub mod time;

pub use booking::*;
pub use holiday::*;
pub use reference::*;
pub use time::*;
