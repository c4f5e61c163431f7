pub mod attach;
pub mod overlay;
pub mod scroll;
pub mod search;

pub use attach::*;
pub use overlay::*;
pub use scroll::*;
pub use search::*;
