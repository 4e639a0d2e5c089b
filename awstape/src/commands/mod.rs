pub mod convert;
pub mod create;
pub mod extract;
pub mod list;

pub use convert::run as convert;
pub use create::run as create;
pub use extract::run as extract;
pub use list::run as list;
