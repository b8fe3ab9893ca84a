mod classification;
mod device_type;
mod request;

pub use classification::*;
pub use device_type::*;
pub use request::*;
