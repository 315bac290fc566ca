//! Request construction: field catalogs, strict calendar dates, and URL
//! assembly for point queries.

mod dates;
mod error;
mod fields;
mod point;

pub use dates::is_calendar_date;
pub use error::RequestError;
pub use point::PointRequest;
