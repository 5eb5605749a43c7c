//! Contract types shared by the record layer and the store
//!
//! - `timestamp`: Microsecond timestamps stamped on every record

pub mod timestamp;

pub use timestamp::Timestamp;
