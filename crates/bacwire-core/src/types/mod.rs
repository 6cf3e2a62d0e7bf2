pub mod enums;
pub mod object_id;
pub mod object_type;
pub mod primitive;
pub mod property_id;
pub mod status_flags;
pub mod units;
pub mod value;

pub use enums::{BinaryPv, EventState, MaxApdu, Polarity, Reliability, Segmentation};
pub use object_id::ObjectId;
pub use object_type::ObjectType;
pub use primitive::{Enumerated, Null, Primitive};
pub use property_id::PropertyId;
pub use status_flags::StatusFlags;
pub use units::EngineeringUnits;
pub use value::Value;
