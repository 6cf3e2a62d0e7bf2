pub mod cov_notification;
pub mod i_am;
pub mod property;
pub mod read_property;
pub mod subscribe_cov;
pub mod who_is;
pub mod write_property;

pub use cov_notification::CovNotificationRequest;
pub use i_am::IAmRequest;
pub use property::{PropertyData, PropertyValue};
pub use read_property::{ReadPropertyAck, ReadPropertyRequest};
pub use subscribe_cov::SubscribeCovRequest;
pub use who_is::WhoIsRequest;
pub use write_property::WritePropertyRequest;
