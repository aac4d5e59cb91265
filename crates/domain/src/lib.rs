mod expiry;
mod reminder;
mod shared;
mod user;
mod vehicle;

pub use expiry::{
    classify, days_until, min_expiry, ExpiryStatus, ExpiryType, InvalidExpiryTypeError, MinExpiry,
};
pub use reminder::{ReminderLog, SweepReport};
pub use shared::entity::{Entity, ID};
pub use user::{InvalidLanguageError, Language, User};
pub use vehicle::Vehicle;
