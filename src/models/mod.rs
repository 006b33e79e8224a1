mod client;
mod criteria;
mod patch;
mod phone_number;

pub use client::{Client, ClientId, NewClient};
pub use criteria::ClientCriteria;
pub use patch::ClientPatch;
pub use phone_number::{PhoneId, PhoneNumber};
