pub mod person;
pub mod phone;
pub mod profession;
pub mod session;
pub mod user;
