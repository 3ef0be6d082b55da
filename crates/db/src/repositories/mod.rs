//! Zero-sized repositories; every method takes the pool as its first argument.

pub mod person_repo;
pub mod phone_repo;
pub mod profession_repo;
pub mod session_repo;
pub mod user_repo;

pub use person_repo::PersonRepo;
pub use phone_repo::PhoneRepo;
pub use profession_repo::ProfessionRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
