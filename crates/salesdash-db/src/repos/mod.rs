//! Repository modules

pub mod business;
pub mod sales;
pub mod user;

pub use business::BusinessRepo;
pub use sales::SalesRepo;
pub use user::UserRepo;
