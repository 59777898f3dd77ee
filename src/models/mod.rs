pub mod address;
pub mod application;
pub mod business_category;
pub mod company;
pub mod event;
pub mod payment;
pub mod picture;
pub mod user;
