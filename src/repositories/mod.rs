pub mod address_repository;
pub mod application_repository;
pub mod company_repository;
pub mod event_repository;
