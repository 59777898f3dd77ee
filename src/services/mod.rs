pub mod address_export;
pub mod company_rules;
pub mod event_sync;
pub mod url_shortener;
