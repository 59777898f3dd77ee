pub mod calendar_client;
pub mod url_shortener_client;
