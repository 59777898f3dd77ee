pub mod company_routes;
