pub mod clients;
pub mod handlers;
pub mod identity;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod upstream;
