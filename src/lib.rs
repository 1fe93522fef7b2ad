pub mod api;
pub mod models;
pub mod server;
pub mod services;

// Re-export commonly used items
pub use server::build_router;
pub use services::player_service::PlayerService;
