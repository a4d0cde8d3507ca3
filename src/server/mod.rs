mod audio_routes;
mod server;
mod state;

pub use server::run_server;
pub use state::ServerState;
