pub mod auth;
pub mod master_shot;
pub mod nas_server;
pub mod tracker;
pub mod version_shot;
