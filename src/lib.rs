pub mod config;
pub mod error;
pub mod state;
pub mod wiki {
    pub mod loader;
    pub mod page;
    pub mod search;
}
pub mod bot {
    pub mod allowlist;
    pub mod dispatcher;
    pub mod lifecycle;
}
pub mod platform {
    pub mod client;
    pub mod types;
}
pub mod api {
    pub mod errors;
    pub mod events;
    pub mod interactions;
    pub mod router;
    pub mod status;
}
