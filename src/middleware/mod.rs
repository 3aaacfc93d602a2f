pub mod bearer_auth;
