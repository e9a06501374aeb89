//! External processes launched by the dashboard

pub mod player;
