//! Request handlers

pub mod auth;
pub mod business;
pub mod dashboard;
pub mod health;
pub mod sales;
