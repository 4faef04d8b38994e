pub mod crawler;
pub mod walker;
pub mod web;
