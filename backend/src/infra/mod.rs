pub mod cache;
pub mod googlebooks;
pub mod web;
