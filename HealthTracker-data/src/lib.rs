// HealthTracker Data
// This crate handles access to the hosted record store

// Backend connection settings
pub mod backend;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
