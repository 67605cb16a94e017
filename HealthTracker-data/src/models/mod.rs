// Storage models for rows exchanged with the record store
pub mod measurement;
