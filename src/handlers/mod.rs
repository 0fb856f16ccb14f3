//! Endpoint handlers. Each one validates its input, takes a fresh
//! connection, runs its queries and releases the connection before answering.

pub mod contact;
pub mod dashboard;
pub mod donations;
pub mod home;
pub mod stories;
pub mod students;
pub mod volunteers;
