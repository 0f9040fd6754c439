//! Ports - Interfaces between the application and infrastructure layers

pub mod outbound;
