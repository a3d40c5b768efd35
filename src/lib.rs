pub mod config;
pub mod data;
pub mod error;
pub mod esi;
pub mod lock;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
