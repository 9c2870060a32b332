//! mrdaniel-news: grounded AI news desk and analyst chat, Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
