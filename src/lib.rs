//! Hereafter, Pal - digital memorial service backend
//!
//! Memorial pages with a photo gallery and guestbook, published only
//! while the owner holds a paid plan bought through PayMongo checkout.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
