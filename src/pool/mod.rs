//! Pool administration
//!
//! This module handles:
//! * Pool create / exists / delete
//! * Pool enumeration through the growable-buffer `pool_list` protocol

mod lifecycle;
mod list;

pub use list::{fetch_pool_list, parse_pool_list, INITIAL_LIST_CAPACITY};
