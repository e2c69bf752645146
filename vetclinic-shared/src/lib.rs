#![cfg_attr(not(test), forbid(unsafe_code))]

//! Records and configuration shared by the vetclinic client library and CLI.

pub mod config;
pub mod models;
