#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod lookup;
pub mod pipeline;
pub mod policy;
pub mod resolver;
pub mod tables;
pub mod types;
pub mod writer;
