#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod args;
mod log;
mod output;
mod resource;

pub use self::{args::Args, log::LogFormat, output::Format};
