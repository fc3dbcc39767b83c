#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod answers;
mod client;
mod errors;
mod identity;
mod labconfig;
mod pod;
mod transport;
mod types;
pub use answers::*;
pub use client::*;
pub use errors::*;
pub use identity::*;
pub use labconfig::*;
pub use pod::*;
pub use transport::*;
pub use types::*;
