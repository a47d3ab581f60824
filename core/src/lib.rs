//! Domain core for the per-user todo service.
//!
//! # Overview
//! Holds the in-memory `TodoStore` and the HAL presenter that turns stored
//! items into hypermedia representations. No I/O happens here; the server
//! crate owns routing, validation and status codes.
//!
//! # Design
//! - `TodoStore` is an explicit instance, shared by reference (`Arc`) with
//!   request handlers. Identifier allocation and append happen under one lock.
//! - Presenter functions take the external base URL as an argument.
//! - Not-found is a `TodoError` value, matched on by the transport.

pub mod error;
pub mod hal;
pub mod store;
pub mod types;

pub use error::TodoError;
pub use hal::{
    present_collection, present_error, present_item, ErrorBody, Link, TodoCollection,
    TodoResource,
};
pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoId};
