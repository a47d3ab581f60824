//! HAL representations of todo items, collections and errors.
//!
//! # Design
//! Presentation is a pure function of the entity, the path user and the
//! external base URL. The base URL is always passed in by the caller; nothing
//! here reads request context. Link relations follow HAL:
//! items carry `parent` (the user's collection) and `self`, collections embed
//! their items under the fixed key `todoList` and carry their own `self`.
//!
//! The `user` used for links is the one the caller addressed, not
//! `todo.user`, so an item fetched through another user's path links back
//! under that path.

use serde::Serialize;

use crate::types::{Todo, TodoId};

/// Media type of every successful representation built here.
pub const HAL_JSON: &str = "application/hal+json";

/// Message used for the not-found error body.
pub const NOT_FOUND_MESSAGE: &str = "Todo Not Found";

/// `details` value of every error body. It does not vary per failure.
pub const ERROR_DETAILS: &str = "Any details you would want to add";

/// A single HAL link object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
}

impl Link {
    fn new(href: String) -> Self {
        Self { href }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ItemLinks {
    pub parent: Link,
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// Item representation: the todo's fields flattened, plus `_links`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TodoResource {
    #[serde(flatten)]
    pub todo: Todo,
    #[serde(rename = "_links")]
    pub links: ItemLinks,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Embedded {
    #[serde(rename = "todoList")]
    pub todo_list: Vec<TodoResource>,
}

/// Collection representation. `_embedded.todoList` is present even when empty.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TodoCollection {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

/// Structured error body returned with every 4xx response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub details: String,
}

/// `{base}/users/{user}/todos`
pub fn collection_href(base_url: &str, user: &str) -> String {
    format!(
        "{}/users/{}/todos",
        base_url.trim_end_matches('/'),
        encode_segment(user)
    )
}

/// `{base}/users/{user}/todos/{id}`
pub fn item_href(base_url: &str, user: &str, id: TodoId) -> String {
    format!("{}/{id}", collection_href(base_url, user))
}

pub fn present_item(todo: Todo, user: &str, base_url: &str) -> TodoResource {
    let links = ItemLinks {
        parent: Link::new(collection_href(base_url, user)),
        self_link: Link::new(item_href(base_url, user, todo.id)),
    };
    TodoResource { todo, links }
}

pub fn present_collection(todos: Vec<Todo>, user: &str, base_url: &str) -> TodoCollection {
    let todo_list = todos
        .into_iter()
        .map(|todo| present_item(todo, user, base_url))
        .collect();
    TodoCollection {
        embedded: Embedded { todo_list },
        links: CollectionLinks {
            self_link: Link::new(collection_href(base_url, user)),
        },
    }
}

pub fn present_error(message: impl Into<String>) -> ErrorBody {
    ErrorBody {
        message: message.into(),
        details: ERROR_DETAILS.to_string(),
    }
}

/// Percent-encode a user name for use as one path segment (RFC 3986
/// unreserved characters pass through).
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
