//! In-memory authoritative store of todo items.
//!
//! # Design
//! The identifier counter and the item list live together behind one
//! `RwLock`. `add` holds the write lock across "allocate id" and "append", so
//! concurrent creates never share an identifier and never lose an item.
//! Reads take the shared lock and clone out, so callers never hold a guard.
//!
//! Items are kept in a `Vec` in insertion order; per-user listing is a
//! filter over it, which keeps the order stable between reads.

use chrono::Utc;
use parking_lot::RwLock;

use crate::error::TodoError;
use crate::types::{NewTodo, Todo, TodoId};

#[derive(Debug, Default)]
struct Inner {
    /// Highest identifier handed out so far.
    last_id: TodoId,
    todos: Vec<Todo>,
}

/// Shared, thread-safe todo store. Wrap in `Arc` to share between handlers.
#[derive(Debug, Default)]
pub struct TodoStore {
    inner: RwLock<Inner>,
}

impl TodoStore {
    /// Empty store; the first created item gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `todos`. The counter starts past the highest
    /// seeded identifier.
    pub fn with_items(todos: Vec<Todo>) -> Self {
        let last_id = todos.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(Inner { last_id, todos }),
        }
    }

    /// The demo data the service starts with: two items for Jack, one for Jill.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let seed = [
            (1, "Jack", "Learn Spring Boot"),
            (2, "Jack", "Learn Reactor"),
            (3, "Jill", "Learn Spring WebFlux"),
        ];
        Self::with_items(
            seed.into_iter()
                .map(|(id, user, desc)| Todo {
                    id,
                    user: user.to_string(),
                    desc: desc.to_string(),
                    target_date: Some(now),
                    done: false,
                })
                .collect(),
        )
    }

    /// All items owned by `user`, in insertion order. Unknown users get `[]`.
    pub fn list_by_user(&self, user: &str) -> Vec<Todo> {
        self.inner
            .read()
            .todos
            .iter()
            .filter(|t| t.user == user)
            .cloned()
            .collect()
    }

    /// Look up an item by identifier across all users.
    pub fn get(&self, id: TodoId) -> Result<Todo, TodoError> {
        self.inner
            .read()
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(TodoError::NotFound { id })
    }

    /// Allocate the next identifier and append a new item.
    pub fn add(&self, input: NewTodo) -> Todo {
        let mut inner = self.inner.write();
        inner.last_id += 1;
        let todo = Todo {
            id: inner.last_id,
            user: input.user,
            desc: input.desc,
            target_date: input.target_date,
            done: input.done,
        };
        inner.todos.push(todo.clone());
        todo
    }

    pub fn len(&self) -> usize {
        self.inner.read().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
