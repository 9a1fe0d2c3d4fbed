//! LinkedList - односвязный список, голова которого является дескриптором.
//!
//! # Модули
//!
//! - `list_base`: контейнер и его операции.
//! - `safety`: валидация инвариантов.

pub mod list_base;
pub mod safety;

pub use list_base::*;
pub use safety::*;
