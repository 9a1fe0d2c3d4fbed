use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки операций над связным списком.
///
/// Все ошибки обнаруживаются до начала изменения списка, поэтому после
/// неудачного вызова список остаётся в прежнем состоянии.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Конструктору с размером передано недопустимое количество элементов.
    #[error("Invalid size: cannot build a list of {count} elements")]
    InvalidArgument { count: usize },
    /// Удаление из пустого списка.
    #[error("Cannot {operation} from empty list")]
    EmptyList { operation: &'static str },
    /// Индекс за пределами `[0, size)`.
    #[error("Index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

impl ErrorExt for ListError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument { .. } => StatusCode::InvalidArgs,
            Self::EmptyList { .. } => StatusCode::EmptyContainer,
            Self::IndexOutOfRange { .. } => StatusCode::IndexOutOfBounds,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidArgument { .. } => "Invalid size".to_string(),
            Self::EmptyList { .. } => "List is empty".to_string(),
            Self::IndexOutOfRange { .. } => "Index out of range".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
