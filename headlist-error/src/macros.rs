/// Немедленно возвращает ошибку из текущей функции.
///
/// Ошибка конвертируется через `Into` в тип ошибки функции.
///
/// Пример:
///
/// ```
/// use headlist_error::{bail, ListError, ListResult};
///
/// fn pop(len: usize) -> ListResult<()> {
///     if len == 0 {
///         bail!(ListError::EmptyList { operation: "pop" });
///     }
///     Ok(())
/// }
///
/// assert!(pop(0).is_err());
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err(::core::convert::Into::into($err))
    };
}

/// Проверяет условие и вызывает `bail!`, если условие ложно.
///
/// Пример:
///
/// ```
/// use headlist_error::{ensure, ListError, ListResult};
///
/// fn check(index: usize, size: usize) -> ListResult<()> {
///     ensure!(index < size, ListError::IndexOutOfRange { index, size });
///     Ok(())
/// }
///
/// assert!(check(0, 1).is_ok());
/// assert!(check(1, 1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            $crate::bail!($err);
        }
    };
}
