pub mod list;

// Публичный экспорт типов ошибок из вложенных модулей, чтобы упростить
// доступ к ним из внешнего кода.
pub use list::*;
