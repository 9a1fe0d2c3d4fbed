/// Макрос для debug-time проверки инвариантов.
///
/// В release-сборках компилируется в no-op.
#[macro_export]
macro_rules! debug_assert_invariant {
    ($cond:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            if !$cond {
                panic!("Invariant violation: {}", format!($($arg)*));
            }
        }
    };
}

/// Макрос для валидации условий с возвратом ошибки.
#[macro_export]
macro_rules! validate {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Нарушение структурного инварианта списка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Флаг занятости головы не согласован с размером
    OccupancyMismatch { occupied: bool, size: usize },
    /// У пустой головы есть преемник
    DanglingSuccessor,
    /// Длина цепочки не соответствует закешированному размеру
    LengthMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ValidationError::OccupancyMismatch { occupied, size } => {
                write!(f, "Head occupancy {occupied} disagrees with size {size}")
            }
            ValidationError::DanglingSuccessor => {
                write!(f, "Empty head still owns a successor chain")
            }
            ValidationError::LengthMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
