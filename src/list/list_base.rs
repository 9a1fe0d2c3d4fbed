use std::{fmt, mem};

use headlist_error::{ensure, ListError, ListResult};
use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use super::ValidationError;
use crate::{debug_assert_invariant, validate};

type Link<T> = Option<Box<LinkedList<T>>>;

/// Односвязный список, голова которого сама является узлом.
///
/// Значение `LinkedList<T>` одновременно и дескриптор списка, и его первый
/// узел: голова хранит первый элемент, а каждый следующий узел принадлежит
/// предыдущему через `next`. Поэтому ни одна операция не перемещает саму
/// голову: удаление первого элемента сдвигает значения, а вставка в начало
/// подшивает новый узел сразу после головы и меняет значения местами.
///
/// Пустой список: `occupied == false`, `size == 0`, `next == None`.
/// Поля `size` и `occupied` достоверны только у головы.
pub struct LinkedList<T> {
    value: T,
    next: Link<T>,
    occupied: bool,
    size: usize,
}

/// Обход цепочки узлов от головы к хвосту.
struct Chain<'a, T> {
    current: Option<&'a LinkedList<T>>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<T> LinkedList<T> {
    /// Создаёт одноэлементный список.
    pub fn from_value(value: T) -> Self {
        Self {
            value,
            next: None,
            occupied: true,
            size: 1,
        }
    }

    /// Возвращает количество элементов в списке.
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Проверяет на пустоту.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Добавляет элемент в конец.
    pub fn push_back(
        &mut self,
        value: T,
    ) {
        if !self.occupied {
            self.occupy(value);
            return;
        }

        let last = self.size - 1;
        match self.node_mut(last) {
            Some(tail) => {
                tail.next = Some(Box::new(Self::from_value(value)));
                self.size += 1;
            }
            None => {
                debug_assert_invariant!(false, "chain is shorter than size {}", self.size);
            }
        }

        self.check_head();
    }

    /// Добавляет элемент в начало.
    ///
    /// Новый узел подшивается сразу за головой, после чего значения головы и
    /// нового узла меняются местами: голова остаётся тем же объектом, но
    /// теперь хранит `value`, а прежний первый элемент оказывается на позиции
    /// 1.
    pub fn push_front(
        &mut self,
        value: T,
    ) {
        if !self.occupied {
            self.occupy(value);
            return;
        }

        let mut node = Box::new(Self::from_value(value));
        node.next = self.next.take();
        mem::swap(&mut self.value, &mut node.value);
        self.next = Some(node);
        self.size += 1;

        self.check_head();
    }

    /// Вставляет элемент на позицию `index`, сдвигая последующие элементы
    /// назад.
    ///
    /// Допустимы индексы `0..size`; `index == 0` эквивалентно
    /// [`push_front`](Self::push_front).
    pub fn insert_at(
        &mut self,
        index: usize,
        value: T,
    ) -> ListResult<()> {
        let size = self.size;
        ensure!(index < size, ListError::IndexOutOfRange { index, size });

        if index == 0 {
            self.push_front(value);
            return Ok(());
        }

        let prev = self
            .node_mut(index - 1)
            .ok_or(ListError::IndexOutOfRange { index, size })?;

        let mut node = Box::new(Self::from_value(value));
        node.next = prev.next.take();
        prev.next = Some(node);
        self.size += 1;

        Ok(())
    }

    /// Ищет узел по индексу.
    fn node(
        &self,
        index: usize,
    ) -> Option<&Self> {
        self.nodes().nth(index)
    }

    /// Ищет узел по индексу для изменения.
    ///
    /// Обход итеративный: стек не растёт с длиной списка.
    fn node_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut Self> {
        let mut current = Some(self);
        for _ in 0..index {
            current = current?.next.as_deref_mut();
        }
        current
    }

    fn nodes(&self) -> Chain<'_, T> {
        Chain {
            current: self.occupied.then_some(self),
        }
    }

    fn occupy(
        &mut self,
        value: T,
    ) {
        self.value = value;
        self.occupied = true;
        self.size = 1;
    }

    /// Отсоединяет и освобождает всех преемников головы по одному звену за
    /// раз, возвращая число освобождённых узлов.
    fn release_successors(&mut self) -> usize {
        let mut released = 0;
        let mut current = self.next.take();

        while let Some(mut node) = current {
            // Узел освобождается уже без хвоста.
            current = node.next.take();
            released += 1;
        }

        released
    }

    #[inline]
    fn check_head(&self) {
        debug_assert_invariant!(
            self.occupied == (self.size > 0),
            "occupied={} but size={}",
            self.occupied,
            self.size
        );
        debug_assert_invariant!(
            self.occupied || self.next.is_none(),
            "empty head owns a successor"
        );
    }

    /// Полная проверка структурных инвариантов: согласованность флага
    /// занятости и размера, отсутствие преемников у пустой головы и точное
    /// совпадение длины цепочки с `size`.
    pub fn validate_invariants(&self) -> Result<(), ValidationError> {
        validate!(
            self.occupied == (self.size > 0),
            ValidationError::OccupancyMismatch {
                occupied: self.occupied,
                size: self.size
            }
        );

        if !self.occupied {
            validate!(self.next.is_none(), ValidationError::DanglingSuccessor);
            return Ok(());
        }

        let actual = self.nodes().take(self.size + 1).count();

        validate!(
            actual == self.size,
            ValidationError::LengthMismatch {
                expected: self.size,
                actual
            }
        );

        Ok(())
    }
}

impl<T: Default> LinkedList<T> {
    /// Создаёт пустой список.
    pub fn new() -> Self {
        Self {
            value: T::default(),
            next: None,
            occupied: false,
            size: 0,
        }
    }

    /// Удаляет последний элемент и возвращает его.
    ///
    /// Если в списке один элемент, голова не освобождается, а сбрасывается в
    /// пустое состояние.
    pub fn pop_back(&mut self) -> ListResult<T> {
        ensure!(
            self.size > 0,
            ListError::EmptyList {
                operation: "pop_back"
            }
        );

        if self.next.is_none() {
            return Ok(self.reset());
        }

        let size = self.size;
        let mut last = self
            .node_mut(size - 2)
            .and_then(|prev| prev.next.take())
            .ok_or(ListError::IndexOutOfRange {
                index: size - 1,
                size,
            })?;
        self.size -= 1;

        self.check_head();

        Ok(mem::take(&mut last.value))
    }

    /// Удаляет первый элемент и возвращает его.
    ///
    /// Значение второго узла переносится в голову, а сам второй узел
    /// отсоединяется; голова как объект остаётся на месте.
    pub fn pop_front(&mut self) -> ListResult<T> {
        ensure!(
            self.size > 0,
            ListError::EmptyList {
                operation: "pop_front"
            }
        );

        let Some(mut second) = self.next.take() else {
            return Ok(self.reset());
        };

        self.next = second.next.take();
        mem::swap(&mut self.value, &mut second.value);
        self.size -= 1;

        self.check_head();

        Ok(mem::take(&mut second.value))
    }

    /// Удаляет элемент на позиции `index` и возвращает его.
    ///
    /// Допустимы индексы `0..size`. Первый и последний элементы удаляются
    /// через [`pop_front`](Self::pop_front) и [`pop_back`](Self::pop_back).
    pub fn delete_at(
        &mut self,
        index: usize,
    ) -> ListResult<T> {
        let size = self.size;
        ensure!(index < size, ListError::IndexOutOfRange { index, size });

        if index == 0 {
            return self.pop_front();
        }

        if index == size - 1 {
            return self.pop_back();
        }

        let prev = self
            .node_mut(index - 1)
            .ok_or(ListError::IndexOutOfRange { index, size })?;
        let mut removed = prev
            .next
            .take()
            .ok_or(ListError::IndexOutOfRange { index, size })?;
        prev.next = removed.next.take();
        self.size -= 1;

        Ok(mem::take(&mut removed.value))
    }

    /// Удаляет все элементы из списка.
    ///
    /// Повторный вызов и вызов на пустом списке ничего не делают.
    pub fn clear(&mut self) {
        let released = self.release_successors();
        let _ = self.reset();

        trace!(released, "list cleared");
    }

    /// Переводит голову в пустое состояние и забирает её значение.
    fn reset(&mut self) -> T {
        self.occupied = false;
        self.size = 0;
        mem::take(&mut self.value)
    }

    /// Собирает список из последовательности значений, сохраняя порядок.
    fn from_values(values: Vec<T>) -> Self {
        let mut list = Self::new();
        for value in values.into_iter().rev() {
            list.push_front(value);
        }
        list
    }
}

impl<T: Clone> LinkedList<T> {
    /// Создаёт список из `count` копий `value`.
    ///
    /// `count == 0` возвращает [`ListError::InvalidArgument`].
    pub fn with_count(
        count: usize,
        value: T,
    ) -> ListResult<Self> {
        ensure!(count > 0, ListError::InvalidArgument { count });

        let mut chain: Link<T> = None;
        for _ in 1..count {
            let mut node = Box::new(Self::from_value(value.clone()));
            node.next = chain;
            chain = Some(node);
        }

        trace!(count, "sized list constructed");

        Ok(Self {
            value,
            next: chain,
            occupied: true,
            size: count,
        })
    }

    /// Возвращает копию значения на позиции `index`.
    pub fn at(
        &self,
        index: usize,
    ) -> ListResult<T> {
        let size = self.size;
        ensure!(index < size, ListError::IndexOutOfRange { index, size });

        self.node(index)
            .map(|node| node.value.clone())
            .ok_or(ListError::IndexOutOfRange { index, size })
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Возвращает наименьший индекс элемента, равного `value`.
    ///
    /// Пустой список сразу возвращает `None`: значение по умолчанию в
    /// незанятой голове в поиске не участвует.
    pub fn find(
        &self,
        value: &T,
    ) -> Option<usize> {
        if !self.occupied {
            return None;
        }

        self.nodes().position(|node| node.value == *value)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для LinkedList
////////////////////////////////////////////////////////////////////////////////

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = &'a LinkedList<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some(node)
    }
}

impl<T: Default> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut copy = Self {
            value: self.value.clone(),
            next: None,
            occupied: self.occupied,
            size: self.size,
        };

        let mut tail = &mut copy.next;
        for node in self.nodes().skip(1) {
            tail = &mut tail
                .insert(Box::new(Self::from_value(node.value.clone())))
                .next;
        }

        copy
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.size == other.size
            && self
                .nodes()
                .zip(other.nodes())
                .all(|(a, b)| a.value == b.value)
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes().map(|node| &node.value))
            .finish()
    }
}

impl<T: Serialize> Serialize for LinkedList<T> {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for node in self.nodes() {
            seq.serialize_element(&node.value)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for LinkedList<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(Self::from_values(values))
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        // Рекурсивное освобождение Box-цепочки переполнило бы стек на длинных
        // списках, поэтому звенья снимаются по одному.
        let released = self.release_successors();

        if released > 0 {
            trace!(released, "list chain released");
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn make_list(data: &[i32]) -> LinkedList<i32> {
        let mut list = LinkedList::new();
        for v in data {
            list.push_back(*v);
        }
        list
    }

    fn contents(list: &LinkedList<i32>) -> Vec<i32> {
        list.nodes().map(|node| node.value).collect()
    }

    #[test]
    fn test_new_is_empty_head() {
        let list: LinkedList<i32> = LinkedList::new();

        assert_eq!(list.size, 0);
        assert!(!list.occupied);
        assert!(list.next.is_none());
        assert!(list.is_empty());
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn test_from_value() {
        let list = LinkedList::from_value(5);

        assert_eq!(list.get_size(), 1);
        assert!(list.occupied);
        assert!(list.next.is_none());
        assert_eq!(list.at(0), Ok(5));
    }

    #[test]
    fn test_push_front_on_empty_occupies_head() {
        let mut list = LinkedList::new();
        list.push_front(10);

        assert!(list.occupied);
        assert!(list.next.is_none());
        assert_eq!(list.value, 10);
    }

    /// Вставка в начало не создаёт новую голову: старое значение головы
    /// переезжает во второй узел.
    #[test]
    fn test_push_front_swaps_into_spliced_node() {
        let mut list = make_list(&[1, 2]);
        list.push_front(0);

        assert_eq!(list.value, 0);
        let second = list.next.as_deref().unwrap();
        assert_eq!(second.value, 1);
        assert_eq!(second.next.as_deref().unwrap().value, 2);
        assert_eq!(list.get_size(), 3);
    }

    #[test]
    fn test_push_back_appends() {
        let mut list = LinkedList::new();
        list.push_back(10);
        list.push_back(20);

        assert!(list.next.is_some());
        assert_eq!(contents(&list), vec![10, 20]);
    }

    #[test]
    fn test_pop_on_empty_fails() {
        let mut list: LinkedList<i32> = LinkedList::new();

        assert_eq!(
            list.pop_back(),
            Err(ListError::EmptyList {
                operation: "pop_back"
            })
        );
        assert_eq!(
            list.pop_front(),
            Err(ListError::EmptyList {
                operation: "pop_front"
            })
        );
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn test_pop_single_resets_head() {
        let mut list = LinkedList::from_value(7);

        assert_eq!(list.pop_back(), Ok(7));
        assert!(!list.occupied);
        assert_eq!(list.size, 0);
        assert_eq!(list.value, 0);

        list.push_back(8);
        assert_eq!(list.pop_front(), Ok(8));
        assert!(list.is_empty());
    }

    #[test]
    fn test_pop_front_shifts_values() {
        let mut list = make_list(&[1, 2, 3]);

        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(contents(&list), vec![2, 3]);
        assert_eq!(list.get_size(), 2);
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn test_pop_back_unlinks_tail() {
        let mut list = make_list(&[1, 2, 3]);

        assert_eq!(list.pop_back(), Ok(3));
        assert_eq!(contents(&list), vec![1, 2]);
        assert!(list.node(1).unwrap().next.is_none());
    }

    #[test]
    fn test_insert_at_middle() {
        let mut list = make_list(&[1, 3]);

        list.insert_at(1, 2).unwrap();

        assert_eq!(contents(&list), vec![1, 2, 3]);
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn test_insert_at_out_of_range_leaves_list() {
        let mut list = make_list(&[1, 2]);

        assert_eq!(
            list.insert_at(2, 9),
            Err(ListError::IndexOutOfRange { index: 2, size: 2 })
        );
        assert_eq!(contents(&list), vec![1, 2]);

        let mut empty: LinkedList<i32> = LinkedList::new();
        assert!(empty.insert_at(0, 1).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_delete_at_positions() {
        let mut list = make_list(&[1, 2, 3, 4]);

        assert_eq!(list.delete_at(2), Ok(3));
        assert_eq!(contents(&list), vec![1, 2, 4]);
        assert_eq!(list.delete_at(2), Ok(4));
        assert_eq!(list.delete_at(0), Ok(1));
        assert_eq!(contents(&list), vec![2]);
        assert_eq!(
            list.delete_at(1),
            Err(ListError::IndexOutOfRange { index: 1, size: 1 })
        );
        assert_eq!(list.delete_at(0), Ok(2));
        assert!(list.is_empty());
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn test_find_first_match() {
        let list = make_list(&[5, 6, 5]);

        assert_eq!(list.find(&5), Some(0));
        assert_eq!(list.find(&6), Some(1));
        assert_eq!(list.find(&7), None);
    }

    /// Незанятая голова хранит `T::default()`, но поиск по пустому списку
    /// ничего не находит.
    #[test]
    fn test_find_on_empty_ignores_default_head() {
        let list: LinkedList<i32> = LinkedList::new();
        assert_eq!(list.find(&0), None);

        let mut list = LinkedList::from_value(0);
        list.clear();
        assert_eq!(list.find(&0), None);
    }

    #[test]
    fn test_with_count() {
        let list = LinkedList::with_count(3, 7).unwrap();

        assert_eq!(contents(&list), vec![7, 7, 7]);
        assert!(list.validate_invariants().is_ok());
        assert_eq!(
            LinkedList::with_count(0, 7).unwrap_err(),
            ListError::InvalidArgument { count: 0 }
        );
    }

    #[test]
    fn test_clear_resets_and_allows_reuse() {
        let mut list = make_list(&[1, 2, 3]);

        list.clear();
        assert!(list.is_empty());
        assert!(list.next.is_none());
        assert!(!list.occupied);

        list.clear();
        assert!(list.is_empty());

        list.push_back(1);
        assert!(list.occupied);
        assert_eq!(list.size, 1);
        assert!(list.next.is_none());
    }

    #[test]
    fn test_release_successors_counts_nodes() {
        let mut list = make_list(&[1, 2, 3, 4]);

        assert_eq!(list.release_successors(), 3);
        assert!(list.next.is_none());
    }

    #[test]
    fn test_validate_detects_length_mismatch() {
        let mut list = make_list(&[1, 2, 3]);
        list.size = 2;

        assert_eq!(
            list.validate_invariants(),
            Err(ValidationError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_validate_detects_occupancy_mismatch() {
        let mut list = LinkedList::from_value(1);
        list.occupied = false;

        assert_eq!(
            list.validate_invariants(),
            Err(ValidationError::OccupancyMismatch {
                occupied: false,
                size: 1
            })
        );
    }

    #[test]
    fn test_validate_detects_dangling_successor() {
        let mut list: LinkedList<i32> = LinkedList::new();
        list.next = Some(Box::new(LinkedList::from_value(1)));

        assert_eq!(
            list.validate_invariants(),
            Err(ValidationError::DanglingSuccessor)
        );
    }

    #[test]
    fn test_clone_and_eq() {
        let a = make_list(&[1, 2, 3]);
        let b = a.clone();

        assert_eq!(a, b);
        assert!(b.validate_invariants().is_ok());
        assert_ne!(a, make_list(&[1, 2]));
        assert_ne!(a, make_list(&[1, 2, 4]));
        assert_eq!(LinkedList::<i32>::new(), LinkedList::new());
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", make_list(&[1, 2])), "[1, 2]");
        assert_eq!(format!("{:?}", LinkedList::<i32>::new()), "[]");
    }
}
