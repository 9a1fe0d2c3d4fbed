#![no_main]

use arbitrary::Arbitrary;
use headlist::{LinkedList, ListError};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    PushBack(i16),
    PushFront(i16),
    PopBack,
    PopFront,
    InsertAt(u8, i16),
    DeleteAt(u8),
    At(u8),
    Find(i16),
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut list = LinkedList::new();
    let mut model: Vec<i16> = Vec::new();

    for op in ops {
        match op {
            Op::PushBack(v) => {
                list.push_back(v);
                model.push(v);
            }
            Op::PushFront(v) => {
                list.push_front(v);
                model.insert(0, v);
            }
            Op::PopBack => {
                let expected = model.pop().ok_or(ListError::EmptyList {
                    operation: "pop_back",
                });
                assert_eq!(list.pop_back(), expected);
            }
            Op::PopFront => {
                let expected = if model.is_empty() {
                    Err(ListError::EmptyList {
                        operation: "pop_front",
                    })
                } else {
                    Ok(model.remove(0))
                };
                assert_eq!(list.pop_front(), expected);
            }
            Op::InsertAt(index, v) => {
                let index = usize::from(index);
                let result = list.insert_at(index, v);
                if index < model.len() {
                    assert!(result.is_ok());
                    model.insert(index, v);
                } else {
                    assert!(result.is_err());
                }
            }
            Op::DeleteAt(index) => {
                let index = usize::from(index);
                let result = list.delete_at(index);
                if index < model.len() {
                    assert_eq!(result, Ok(model.remove(index)));
                } else {
                    assert!(result.is_err());
                }
            }
            Op::At(index) => {
                let index = usize::from(index);
                assert_eq!(list.at(index).ok(), model.get(index).copied());
            }
            Op::Find(v) => {
                assert_eq!(list.find(&v), model.iter().position(|x| *x == v));
            }
            Op::Clear => {
                list.clear();
                model.clear();
            }
        }

        assert_eq!(list.get_size(), model.len());
        assert!(list.validate_invariants().is_ok());
    }
});
