use quill_engine::list::{ListError, Tag, TaggedList, TaggedValue};

fn sample() -> TaggedList {
    let mut list = TaggedList::new();
    list.push(5);
    list.push("ab");
    list.push(2.5);
    list
}

#[test]
fn find_and_remove_string() {
    let mut list = sample();
    let needle = TaggedValue::from("ab");

    assert_eq!(list.find(&needle), Some(1));
    assert_eq!(list.remove(&needle), Some(1));
    assert_eq!(list.len(), 2);
    assert_eq!(list.get_i32(0), Ok(5));
    assert_eq!(list.get_f64(1), Ok(2.5));
    assert_eq!(list.type_signature(), "[i, d]");
    assert_eq!(list.remove(&needle), None);
}

#[test]
fn capacity_tracks_growth_and_shrink() {
    let mut list = sample();
    assert_eq!(list.capacity(), 4);

    list.push(true);
    assert_eq!(list.capacity(), 4);
    list.push(7i16);
    assert_eq!(list.capacity(), 8);

    for _ in 0..3 {
        list.pop();
    }
    assert_eq!(list.len(), 2);
    assert_eq!(list.capacity(), 2);

    list.clear();
    assert_eq!(list.capacity(), 1);
    assert!(list.is_empty());
}

#[test]
fn delete_wraps_negative_index() {
    let mut list = sample();
    assert_eq!(list.delete(-1).map(|v| v.tag()), Ok(Tag::F64));
    assert_eq!(list.delete(-3).map(|v| v.tag()), Ok(Tag::Str));
    assert_eq!(list.len(), 1);

    list.clear();
    assert_eq!(list.delete(0).map(|v| v.tag()), Err(ListError::Empty));
}

#[test]
fn delete_range_resizes_exactly() {
    let mut list = TaggedList::new();
    for i in 0..10 {
        list.push(i);
    }
    list.delete_range(7, 2);
    assert_eq!(list.len(), 5);
    assert_eq!(list.capacity(), 5);
    assert_eq!(list.get_i32(2), Ok(7));

    list.delete_range(0, 4);
    assert!(list.is_empty());
    assert_eq!(list.capacity(), 1);
}

#[test]
fn typed_read_reports_mismatch() {
    let list = sample();
    assert_eq!(
        list.get_f64(1),
        Err(ListError::TagMismatch { index: 1, expected: Tag::F64, found: Tag::Str })
    );
    assert_eq!(
        list.get_i32(3),
        Err(ListError::IndexOutOfRange { index: 3, len: 3 })
    );
}

#[test]
fn copy_is_deep() {
    let mut inner = TaggedList::new();
    inner.push("leaf");
    let mut outer = sample();
    outer.push(inner);

    let mut copy = TaggedList::new();
    outer.copy_into(&mut copy);

    outer.clear();
    assert_eq!(copy.len(), 4);
    assert_eq!(copy.capacity(), 4);
    assert_eq!(copy.get_str(1), Ok("ab"));
    let nested = copy.get_list(3).expect("nested list");
    assert_eq!(nested.get_str(0), Ok("leaf"));
}

#[test]
fn display_lists_values() {
    let mut list = sample();
    list.push(b'x');
    assert_eq!(list.to_string(), "[5, ab, 2.5, x]");
}
