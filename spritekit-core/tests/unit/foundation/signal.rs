use std::{cell::Cell, rc::Rc};

use super::*;

#[test]
fn emit_reaches_every_subscriber_in_order() {
    let log = Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut sig = Signal::new();
    for i in 0..3 {
        let log = Rc::clone(&log);
        sig.subscribe(move || log.borrow_mut().push(i));
    }
    sig.emit();
    assert_eq!(*log.borrow(), vec![0, 1, 2]);
}

#[test]
fn unsubscribe_is_idempotent() {
    let hits = Rc::new(Cell::new(0));
    let mut sig = Signal::new();
    let h = Rc::clone(&hits);
    let id = sig.subscribe(move || h.set(h.get() + 1));

    assert!(sig.unsubscribe(id));
    assert!(!sig.unsubscribe(id));
    sig.emit();
    assert_eq!(hits.get(), 0);
    assert_eq!(sig.subscriber_count(), 0);
}

#[test]
fn ids_are_not_reused_after_unsubscribe() {
    let mut sig = Signal::new();
    let a = sig.subscribe(|| {});
    sig.unsubscribe(a);
    let b = sig.subscribe(|| {});
    assert_ne!(a, b);
}
