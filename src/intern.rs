//! Process-wide interning of configuration parameter names.
//!
//! Parameter names repeat across requests (`hostname`, `port`, ...), so each
//! distinct name is allocated once and shared. The table is a performance
//! cache only: a name that is not interned behaves identically.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// An interned parameter name.
pub type Symbol = Arc<str>;

/// Upper bound on distinct names kept; names past it are allocated per use.
const MAX_SYMBOLS: usize = 4096;

static SYMBOLS: Lazy<RwLock<HashSet<Symbol>>> = Lazy::new(|| RwLock::new(HashSet::new()));

/// Returns the shared symbol for `name`, inserting it on first sight.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use delegated_auth::intern;
///
/// let a = intern("hostname");
/// let b = intern(&String::from("hostname"));
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub fn intern(name: &str) -> Symbol {
    if let Some(symbol) = SYMBOLS.read().get(name) {
        return Arc::clone(symbol);
    }

    let mut table = SYMBOLS.write();
    // Another thread may have inserted between the read and write locks.
    if let Some(symbol) = table.get(name) {
        return Arc::clone(symbol);
    }
    let symbol: Symbol = Arc::from(name);
    if table.len() < MAX_SYMBOLS {
        table.insert(Arc::clone(&symbol));
    }
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn same_name_shares_allocation() {
        let a = intern("intern-test-port");
        let b = intern("intern-test-port");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(&*a, "intern-test-port");
    }

    #[test]
    fn distinct_names_stay_distinct() {
        let a = intern("intern-test-a");
        let b = intern("intern-test-b");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a, b);
    }

    #[test]
    fn concurrent_interning_converges() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| intern("intern-test-concurrent")))
            .collect();
        let symbols: Vec<Symbol> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for symbol in &symbols[1..] {
            assert!(Arc::ptr_eq(&symbols[0], symbol));
        }
    }
}
