//! Symbol interning for tensor and index variable names.

use string_interner::{StringInterner, DefaultSymbol, backend::StringBackend, Symbol as SymbolTrait};
use std::fmt;
use std::sync::RwLock;
use serde::{Serialize, Deserialize};
use once_cell::sync::Lazy;

/// Type alias for our interner backend
type Backend = StringBackend<DefaultSymbol>;

/// A symbol representing an interned string.
///
/// Symbols compare by their raw index, which gives all named objects
/// (tensors, index variables) a cheap total order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(u32);

impl Symbol {
    pub(crate) fn from_raw(index: u32) -> Self { Symbol(index) }
    pub fn as_raw(&self) -> u32 { self.0 }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match resolve(*self) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "?{}", self.0),
        }
    }
}

/// Global symbol interner (thread-safe).
static GLOBAL_INTERNER: Lazy<RwLock<StringInterner<Backend>>> =
    Lazy::new(|| RwLock::new(StringInterner::new()));

/// Intern a string in the global interner.
pub fn intern(s: &str) -> Symbol {
    let mut interner = GLOBAL_INTERNER.write().unwrap();
    let sym = interner.get_or_intern(s);
    Symbol(sym.to_usize() as u32)
}

/// Resolve a symbol from the global interner.
pub fn resolve(sym: Symbol) -> Option<String> {
    let interner = GLOBAL_INTERNER.read().unwrap();
    let internal_sym = DefaultSymbol::try_from_usize(sym.0 as usize)?;
    interner.resolve(internal_sym).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_interner() {
        let sym1 = intern("tensor_a");
        let sym2 = intern("tensor_a");
        assert_eq!(sym1, sym2);
        assert_eq!(resolve(sym1), Some("tensor_a".to_string()));
    }

    #[test]
    fn test_symbol_order() {
        let a = Symbol::from_raw(1);
        let b = Symbol::from_raw(2);
        assert!(a < b);
        assert_eq!(a.as_raw(), 1);
    }

    #[test]
    fn test_display() {
        let sym = intern("i");
        assert_eq!(sym.to_string(), "i");
    }
}
