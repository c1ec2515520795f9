pub mod key_symbols;
pub mod registry;
