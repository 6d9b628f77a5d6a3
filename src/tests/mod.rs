//! Internal test modules.

mod unmarshal_tests;
