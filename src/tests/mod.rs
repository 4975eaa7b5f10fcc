mod utils;

mod selection_tests;
mod value_tests;
