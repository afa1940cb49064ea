mod helpers;

mod cursor_tests;
