mod creation_tests;
mod gesture_tests;
mod selection_tests;
