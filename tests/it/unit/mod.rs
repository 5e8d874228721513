mod config_tests;
mod tool_tree_tests;
