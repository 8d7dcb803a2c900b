mod read_test;
mod tree_test;
mod write_test;
