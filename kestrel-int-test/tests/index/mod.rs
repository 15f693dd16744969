mod compound_index_test;
mod index_test;
