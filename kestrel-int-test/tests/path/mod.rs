mod array_filter_test;
mod resolver_test;
