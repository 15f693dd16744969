mod value_order_test;
