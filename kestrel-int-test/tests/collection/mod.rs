mod document_test;
