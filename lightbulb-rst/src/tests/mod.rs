mod inline_tests;
