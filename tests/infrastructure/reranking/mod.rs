mod reranker_test;
