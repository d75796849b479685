mod flat_index_test;
mod text_block_test;
