mod pdf_adapter_test;
mod recursive_character_splitter_test;
