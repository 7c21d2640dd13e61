mod meta_tests;
mod pipeline_tests;
