pub mod pipeline_tests;
