mod processing_time_test;
mod task_record_test;
