mod local_store_test;
mod observability;
